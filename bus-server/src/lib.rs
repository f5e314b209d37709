//! Vigo bus stop server.
//!
//! Serves stops and lines from a local dataset, scrapes live arrival
//! estimates from the operator's arrivals page, and finds and maps the
//! stops around a point.

pub mod dom;
pub mod domain;
pub mod locator;
pub mod staticmap;
pub mod store;
pub mod vitrasa;
pub mod web;
