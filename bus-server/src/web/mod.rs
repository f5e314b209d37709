//! HTTP API for stops, lines and arrivals.
//!
//! Provides JSON endpoints over the stop store, the arrivals scraper and
//! the static map snapshot builder.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
