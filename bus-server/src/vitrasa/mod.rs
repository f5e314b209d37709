//! Vitrasa arrivals page scraper.
//!
//! Vitrasa publishes live arrival estimates only as an ASP.NET page, one
//! per stop, with no API. This module fetches that page and pulls the
//! arrivals out of its `GridView1` table.
//!
//! Key characteristics of the page:
//! - The first table row is a header
//! - Each data row has three cells (line, route, minutes), each wrapping
//!   its text in a `<font>` element
//! - Columns are identified by position only; there are no classes or
//!   column ids to rely on

mod client;
mod error;
mod extract;

pub use client::{ScheduleClient, ScheduleClientConfig};
pub use error::{ParseError, ScheduleError};
pub use extract::{TABLE_ID, extract_schedules};
