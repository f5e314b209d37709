//! Arrivals scraper error types.

use crate::store::StoreError;

/// The arrivals page did not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// No element carries the arrivals table id
    #[error("table not found")]
    TableNotFound,

    /// The arrivals table has no `tbody`
    #[error("body not found")]
    BodyNotFound,

    /// A row names a line that is not in the store
    #[error("unknown line: {0}")]
    UnknownLine(String),

    /// The minutes cell is not a non-negative integer
    #[error("invalid time: {0:?}")]
    InvalidTime(String),

    /// A data row has cells but is missing a required one
    #[error("incomplete row {row}: missing {field}")]
    IncompleteRow { row: usize, field: &'static str },
}

/// Errors from fetching and extracting arrival schedules.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// HTTP request failed (connection, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The arrivals page answered with a non-success status
    #[error("arrivals page returned status {status}")]
    Upstream { status: u16 },

    /// The page could not be turned into schedules
    #[error("failed to extract schedule: {0}")]
    Parse(#[from] ParseError),

    /// Line lookup failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
