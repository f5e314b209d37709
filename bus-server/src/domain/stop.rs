//! Stops and lines as loaded from the stop dataset.

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// A bus stop.
///
/// `stop_number` is the number printed on the stop sign and used by the
/// arrivals page; `stop_id` is the operator's internal identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Internal row identifier
    pub id: i64,

    /// Public stop number
    pub stop_number: u32,

    /// Operator-internal stop identifier
    pub stop_id: u32,

    /// Display name
    pub name: String,

    /// Where the stop is
    pub location: Coordinate,
}

/// A bus line, identified by its public name (e.g. "C1", "4A").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    pub id: i64,
    pub name: String,
}
