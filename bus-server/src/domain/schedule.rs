//! Arrival estimates scraped from the operator's arrivals page.

use serde::Serialize;

use super::{Line, Stop};

/// One upcoming arrival at a stop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    /// The line of the arriving bus
    pub line: Line,

    /// Route label as shown on the page
    pub route: String,

    /// Minutes until the bus arrives
    pub time: u32,
}

/// A stop together with its upcoming arrivals.
#[derive(Debug, Clone, Serialize)]
pub struct StopSchedule {
    pub stop: Stop,
    pub schedules: Vec<Schedule>,
}
