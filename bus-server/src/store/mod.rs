//! Stop and line storage.
//!
//! The schedule extractor and the HTTP layer only see the [`StopStore`]
//! trait. [`MemoryStore`] is the implementation used by the server; it
//! loads the whole dataset from a JSON file at start-up.

mod error;
mod memory;

pub use error::StoreError;
pub use memory::{Dataset, MemoryStore};

use crate::domain::{Line, Stop};

/// Read access to stops and lines.
///
/// Lookups of a single entity return `Ok(None)` when it does not exist;
/// `Err` is reserved for the store itself failing.
pub trait StopStore: Send + Sync {
    /// Look up a stop by its public stop number.
    fn stop_by_number(&self, stop_number: u32) -> Result<Option<Stop>, StoreError>;

    /// Look up a line by exact name.
    fn line_by_name(&self, name: &str) -> Result<Option<Line>, StoreError>;

    /// Every stop, in dataset order.
    fn list_stops(&self) -> Result<Vec<Stop>, StoreError>;

    /// Every line, in dataset order.
    fn list_lines(&self) -> Result<Vec<Line>, StoreError>;

    /// Stops whose name contains `text`, ignoring case.
    fn find_stops_by_text(&self, text: &str) -> Result<Vec<Stop>, StoreError>;
}
