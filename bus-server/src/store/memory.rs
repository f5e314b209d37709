//! In-memory stop store backed by a JSON dataset.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{Line, Stop};

use super::StopStore;
use super::error::StoreError;

/// On-disk shape of the stop dataset.
///
/// ```json
/// {
///   "lines": [{ "id": 1, "name": "C1" }],
///   "stops": [{ "id": 1, "stop_number": 14264, "stop_id": 5520,
///               "name": "Praza de América",
///               "location": { "lat": 42.2221, "lon": -8.7315 } }]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub lines: Vec<Line>,
    #[serde(default)]
    pub stops: Vec<Stop>,
}

/// Stop store holding the whole dataset in memory.
///
/// Stop numbers and line names are unique; lookups by either are O(1).
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    stops: Vec<Stop>,
    lines: Vec<Line>,
    stops_by_number: HashMap<u32, usize>,
    lines_by_name: HashMap<String, usize>,
}

impl MemoryStore {
    /// Build a store from a dataset, rejecting duplicate keys.
    pub fn new(dataset: Dataset) -> Result<Self, StoreError> {
        let mut stops_by_number = HashMap::with_capacity(dataset.stops.len());
        for (idx, stop) in dataset.stops.iter().enumerate() {
            if stops_by_number.insert(stop.stop_number, idx).is_some() {
                return Err(StoreError::Inconsistent {
                    message: format!("duplicate stop number {}", stop.stop_number),
                });
            }
        }

        let mut lines_by_name = HashMap::with_capacity(dataset.lines.len());
        for (idx, line) in dataset.lines.iter().enumerate() {
            if lines_by_name.insert(line.name.clone(), idx).is_some() {
                return Err(StoreError::Inconsistent {
                    message: format!("duplicate line name {:?}", line.name),
                });
            }
        }

        Ok(Self {
            stops: dataset.stops,
            lines: dataset.lines,
            stops_by_number,
            lines_by_name,
        })
    }

    /// Load a store from a JSON dataset file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let dataset: Dataset = serde_json::from_str(&contents)?;
        let store = Self::new(dataset)?;

        info!(
            path = %path.display(),
            stops = store.stops.len(),
            lines = store.lines.len(),
            "loaded stop dataset"
        );
        Ok(store)
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Whether the store has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

impl StopStore for MemoryStore {
    fn stop_by_number(&self, stop_number: u32) -> Result<Option<Stop>, StoreError> {
        Ok(self
            .stops_by_number
            .get(&stop_number)
            .map(|&idx| self.stops[idx].clone()))
    }

    fn line_by_name(&self, name: &str) -> Result<Option<Line>, StoreError> {
        Ok(self
            .lines_by_name
            .get(name)
            .map(|&idx| self.lines[idx].clone()))
    }

    fn list_stops(&self) -> Result<Vec<Stop>, StoreError> {
        Ok(self.stops.clone())
    }

    fn list_lines(&self) -> Result<Vec<Line>, StoreError> {
        Ok(self.lines.clone())
    }

    fn find_stops_by_text(&self, text: &str) -> Result<Vec<Stop>, StoreError> {
        let needle = text.to_lowercase();
        Ok(self
            .stops
            .iter()
            .filter(|stop| stop.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}
