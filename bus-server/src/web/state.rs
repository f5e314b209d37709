//! Application state for the web layer.

use std::sync::Arc;

use crate::staticmap::SnapshotBuilder;
use crate::store::StopStore;
use crate::vitrasa::ScheduleClient;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Stop and line lookups
    pub store: Arc<dyn StopStore>,

    /// Arrivals page scraper
    pub schedules: Arc<ScheduleClient>,

    /// Static map renderer for the nearby-stops image
    pub snapshots: Arc<SnapshotBuilder>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        store: Arc<dyn StopStore>,
        schedules: ScheduleClient,
        snapshots: SnapshotBuilder,
    ) -> Self {
        Self {
            store,
            schedules: Arc::new(schedules),
            snapshots: Arc::new(snapshots),
        }
    }
}
