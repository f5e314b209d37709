//! Vitrasa arrivals page HTTP client.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::dom::Node;
use crate::domain::Schedule;
use crate::store::StopStore;

use super::error::ScheduleError;
use super::extract::extract_schedules;

/// Default arrivals page endpoint.
const DEFAULT_ENDPOINT: &str = "http://infobus.vitrasa.es:8002/Default.aspx";

/// Configuration for the arrivals client.
#[derive(Debug, Clone)]
pub struct ScheduleClientConfig {
    /// Arrivals page URL, without query string
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ScheduleClientConfig {
    /// Create a config pointing at the public Vitrasa page.
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom endpoint (for testing).
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for ScheduleClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the Vitrasa arrivals page.
///
/// Each call fetches the page for one stop, parses it, and resolves line
/// names against the store.
#[derive(Clone)]
pub struct ScheduleClient {
    http: reqwest::Client,
    endpoint: String,
    store: Arc<dyn StopStore>,
}

impl ScheduleClient {
    /// Create a new arrivals client.
    pub fn new(config: ScheduleClientConfig, store: Arc<dyn StopStore>) -> Result<Self, ScheduleError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint,
            store,
        })
    }

    /// Fetch the upcoming arrivals at a stop.
    ///
    /// Fails if the page cannot be fetched, does not contain the arrivals
    /// table, or contains any row that cannot be fully resolved.
    pub async fn get_schedules(&self, stop_number: u32) -> Result<Vec<Schedule>, ScheduleError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("parada", stop_number)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(stop_number, status = status.as_u16(), "arrivals page returned error status");
            return Err(ScheduleError::Upstream {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        debug!(stop_number, bytes = body.len(), "fetched arrivals page");

        let document = Node::parse_document(&body);
        extract_schedules(&document, self.store.as_ref()).inspect_err(|e| {
            warn!(stop_number, error = %e, "failed to extract schedules");
        })
    }
}

impl std::fmt::Debug for ScheduleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduleClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}
