//! Static map service client.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, ImageFormat};
use tracing::{debug, warn};

use crate::domain::{Coordinate, Stop};

use super::error::SnapshotError;

/// Default base URL for the static map service.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/staticmap";

/// Requested image size, `WIDTHxHEIGHT` in pixels.
pub const CANVAS_SIZE: &str = "600x400";

/// Marker style for the origin point.
const ORIGIN_MARKER: &str = "color:red|label:O";

/// Marker color for stops; each stop is labelled with its 1-based position.
const STOP_MARKER_COLOR: &str = "green";

/// Configuration for the static map client.
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the service
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl SnapshotConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Builds static map snapshots of an origin and a list of stops.
#[derive(Clone)]
pub struct SnapshotBuilder {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SnapshotBuilder {
    /// Create a new snapshot builder.
    pub fn new(config: SnapshotConfig) -> Result<Self, SnapshotError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    /// Fetch a map with the origin and every stop marked.
    ///
    /// Stops are labelled 1, 2, 3… in the order given, so callers that
    /// want the closest stop labelled 1 should sort first.
    pub async fn build_snapshot(
        &self,
        origin: Coordinate,
        stops: &[Stop],
    ) -> Result<DynamicImage, SnapshotError> {
        let mut query = vec![("size", CANVAS_SIZE.to_string())];
        query.extend(marker_params(origin, stops));
        query.push(("key", self.api_key.clone()));

        let response = self.http.get(&self.base_url).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "map service returned error status");
            return Err(SnapshotError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        let image = image::load_from_memory(&bytes).map_err(SnapshotError::Decode)?;

        debug!(
            markers = stops.len() + 1,
            width = image.width(),
            height = image.height(),
            "fetched map snapshot"
        );
        Ok(image)
    }
}

impl std::fmt::Debug for SnapshotBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The API key stays out of logs.
        f.debug_struct("SnapshotBuilder")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// The `markers` query parameters for an origin and its stops.
///
/// The origin comes first with its own style, then one marker per stop
/// labelled with its 1-based position.
pub fn marker_params(origin: Coordinate, stops: &[Stop]) -> Vec<(&'static str, String)> {
    std::iter::once(("markers", format!("{ORIGIN_MARKER}|{origin}")))
        .chain(stops.iter().enumerate().map(|(idx, stop)| {
            (
                "markers",
                format!(
                    "color:{STOP_MARKER_COLOR}|label:{}|{}",
                    idx + 1,
                    stop.location
                ),
            )
        }))
        .collect()
}

/// Encode an image as PNG and then as standard base64.
pub fn encode_png_base64(image: &DynamicImage) -> Result<String, SnapshotError> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(SnapshotError::Encode)?;
    Ok(STANDARD.encode(buf))
}
