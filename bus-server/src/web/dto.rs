//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, Stop};

/// Most stops drawn on the nearby-stops image.
///
/// Static map labels are single characters, so 1-9 is what fits. Larger
/// requested limits are reduced to this.
pub const MAX_NEARBY_LIMIT: usize = 9;

/// Number of stops drawn on the nearby-stops image when no limit is given.
pub const DEFAULT_NEARBY_LIMIT: usize = MAX_NEARBY_LIMIT;

/// Query for free-text stop search.
#[derive(Debug, Deserialize)]
pub struct FindStopsRequest {
    /// Substring to look for in stop names
    pub text: Option<String>,
}

/// Query for stops around a location.
#[derive(Debug, Deserialize)]
pub struct LocationRequest {
    /// Latitude in degrees
    pub lat: f64,

    /// Longitude in degrees
    pub lon: f64,

    /// Search radius in meters
    pub radius: f64,

    /// Maximum number of stops (image endpoint only, capped at 9)
    pub limit: Option<usize>,
}

/// Nearby stops together with a map of them.
#[derive(Debug, Serialize)]
pub struct NearbyStopsResponse {
    /// Where the search was centred
    pub origin: Coordinate,

    /// Search radius in meters
    pub radius: f64,

    /// Stops within the radius, closest first
    pub stops: Vec<Stop>,

    /// Base64-encoded PNG map; marker N is `stops[N - 1]`
    pub image: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
