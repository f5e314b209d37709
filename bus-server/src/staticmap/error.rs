//! Static map error types.

/// Errors from the static map service.
///
/// Every variant means the external service could not produce an image;
/// none of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// HTTP request failed (connection, timeout, body read)
    #[error("map service request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("map service returned status {status}")]
    Status { status: u16 },

    /// The body is not a decodable image
    #[error("failed to decode map image: {0}")]
    Decode(#[source] image::ImageError),

    /// The decoded image could not be re-encoded as PNG
    #[error("failed to encode map image: {0}")]
    Encode(#[source] image::ImageError),
}
