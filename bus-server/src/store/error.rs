//! Store error types.

/// Errors that can occur when loading or querying the stop store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading the dataset failed
    #[error("failed to read stop dataset: {0}")]
    Io(#[from] std::io::Error),

    /// The dataset is not valid JSON or has the wrong shape
    #[error("invalid stop dataset: {0}")]
    Json(#[from] serde_json::Error),

    /// The dataset is well-formed but inconsistent
    #[error("inconsistent stop dataset: {message}")]
    Inconsistent { message: String },
}
