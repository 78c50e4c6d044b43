use thiserror::Error;

/// Failure of a single fetch attempt. Every variant is retried.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status}")]
    Status { status: u16 },

    #[error("Failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}
