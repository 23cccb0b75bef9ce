//! Error types for fetching plugin status.

use thiserror::Error;

/// Errors that can occur when fetching from `monitor_agent`.
///
/// Only fetching can fail; projection and schema building are total over a
/// decoded snapshot.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The request could not be sent, the endpoint answered with a
    /// non-success status, or the body could not be read.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The body is not JSON or is missing the `plugins` array.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}
