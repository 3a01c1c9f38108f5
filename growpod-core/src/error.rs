//! Error types for the GrowPod client.

use thiserror::Error;

use crate::validate::ValidationError;

/// Errors that can occur in GrowPod operations.
#[derive(Error, Debug)]
pub enum GrowPodError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// No response reached the client (connection refused, DNS, timeout).
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {status_text}")]
    Status { status: u16, status_text: String },

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Calendar error: {0}")]
    Calendar(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The view was torn down before the request completed.
    #[error("Request cancelled")]
    Cancelled,
}

impl GrowPodError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, GrowPodError::Status { status: 404, .. })
    }
}

/// Result type alias for GrowPod operations.
pub type GrowPodResult<T> = Result<T, GrowPodError>;
