//! Error types for classifier calls.

use thiserror::Error;

/// Result type for classifier operations.
pub type Result<T> = std::result::Result<T, ClassifierError>;

/// Errors from frame classification.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    /// The request did not complete within the configured timeout.
    #[error("classifier request timed out after {millis}ms")]
    Timeout { millis: u64 },

    /// Connection or transport failure.
    #[error("classifier request failed: {0}")]
    Request(String),

    /// Non-success HTTP status.
    #[error("classifier returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The service answered with an `error` field.
    #[error("classifier service error: {0}")]
    Service(String),

    /// Response body was not the expected JSON.
    #[error("invalid classifier response: {0}")]
    InvalidResponse(String),

    /// The returned label is not part of the label set.
    #[error("unknown label '{0}' in classifier response")]
    UnknownLabel(String),
}

impl ClassifierError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ClassifierError::Timeout { .. })
    }
}
