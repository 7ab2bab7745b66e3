//! Errors raised by chat backends.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChatError>;

/// Every variant is recoverable: [`ChatService`](crate::ChatService) answers
/// from the fallback table instead.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The HTTP client could not be constructed (bad TLS setup, invalid URL).
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    /// No response within the configured timeout.
    #[error("chat request timed out after {millis}ms")]
    Timeout { millis: u64 },

    /// Connection or transport failure.
    #[error("chat request failed: {0}")]
    Request(String),

    /// Non-2xx status. `body` is the raw response text.
    #[error("chat backend returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not the expected JSON.
    #[error("invalid chat response: {0}")]
    InvalidResponse(String),

    /// `reply` was missing or blank.
    #[error("chat backend returned an empty reply")]
    EmptyReply,
}
