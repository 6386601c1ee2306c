//! Backend error types

use thiserror::Error;

/// Everything that can go wrong between issuing a query and holding a parsed envelope.
///
/// None of these reach the user as a failure: the conversation turns them into
/// a generic text reply.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request never completed (connection refused, timeout, reset).
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not a JSON object.
    #[error("malformed response: {0}")]
    Decode(String),

    /// The task driving the request died before producing a result.
    #[error("request task failed: {0}")]
    Aborted(String),
}

impl BackendError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
