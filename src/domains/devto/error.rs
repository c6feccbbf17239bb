//! Backend client error types.

use thiserror::Error;

/// Result type for dev.to backend operations.
pub type DevToResult<T> = Result<T, DevToError>;

/// Errors that can occur while talking to the dev.to API.
///
/// The variants are distinguishable so callers can decide how to surface
/// them; none of them is ever retried.
#[derive(Debug, Error)]
pub enum DevToError {
    /// The caller supplied missing, conflicting or malformed parameters.
    /// Raised before any network call is made.
    #[error("{0}")]
    InvalidArgument(String),

    /// The backend answered with a non-success status.
    #[error("HTTP {status}: {status_text}")]
    Upstream { status: u16, status_text: String },

    /// No usable response came back (connection, TLS, body decoding).
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),
}

impl DevToError {
    /// Create an "invalid argument" error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Short machine-readable label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::Upstream { .. } => "upstream",
            Self::Transport(_) => "transport",
        }
    }
}

impl From<reqwest::Error> for DevToError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err)
    }
}
