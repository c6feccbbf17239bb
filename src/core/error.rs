//! Error types and handling for the MCP server.
//!
//! Process-level failures only: building the server and running a
//! transport. Failures inside a tool call never surface here; they come
//! back to the client as a failed tool result.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error raised by a transport (bind, serve, protocol setup).
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transport::TransportError;

    #[test]
    fn test_transport_errors_convert() {
        let err: Error = TransportError::init("handshake refused").into();
        assert!(matches!(err, Error::Transport(_)));
        assert_eq!(
            err.to_string(),
            "Transport error: Server initialization error: handshake refused"
        );
    }

    #[test]
    fn test_config_error_message() {
        assert_eq!(
            Error::config("bad URL").to_string(),
            "Configuration error: bad URL"
        );
    }
}
