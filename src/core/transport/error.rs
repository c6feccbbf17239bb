//! Transport error types.

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors that can occur in transport operations.
///
/// These are process-level failures: they end the transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failed to bind to address.
    #[error("Failed to bind to {address}: {source}")]
    BindError {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// Server initialization error.
    #[error("Server initialization error: {0}")]
    InitError(String),

    /// HTTP-specific error.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Service error from rmcp.
    #[error("Service error: {0}")]
    ServiceError(String),
}

impl TransportError {
    /// Create a bind error.
    pub fn bind(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::BindError {
            address: address.into(),
            source,
        }
    }

    /// Create an initialization error.
    pub fn init(msg: impl Into<String>) -> Self {
        Self::InitError(msg.into())
    }

    /// Create an HTTP error.
    pub fn http(msg: impl Into<String>) -> Self {
        Self::HttpError(msg.into())
    }
}

/// Misuse of the HTTP session protocol.
///
/// Answered with an HTTP-level error and a `{"error": ...}` body. Never
/// creates or modifies a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A non-initialization POST arrived without a session header.
    #[error("Session ID required for non-initialization requests")]
    MissingSessionId,

    /// The session header names no live session.
    #[error("Session not found")]
    NotFound,

    /// The registry is at capacity and nothing could be evicted.
    #[error("Session limit reached")]
    CapacityExceeded,

    /// A freshly generated identifier is already registered.
    #[error("Session already exists")]
    AlreadyExists,
}

#[cfg(feature = "http")]
impl SessionError {
    /// HTTP status used to report this error.
    pub fn status_code(&self) -> http::StatusCode {
        use http::StatusCode;
        match self {
            Self::MissingSessionId => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::CapacityExceeded => StatusCode::SERVICE_UNAVAILABLE,
            Self::AlreadyExists => StatusCode::CONFLICT,
        }
    }
}

#[cfg(feature = "http")]
impl axum::response::IntoResponse for SessionError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({ "error": self.to_string() });
        (self.status_code(), axum::Json(body)).into_response()
    }
}

#[cfg(all(test, feature = "http"))]
mod tests {
    use super::*;
    use axum::response::IntoResponse;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_session_error_responses() {
        let cases = [
            (
                SessionError::MissingSessionId,
                400,
                "Session ID required for non-initialization requests",
            ),
            (SessionError::NotFound, 404, "Session not found"),
            (SessionError::CapacityExceeded, 503, "Session limit reached"),
        ];

        for (err, status, message) in cases {
            let response = err.into_response();
            assert_eq!(response.status().as_u16(), status);
            let bytes = response.into_body().collect().await.unwrap().to_bytes();
            let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body, serde_json::json!({ "error": message }));
        }
    }
}
