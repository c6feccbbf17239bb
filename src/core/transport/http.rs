//! HTTP transport implementation.
//!
//! Session-oriented JSON-RPC over HTTP. A client opens a session by POSTing
//! an `initialize` request without a session header; the response carries a
//! fresh `mcp-session-id`, which the client echoes on every later request.
//!
//! Routing for the MCP endpoint, first match wins:
//!
//! 1. POST, no session header, `initialize` body: create a session.
//! 2. Session header naming a live session: hand the request to it.
//! 3. POST, no session header: 400.
//! 4. Session header naming no live session: 404.
//! 5. GET, no session header: static server description.

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::error::SessionError;
use super::jsonrpc::{JsonRpcResponse, is_initialize_request};
use super::registry::{SessionPolicy, SessionRegistry};
use super::session::{McpSession, SessionReply};
use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;

/// Header carrying the session identifier.
pub const SESSION_ID_HEADER: &str = "mcp-session-id";

/// Shortest pause between two idle-session sweeps.
const MIN_REAP_INTERVAL: Duration = Duration::from_secs(1);

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Server template cloned into every new session.
    server: McpServer,
    /// Live sessions keyed by identifier.
    sessions: Arc<SessionRegistry>,
}

impl AppState {
    pub fn new(server: McpServer, sessions: Arc<SessionRegistry>) -> Self {
        Self { server, sessions }
    }
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: McpServer, policy: SessionPolicy) -> TransportResult<()> {
        let addr = self.address();
        let sessions = Arc::new(SessionRegistry::new(policy));

        if let Some(timeout) = policy.idle_timeout {
            spawn_reaper(sessions.clone(), timeout);
        }

        let app = router(AppState::new(server, sessions), &self.config);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!(
            "Ready - listening on {} (MCP over HTTP, CORS {})",
            addr, cors_status
        );
        info!("  → MCP:    POST/GET {}", self.config.rpc_path);
        info!("  → Health: GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Build the axum router for the MCP endpoint and the health check.
pub fn router(state: AppState, config: &HttpConfig) -> Router {
    let mut app = Router::new()
        .route(&config.rpc_path, post(handle_mcp).get(handle_mcp))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
            .expose_headers([axum::http::HeaderName::from_static(SESSION_ID_HEADER)]);
        app = app.layer(cors);
    }

    app
}

/// Periodically evict sessions that exceeded the idle timeout.
fn spawn_reaper(sessions: Arc<SessionRegistry>, timeout: Duration) {
    let every = (timeout / 2).max(MIN_REAP_INTERVAL);
    info!(?timeout, ?every, "Idle session reaper started");

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            sessions.reap_idle().await;
        }
    });
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Single entry point of the MCP endpoint.
#[instrument(skip_all, fields(%method, session_id = tracing::field::Empty))]
async fn handle_mcp(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let session_id = headers
        .get(SESSION_ID_HEADER)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());

    if let Some(id) = &session_id {
        tracing::Span::current().record("session_id", id.as_str());
    }

    let is_post = method == Method::POST;

    match session_id {
        None if is_post => {
            match serde_json::from_slice::<Value>(&body) {
                Ok(message) if is_initialize_request(&message) => {
                    initialize_session(&state, message).await
                }
                _ => SessionError::MissingSessionId.into_response(),
            }
        }
        None => server_info(&state.server).into_response(),
        Some(id) => match state.sessions.get(&id).await {
            Some(session) if is_post => route_to_session(&session, &body).await,
            Some(_) => {
                debug!("GET on a live session; no server-initiated stream is offered");
                StatusCode::METHOD_NOT_ALLOWED.into_response()
            }
            None => {
                debug!("Unknown session identifier");
                SessionError::NotFound.into_response()
            }
        },
    }
}

/// Create a session for an `initialize` request.
///
/// The session is registered only once the handshake succeeded, before the
/// response leaves, so a failed handshake leaves the registry untouched.
async fn initialize_session(state: &AppState, message: Value) -> Response {
    let id = Uuid::new_v4().to_string();
    let session = Arc::new(McpSession::new(id.clone(), state.server.clone()));

    let reply = session.handle_message(message).await;

    if !session.is_initialized().await {
        warn!("Initialize request failed; no session created");
        return reply_response(reply);
    }

    if let Err(e) = state.sessions.insert(session).await {
        warn!(error = %e, "Refusing new session");
        return e.into_response();
    }

    info!(session_id = %id, "Session created");

    let mut response = reply_response(reply);
    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(SESSION_ID_HEADER, value);
    }
    response
}

/// Forward a POST body to its session.
async fn route_to_session(session: &McpSession, body: &[u8]) -> Response {
    debug!("Routing request to existing session");

    let message: Value = match serde_json::from_slice(body) {
        Ok(message) => message,
        Err(e) => {
            warn!("Unparseable request body: {}", e);
            let response = JsonRpcResponse::parse_error(format!("Parse error: {e}"));
            return (StatusCode::BAD_REQUEST, Json(response)).into_response();
        }
    };

    reply_response(session.handle_message(message).await)
}

fn reply_response(reply: SessionReply) -> Response {
    match reply {
        SessionReply::Response(response) => (StatusCode::OK, Json(response)).into_response(),
        SessionReply::Accepted => StatusCode::ACCEPTED.into_response(),
    }
}

/// Static description served on a bare GET.
fn server_info(server: &McpServer) -> Json<Value> {
    Json(json!({
        "name": server.name(),
        "version": server.version(),
        "description": server.description(),
        "capabilities": ["tools"]
    }))
}
