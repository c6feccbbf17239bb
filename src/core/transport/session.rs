//! Per-session JSON-RPC processing for the HTTP transport.
//!
//! An `McpSession` is the channel bound to one `mcp-session-id`. It owns
//! the negotiated protocol state and answers every message addressed to that
//! identifier. Tool failures never end a session: they are reported inside a
//! successful JSON-RPC response as a `CallToolResult` flagged `isError`.

use serde_json::{Value, json};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::jsonrpc::{JSONRPC_VERSION, JsonRpcRequest, JsonRpcResponse};
use crate::core::McpServer;
use crate::domains::tools::ToolError;

/// Protocol versions this server can speak, newest first.
pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] =
    &[LATEST_PROTOCOL_VERSION, "2025-03-26", "2024-11-05"];

/// Protocol version offered when the client asks for an unknown one.
pub const LATEST_PROTOCOL_VERSION: &str = "2025-06-18";

/// What the HTTP layer should send back for a message.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionReply {
    /// A JSON-RPC response body.
    Response(JsonRpcResponse),
    /// The message was a notification; acknowledge without a body.
    Accepted,
}

/// Negotiated state of a session.
#[derive(Debug, Default)]
struct SessionState {
    initialized: bool,
    client_ready: bool,
    protocol_version: Option<String>,
    client_info: Option<Value>,
}

/// One client session.
pub struct McpSession {
    id: String,
    server: McpServer,
    created: Instant,
    /// Milliseconds after `created` of the last routed request.
    last_seen_ms: AtomicU64,
    state: RwLock<SessionState>,
}

impl std::fmt::Debug for McpSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpSession")
            .field("id", &self.id)
            .field("idle_for", &self.idle_for())
            .finish()
    }
}

impl McpSession {
    /// Create an uninitialized session bound to `id`.
    pub fn new(id: impl Into<String>, server: McpServer) -> Self {
        Self {
            id: id.into(),
            server,
            created: Instant::now(),
            last_seen_ms: AtomicU64::new(0),
            state: RwLock::new(SessionState::default()),
        }
    }

    /// The session identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Record activity on this session.
    pub fn touch(&self) {
        let elapsed = self.created.elapsed().as_millis() as u64;
        self.last_seen_ms.fetch_max(elapsed, Ordering::Relaxed);
    }

    /// Time since the last routed request.
    pub fn idle_for(&self) -> Duration {
        let last_seen = Duration::from_millis(self.last_seen_ms.load(Ordering::Relaxed));
        self.created.elapsed().saturating_sub(last_seen)
    }

    /// Whether the `initialize` handshake succeeded.
    pub async fn is_initialized(&self) -> bool {
        self.state.read().await.initialized
    }

    /// Whether the client confirmed initialization with `notifications/initialized`.
    pub async fn is_client_ready(&self) -> bool {
        self.state.read().await.client_ready
    }

    /// Negotiated protocol version, once initialized.
    pub async fn protocol_version(&self) -> Option<String> {
        self.state.read().await.protocol_version.clone()
    }

    /// Process one inbound message.
    #[instrument(skip_all, fields(session_id = %self.id))]
    pub async fn handle_message(&self, message: Value) -> SessionReply {
        if message.is_array() {
            return SessionReply::Response(JsonRpcResponse::invalid_request(
                None,
                "Batch requests are not supported",
            ));
        }

        let id = message.get("id").cloned();
        let request: JsonRpcRequest = match serde_json::from_value(message) {
            Ok(request) => request,
            Err(e) => {
                warn!("Malformed JSON-RPC message: {}", e);
                return SessionReply::Response(JsonRpcResponse::invalid_request(
                    id,
                    format!("Invalid Request: {e}"),
                ));
            }
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return SessionReply::Response(JsonRpcResponse::invalid_request(
                request.id,
                "Invalid Request: jsonrpc must be \"2.0\"",
            ));
        }

        if request.is_notification() {
            self.handle_notification(&request).await;
            return SessionReply::Accepted;
        }

        SessionReply::Response(self.handle_request(request).await)
    }

    async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        debug!("Received JSON-RPC request: {}", request.method);

        if request.method != "initialize" && !self.is_initialized().await {
            return JsonRpcResponse::invalid_request(request.id, "Session not initialized");
        }

        match request.method.as_str() {
            "initialize" => self.handle_initialize(request).await,
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request),
            "tools/call" => self.handle_tools_call(request).await,
            _ => {
                warn!("Unknown method: {}", request.method);
                JsonRpcResponse::method_not_found(request.id)
            }
        }
    }

    /// Handle initialize request.
    async fn handle_initialize(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let mut state = self.state.write().await;
        if state.initialized {
            return JsonRpcResponse::invalid_request(request.id, "Session already initialized");
        }

        let params = request.params.unwrap_or(Value::Null);
        let requested = params.get("protocolVersion").and_then(Value::as_str);
        let protocol_version = match requested {
            Some(v) if SUPPORTED_PROTOCOL_VERSIONS.contains(&v) => v,
            _ => LATEST_PROTOCOL_VERSION,
        };

        state.initialized = true;
        state.protocol_version = Some(protocol_version.to_string());
        state.client_info = params.get("clientInfo").cloned();

        info!(
            protocol_version,
            client = ?state.client_info,
            "Processing initialize request"
        );

        let result = json!({
            "protocolVersion": protocol_version,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": self.server.name(),
                "version": self.server.version()
            },
            "instructions": self.server.instructions()
        });

        JsonRpcResponse::success(request.id, result)
    }

    /// Handle tools/list request.
    fn handle_tools_list(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        debug!("Processing tools/list request");
        let result = json!({ "tools": self.server.list_tools() });
        JsonRpcResponse::success(request.id, result)
    }

    /// Handle tools/call request.
    async fn handle_tools_call(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let params = match request.params {
            Some(p) => p,
            None => return JsonRpcResponse::invalid_params(request.id, "Missing params"),
        };

        let name = match params.get("name").and_then(Value::as_str) {
            Some(n) => n.to_string(),
            None => {
                let err = ToolError::invalid_arguments("Missing tool name");
                return JsonRpcResponse::invalid_params(request.id, err.to_string());
            }
        };

        let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

        info!(tool = %name, "Processing tools/call request");

        match self.server.call_tool(&name, arguments).await {
            Ok(result) => match serde_json::to_value(&result) {
                Ok(value) => JsonRpcResponse::success(request.id, value),
                Err(e) => JsonRpcResponse::internal_error(request.id, e.to_string()),
            },
            Err(e) => JsonRpcResponse::invalid_params(request.id, e.to_string()),
        }
    }

    /// Handle notifications (no response needed).
    async fn handle_notification(&self, request: &JsonRpcRequest) {
        match request.method.as_str() {
            "notifications/initialized" => {
                debug!("Client sent initialized notification");
                self.state.write().await.client_ready = true;
            }
            _ => {
                debug!("Received notification: {}", request.method);
            }
        }
    }
}
