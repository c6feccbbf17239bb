//! MCP Server implementation.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tools domain.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool.
//! The STDIO transport reaches them through the rmcp `ToolRouter` built in
//! `domains/tools/router.rs`; the HTTP transport goes through `ToolRegistry`.
//! **Adding a new tool does NOT require modifying this file!**

use rmcp::{
    ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler,
};
use std::sync::Arc;

use super::config::Config;
use crate::domains::devto::DevToClient;
use crate::domains::tools::{ToolRegistry, build_tool_router};

#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

const INSTRUCTIONS: &str = "Read-only access to the dev.to public API: list and search \
articles, fetch a single article, user profiles, tags and comments. \
Results are the raw API JSON.";

/// The main MCP server handler.
///
/// Cheap to clone: every HTTP session holds its own clone, all of them
/// sharing the configuration and the backend connection pool.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool registry for HTTP dispatch.
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    registry: ToolRegistry,

    /// Tool router for rmcp-driven transports.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Fails when the backend client cannot be built (e.g. bad base URL).
    pub fn new(config: Config) -> super::error::Result<Self> {
        let client = DevToClient::new(&config.backend)?;
        Ok(Self::with_client(config, client))
    }

    /// Create a server around an existing backend client.
    pub fn with_client(config: Config, client: DevToClient) -> Self {
        Self {
            config: Arc::new(config),
            tool_router: build_tool_router::<Self>(client.clone()),
            registry: ToolRegistry::new(client),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server description.
    pub fn description(&self) -> &str {
        &self.config.server.description
    }

    /// Usage instructions advertised during initialization.
    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<Tool> {
        ToolRegistry::get_all_tools()
    }

    /// Call a tool by name (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<CallToolResult, ToolError> {
        self.registry.call_tool(name, arguments).await
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: self.name().into(),
                version: self.version().into(),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_identity() {
        let server = McpServer::new(Config::default()).unwrap();
        assert_eq!(server.name(), "dev-to-mcp");
        assert_eq!(server.description(), "MCP server for dev.to public API");
        assert_eq!(server.list_tools().len(), 6);
    }

    #[test]
    fn test_bad_backend_url_fails_construction() {
        let mut config = Config::default();
        config.backend.base_url = "::nope::".to_string();
        assert!(McpServer::new(config).is_err());
    }

    #[test]
    fn test_info_advertises_tools_only() {
        let server = McpServer::new(Config::default()).unwrap();
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
    }

    #[test]
    fn test_info_reports_own_identity() {
        let mut config = Config::default();
        config.server.name = "devto-staging".to_string();
        let server = McpServer::new(config).unwrap();

        let info = server.get_info();
        assert_eq!(info.server_info.name, "devto-staging");
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(
            McpServer::new(Config::default()).unwrap().get_info().server_info.name,
            "dev-to-mcp"
        );
    }
}
