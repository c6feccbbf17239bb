//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

use rmcp::model::Tool;
#[cfg(feature = "http")]
use rmcp::model::CallToolResult;
#[cfg(feature = "http")]
use tracing::warn;

#[cfg(feature = "http")]
use super::ToolError;
use super::definitions::{
    GetArticleTool, GetArticlesTool, GetCommentsTool, GetTagsTool, GetUserTool,
    SearchArticlesTool,
};
use crate::domains::devto::DevToClient;

/// Tool registry - manages all available tools.
///
/// Cheap to clone; every clone shares the backend client's connection pool.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    client: DevToClient,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(client: DevToClient) -> Self {
        Self { client }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            GetArticlesTool::NAME,
            GetArticleTool::NAME,
            GetUserTool::NAME,
            GetTagsTool::NAME,
            GetCommentsTool::NAME,
            SearchArticlesTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for all available tools.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            GetArticlesTool::to_tool(),
            GetArticleTool::to_tool(),
            GetUserTool::to_tool(),
            GetTagsTool::to_tool(),
            GetCommentsTool::to_tool(),
            SearchArticlesTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    ///
    /// Only an unknown tool name is an error here; argument and backend
    /// failures come back as a failed `CallToolResult`.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<CallToolResult, ToolError> {
        let client = self.client.clone();
        let result = match name {
            GetArticlesTool::NAME => GetArticlesTool::http_handler(arguments, client).await,
            GetArticleTool::NAME => GetArticleTool::http_handler(arguments, client).await,
            GetUserTool::NAME => GetUserTool::http_handler(arguments, client).await,
            GetTagsTool::NAME => GetTagsTool::http_handler(arguments, client).await,
            GetCommentsTool::NAME => GetCommentsTool::http_handler(arguments, client).await,
            SearchArticlesTool::NAME => SearchArticlesTool::http_handler(arguments, client).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                return Err(ToolError::not_found(name));
            }
        };
        Ok(result)
    }
}
