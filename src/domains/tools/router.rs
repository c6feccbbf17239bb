//! Tool Router - builds the rmcp ToolRouter.
//!
//! This module builds the ToolRouter for the STDIO transport by delegating
//! to the tool definitions themselves. Each tool knows how to create its own route.

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{
    GetArticleTool, GetArticlesTool, GetCommentsTool, GetTagsTool, GetUserTool,
    SearchArticlesTool,
};
use crate::domains::devto::DevToClient;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(client: DevToClient) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(GetArticlesTool::create_route(client.clone()))
        .with_route(GetArticleTool::create_route(client.clone()))
        .with_route(GetUserTool::create_route(client.clone()))
        .with_route(GetTagsTool::create_route(client.clone()))
        .with_route(GetCommentsTool::create_route(client.clone()))
        .with_route(SearchArticlesTool::create_route(client))
}
