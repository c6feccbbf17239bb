//! dev.to user lookup tool.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use serde_json::Value;
use tracing::{debug, error, info};

use super::common::{create_text_result, error_result, parse_arguments};
use crate::domains::devto::{DevToClient, GetUserParams};

/// Fetches a user profile by id or by username.
#[derive(Debug, Clone)]
pub struct GetUserTool;

impl GetUserTool {
    pub const NAME: &'static str = "get_user";
    pub const TITLE: &'static str = "Get User";
    pub const DESCRIPTION: &'static str = "Get user information by ID or username";

    pub async fn execute(client: &DevToClient, params: &GetUserParams) -> CallToolResult {
        info!(?params, "Getting user");

        match client.get_user(params).await {
            Ok(data) => {
                debug!(user_id = ?params.id, username = ?params.username, "User retrieved");
                create_text_result(&data)
            }
            Err(e) => {
                error!(error = %e, kind = e.kind(), ?params, "Failed to get user");
                error_result(&e.to_string())
            }
        }
    }

    pub async fn run(client: &DevToClient, arguments: Value) -> CallToolResult {
        match parse_arguments::<GetUserParams>(arguments) {
            Ok(params) => Self::execute(client, &params).await,
            Err(result) => result,
        }
    }

    #[cfg(feature = "http")]
    pub async fn http_handler(arguments: Value, client: DevToClient) -> CallToolResult {
        Self::run(&client, arguments).await
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            title: Some(Self::TITLE.into()),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<GetUserParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
        }
    }

    pub fn create_route<S>(client: DevToClient) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let client = client.clone();
            let args = ctx.arguments.clone().unwrap_or_default();
            async move {
                let result = Self::run(&client, Value::Object(args)).await;
                Ok::<_, McpError>(result)
            }
            .boxed()
        })
    }
}
