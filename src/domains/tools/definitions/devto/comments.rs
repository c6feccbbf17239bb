//! dev.to article comments tool.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use serde_json::Value;
use tracing::{debug, error, info};

use super::common::{create_text_result, error_result, parse_arguments, result_count};
use crate::domains::devto::{DevToClient, GetCommentsParams};

/// Lists the comment threads of one article.
#[derive(Debug, Clone)]
pub struct GetCommentsTool;

impl GetCommentsTool {
    pub const NAME: &'static str = "get_comments";
    pub const TITLE: &'static str = "Get Comments";
    pub const DESCRIPTION: &'static str = "Get comments for a specific article";

    pub async fn execute(client: &DevToClient, params: &GetCommentsParams) -> CallToolResult {
        info!(?params, "Getting comments");

        match client.get_comments(params).await {
            Ok(data) => {
                debug!(comments_count = %result_count(&data), "Comments retrieved");
                create_text_result(&data)
            }
            Err(e) => {
                error!(error = %e, kind = e.kind(), ?params, "Failed to get comments");
                error_result(&e.to_string())
            }
        }
    }

    pub async fn run(client: &DevToClient, arguments: Value) -> CallToolResult {
        match parse_arguments::<GetCommentsParams>(arguments) {
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
            input_schema: cached_schema_for_type::<GetCommentsParams>(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::BackendConfig;
    use serde_json::json;

    #[test]
    fn test_article_id_is_required_in_schema() {
        let tool = GetCommentsTool::to_tool();
        let required = tool.input_schema.get("required").unwrap();
        assert_eq!(required, &json!(["article_id"]));
    }

    #[tokio::test]
    async fn test_missing_article_id_is_failed_result() {
        let client = DevToClient::new(&BackendConfig::default()).unwrap();
        let result = GetCommentsTool::run(&client, json!({})).await;
        assert_eq!(result.is_error, Some(true));
    }
}
