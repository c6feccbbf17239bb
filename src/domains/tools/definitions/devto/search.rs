//! dev.to article search tool.
//!
//! Wraps `search/feed_content`, the full-text search endpoint behind the
//! dev.to search page. `search_fields` narrows matching to a comma-separated
//! list of `title`, `body_text` and `tag_list`.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use serde_json::Value;
use tracing::{debug, error, info};

use super::common::{create_text_result, error_result, parse_arguments, result_count};
use crate::domains::devto::{DevToClient, SearchArticlesParams};

/// Article search tool implementation.
#[derive(Debug, Clone)]
pub struct SearchArticlesTool;

impl SearchArticlesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "search_articles";

    /// Human-readable title.
    pub const TITLE: &'static str = "Search Articles";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search articles using query parameters";

    /// Execute the tool logic (shared by every transport).
    pub async fn execute(client: &DevToClient, params: &SearchArticlesParams) -> CallToolResult {
        info!(?params, "Searching articles");

        match client.search_articles(params).await {
            Ok(data) => {
                debug!(results_count = %result_count(&data), "Article search completed");
                create_text_result(&data)
            }
            Err(e) => {
                error!(error = %e, kind = e.kind(), ?params, "Failed to search articles");
                error_result(&e.to_string())
            }
        }
    }

    /// Parse raw arguments and execute.
    pub async fn run(client: &DevToClient, arguments: Value) -> CallToolResult {
        match parse_arguments::<SearchArticlesParams>(arguments) {
            Ok(params) => Self::execute(client, &params).await,
            Err(result) => result,
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(arguments: Value, client: DevToClient) -> CallToolResult {
        Self::run(&client, arguments).await
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            title: Some(Self::TITLE.into()),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SearchArticlesParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
        }
    }

    /// Create a ToolRoute for STDIO transport.
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
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_search_forwards_query_and_defaults() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/search/feed_content"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;
        let client = DevToClient::new(&BackendConfig {
            base_url: format!("{}/api/", server.uri()),
            ..BackendConfig::default()
        })
        .unwrap();

        let result = SearchArticlesTool::run(
            &client,
            json!({"q": "mcp server", "search_fields": "title"}),
        )
        .await;
        assert_eq!(result.is_error, Some(false));

        let requests = server.received_requests().await.unwrap();
        assert_eq!(
            requests[0].url.query(),
            Some("q=mcp+server&page=1&per_page=30&search_fields=title")
        );
    }

    #[tokio::test]
    async fn test_query_is_required() {
        let client = DevToClient::new(&BackendConfig::default()).unwrap();
        let result = SearchArticlesTool::run(&client, json!({"page": 2})).await;
        assert_eq!(result.is_error, Some(true));
    }
}
