//! dev.to article listing tool.
//!
//! Lists published articles, optionally filtered by author, tag(s), feed
//! state, recency or collection. Pagination parameters are forwarded as-is.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use serde_json::Value;
use tracing::{debug, error, info};

use super::common::{create_text_result, error_result, parse_arguments, result_count};
use crate::domains::devto::{DevToClient, ListArticlesParams};

/// Article listing tool implementation.
#[derive(Debug, Clone)]
pub struct GetArticlesTool;

impl GetArticlesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_articles";

    /// Human-readable title.
    pub const TITLE: &'static str = "Get Articles";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get articles from dev.to. Can filter by username, tag, or other parameters.";

    /// Execute the tool logic (shared by every transport).
    pub async fn execute(client: &DevToClient, params: &ListArticlesParams) -> CallToolResult {
        info!(?params, "Getting articles");

        match client.list_articles(params).await {
            Ok(data) => {
                debug!(articles_count = %result_count(&data), "Articles retrieved");
                create_text_result(&data)
            }
            Err(e) => {
                error!(error = %e, kind = e.kind(), ?params, "Failed to get articles");
                error_result(&e.to_string())
            }
        }
    }

    /// Parse raw arguments and execute.
    pub async fn run(client: &DevToClient, arguments: Value) -> CallToolResult {
        match parse_arguments::<ListArticlesParams>(arguments) {
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
            input_schema: cached_schema_for_type::<ListArticlesParams>(),
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
    use rmcp::model::RawContent;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_client() -> (MockServer, DevToClient) {
        let server = MockServer::start().await;
        let client = DevToClient::new(&BackendConfig {
            base_url: format!("{}/api", server.uri()),
            ..BackendConfig::default()
        })
        .unwrap();
        (server, client)
    }

    #[test]
    fn test_tool_metadata() {
        let tool = GetArticlesTool::to_tool();
        assert_eq!(tool.name, "get_articles");
        assert_eq!(tool.title.as_deref(), Some("Get Articles"));
        let props = tool.input_schema.get("properties").unwrap();
        for field in ["username", "tag", "state", "top", "page", "per_page"] {
            assert!(props.get(field).is_some(), "missing schema field {field}");
        }
    }

    #[tokio::test]
    async fn test_tool_defaults_are_forwarded() {
        let (server, client) = mock_client().await;
        Mock::given(method("GET"))
            .and(path("/api/articles"))
            .and(query_param("tag", "rust"))
            .and(query_param("page", "1"))
            .and(query_param("per_page", "30"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
            .expect(1)
            .mount(&server)
            .await;

        let result = GetArticlesTool::run(&client, json!({"tag": "rust"})).await;
        assert_eq!(result.is_error, Some(false));
        if let RawContent::Text(text) = &result.content[0].raw {
            assert!(text.text.contains("\"id\": 1"));
        } else {
            panic!("expected text content");
        }
    }

    #[tokio::test]
    async fn test_backend_error_becomes_failed_result() {
        let (server, client) = mock_client().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = GetArticlesTool::run(&client, json!({})).await;
        assert_eq!(result.is_error, Some(true));
        if let RawContent::Text(text) = &result.content[0].raw {
            assert_eq!(text.text, "HTTP 503: Service Unavailable");
        } else {
            panic!("expected text content");
        }
    }
}
