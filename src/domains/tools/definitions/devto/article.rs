//! dev.to single article tool.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use serde_json::Value;
use tracing::{debug, error, info};

use super::common::{create_text_result, error_result, parse_arguments};
use crate::domains::devto::{DevToClient, GetArticleParams};

/// Fetches one article by id or by `username/slug` path.
#[derive(Debug, Clone)]
pub struct GetArticleTool;

impl GetArticleTool {
    pub const NAME: &'static str = "get_article";
    pub const TITLE: &'static str = "Get Article";
    pub const DESCRIPTION: &'static str = "Get a specific article by ID or path";

    /// Execute the tool logic (shared by every transport).
    pub async fn execute(client: &DevToClient, params: &GetArticleParams) -> CallToolResult {
        info!(?params, "Getting article");

        match client.get_article(params).await {
            Ok(data) => {
                debug!(article_id = ?params.id, article_path = ?params.path, "Article retrieved");
                create_text_result(&data)
            }
            Err(e) => {
                error!(error = %e, kind = e.kind(), ?params, "Failed to get article");
                error_result(&e.to_string())
            }
        }
    }

    pub async fn run(client: &DevToClient, arguments: Value) -> CallToolResult {
        match parse_arguments::<GetArticleParams>(arguments) {
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
            input_schema: cached_schema_for_type::<GetArticleParams>(),
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
    use rmcp::model::RawContent;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn text(result: &CallToolResult) -> String {
        match &result.content[0].raw {
            RawContent::Text(t) => t.text.clone(),
            other => panic!("expected text content, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_identifier_fails_without_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let client = DevToClient::new(&BackendConfig {
            base_url: format!("{}/api/", server.uri()),
            ..BackendConfig::default()
        })
        .unwrap();

        let result = GetArticleTool::run(&client, json!({})).await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text(&result), "Either id or path must be provided");

        let result = GetArticleTool::run(&client, json!({"id": 1.5})).await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text(&result), "id must be a positive integer");
    }

    #[tokio::test]
    async fn test_fetch_by_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/articles/ben/hello-world-4a2b"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7})))
            .expect(1)
            .mount(&server)
            .await;
        let client = DevToClient::new(&BackendConfig {
            base_url: format!("{}/api/", server.uri()),
            ..BackendConfig::default()
        })
        .unwrap();

        let result = GetArticleTool::run(&client, json!({"path": "ben/hello-world-4a2b"})).await;
        assert_eq!(result.is_error, Some(false));
        assert_eq!(text(&result), "{\n  \"id\": 7\n}");
    }
}
