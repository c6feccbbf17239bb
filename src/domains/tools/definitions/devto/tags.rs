//! dev.to tag listing tool.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use serde_json::Value;
use tracing::{debug, error, info};

use super::common::{create_text_result, error_result, parse_arguments, result_count};
use crate::domains::devto::{DevToClient, ListTagsParams};

/// Lists popular tags.
#[derive(Debug, Clone)]
pub struct GetTagsTool;

impl GetTagsTool {
    pub const NAME: &'static str = "get_tags";
    pub const TITLE: &'static str = "Get Tags";
    pub const DESCRIPTION: &'static str = "Get popular tags from dev.to";

    pub async fn execute(client: &DevToClient, params: &ListTagsParams) -> CallToolResult {
        info!(?params, "Getting tags");

        match client.list_tags(params).await {
            Ok(data) => {
                debug!(tags_count = %result_count(&data), "Tags retrieved");
                create_text_result(&data)
            }
            Err(e) => {
                error!(error = %e, kind = e.kind(), ?params, "Failed to get tags");
                error_result(&e.to_string())
            }
        }
    }

    pub async fn run(client: &DevToClient, arguments: Value) -> CallToolResult {
        match parse_arguments::<ListTagsParams>(arguments) {
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
            input_schema: cached_schema_for_type::<ListTagsParams>(),
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
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_default_pagination() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "react"}])))
            .expect(1)
            .mount(&server)
            .await;
        let client = DevToClient::new(&BackendConfig {
            base_url: format!("{}/api/", server.uri()),
            ..BackendConfig::default()
        })
        .unwrap();

        let result = GetTagsTool::run(&client, Value::Null).await;
        assert_eq!(result.is_error, Some(false));

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), Some("page=1&per_page=10"));
    }
}
