//! Common utilities shared across dev.to tools.
//!
//! This module provides the result envelope every tool returns, the error
//! envelope for failed invocations and argument parsing.

use rmcp::model::{CallToolResult, Content};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Wrap a backend payload in the standard result envelope.
///
/// The envelope is a single text block holding the payload pretty-printed
/// with two-space indentation. Its shape never depends on the operation.
pub fn create_text_result(data: &Value) -> CallToolResult {
    let text = serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string());
    CallToolResult::success(vec![Content::text(text)])
}

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Deserialize tool arguments, turning failures into a failed tool result.
///
/// Missing arguments are treated as an empty object so tools whose
/// parameters are all optional can be called bare.
pub fn parse_arguments<T: DeserializeOwned>(arguments: Value) -> Result<T, CallToolResult> {
    let arguments = match arguments {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };

    serde_json::from_value(arguments)
        .map_err(|e| error_result(&format!("Invalid arguments: {}", e)))
}

/// Number of items in a list payload, for logging.
pub fn result_count(data: &Value) -> String {
    match data {
        Value::Array(items) => items.len().to_string(),
        _ => "unknown".to_string(),
    }
}
