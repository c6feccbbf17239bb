//! Request parameter types for the dev.to backend operations.
//!
//! These structs are shared by the backend client and the tool layer: they
//! derive `JsonSchema` so rmcp can advertise them as tool input schemas, and
//! `Serialize` so the query string comes straight out of `serde_urlencoded`.
//!
//! `Default` means "no parameters". The page defaults advertised to MCP
//! clients (`page = 1`, `per_page = 30` or `10`) only kick in when tool
//! arguments are deserialized.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Number;

use super::error::{DevToError, DevToResult};

/// Largest integer a JSON number can carry without losing precision.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn default_page() -> Option<u32> {
    Some(1)
}

fn default_articles_per_page() -> Option<u32> {
    Some(30)
}

fn default_tags_per_page() -> Option<u32> {
    Some(10)
}

/// Article feed state filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ArticleState {
    Fresh,
    Rising,
    All,
}

/// Parameters for `GET /articles`.
///
/// Field order is the order parameters appear in the query string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ListArticlesParams {
    #[schemars(description = "Filter articles by username")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[schemars(description = "Filter articles by tag")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    #[schemars(description = "Comma-separated tags; articles must carry at least one of them")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,

    #[schemars(description = "Comma-separated tags to exclude")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags_exclude: Option<String>,

    #[schemars(description = "Filter by article state")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ArticleState>,

    #[schemars(
        description = "Number representing the number of days since publication for top articles (1, 7, 30, or infinity)"
    )]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<u32>,

    #[schemars(description = "Pagination page number (default: 1)")]
    #[serde(default = "default_page", skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    #[schemars(description = "Number of articles per page (default: 30, max: 1000)")]
    #[serde(
        default = "default_articles_per_page",
        skip_serializing_if = "Option::is_none"
    )]
    pub per_page: Option<u32>,

    #[schemars(description = "Only return articles belonging to this collection (series)")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<u64>,
}

/// Parameters for `GET /articles/{id}` or `GET /articles/{path}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, JsonSchema)]
pub struct GetArticleParams {
    #[schemars(description = "Article ID")]
    #[serde(default)]
    pub id: Option<Number>,

    #[schemars(description = "Article path (e.g., \"username/article-slug\")")]
    #[serde(default)]
    pub path: Option<String>,
}

/// Parameters for `GET /users/{id}` or `GET /users/by_username?url={username}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, JsonSchema)]
pub struct GetUserParams {
    #[schemars(description = "User ID")]
    #[serde(default)]
    pub id: Option<Number>,

    #[schemars(description = "Username")]
    #[serde(default)]
    pub username: Option<String>,
}

/// Parameters for `GET /tags`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ListTagsParams {
    #[schemars(description = "Pagination page number (default: 1)")]
    #[serde(default = "default_page", skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    #[schemars(description = "Number of tags per page (default: 10, max: 1000)")]
    #[serde(
        default = "default_tags_per_page",
        skip_serializing_if = "Option::is_none"
    )]
    pub per_page: Option<u32>,
}

/// Parameters for `GET /comments?a_id={article_id}`.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
pub struct GetCommentsParams {
    #[schemars(description = "Article ID to get comments for")]
    pub article_id: Number,
}

/// Parameters for `GET /search/feed_content`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchArticlesParams {
    #[schemars(description = "Search query")]
    pub q: String,

    #[schemars(description = "Pagination page number (default: 1)")]
    #[serde(default = "default_page", skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    #[schemars(description = "Number of articles per page (default: 30, max: 1000)")]
    #[serde(
        default = "default_articles_per_page",
        skip_serializing_if = "Option::is_none"
    )]
    pub per_page: Option<u32>,

    #[schemars(
        description = "Comma-separated list of fields to search (title, body_text, tag_list)"
    )]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_fields: Option<String>,
}

/// Validate that a JSON number is a positive integer.
///
/// Integral floats such as `42.0` are accepted, matching how JSON numbers
/// behave for most clients.
pub fn positive_integer(name: &str, value: &Number) -> DevToResult<u64> {
    let parsed = match value.as_u64() {
        Some(n) => Some(n),
        None => value
            .as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0 && *f > 0.0 && *f <= MAX_SAFE_INTEGER)
            .map(|f| f as u64),
    };

    match parsed {
        Some(n) if n > 0 => Ok(n),
        _ => Err(DevToError::invalid_argument(format!(
            "{name} must be a positive integer"
        ))),
    }
}

/// Treat empty strings the same as an absent value.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_defaults_applied_on_deserialize() {
        let params: ListArticlesParams = serde_json::from_str(r#"{"tag": "rust"}"#).unwrap();
        assert_eq!(params.page, Some(1));
        assert_eq!(params.per_page, Some(30));

        let tags: ListTagsParams = serde_json::from_str("{}").unwrap();
        assert_eq!(tags.page, Some(1));
        assert_eq!(tags.per_page, Some(10));
    }

    #[test]
    fn test_default_has_no_parameters() {
        let params = ListArticlesParams::default();
        assert_eq!(serde_urlencoded::to_string(&params).unwrap(), "");
    }

    #[test]
    fn test_state_rejects_unknown_values() {
        let result: Result<ListArticlesParams, _> =
            serde_json::from_str(r#"{"state": "stale"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_search_requires_query() {
        let result: Result<SearchArticlesParams, _> = serde_json::from_str(r#"{"page": 2}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_positive_integer() {
        assert_eq!(positive_integer("id", &Number::from(42)).unwrap(), 42);
        assert_eq!(
            positive_integer("id", &Number::from_f64(7.0).unwrap()).unwrap(),
            7
        );

        for bad in [
            Number::from(0),
            Number::from(-1),
            Number::from_f64(1.5).unwrap(),
            Number::from_f64(-3.0).unwrap(),
        ] {
            let err = positive_integer("id", &bad).unwrap_err();
            assert!(matches!(err, DevToError::InvalidArgument(_)));
            assert_eq!(err.to_string(), "id must be a positive integer");
        }
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(&Some("ben".to_string())), Some("ben"));
        assert_eq!(non_empty(&Some(String::new())), None);
        assert_eq!(non_empty(&None), None);
    }
}
