//! HTTP client for the dev.to public REST API.
//!
//! One async method per backend operation. Each method validates its
//! parameters, builds the endpoint URL and issues exactly one unauthenticated
//! GET. Payloads come back as untyped JSON; shaping them is left to callers.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Url;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use super::error::{DevToError, DevToResult};
use super::params::{
    GetArticleParams, GetCommentsParams, GetUserParams, ListArticlesParams, ListTagsParams,
    SearchArticlesParams, non_empty, positive_integer,
};
use crate::core::config::BackendConfig;
use crate::core::{Error, Result};

/// Characters left as-is inside a path segment (RFC 3986 unreserved).
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Client for the dev.to API.
///
/// Cheap to clone: the underlying `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct DevToClient {
    http: reqwest::Client,
    base_url: Url,
}

impl DevToClient {
    /// Create a client from the backend configuration.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let base_url = normalize_base_url(&config.base_url)?;

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { http, base_url })
    }

    /// The API root every endpoint is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// List articles, optionally filtered.
    #[instrument(skip(self))]
    pub async fn list_articles(&self, params: &ListArticlesParams) -> DevToResult<Value> {
        let url = self.list_articles_url(params)?;
        self.fetch(url).await
    }

    /// Fetch a single article by numeric id or by `username/slug` path.
    #[instrument(skip(self))]
    pub async fn get_article(&self, params: &GetArticleParams) -> DevToResult<Value> {
        let url = self.get_article_url(params)?;
        self.fetch(url).await
    }

    /// Fetch a user by numeric id or by username.
    #[instrument(skip(self))]
    pub async fn get_user(&self, params: &GetUserParams) -> DevToResult<Value> {
        let url = self.get_user_url(params)?;
        self.fetch(url).await
    }

    /// List popular tags.
    #[instrument(skip(self))]
    pub async fn list_tags(&self, params: &ListTagsParams) -> DevToResult<Value> {
        let url = self.list_tags_url(params)?;
        self.fetch(url).await
    }

    /// List the comments of an article.
    #[instrument(skip(self))]
    pub async fn get_comments(&self, params: &GetCommentsParams) -> DevToResult<Value> {
        let url = self.get_comments_url(params)?;
        self.fetch(url).await
    }

    /// Full-text search over the article feed.
    #[instrument(skip(self))]
    pub async fn search_articles(&self, params: &SearchArticlesParams) -> DevToResult<Value> {
        let url = self.search_articles_url(params)?;
        self.fetch(url).await
    }

    // ========================================================================
    // URL construction
    // ========================================================================

    pub(crate) fn list_articles_url(&self, params: &ListArticlesParams) -> DevToResult<Url> {
        self.endpoint(&["articles"], Some(params))
    }

    pub(crate) fn get_article_url(&self, params: &GetArticleParams) -> DevToResult<Url> {
        match (&params.id, non_empty(&params.path)) {
            (Some(_), Some(_)) => Err(DevToError::invalid_argument(
                "Provide only one of id or path",
            )),
            (Some(id), None) => {
                let id = positive_integer("id", id)?.to_string();
                self.endpoint::<()>(&["articles", &id], None)
            }
            (None, Some(path)) => {
                let mut segments = vec!["articles"];
                segments.extend(path.trim_matches('/').split('/'));
                self.endpoint::<()>(&segments, None)
            }
            (None, None) => Err(DevToError::invalid_argument(
                "Either id or path must be provided",
            )),
        }
    }

    pub(crate) fn get_user_url(&self, params: &GetUserParams) -> DevToResult<Url> {
        match (&params.id, non_empty(&params.username)) {
            (Some(_), Some(_)) => Err(DevToError::invalid_argument(
                "Provide only one of id or username",
            )),
            (Some(id), None) => {
                let id = positive_integer("id", id)?.to_string();
                self.endpoint::<()>(&["users", &id], None)
            }
            (None, Some(username)) => {
                self.endpoint(&["users", "by_username"], Some(&[("url", username)][..]))
            }
            (None, None) => Err(DevToError::invalid_argument(
                "Either id or username must be provided",
            )),
        }
    }

    pub(crate) fn list_tags_url(&self, params: &ListTagsParams) -> DevToResult<Url> {
        self.endpoint(&["tags"], Some(params))
    }

    pub(crate) fn get_comments_url(&self, params: &GetCommentsParams) -> DevToResult<Url> {
        let article_id = positive_integer("article_id", &params.article_id)?;
        self.endpoint(&["comments"], Some(&[("a_id", article_id)][..]))
    }

    pub(crate) fn search_articles_url(&self, params: &SearchArticlesParams) -> DevToResult<Url> {
        self.endpoint(&["search", "feed_content"], Some(params))
    }

    /// Resolve `segments` against the API root and attach an optional query.
    ///
    /// Every segment is percent-encoded on its own. Empty, `.` and `..`
    /// segments are refused so the result always stays under the API root.
    fn endpoint<Q: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        query: Option<&Q>,
    ) -> DevToResult<Url> {
        let mut relative = Vec::with_capacity(segments.len());
        for segment in segments {
            if segment.is_empty() || *segment == "." || *segment == ".." {
                return Err(DevToError::invalid_argument(format!(
                    "Invalid path segment: {segment:?}"
                )));
            }
            relative.push(utf8_percent_encode(segment, PATH_SEGMENT).to_string());
        }

        let mut url = self
            .base_url
            .join(&relative.join("/"))
            .map_err(|e| DevToError::invalid_argument(format!("Invalid endpoint: {e}")))?;

        if let Some(query) = query {
            let encoded = serde_urlencoded::to_string(query)
                .map_err(|e| DevToError::invalid_argument(format!("Invalid query: {e}")))?;
            if !encoded.is_empty() {
                url.set_query(Some(&encoded));
            }
        }

        Ok(url)
    }

    /// Issue a single GET and decode the JSON body.
    async fn fetch(&self, url: Url) -> DevToResult<Value> {
        debug!(%url, "Calling dev.to API");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(DevToError::Upstream {
                status: status.as_u16(),
                status_text: status
                    .canonical_reason()
                    .unwrap_or("Unknown Status")
                    .to_string(),
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

/// Parse the configured base URL and make sure its path ends with `/`, so
/// relative joins append to the API root instead of replacing its last segment.
fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)
        .map_err(|e| Error::config(format!("Invalid backend base URL '{raw}': {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::config(format!(
            "Backend base URL must be http(s), got '{raw}'"
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}
