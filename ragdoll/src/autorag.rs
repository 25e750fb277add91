use std::env;

use anyhow::Result;
use reqwest::Client;
use serde_json::{Map, Value};
use tracing::debug;

/// Client for the hosted retrieval service.
#[derive(Debug, Clone)]
pub struct AutoRag {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl AutoRag {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: env::var("AUTORAG_URL").expect("$AUTORAG_URL not set"),
            token: env::var("AUTORAG_TOKEN").ok(),
        }
    }

    /// Points the client at an explicit base URL instead of `$AUTORAG_URL`.
    #[must_use]
    pub fn from_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Retrieves ranked documents for a query, without answer synthesis.
    ///
    /// # Errors
    ///
    /// Returns an error if the retrieval service call fails.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResult> {
        self.post("search", request).await
    }

    /// Retrieves ranked documents and asks the service to synthesise an
    /// answer from them, filling `SearchResult::response`.
    ///
    /// # Errors
    ///
    /// Returns an error if the retrieval service call fails.
    pub async fn ai_search(&self, request: &SearchRequest) -> Result<SearchResult> {
        self.post("ai-search", request).await
    }

    async fn post(&self, endpoint: &str, request: &SearchRequest) -> Result<SearchResult> {
        let mut builder = self
            .client
            .post(format!("{}/{endpoint}", self.base_url))
            .json(request);

        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let result: SearchResult = builder
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!("{endpoint} returned {} documents", result.data.len());

        Ok(result)
    }
}

impl Default for AutoRag {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub rewrite_query: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Filter>,
}

impl SearchRequest {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            rewrite_query: true,
            filters: None,
        }
    }

    /// Restricts retrieval to the partition named by `target`.
    #[must_use]
    pub fn restrict_to(mut self, target: &str) -> Self {
        self.filters = Some(Filter::eq("folder", format!("{target}/")));
        self
    }
}

/// Equality filter on a document attribute.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Filter {
    #[serde(rename = "type")]
    comparison: &'static str,
    key: String,
    value: String,
}

impl Filter {
    fn eq(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            comparison: "eq",
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Result page returned by the retrieval service. `response` is only
/// present for `ai_search` calls.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct SearchResult {
    pub object: String,
    pub search_query: String,
    pub response: Option<String>,
    pub data: Vec<SourceDocument>,
    pub has_more: bool,
    pub next_page: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct SourceDocument {
    pub file_id: String,
    pub filename: String,
    pub score: f32,
    #[serde(default)]
    pub attributes: Map<String, Value>,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub text: String,
}
