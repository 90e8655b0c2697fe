//! Query endpoint client.

use blogsearch_core::{Hit, SearchConfig};
use gloo_net::http::Request;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, classify_status};

pub(crate) const APP_ID_HEADER: &str = "X-Search-Application-Id";
pub(crate) const API_KEY_HEADER: &str = "X-Search-API-Key";

/// One page of results from the query endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Result documents for the requested page.
    #[serde(default)]
    pub hits: Vec<Hit>,

    /// Total number of matching documents.
    #[serde(default)]
    pub nb_hits: usize,

    /// Zero-based page index of this response.
    #[serde(default)]
    pub page: usize,

    /// Total number of result pages.
    #[serde(default)]
    pub nb_pages: usize,

    /// Page size used by the service for this response.
    #[serde(default)]
    pub hits_per_page: usize,

    /// Query string this response answers.
    #[serde(default)]
    pub query: String,
}

impl SearchResponse {
    /// An empty response for a query, used before the first dispatch lands.
    pub fn empty(query: &str) -> Self {
        Self {
            hits: Vec::new(),
            nb_hits: 0,
            page: 0,
            nb_pages: 0,
            hits_per_page: 0,
            query: query.to_string(),
        }
    }

    /// Parse a response body.
    pub fn from_json(json: &str) -> Result<Self, ClientError> {
        serde_json::from_str(json).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryBody<'a> {
    query: &'a str,
    page: usize,
    hits_per_page: usize,
}

/// Client for the hosted search service query endpoint.
///
/// Binds the application credentials and index name at construction. No local
/// validation of the credentials is performed; an invalid credential or index
/// name is rejected by the service at the first query.
#[derive(Debug, Clone)]
pub struct SearchClient {
    config: SearchConfig,
    base_url: String,
}

impl SearchClient {
    /// Create a client bound to the application the config names.
    pub fn new(config: SearchConfig) -> Self {
        let base_url = format!("https://{}-dsn.search-api.net", config.app_id);
        Self { config, base_url }
    }

    /// Set a custom base URL for the query endpoint (useful for testing).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The deployment configuration this client was built from.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// URL of the query endpoint for the configured index.
    pub fn query_url(&self) -> String {
        format!(
            "{}/1/indexes/{}/query",
            self.base_url.trim_end_matches('/'),
            self.config.index_name
        )
    }

    /// Fetch one page of results for a query string.
    ///
    /// The empty query is a valid query: the service answers it with the
    /// first page of the whole index, which is what populates the result
    /// list on initial page load.
    pub async fn search(&self, query: &str, page: usize) -> Result<SearchResponse, ClientError> {
        let url = self.query_url();
        let body = QueryBody {
            query,
            page,
            hits_per_page: self.config.hits_per_page,
        };

        debug!("query {url}: {query:?} page {page}");

        let response = Request::post(&url)
            .header(APP_ID_HEADER, &self.config.app_id)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&body)
            .map_err(|e| ClientError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, body));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let parsed = SearchResponse::from_json(&text)?;
        debug!(
            "query {:?} page {} -> {} hits over {} pages",
            query, parsed.page, parsed.nb_hits, parsed.nb_pages
        );

        Ok(parsed)
    }
}
