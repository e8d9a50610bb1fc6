//! HTTP client for the NYTimes APIs
//!
//! One pooled [`reqwest::Client`] is shared by every request. Each call
//! carries the credential as the `api-key` query parameter. Failures are
//! returned immediately; nothing is retried.

use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::config::Config;
use crate::error::UpstreamError;
use crate::models::{Category, SearchParams};

/// Client for the NYTimes Top Stories and Article Search APIs
#[derive(Clone)]
pub struct NytClient {
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl NytClient {
    /// Create a new client from the service configuration
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError::Http` if the HTTP client cannot be created
    pub fn new(config: &Config) -> Result<Self, UpstreamError> {
        let http_client = Client::builder()
            .user_agent(format!("nytimes-proxy/{}", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .build()?;

        Ok(Self::with_http_client(
            http_client,
            &config.base_url,
            &config.api_key,
        ))
    }

    /// Create a client around an existing HTTP client
    pub fn with_http_client(http_client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the top stories feed for one category
    pub fn top_stories_url(&self, category: Category) -> String {
        format!("{}/topstories/v2/{}.json", self.base_url, category.as_str())
    }

    /// URL of the article search endpoint
    pub fn article_search_url(&self) -> String {
        format!("{}/search/v2/articlesearch.json", self.base_url)
    }

    /// Fetch the raw top stories payload for one category
    pub async fn fetch_top_stories(&self, category: Category) -> Result<Value, UpstreamError> {
        let url = self.top_stories_url(category);
        self.get_json(&url, &[]).await
    }

    /// Fetch the raw article search payload
    pub async fn fetch_article_search(
        &self,
        params: &SearchParams,
    ) -> Result<Value, UpstreamError> {
        let url = self.article_search_url();
        self.get_json(&url, &params.query_pairs()).await
    }

    // Internal: single GET, decoded into a loosely typed value.
    // Transport errors are stripped of their URL, which carries the api-key.
    async fn get_json(&self, url: &str, params: &[(&str, &str)]) -> Result<Value, UpstreamError> {
        let url = Url::parse(url).map_err(|e| UpstreamError::InvalidUrl(format!("{url}: {e}")))?;

        let response = self
            .http_client
            .get(url)
            .query(&[("api-key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| UpstreamError::Http(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::Http(e.without_url()))?;
        Ok(serde_json::from_str(&body)?)
    }
}
