//! Top stories aggregation and article search forwarding

use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::{
    Article, ArticleSearchResponse, Category, SearchParams, TopStoriesResponse, TopStory,
};

use super::client::NytClient;
use super::extract::{list_field, nested_list_field};

/// Stories kept from the front of each category feed
pub const STORIES_PER_CATEGORY: usize = 2;

/// Reshapes NYTimes payloads into the proxy's response schema
#[derive(Clone)]
pub struct NytService {
    client: NytClient,
}

impl NytService {
    pub fn new(client: NytClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &NytClient {
        &self.client
    }

    /// Two most recent stories from each category, in category order.
    ///
    /// Categories are requested one after another. The first failure aborts
    /// the whole aggregate and later categories are not requested.
    pub async fn top_stories(&self) -> Result<TopStoriesResponse> {
        let mut stories = Vec::with_capacity(Category::ALL.len() * STORIES_PER_CATEGORY);

        for category in Category::ALL {
            tracing::debug!(category = %category, "Fetching top stories");

            let payload = self
                .client
                .fetch_top_stories(category)
                .await
                .map_err(|e| {
                    tracing::warn!(
                        category = %category,
                        rejected = e.is_status(),
                        error = %e,
                        "Top stories request failed"
                    );
                    Error::top_stories(category, e)
                })?;

            stories.extend(top_stories_from_payload(&payload));
        }

        tracing::info!(total = stories.len(), "Collected top stories");
        Ok(TopStoriesResponse::new(stories))
    }

    /// Forward a search and map every returned document
    pub async fn search_articles(&self, params: &SearchParams) -> Result<ArticleSearchResponse> {
        tracing::debug!(
            query = %params.query,
            begin_date = ?params.begin_date,
            end_date = ?params.end_date,
            "Searching articles"
        );

        let payload = self
            .client
            .fetch_article_search(params)
            .await
            .map_err(|e| {
                tracing::warn!(
                    query = %params.query,
                    rejected = e.is_status(),
                    error = %e,
                    "Article search failed"
                );
                Error::search(e)
            })?;

        let articles = articles_from_payload(&payload);
        tracing::info!(query = %params.query, total = articles.len(), "Article search complete");

        Ok(ArticleSearchResponse::new(articles, params.query.clone()))
    }
}

/// Map the first [`STORIES_PER_CATEGORY`] entries of a `{"results": [...]}` payload
pub fn top_stories_from_payload(payload: &Value) -> Vec<TopStory> {
    list_field(payload, "results")
        .iter()
        .take(STORIES_PER_CATEGORY)
        .map(TopStory::from_upstream)
        .collect()
}

/// Map every document of a `{"response": {"docs": [...]}}` payload
pub fn articles_from_payload(payload: &Value) -> Vec<Article> {
    nested_list_field(payload, &["response", "docs"])
        .iter()
        .map(Article::from_upstream)
        .collect()
}
