// Core data structures for the NYTimes proxy

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::nytimes::extract::{nested_str_field, str_field};

/// Top stories section fetched for the aggregate feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Arts,
    Food,
    Movies,
    Travel,
    Science,
}

impl Category {
    /// Categories in the order their stories appear in the aggregate
    pub const ALL: [Category; 5] = [
        Self::Arts,
        Self::Food,
        Self::Movies,
        Self::Travel,
        Self::Science,
    ];

    /// Upstream path segment
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Arts => "arts",
            Self::Food => "food",
            Self::Movies => "movies",
            Self::Travel => "travel",
            Self::Science => "science",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single top story
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TopStory {
    pub title: String,
    pub section: String,
    pub url: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub published_date: String, // passed through verbatim
}

impl TopStory {
    /// Map one entry of an upstream `results` list; absent fields become empty text
    pub fn from_upstream(result: &Value) -> Self {
        Self {
            title: str_field(result, "title"),
            section: str_field(result, "section"),
            url: str_field(result, "url"),
            abstract_text: str_field(result, "abstract"),
            published_date: str_field(result, "published_date"),
        }
    }
}

/// Response body for the top stories endpoint
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TopStoriesResponse {
    pub stories: Vec<TopStory>,
    pub total_count: usize,
}

impl TopStoriesResponse {
    pub fn new(stories: Vec<TopStory>) -> Self {
        Self {
            total_count: stories.len(),
            stories,
        }
    }
}

/// A single article from search
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Article {
    pub headline: String,
    pub snippet: String,
    pub web_url: String,
    pub pub_date: String,
}

impl Article {
    /// Map one upstream search document; `headline.main` may be missing at either level
    pub fn from_upstream(doc: &Value) -> Self {
        Self {
            headline: nested_str_field(doc, &["headline", "main"]),
            snippet: str_field(doc, "snippet"),
            web_url: str_field(doc, "web_url"),
            pub_date: str_field(doc, "pub_date"),
        }
    }
}

/// Response body for the article search endpoint
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArticleSearchResponse {
    pub articles: Vec<Article>,
    pub total_count: usize,
    pub query: String,
}

impl ArticleSearchResponse {
    pub fn new(articles: Vec<Article>, query: impl Into<String>) -> Self {
        Self {
            total_count: articles.len(),
            articles,
            query: query.into(),
        }
    }
}

/// Inputs of an article search, forwarded to upstream as given
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchParams {
    pub query: String,
    pub begin_date: Option<String>, // YYYYMMDD, not validated here
    pub end_date: Option<String>,
}

impl SearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_begin_date(mut self, date: impl Into<String>) -> Self {
        self.begin_date = Some(date.into());
        self
    }

    pub fn with_end_date(mut self, date: impl Into<String>) -> Self {
        self.end_date = Some(date.into());
        self
    }

    /// Query pairs for the upstream call, excluding the credential.
    /// Date bounds are only included when supplied and non-empty.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![("q", self.query.as_str())];

        if let Some(begin) = self.begin_date.as_deref().filter(|d| !d.is_empty()) {
            pairs.push(("begin_date", begin));
        }
        if let Some(end) = self.end_date.as_deref().filter(|d| !d.is_empty()) {
            pairs.push(("end_date", end));
        }

        pairs
    }
}

/// Static payload served at the root path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub endpoints: Vec<String>,
    pub documentation: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_order() {
        let names: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
        assert_eq!(names, vec!["arts", "food", "movies", "travel", "science"]);
    }

    #[test]
    fn test_top_story_serializes_abstract_key() {
        let story = TopStory {
            abstract_text: "Test abstract".to_string(),
            ..Default::default()
        };

        let value = serde_json::to_value(&story).unwrap();
        assert_eq!(value["abstract"], "Test abstract");
        assert!(value.get("abstract_text").is_none());
    }

    #[test]
    fn test_top_story_missing_fields_default_to_empty() {
        let story = TopStory::from_upstream(&json!({"title": "Only title"}));

        assert_eq!(story.title, "Only title");
        assert_eq!(story.section, "");
        assert_eq!(story.url, "");
        assert_eq!(story.abstract_text, "");
        assert_eq!(story.published_date, "");
    }

    #[test]
    fn test_article_headline_missing_main() {
        let article = Article::from_upstream(&json!({
            "headline": {"print_headline": "Print"},
            "snippet": "s"
        }));

        assert_eq!(article.headline, "");
        assert_eq!(article.snippet, "s");
    }

    #[test]
    fn test_search_params_omit_absent_dates() {
        let params = SearchParams::new("climate");
        assert_eq!(params.query_pairs(), vec![("q", "climate")]);

        let params = SearchParams::new("climate")
            .with_begin_date("20240101")
            .with_end_date("");
        assert_eq!(
            params.query_pairs(),
            vec![("q", "climate"), ("begin_date", "20240101")]
        );
    }

    #[test]
    fn test_response_counts_follow_lists() {
        let response = ArticleSearchResponse::new(vec![Article::default(); 3], " Mixed Case ");
        assert_eq!(response.total_count, 3);
        assert_eq!(response.query, " Mixed Case ");

        let response = TopStoriesResponse::new(Vec::new());
        assert_eq!(response.total_count, 0);
    }
}
