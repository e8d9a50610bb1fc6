//! REST API handlers for the proxy
//!
//! This module defines the routes and handlers served to clients.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;

use crate::config::{APP_NAME, APP_VERSION};
use crate::error::{Error, ErrorResponse, Result};
use crate::models::{ArticleSearchResponse, SearchParams, ServiceInfo, TopStoriesResponse};

use super::openapi::openapi_document;
use super::server::AppState;

pub const TOP_STORIES_PATH: &str = "/nytimes/topstories";
pub const ARTICLE_SEARCH_PATH: &str = "/nytimes/articlesearch";
pub const DOCS_PATH: &str = "/docs";
pub const OPENAPI_PATH: &str = "/openapi.json";

const SWAGGER_UI_CDN: &str = "https://cdn.jsdelivr.net/npm/swagger-ui-dist@5";

// ============================================================================
// Request Types
// ============================================================================

/// Query string of the article search endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ArticleSearchQuery {
    pub q: Option<String>,
    pub begin_date: Option<String>,
    pub end_date: Option<String>,
}

impl ArticleSearchQuery {
    /// Require a non-empty `q`; dates are forwarded untouched
    pub fn into_params(self) -> Result<SearchParams> {
        let query = self
            .q
            .filter(|q| !q.is_empty())
            .ok_or_else(|| Error::validation("q", "Field required"))?;

        Ok(SearchParams {
            query,
            begin_date: self.begin_date,
            end_date: self.end_date,
        })
    }
}

// ============================================================================
// API Routes
// ============================================================================

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route(TOP_STORIES_PATH, get(get_top_stories))
        .route(ARTICLE_SEARCH_PATH, get(search_articles))
        // API description
        .route(OPENAPI_PATH, get(openapi_json))
        .route(DOCS_PATH, get(docs))
        .fallback(not_found)
        .with_state(state)
}

/// Static description of the service
pub fn service_info() -> ServiceInfo {
    ServiceInfo {
        message: APP_NAME.to_string(),
        version: APP_VERSION.to_string(),
        endpoints: vec![TOP_STORIES_PATH.to_string(), ARTICLE_SEARCH_PATH.to_string()],
        documentation: DOCS_PATH.to_string(),
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn root() -> Json<ServiceInfo> {
    Json(service_info())
}

/// Two most recent stories from arts, food, movies, travel and science
async fn get_top_stories(State(state): State<AppState>) -> Result<Json<TopStoriesResponse>> {
    let response = state.service.top_stories().await?;
    Ok(Json(response))
}

/// Search articles through the NYTimes Article Search API
async fn search_articles(
    State(state): State<AppState>,
    query: std::result::Result<Query<ArticleSearchQuery>, QueryRejection>,
) -> Result<Json<ArticleSearchResponse>> {
    let Query(query) = query.map_err(|e| Error::QueryParse(e.body_text()))?;
    let params = query.into_params()?;

    let response = state.service.search_articles(&params).await?;
    Ok(Json(response))
}

async fn openapi_json() -> Json<Value> {
    Json(openapi_document())
}

async fn docs() -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<link type="text/css" rel="stylesheet" href="{SWAGGER_UI_CDN}/swagger-ui.css">
<title>{APP_NAME} - Swagger UI</title>
</head>
<body>
<div id="swagger-ui"></div>
<script src="{SWAGGER_UI_CDN}/swagger-ui-bundle.js"></script>
<script>
const ui = SwaggerUIBundle({{
    url: '{OPENAPI_PATH}',
    dom_id: '#swagger-ui',
    layout: 'BaseLayout',
    deepLinking: true,
}})
</script>
</body>
</html>"#
    ))
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Not Found")))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_info() {
        let info = service_info();
        assert_eq!(info.message, "NYTimes Article Microservice");
        assert_eq!(info.version, "1.0.0");
        assert_eq!(info.endpoints, vec![TOP_STORIES_PATH, ARTICLE_SEARCH_PATH]);
        assert_eq!(info.documentation, "/docs");
    }

    #[test]
    fn test_search_query_requires_q() {
        assert!(ArticleSearchQuery::default().into_params().is_err());

        let empty = ArticleSearchQuery {
            q: Some(String::new()),
            ..Default::default()
        };
        assert!(empty.into_params().is_err());
    }

    #[test]
    fn test_search_query_keeps_raw_values() {
        let query = ArticleSearchQuery {
            q: Some("  Climate Change ".to_string()),
            begin_date: Some("2024-13-45".to_string()),
            end_date: None,
        };

        let params = query.into_params().unwrap();
        assert_eq!(params.query, "  Climate Change ");
        assert_eq!(params.begin_date.as_deref(), Some("2024-13-45"));
        assert!(params.end_date.is_none());
    }
}
