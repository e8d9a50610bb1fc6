//! Common test utilities

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use nytimes_proxy::config::Config;
use nytimes_proxy::gateway::ProxyServer;
use nytimes_proxy::models::Category;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "test_api_key_for_testing";

pub const ARTICLE_SEARCH_PATH: &str = "/search/v2/articlesearch.json";

/// Config pointing at a mock upstream
pub fn test_config(base_url: &str) -> Config {
    Config::builder()
        .api_key(TEST_API_KEY)
        .base_url(base_url)
        .build()
        .expect("test config should be valid")
}

/// Router wired to a mock upstream
pub fn test_router(mock_server: &MockServer) -> Router {
    ProxyServer::new(test_config(&mock_server.uri()))
        .expect("server should build")
        .build_router()
}

/// Upstream path of a category feed
pub fn top_stories_path(category: Category) -> String {
    format!("/topstories/v2/{}.json", category.as_str())
}

/// A complete upstream top story
pub fn upstream_story(title: &str, section: &str) -> Value {
    json!({
        "title": title,
        "section": section,
        "url": format!("https://www.nytimes.com/{section}/{title}.html"),
        "abstract": format!("Abstract of {title}"),
        "published_date": "2024-01-01T10:00:00-05:00",
        "byline": "ignored"
    })
}

/// Respond to one category feed with the given results
pub async fn mount_category(mock_server: &MockServer, category: Category, results: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(top_stories_path(category)))
        .and(query_param("api-key", TEST_API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "section": category.as_str(),
            "results": results
        })))
        .mount(mock_server)
        .await;
}

/// Respond to every category feed with empty results, except those in `skip`
pub async fn mount_empty_categories(mock_server: &MockServer, skip: &[Category]) {
    for category in Category::ALL {
        if !skip.contains(&category) {
            mount_category(mock_server, category, Vec::new()).await;
        }
    }
}

/// Issue a GET against the router and decode the JSON body
pub async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get_raw(router, uri).await;
    let value = serde_json::from_str(&body).unwrap_or(Value::Null);
    (status, value)
}

/// Issue a GET against the router and return the body as text
pub async fn get_raw(router: Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .expect("router should respond");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");

    (status, String::from_utf8_lossy(&bytes).into_owned())
}
