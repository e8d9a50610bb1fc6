//! OpenAPI description of the proxy's routes

use serde_json::{json, Value};

use crate::config::{APP_NAME, APP_VERSION};

use super::api::{ARTICLE_SEARCH_PATH, TOP_STORIES_PATH};

const SERVICE_DESCRIPTION: &str =
    "A microservice that integrates with NYTimes Top Stories and Article Search APIs";

const TOP_STORIES_DESCRIPTION: &str = "Get the two most recent top stories from each category: \
     arts, food, movies, travel, and science";

fn string_schema() -> Value {
    json!({"type": "string"})
}

fn schema_ref(name: &str) -> Value {
    json!({"$ref": format!("#/components/schemas/{name}")})
}

fn json_response(description: &str, schema: Value) -> Value {
    json!({
        "description": description,
        "content": {"application/json": {"schema": schema}}
    })
}

fn ok_response(schema: &str) -> Value {
    json_response("Successful Response", schema_ref(schema))
}

fn error_response(description: &str) -> Value {
    json_response(description, schema_ref("HTTPError"))
}

fn query_param(name: &str, required: bool, description: &str) -> Value {
    json!({
        "name": name,
        "in": "query",
        "required": required,
        "description": description,
        "schema": string_schema()
    })
}

/// OpenAPI 3.1 document served at `/openapi.json`
pub fn openapi_document() -> Value {
    json!({
        "openapi": "3.1.0",
        "info": {
            "title": APP_NAME,
            "description": SERVICE_DESCRIPTION,
            "version": APP_VERSION
        },
        "paths": {
            "/": {
                "get": {
                    "summary": "Root",
                    "operationId": "root",
                    "responses": {
                        "200": json_response("API information", json!({"type": "object"}))
                    }
                }
            },
            TOP_STORIES_PATH: {
                "get": {
                    "tags": ["nytimes"],
                    "summary": "Get Top Stories",
                    "description": TOP_STORIES_DESCRIPTION,
                    "operationId": "get_top_stories",
                    "responses": {
                        "200": ok_response("TopStoriesResponse"),
                        "500": error_response("Upstream failure")
                    }
                }
            },
            ARTICLE_SEARCH_PATH: {
                "get": {
                    "tags": ["nytimes"],
                    "summary": "Search Articles",
                    "description": "Search NYTimes articles using the Article Search API",
                    "operationId": "search_articles",
                    "parameters": [
                        query_param("q", true, "Search query keyword"),
                        query_param("begin_date", false, "Begin date (YYYYMMDD format)"),
                        query_param("end_date", false, "End date (YYYYMMDD format)")
                    ],
                    "responses": {
                        "200": ok_response("ArticleSearchResponse"),
                        "422": json_response("Validation Error", schema_ref("HTTPValidationError")),
                        "500": error_response("Upstream failure")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "TopStory": {
                    "type": "object",
                    "required": ["title", "section", "url", "abstract", "published_date"],
                    "properties": {
                        "title": string_schema(),
                        "section": string_schema(),
                        "url": string_schema(),
                        "abstract": string_schema(),
                        "published_date": string_schema()
                    }
                },
                "TopStoriesResponse": {
                    "type": "object",
                    "required": ["stories", "total_count"],
                    "properties": {
                        "stories": {"type": "array", "items": schema_ref("TopStory")},
                        "total_count": {"type": "integer"}
                    }
                },
                "Article": {
                    "type": "object",
                    "required": ["headline", "snippet", "web_url", "pub_date"],
                    "properties": {
                        "headline": string_schema(),
                        "snippet": string_schema(),
                        "web_url": string_schema(),
                        "pub_date": string_schema()
                    }
                },
                "ArticleSearchResponse": {
                    "type": "object",
                    "required": ["articles", "total_count", "query"],
                    "properties": {
                        "articles": {"type": "array", "items": schema_ref("Article")},
                        "total_count": {"type": "integer"},
                        "query": string_schema()
                    }
                },
                "HTTPError": {
                    "type": "object",
                    "required": ["detail"],
                    "properties": {"detail": string_schema()}
                },
                "HTTPValidationError": {
                    "type": "object",
                    "properties": {
                        "detail": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "required": ["loc", "msg", "type"],
                                "properties": {
                                    "loc": {"type": "array", "items": string_schema()},
                                    "msg": string_schema(),
                                    "type": string_schema()
                                }
                            }
                        }
                    }
                }
            }
        }
    })
}
