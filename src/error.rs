//! Unified error handling for the nytimes-proxy crate
//!
//! - [`ConfigError`] - startup configuration problems, fatal
//! - [`UpstreamError`] - failures talking to the NYTimes API
//! - [`Error`] - crate-level error returned by services and handlers
//!
//! Every [`Error`] converts into an HTTP response with a `{"detail": ...}`
//! body. Upstream failures of any kind surface as 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::models::Category;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Credential absent or empty
    #[error("NYTIMES_API_KEY environment variable is required")]
    MissingApiKey,

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Errors from a single outbound call to the NYTimes API
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Transport failure (connect, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("HTTP error ({status}): {message}")]
    Status { status: u16, message: String },

    /// Body was not valid JSON
    #[error("Invalid JSON body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl UpstreamError {
    /// True when the upstream answered but rejected the request
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status { .. })
    }
}

/// Classification used to pick the response status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Upstream,
    Validation,
}

/// Crate-level error type
#[derive(Error, Debug)]
pub enum Error {
    /// A top stories category failed; the whole aggregate is abandoned
    #[error("Error fetching stories for category {category}: {source}")]
    TopStories {
        category: Category,
        #[source]
        source: UpstreamError,
    },

    #[error("Error searching articles: {0}")]
    Search(#[source] UpstreamError),

    /// Required query parameter missing or empty
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    /// Query string could not be decoded at all
    #[error("{0}")]
    QueryParse(String),
}

impl Error {
    pub fn top_stories(category: Category, source: UpstreamError) -> Self {
        Self::TopStories { category, source }
    }

    pub fn search(source: UpstreamError) -> Self {
        Self::Search(source)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TopStories { .. } | Self::Search(_) => ErrorCategory::Upstream,
            Self::Validation { .. } | Self::QueryParse(_) => ErrorCategory::Validation,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.category() {
            ErrorCategory::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCategory::Upstream => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error body returned for failed requests
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// One entry of a validation error body
#[derive(Debug, Serialize)]
pub struct ValidationIssue {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ValidationIssue {
    fn new(loc: Vec<String>, msg: String, kind: &str) -> Self {
        Self {
            loc,
            msg,
            kind: kind.to_string(),
        }
    }
}

/// Validation error body: `{"detail": [{"loc": [...], "msg": ..., "type": ...}]}`
#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub detail: Vec<ValidationIssue>,
}

impl ValidationResponse {
    fn single(issue: ValidationIssue) -> Self {
        Self {
            detail: vec![issue],
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            Self::Validation { field, message } => {
                let loc = vec!["query".to_string(), field];
                let issue = ValidationIssue::new(loc, message, "missing");
                (status, Json(ValidationResponse::single(issue))).into_response()
            }
            Self::QueryParse(message) => {
                let loc = vec!["query".to_string()];
                let issue = ValidationIssue::new(loc, message, "query_parse");
                (status, Json(ValidationResponse::single(issue))).into_response()
            }
            other => {
                tracing::error!(error = %other, "Request failed");
                (status, Json(ErrorResponse::new(other.to_string()))).into_response()
            }
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error() -> UpstreamError {
        UpstreamError::Status {
            status: 401,
            message: "Invalid ApiKey".to_string(),
        }
    }

    #[test]
    fn test_top_stories_detail_names_category() {
        let err = Error::top_stories(Category::Movies, status_error());
        assert_eq!(
            err.to_string(),
            "Error fetching stories for category movies: HTTP error (401): Invalid ApiKey"
        );
        assert_eq!(err.category(), ErrorCategory::Upstream);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_search_detail() {
        let err = Error::search(status_error());
        assert!(err.to_string().starts_with("Error searching articles: "));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_is_unprocessable() {
        let err = Error::validation("q", "Field required");
        assert_eq!(err.to_string(), "q: Field required");
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_query_parse_is_unprocessable() {
        let err = Error::QueryParse("duplicate field `q`".to_string());
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_decode_error_is_not_status() {
        let decode = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = UpstreamError::from(decode);
        assert!(!err.is_status());
        assert!(status_error().is_status());
    }
}
