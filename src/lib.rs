//! nytimes-proxy - NYTimes Article Microservice
//!
//! A thin HTTP service that proxies the NYTimes Top Stories and Article
//! Search APIs and reshapes their payloads into a simplified schema.
//!
//! # Architecture
//!
//! - [`config`] - Configuration loaded once at startup
//! - [`models`] - Response shapes and request parameters
//! - [`nytimes`] - Upstream client, field extraction and reshaping
//! - [`gateway`] - axum router, handlers and server
//! - [`error`] - Error types and their HTTP mapping
//!
//! # Example
//!
//! ```no_run
//! use nytimes_proxy::config::Config;
//! use nytimes_proxy::gateway::ProxyServer;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = ProxyServer::new(config)?;
//!     server.start().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod nytimes;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{ConfigError, Error, ErrorCategory, Result, UpstreamError};
    pub use crate::gateway::{AppState, ProxyServer};
    pub use crate::models::{
        Article, ArticleSearchResponse, Category, SearchParams, TopStoriesResponse, TopStory,
    };
    pub use crate::nytimes::{NytClient, NytService};
}

// Direct re-exports for convenience
pub use models::{Article, ArticleSearchResponse, Category, TopStoriesResponse, TopStory};
