//! HTTP surface of the proxy
//!
//! # Routes
//!
//! ```text
//! GET  /                         service information
//! GET  /nytimes/topstories       two stories from each of five categories
//! GET  /nytimes/articlesearch    ?q=...&begin_date=YYYYMMDD&end_date=YYYYMMDD
//! GET  /openapi.json             API description
//! GET  /docs                     Swagger UI
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use nytimes_proxy::config::Config;
//! use nytimes_proxy::gateway::ProxyServer;
//!
//! let config = Config::from_env()?;
//! let server = ProxyServer::new(config)?;
//! server.start().await?;
//! ```

pub mod api;
pub mod openapi;
pub mod server;

pub use api::create_router;
pub use server::{AppState, ProxyServer, ServerError, ServerInfo};
