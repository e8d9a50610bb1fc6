//! NYTimes upstream integration
//!
//! - [`client`] - outbound HTTP calls to the Top Stories and Article Search APIs
//! - [`extract`] - permissive field extraction from upstream JSON
//! - [`service`] - aggregation and reshaping into the proxy's response schema

pub mod client;
pub mod extract;
pub mod service;

pub use client::NytClient;
pub use service::{NytService, STORIES_PER_CATEGORY};
