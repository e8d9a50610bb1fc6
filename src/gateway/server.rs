//! Proxy server implementation
//!
//! This module wires configuration, the upstream client and the router
//! together and runs the HTTP listener.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::nytimes::{NytClient, NytService};

use super::api::create_router;

// ============================================================================
// App State
// ============================================================================

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Upstream service
    pub service: NytService,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, ServerError> {
        config
            .validate()
            .map_err(|e| ServerError::ConfigError(e.to_string()))?;

        let client = NytClient::new(&config).map_err(|e| ServerError::InitError(e.to_string()))?;

        Ok(Self {
            service: NytService::new(client),
            config: Arc::new(config),
        })
    }
}

// ============================================================================
// Proxy Server
// ============================================================================

/// Main proxy server
pub struct ProxyServer {
    config: Arc<Config>,
    state: AppState,
}

impl ProxyServer {
    /// Create a new proxy server
    pub fn new(config: Config) -> Result<Self, ServerError> {
        let state = AppState::new(config)?;

        Ok(Self {
            config: state.config.clone(),
            state,
        })
    }

    /// Get the application state
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        let mut router = create_router(self.state.clone());

        if self.config.enable_cors {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        if self.config.enable_request_logging {
            router = router.layer(TraceLayer::new_for_http());
        }

        router
    }

    /// Start the server on the configured address
    pub async fn start(&self) -> Result<(), ServerError> {
        self.start_with_shutdown(std::future::pending::<()>()).await
    }

    /// Start with graceful shutdown
    pub async fn start_with_shutdown(
        &self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> Result<(), ServerError> {
        let addr = self.config.bind_address;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(format!("{addr}: {e}")))?;

        self.serve(listener, shutdown_signal).await
    }

    /// Serve on an already bound listener
    pub async fn serve(
        &self,
        listener: TcpListener,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> Result<(), ServerError> {
        let local_addr = listener
            .local_addr()
            .map_err(|e| ServerError::BindError(e.to_string()))?;

        tracing::info!(
            address = %local_addr,
            upstream = %self.config.base_url,
            "Starting proxy server"
        );

        axum::serve(listener, self.build_router())
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ServerError::ServeError(e.to_string()))?;

        tracing::info!("Proxy server shutdown complete");
        Ok(())
    }

    /// Get server info
    pub fn info(&self) -> ServerInfo {
        ServerInfo {
            bind_address: self.config.bind_address,
            upstream_base_url: self.config.base_url.clone(),
            cors_enabled: self.config.enable_cors,
            request_logging_enabled: self.config.enable_request_logging,
        }
    }
}

/// Server information
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub bind_address: SocketAddr,
    pub upstream_base_url: String,
    pub cors_enabled: bool,
    pub request_logging_enabled: bool,
}

impl ServerInfo {
    /// Format as display string
    pub fn display(&self) -> String {
        format!(
            "{}\n\
             {:-<40}\n\
             Bind Address: {}\n\
             Upstream: {}\n\
             API Key: configured\n\
             CORS: {}\n\
             Request Logging: {}",
            crate::config::APP_NAME,
            "",
            self.bind_address,
            self.upstream_base_url,
            if self.cors_enabled { "enabled" } else { "disabled" },
            if self.request_logging_enabled { "enabled" } else { "disabled" }
        )
    }
}

// ============================================================================
// Server Errors
// ============================================================================

/// Errors starting or running the server
#[derive(Error, Debug, Clone)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Upstream client could not be built
    #[error("Initialization error: {0}")]
    InitError(String),

    #[error("Failed to bind: {0}")]
    BindError(String),

    #[error("Server error: {0}")]
    ServeError(String),
}

// ============================================================================
// Tests
// ============================================================================
