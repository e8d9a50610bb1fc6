//! Configuration management for the NYTimes proxy
//!
//! Configuration is read once at startup from environment variables (and an
//! optional `.env` file) and passed explicitly into the server state. A
//! missing credential is fatal: [`Config::from_env`] refuses to produce a
//! value and the process never binds its listener.

use std::net::SocketAddr;
use url::Url;

use crate::error::ConfigError;

/// Service name reported by the root endpoint and the API description
pub const APP_NAME: &str = "NYTimes Article Microservice";

/// Service version reported by the root endpoint and the API description
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upstream API family serving top stories and article search
pub const DEFAULT_BASE_URL: &str = "https://api.nytimes.com/svc";

/// Default listen address
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";

/// Main configuration structure
#[derive(Clone)]
pub struct Config {
    /// Upstream API key, sent as the `api-key` query parameter
    pub api_key: String,

    /// Upstream base URL, without trailing slash
    pub base_url: String,

    /// Server bind address
    pub bind_address: SocketAddr,

    /// Enable permissive CORS
    pub enable_cors: bool,

    /// Enable per-request tracing
    pub enable_request_logging: bool,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("bind_address", &self.bind_address)
            .field("enable_cors", &self.enable_cors)
            .field("enable_request_logging", &self.enable_request_logging)
            .field("logging", &self.logging)
            .finish()
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is loaded first if present;
    /// variables already set in the environment take precedence.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] if `NYTIMES_API_KEY` is absent
    /// or empty, and [`ConfigError::InvalidValue`] for unparsable overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(key) = lookup("NYTIMES_API_KEY") {
            builder = builder.api_key(key);
        }

        if let Some(url) = lookup("NYTIMES_BASE_URL").filter(|v| !v.trim().is_empty()) {
            builder = builder.base_url(url);
        }

        if let Some(addr) = lookup("NYTIMES_PROXY_BIND").filter(|v| !v.trim().is_empty()) {
            builder = builder.bind_address_str(addr.trim())?;
        }

        if let Some(value) = lookup("NYTIMES_PROXY_CORS") {
            builder = builder.enable_cors(parse_bool("NYTIMES_PROXY_CORS", &value)?);
        }

        if let Some(value) = lookup("NYTIMES_PROXY_REQUEST_LOGGING") {
            builder = builder
                .enable_request_logging(parse_bool("NYTIMES_PROXY_REQUEST_LOGGING", &value)?);
        }

        if let Some(level) = lookup("NYTIMES_PROXY_LOG_LEVEL") {
            builder = builder.log_level(level);
        }

        if let Some(format) = lookup("NYTIMES_PROXY_LOG_FORMAT") {
            builder = builder.log_format(format);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        let url = Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidValue {
            field: "base_url".to_string(),
            reason: format!("{}: {}", self.base_url, e),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "base_url".to_string(),
                reason: format!("Unsupported scheme: {}", url.scheme()),
            });
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "log_format".to_string(),
                reason: format!("Expected 'text' or 'json', got '{}'", self.logging.format),
            });
        }

        Ok(())
    }
}

fn parse_bool(field: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("Expected a boolean, got '{other}'"),
        }),
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    bind_address: Option<SocketAddr>,
    enable_cors: Option<bool>,
    enable_request_logging: Option<bool>,
    log_level: Option<String>,
    log_format: Option<String>,
}

impl ConfigBuilder {
    /// Set the upstream API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the upstream base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set bind address
    pub fn bind_address(mut self, addr: SocketAddr) -> Self {
        self.bind_address = Some(addr);
        self
    }

    /// Set bind address from string
    pub fn bind_address_str(mut self, addr: &str) -> Result<Self, ConfigError> {
        self.bind_address = Some(addr.parse().map_err(|_| ConfigError::InvalidValue {
            field: "bind_address".to_string(),
            reason: format!("Invalid address: {addr}"),
        })?);
        Ok(self)
    }

    /// Enable/disable CORS
    pub fn enable_cors(mut self, enable: bool) -> Self {
        self.enable_cors = Some(enable);
        self
    }

    /// Enable/disable request logging
    pub fn enable_request_logging(mut self, enable: bool) -> Self {
        self.enable_request_logging = Some(enable);
        self
    }

    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    pub fn log_format(mut self, format: impl Into<String>) -> Self {
        self.log_format = Some(format.into());
        self
    }

    /// Build and validate the config
    pub fn build(self) -> Result<Config, ConfigError> {
        let defaults = LoggingConfig::default();
        let bind_address = match self.bind_address {
            Some(addr) => addr,
            None => DEFAULT_BIND_ADDRESS
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    field: "bind_address".to_string(),
                    reason: format!("Invalid address: {DEFAULT_BIND_ADDRESS}"),
                })?,
        };

        let config = Config {
            api_key: self.api_key.unwrap_or_default(),
            base_url: self
                .base_url
                .map(|u| u.trim().trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            bind_address,
            enable_cors: self.enable_cors.unwrap_or(true),
            enable_request_logging: self.enable_request_logging.unwrap_or(true),
            logging: LoggingConfig {
                level: self.log_level.unwrap_or(defaults.level),
                format: self.log_format.unwrap_or(defaults.format).to_lowercase(),
            },
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::builder().api_key("key").build().unwrap();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.bind_address.port(), 8000);
        assert!(config.enable_cors);
        assert!(config.enable_request_logging);
        assert_eq!(config.logging.format, "text");
    }

    #[test]
    fn test_missing_api_key_fails() {
        assert_eq!(
            Config::builder().build().unwrap_err(),
            ConfigError::MissingApiKey
        );
        assert_eq!(
            Config::builder().api_key("   ").build().unwrap_err(),
            ConfigError::MissingApiKey
        );
    }

    #[test]
    fn test_api_key_kept_as_configured() {
        let config = Config::builder().api_key(" key-with-spaces ").build().unwrap();
        assert_eq!(config.api_key, " key-with-spaces ");
    }

    #[test]
    fn test_from_lookup() {
        let config = Config::from_lookup(lookup_from(&[
            ("NYTIMES_API_KEY", "secret"),
            ("NYTIMES_BASE_URL", "http://localhost:9000/svc/"),
            ("NYTIMES_PROXY_BIND", "127.0.0.1:9100"),
            ("NYTIMES_PROXY_CORS", "false"),
            ("NYTIMES_PROXY_LOG_FORMAT", "JSON"),
        ]))
        .unwrap();

        assert_eq!(config.api_key, "secret");
        assert_eq!(config.base_url, "http://localhost:9000/svc");
        assert_eq!(config.bind_address.port(), 9100);
        assert!(!config.enable_cors);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_from_lookup_without_key() {
        let result = Config::from_lookup(lookup_from(&[("NYTIMES_BASE_URL", "http://x")]));
        assert_eq!(result.unwrap_err(), ConfigError::MissingApiKey);
    }

    #[test]
    fn test_invalid_base_url() {
        let result = Config::builder().api_key("k").base_url("not a url").build();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));

        let result = Config::builder().api_key("k").base_url("ftp://host/svc").build();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_invalid_bool() {
        let result = Config::from_lookup(lookup_from(&[
            ("NYTIMES_API_KEY", "k"),
            ("NYTIMES_PROXY_CORS", "maybe"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config::builder().api_key("super-secret").build().unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
