//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults run a local storefront against the
//! public Fake Store API.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL (default: <http://localhost:3000>)
//! - `STOREFRONT_DATABASE_URL` - `SQLite` session store (falls back to `DATABASE_URL`,
//!   default: `sqlite://swiftcart.db?mode=rwc`)
//! - `CATALOG_API_URL` - Catalog REST API base (default: <https://fakestoreapi.com>)
//! - `CATALOG_TIMEOUT_SECS` - Per-request timeout for catalog calls (default: 10)
//! - `LOG_FORMAT` - `text` or `json` (default: text)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::telemetry::LogFormat;

/// Default catalog API base URL.
pub const DEFAULT_CATALOG_API_URL: &str = "https://fakestoreapi.com";

/// Default session store location.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://swiftcart.db?mode=rwc";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// `SQLite` connection URL for the session store
    pub database_url: String,
    /// Catalog API configuration
    pub catalog: CatalogConfig,
    /// Log line format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

/// Catalog REST API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// API base URL (e.g. <https://fakestoreapi.com>)
    pub base_url: Url,
    /// Timeout applied to every catalog request
    pub timeout: Duration,
}

impl CatalogConfig {
    /// Configuration pointing at `base_url` with the default timeout.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(10),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env { lookup };

        let host = env.parsed("STOREFRONT_HOST", "127.0.0.1")?;
        let port = env.parsed("STOREFRONT_PORT", "3000")?;
        let base_url = env.or_default("STOREFRONT_BASE_URL", "http://localhost:3000");
        let database_url = env
            .optional("STOREFRONT_DATABASE_URL")
            .or_else(|| env.optional("DATABASE_URL"))
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let catalog = CatalogConfig {
            base_url: parse_api_url(
                "CATALOG_API_URL",
                &env.or_default("CATALOG_API_URL", DEFAULT_CATALOG_API_URL),
            )?,
            timeout: Duration::from_secs(env.parsed("CATALOG_TIMEOUT_SECS", "10")?),
        };

        Ok(Self {
            host,
            port,
            base_url,
            database_url,
            catalog,
            log_format: env.parsed("LOG_FORMAT", "text")?,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: env.parsed("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: env.parsed("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS (secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F> {
    lookup: F,
}

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get an optional variable, treating blank values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Get and parse a variable with a default value.
    fn parsed<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.or_default(key, default)
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }
}

/// Parse an absolute `http(s)` API base URL.
fn parse_api_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected an http(s) URL, got '{value}'"),
        ));
    }

    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.catalog.base_url.as_str(), "https://fakestoreapi.com/");
        assert_eq!(config.catalog.timeout, Duration::from_secs(10));
        assert!(config.sentry_dsn.is_none());
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(!config.is_secure());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("STOREFRONT_HOST", "0.0.0.0"),
            ("STOREFRONT_PORT", "8080"),
            ("STOREFRONT_BASE_URL", "https://shop.example.com"),
            ("CATALOG_API_URL", "http://127.0.0.1:9000"),
            ("CATALOG_TIMEOUT_SECS", "3"),
            ("SENTRY_TRACES_SAMPLE_RATE", "0.25"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert!(config.is_secure());
        assert_eq!(config.catalog.base_url.as_str(), "http://127.0.0.1:9000/");
        assert_eq!(config.catalog.timeout, Duration::from_secs(3));
        assert!((config.sentry_traces_sample_rate - 0.25).abs() < f32::EPSILON);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_database_url_fallback() {
        let config = load(&[("DATABASE_URL", "sqlite://fallback.db")]).unwrap();
        assert_eq!(config.database_url, "sqlite://fallback.db");

        let config = load(&[
            ("DATABASE_URL", "sqlite://fallback.db"),
            ("STOREFRONT_DATABASE_URL", "sqlite://primary.db"),
        ])
        .unwrap();
        assert_eq!(config.database_url, "sqlite://primary.db");
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = load(&[("STOREFRONT_PORT", "  ")]).unwrap();
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("STOREFRONT_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "STOREFRONT_PORT"));
    }

    #[test]
    fn test_catalog_url_must_be_http() {
        let err = load(&[("CATALOG_API_URL", "ftp://files.example.com")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "CATALOG_API_URL"));

        let err = load(&[("CATALOG_API_URL", "not a url")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }
}
