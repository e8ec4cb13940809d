//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `MAINTAINED_HOST` - Bind address (default: 127.0.0.1)
//! - `MAINTAINED_PORT` - Listen port (default: 8000)
//! - `MAINTAINED_PRODUCT_NAME` - Value text of every user's starter badge (default: Maintained)
//! - `MAINTAINED_FETCH_TIMEOUT_MS` - Timeout for one live badge value fetch (default: 3000)
//! - `MAINTAINED_TOKEN_TTL_SECS` - How long an authorized bearer token stays valid (default: 600)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;

/// Product name shown on starter badges when none is configured.
pub const DEFAULT_PRODUCT_NAME: &str = "Maintained";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Value text of the badge seeded for new users
    pub product_name: String,
    /// Upper bound on a single live value fetch
    pub fetch_timeout: Duration,
    /// Validity window of an authorized bearer token
    pub token_ttl: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 8000,
            product_name: DEFAULT_PRODUCT_NAME.to_string(),
            fetch_timeout: Duration::from_millis(3000),
            token_ttl: Duration::from_secs(600),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set but cannot
    /// be parsed, or if a duration is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("MAINTAINED_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("MAINTAINED_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("MAINTAINED_PORT", "8000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("MAINTAINED_PORT".to_string(), e.to_string()))?;
        let product_name = get_env_or_default("MAINTAINED_PRODUCT_NAME", DEFAULT_PRODUCT_NAME);
        let fetch_timeout =
            Duration::from_millis(get_positive_u64("MAINTAINED_FETCH_TIMEOUT_MS", "3000")?);
        let token_ttl = Duration::from_secs(get_positive_u64("MAINTAINED_TOKEN_TTL_SECS", "600")?);

        Ok(Self {
            host,
            port,
            product_name,
            fetch_timeout,
            token_ttl,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a strictly positive integer, falling back to `default` when unset.
fn get_positive_u64(key: &str, default: &str) -> Result<u64, ConfigError> {
    parse_positive_u64(key, &get_env_or_default(key, default))
}

fn parse_positive_u64(key: &str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be greater than zero".to_string(),
        )),
        Ok(value) => Ok(value),
        Err(e) => Err(ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
    }
}
