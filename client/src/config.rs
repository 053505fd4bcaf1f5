//! Configuration management for the client.

use reqwest::Url;
use shelf_engine::NOTIFICATION_TTL_MS;
use std::env;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:5000/books";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Collection endpoint of the record store
    pub api_url: Url,
    /// Per-request HTTP timeout
    pub request_timeout: Duration,
    /// How long a notification stays visible
    pub notification_ttl: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = lookup("SHELF_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url =
            Url::parse(&raw_url).map_err(|_| ConfigError::InvalidApiUrl(raw_url.clone()))?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(api_url.scheme().to_string()));
        }

        let timeout_secs = match lookup("SHELF_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidTimeout)?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let notification_ms = match lookup("SHELF_NOTIFICATION_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNotificationTtl)?,
            None => NOTIFICATION_TTL_MS,
        };

        Ok(Self {
            api_url,
            request_timeout: Duration::from_secs(timeout_secs),
            notification_ttl: Duration::from_millis(notification_ms),
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("SHELF_API_URL is not a valid URL: {0}")]
    InvalidApiUrl(String),

    #[error("SHELF_API_URL must use http or https, got {0}")]
    UnsupportedScheme(String),

    #[error("Invalid SHELF_REQUEST_TIMEOUT_SECS value")]
    InvalidTimeout,

    #[error("Invalid SHELF_NOTIFICATION_MS value")]
    InvalidNotificationTtl,
}
