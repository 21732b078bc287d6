//! HTTP gateway configuration.

use std::env;

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid API base URL {0:?}: must start with http:// or https://")]
    InvalidBaseUrl(String),
}

/// Settings for [`crate::HttpGateway`].
///
/// The base URL is resolved once at process start and never revisited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    base_url: String,
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let config = Self {
            base_url: normalize(base_url.into()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `LEADERBOARD_API_BASE_URL` - Server origin (default: http://localhost:5000)
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var("LEADERBOARD_API_BASE_URL") {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Ok(Self::default()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/api/users`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

fn normalize(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
