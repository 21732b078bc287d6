//! Client configuration structures and loaders.
use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use client_gateway_http::GatewayConfig;
use runtime::{LimitChangePolicy, PageSize, RuntimeConfig};

/// Configuration required to bootstrap the gateway and the runtime.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    pub gateway: GatewayConfig,
    pub runtime: RuntimeConfig,
}

impl ClientConfig {
    pub const fn new(gateway: GatewayConfig, runtime: RuntimeConfig) -> Self {
        Self { gateway, runtime }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `LEADERBOARD_API_BASE_URL` - Server base URL (default: http://localhost:5000)
    /// - `HISTORY_PAGE_SIZE` - Initial history rows per page, 5, 10 or 20 (default: 5)
    /// - `RESET_PAGE_ON_LIMIT_CHANGE` - Jump to page 1 when rows per page change (default: false)
    /// - `SYNC_COMMAND_BUFFER` - Intent queue size (default: 32)
    /// - `SYNC_EVENT_BUFFER` - Event bus capacity per topic (default: 100)
    /// - `SHUTDOWN_GRACE_MS` - Time queued requests get to finish on quit (default: 2000)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup("LEADERBOARD_API_BASE_URL").filter(|url| !url.trim().is_empty())
        {
            config.gateway =
                GatewayConfig::new(url.trim()).context("invalid LEADERBOARD_API_BASE_URL")?;
        }

        if let Some(raw) = lookup("HISTORY_PAGE_SIZE") {
            config.runtime.page_size = raw
                .parse::<PageSize>()
                .map_err(anyhow::Error::msg)
                .context("invalid HISTORY_PAGE_SIZE")?;
        }

        if let Some(reset) = read_env::<bool>(&lookup, "RESET_PAGE_ON_LIMIT_CHANGE") {
            config.runtime.limit_change_policy = if reset {
                LimitChangePolicy::ResetToFirst
            } else {
                LimitChangePolicy::KeepPage
            };
        }

        if let Some(capacity) = read_env::<usize>(&lookup, "SYNC_COMMAND_BUFFER") {
            config.runtime.command_buffer_size = capacity.max(1);
        }

        if let Some(capacity) = read_env::<usize>(&lookup, "SYNC_EVENT_BUFFER") {
            config.runtime.event_buffer_size = capacity.max(1);
        }

        if let Some(millis) = read_env::<u64>(&lookup, "SHUTDOWN_GRACE_MS") {
            config.runtime.shutdown_grace = Duration::from_millis(millis);
        }

        Ok(config)
    }
}

fn read_env<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<ClientConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_variables() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.gateway.base_url(), "http://localhost:5000");
        assert_eq!(config.runtime, RuntimeConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = config_from(&[
            ("LEADERBOARD_API_BASE_URL", "https://points.example.com/"),
            ("HISTORY_PAGE_SIZE", "20"),
            ("RESET_PAGE_ON_LIMIT_CHANGE", "true"),
            ("SYNC_COMMAND_BUFFER", "0"),
            ("SYNC_EVENT_BUFFER", "16"),
            ("SHUTDOWN_GRACE_MS", "250"),
        ])
        .unwrap();

        assert_eq!(config.gateway.base_url(), "https://points.example.com");
        assert_eq!(config.runtime.page_size, PageSize::Twenty);
        assert_eq!(
            config.runtime.limit_change_policy,
            LimitChangePolicy::ResetToFirst
        );
        assert_eq!(config.runtime.command_buffer_size, 1);
        assert_eq!(config.runtime.event_buffer_size, 16);
        assert_eq!(config.runtime.shutdown_grace, Duration::from_millis(250));
    }

    #[test]
    fn unparseable_numbers_keep_defaults() {
        let config = config_from(&[("SYNC_EVENT_BUFFER", "lots")]).unwrap();
        assert_eq!(config.runtime.event_buffer_size, 100);
    }

    #[test]
    fn invalid_url_and_page_size_are_errors() {
        assert!(config_from(&[("LEADERBOARD_API_BASE_URL", "localhost:5000")]).is_err());
        assert!(config_from(&[("HISTORY_PAGE_SIZE", "7")]).is_err());
    }
}
