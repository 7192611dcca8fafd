//! Reqwest client configuration for the gateway metadata API.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Default timeout for HTTP requests: 30 seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the reqwest-based gateway client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct HasuraConfig {
    /// Base URL of the gateway (e.g. `http://hasura:8080`)
    #[cfg_attr(feature = "config", arg(long = "hasura-url", env = "HASURA_URL"))]
    pub url: String,

    /// Admin secret sent with every administrative request
    #[cfg_attr(
        feature = "config",
        arg(long = "hasura-admin-secret", env = "HASURA_ADMIN_SECRET")
    )]
    pub admin_secret: String,

    /// HTTP request timeout in seconds
    #[cfg_attr(
        feature = "config",
        arg(long = "hasura-timeout", env = "HASURA_TIMEOUT", default_value = "30")
    )]
    #[serde(default = "default_timeout_secs")]
    pub timeout: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl HasuraConfig {
    /// Create a new configuration with the default timeout.
    pub fn new(url: impl Into<String>, admin_secret: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            admin_secret: admin_secret.into(),
            timeout: default_timeout_secs(),
        }
    }

    /// Returns the timeout as a Duration.
    pub fn effective_timeout(&self) -> Duration {
        if self.timeout == 0 {
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        } else {
            Duration::from_secs(self.timeout)
        }
    }

    /// Set the timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout = timeout_secs;
        self
    }

    /// Returns the base URL with a guaranteed trailing slash.
    pub(crate) fn base_url(&self) -> String {
        if self.url.ends_with('/') {
            self.url.clone()
        } else {
            format!("{}/", self.url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout() {
        let config = HasuraConfig::new("http://hasura:8080", "secret");
        assert_eq!(config.timeout, 30);
        assert_eq!(config.effective_timeout(), Duration::from_secs(30));
        assert_eq!(config.with_timeout(0).effective_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_base_url_slash_normalization() {
        let config = HasuraConfig::new("http://hasura:8080", "secret");
        assert_eq!(config.base_url(), "http://hasura:8080/");

        let config = HasuraConfig::new("http://hasura:8080/", "secret");
        assert_eq!(config.base_url(), "http://hasura:8080/");
    }
}
