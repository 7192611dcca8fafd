//! Reqwest client configuration for the role-mapping API.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Default timeout for HTTP requests: 30 seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the reqwest-based role-mapper client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct RoleMapperConfig {
    /// Base URL of the role-mapping service (e.g. `http://rolemapper:8085`)
    #[cfg_attr(
        feature = "config",
        arg(long = "role-mapper-url", env = "ROLE_MAPPER_URL")
    )]
    pub url: String,

    /// HTTP request timeout in seconds
    #[cfg_attr(
        feature = "config",
        arg(
            long = "role-mapper-timeout",
            env = "ROLE_MAPPER_TIMEOUT",
            default_value = "30"
        )
    )]
    #[serde(default = "default_timeout_secs")]
    pub timeout: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl RoleMapperConfig {
    /// Create a new configuration with the default timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
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
