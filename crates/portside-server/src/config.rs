//! CLI and server configuration.
//!
//! All options can be provided via CLI arguments or environment variables;
//! use `--help` to see the full list. The gateway, role-mapper and
//! warehouse option groups live with their client crates and are flattened
//! into the CLI here.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use clap::{Args, Parser};
use portside_hasura::reqwest::HasuraConfig;
use portside_provision::WarehouseConfig;
use portside_rolemap::reqwest::RoleMapperConfig;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// HTTP server configuration.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct ServerConfig {
    /// Host address to bind the server to
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// TCP port number for the server to listen on
    #[arg(short = 'p', long, env = "PORT", default_value_t = 8088)]
    pub port: u16,

    /// Maximum time in seconds to wait for graceful shutdown
    #[arg(long, env = "SHUTDOWN_TIMEOUT", default_value_t = 30)]
    pub shutdown_timeout: u64,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

impl ServerConfig {
    /// Returns the socket address to bind to.
    #[must_use]
    pub fn server_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Returns the shutdown timeout as a Duration.
    #[must_use]
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }
}

/// Complete CLI configuration.
///
/// Combines the network binding with the connection settings of the two
/// remote services and the warehouse the provisioned sources read from.
#[derive(Debug, Clone, Parser)]
#[command(name = "portside")]
#[command(about = "Provisioning service for GraphQL gateway output ports")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// Gateway metadata API connection.
    #[clap(flatten)]
    pub hasura: HasuraConfig,

    /// Role-mapping API connection.
    #[clap(flatten)]
    pub role_mapper: RoleMapperConfig,

    /// Warehouse connection parameters for provisioned data sources.
    #[clap(flatten)]
    pub warehouse: WarehouseConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses
    /// CLI arguments.
    ///
    /// .env files must load before clap parses arguments so the `env`
    /// attributes pick their values up.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_addr() {
        let config = ServerConfig {
            host: default_host(),
            port: 8088,
            shutdown_timeout: 30,
        };
        assert_eq!(config.server_addr().to_string(), "127.0.0.1:8088");
        assert_eq!(config.shutdown_timeout(), Duration::from_secs(30));
    }
}
