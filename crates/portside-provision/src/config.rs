//! Warehouse connection configuration.

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Connection parameters of the Snowflake warehouse the provisioned data
/// sources read from.
///
/// The workflow engine turns these into the JDBC URL handed to the gateway
/// when registering a data source; the database and schema come from the
/// source output port being provisioned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct WarehouseConfig {
    /// Warehouse account host (e.g. `account.snowflakecomputing.com`)
    #[cfg_attr(
        feature = "config",
        arg(long = "snowflake-host", env = "SNOWFLAKE_HOST")
    )]
    pub host: String,

    /// User the gateway connects as
    #[cfg_attr(
        feature = "config",
        arg(long = "snowflake-user", env = "SNOWFLAKE_USER")
    )]
    pub user: String,

    /// Password of the connecting user
    #[cfg_attr(
        feature = "config",
        arg(long = "snowflake-password", env = "SNOWFLAKE_PASSWORD")
    )]
    pub password: String,

    /// Warehouse role the connection assumes
    #[cfg_attr(
        feature = "config",
        arg(long = "snowflake-role", env = "SNOWFLAKE_ROLE")
    )]
    pub role: String,

    /// Virtual warehouse to run queries on
    #[cfg_attr(
        feature = "config",
        arg(long = "snowflake-warehouse", env = "SNOWFLAKE_WAREHOUSE")
    )]
    pub warehouse: String,
}
