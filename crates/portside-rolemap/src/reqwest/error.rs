//! Error types for the reqwest-based role-mapper client.

use thiserror::Error;

/// Result type alias for reqwest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for reqwest operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<Error> for crate::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Reqwest(e) => {
                crate::Error::external("role mapper", e.to_string()).with_source(e)
            }
            Error::Serde(e) => {
                crate::Error::protocol("role mapper", "unreadable response body").with_source(e)
            }
        }
    }
}
