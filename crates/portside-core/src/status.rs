//! Wire payloads shared by the workflow engine and the HTTP surface.
//!
//! These mirror the provisioning coordinator contract: a request ends in a
//! provisioning status (completed/failed), a structured list of validation
//! error strings, or a structured system error message.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Terminal state of a provisioning operation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ProvisioningState {
    /// Operation is still in flight; never produced by this synchronous
    /// service, kept for contract completeness.
    Running,
    /// Operation converged on the desired state.
    Completed,
    /// Operation stopped at the first non-acceptable remote outcome.
    Failed,
}

/// Outcome of a provisioning, unprovisioning or ACL update operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvisioningStatus {
    /// Terminal state of the operation.
    pub status: ProvisioningState,
    /// Human-readable outcome; on failure this names the failed step and
    /// never echoes raw remote payloads.
    pub result: String,
    /// Optional deployment info to surface to the requester.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<Value>,
}

impl ProvisioningStatus {
    /// Creates a completed status with the given message.
    pub fn completed(result: impl Into<String>) -> Self {
        Self {
            status: ProvisioningState::Completed,
            result: result.into(),
            info: None,
        }
    }

    /// Creates a failed status with the given cause.
    pub fn failed(result: impl Into<String>) -> Self {
        Self {
            status: ProvisioningState::Failed,
            result: result.into(),
            info: None,
        }
    }
}

/// Structured list of validation error strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// One message per violated rule, in rule order.
    pub errors: Vec<String>,
}

impl ValidationError {
    /// Creates a validation error from a list of messages.
    pub fn new(errors: Vec<String>) -> Self {
        Self { errors }
    }

    /// Creates a validation error carrying a single message.
    pub fn single(error: impl Into<String>) -> Self {
        Self {
            errors: vec![error.into()],
        }
    }
}

/// Result of a validation request: valid, or the full error list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the descriptor passed validation.
    pub valid: bool,
    /// The violations when `valid` is false; never set when valid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ValidationError>,
}

impl ValidationResult {
    /// Creates a passing validation result.
    pub fn valid() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    /// Creates a failing validation result with the given messages.
    pub fn invalid(errors: Vec<String>) -> Self {
        Self {
            valid: false,
            error: Some(ValidationError::new(errors)),
        }
    }
}

/// Structured system error message (500-equivalent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemError {
    /// The error message to echo to the requester.
    pub error: String,
}

impl SystemError {
    /// Creates a system error with the given message.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
