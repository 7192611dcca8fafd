//! All `axum::`[`Router`]s with related handlers.
//!
//! The surface implements the provisioning coordinator contract: workflow
//! outcomes answer with 200 and a [`ProvisioningStatus`], validation
//! defects with 400 and a [`ValidationError`], and unexpected failures
//! with 500 and a [`SystemError`]. The contract's asynchronous
//! status-polling endpoints exist but answer "Not implemented"; this
//! service keeps no provisioning history.
//!
//! [`Router`]: axum::Router

mod request;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Json;
use portside_core::status::{ProvisioningStatus, SystemError, ValidationError, ValidationResult};
use portside_provision::WorkflowOutcome;
use serde_json::Value;

pub use crate::handler::request::{
    DescriptorKind, ProvisionInfo, ProvisioningRequest, UpdateAclRequest,
};
use crate::service::ServiceState;

/// Tracing target for request handling.
const TRACING_TARGET: &str = "portside_server::handler";

/// Assembles the full route table over the given state.
pub fn routes(state: ServiceState) -> Router {
    Router::new()
        .route("/v1/validate", post(validate))
        .route("/v1/provision", post(provision))
        .route("/v1/provision/{token}/status", get(provision_status))
        .route("/v1/unprovision", post(unprovision))
        .route("/v1/updateacl", post(update_acl))
        .route("/v2/validate", post(async_validate))
        .route("/v2/validate/{token}/status", get(async_validate_status))
        .route("/healthz", get(health))
        .with_state(state)
}

/// Validates a provisioning request without touching any remote.
async fn validate(
    State(state): State<ServiceState>,
    Json(body): Json<ProvisioningRequest>,
) -> Response {
    match request::unpack_provisioning_request(&body) {
        Ok((product, ports)) => {
            let result = state.provisioner.validate(&product, &ports);
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(error) => {
            let result = ValidationResult {
                valid: false,
                error: Some(error),
            };
            (StatusCode::BAD_REQUEST, Json(result)).into_response()
        }
    }
}

/// Provisions the component named by the descriptor.
async fn provision(
    State(state): State<ServiceState>,
    Json(body): Json<ProvisioningRequest>,
) -> Response {
    let (product, ports) = match request::unpack_provisioning_request(&body) {
        Ok(unpacked) => unpacked,
        Err(error) => return (StatusCode::BAD_REQUEST, Json(error)).into_response(),
    };

    match state.provisioner.provision(&product, &ports).await {
        Ok(outcome) => workflow_response(outcome),
        Err(error) => system_error_response("/v1/provision", &error),
    }
}

/// Unprovisions the component named by the descriptor.
async fn unprovision(
    State(state): State<ServiceState>,
    Json(body): Json<ProvisioningRequest>,
) -> Response {
    let (product, ports) = match request::unpack_provisioning_request(&body) {
        Ok(unpacked) => unpacked,
        Err(error) => return (StatusCode::BAD_REQUEST, Json(error)).into_response(),
    };

    match state.provisioner.unprovision(&product, &ports).await {
        Ok(outcome) => workflow_response(outcome),
        Err(error) => system_error_response("/v1/unprovision", &error),
    }
}

/// Replaces the component role's membership with the requested subjects.
async fn update_acl(
    State(state): State<ServiceState>,
    Json(body): Json<UpdateAclRequest>,
) -> Response {
    let (product, ports) = match request::unpack_descriptor(&body.provision_info.request) {
        Ok(unpacked) => unpacked,
        Err(error) => return (StatusCode::BAD_REQUEST, Json(error)).into_response(),
    };

    match state
        .provisioner
        .update_acl(&product, &ports, &body.refs)
        .await
    {
        Ok(outcome) => workflow_response(outcome),
        Err(error) => system_error_response("/v1/updateacl", &error),
    }
}

/// Status of an asynchronous provisioning request; never implemented, this
/// service answers synchronously and keeps no history.
async fn provision_status(Path(_token): Path<String>) -> Response {
    not_implemented()
}

/// Asynchronous validation; never implemented.
async fn async_validate(Json(_body): Json<Value>) -> Response {
    not_implemented()
}

/// Status of an asynchronous validation request; never implemented.
async fn async_validate_status(Path(_token): Path<String>) -> Response {
    not_implemented()
}

/// Liveness probe of this service.
async fn health() -> Response {
    StatusCode::OK.into_response()
}

fn workflow_response(outcome: WorkflowOutcome) -> Response {
    match outcome {
        WorkflowOutcome::Completed(message) => {
            (StatusCode::OK, Json(ProvisioningStatus::completed(message))).into_response()
        }
        WorkflowOutcome::Failed(message) => {
            (StatusCode::OK, Json(ProvisioningStatus::failed(message))).into_response()
        }
        WorkflowOutcome::Invalid(errors) => {
            (StatusCode::BAD_REQUEST, Json(ValidationError::new(errors))).into_response()
        }
    }
}

fn system_error_response(operation: &'static str, error: &crate::Error) -> Response {
    tracing::error!(
        target: TRACING_TARGET,
        operation,
        error = %error,
        "Workflow operation error"
    );

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(SystemError::new(error.to_string())),
    )
        .into_response()
}

fn not_implemented() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(SystemError::new("Not implemented")),
    )
        .into_response()
}
