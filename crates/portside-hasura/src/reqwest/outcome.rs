//! Outcome classification for metadata API responses.
//!
//! The gateway answers metadata operations with HTTP 200 on success and
//! HTTP 400 carrying a machine-readable `code` when the request conflicts
//! with current state. Classification is centralized here so every
//! operation applies the same rule: 200 maps to success, 400 with the
//! operation's known "already/not" code maps to the soft outcome, anything
//! else maps to failure.

use serde_json::Value;

use crate::types::{
    AddSourceOutcome, CreatePermissionOutcome, DropPermissionOutcome, DropSourceOutcome,
    TrackTableOutcome, UntrackTableOutcome,
};

/// Raw ingredients of a classification: HTTP status plus parsed body.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawResponse<'a> {
    pub status: u16,
    pub body: &'a Value,
}

impl<'a> RawResponse<'a> {
    pub(crate) fn new(status: u16, body: &'a Value) -> Self {
        Self { status, body }
    }

    fn code(&self) -> Option<&str> {
        self.body.get("code").and_then(Value::as_str)
    }

    fn error_text(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }

    /// True when the response is a 400 carrying the given machine code.
    fn has_soft_code(&self, soft_code: &str) -> bool {
        self.status == 400 && self.code() == Some(soft_code)
    }
}

pub(crate) fn classify_add_source(raw: RawResponse<'_>) -> AddSourceOutcome {
    match raw {
        _ if raw.status == 200 => AddSourceOutcome::Success,
        _ if raw.has_soft_code("already-exists") => AddSourceOutcome::AlreadyExists,
        _ => AddSourceOutcome::Failure,
    }
}

pub(crate) fn classify_drop_source(raw: RawResponse<'_>) -> DropSourceOutcome {
    match raw {
        _ if raw.status == 200 => DropSourceOutcome::Success,
        _ if raw.has_soft_code("not-exists") => DropSourceOutcome::NotExists,
        _ => DropSourceOutcome::Failure,
    }
}

pub(crate) fn classify_track_table(raw: RawResponse<'_>) -> TrackTableOutcome {
    match raw {
        _ if raw.status == 200 => TrackTableOutcome::Success,
        _ if raw.has_soft_code("already-tracked") => TrackTableOutcome::AlreadyTracked,
        _ => TrackTableOutcome::Failure,
    }
}

pub(crate) fn classify_untrack_table(raw: RawResponse<'_>) -> UntrackTableOutcome {
    match raw {
        _ if raw.status == 200 => UntrackTableOutcome::Success,
        _ if raw.has_soft_code("already-untracked") => UntrackTableOutcome::NotTracked,
        _ => UntrackTableOutcome::Failure,
    }
}

pub(crate) fn classify_create_permission(raw: RawResponse<'_>) -> CreatePermissionOutcome {
    match raw {
        _ if raw.status == 200 => CreatePermissionOutcome::Success,
        _ if raw.has_soft_code("already-exists") => CreatePermissionOutcome::AlreadyExists,
        _ => CreatePermissionOutcome::Failure,
    }
}

pub(crate) fn classify_drop_permission(raw: RawResponse<'_>) -> DropPermissionOutcome {
    if raw.status == 200 {
        return DropPermissionOutcome::Success;
    }

    // The gateway reports a missing permission with the generic
    // `permission-denied` code, so non-existence has to be inferred from
    // the error text. Fragile coupling to remote wording; replace with a
    // structured code check if the API ever grows one.
    let missing = raw.has_soft_code("permission-denied")
        && raw
            .error_text()
            .is_some_and(|text| text.contains("does not exist"));

    if missing {
        DropPermissionOutcome::NotExists
    } else {
        DropPermissionOutcome::Failure
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_success_on_200() {
        let body = json!({});
        assert_eq!(
            classify_add_source(RawResponse::new(200, &body)),
            AddSourceOutcome::Success
        );
        assert_eq!(
            classify_track_table(RawResponse::new(200, &body)),
            TrackTableOutcome::Success
        );
    }

    #[test]
    fn test_soft_outcomes_on_known_codes() {
        let body = json!({"code": "already-exists", "error": "source with name x already exists"});
        assert_eq!(
            classify_add_source(RawResponse::new(400, &body)),
            AddSourceOutcome::AlreadyExists
        );
        assert_eq!(
            classify_create_permission(RawResponse::new(400, &body)),
            CreatePermissionOutcome::AlreadyExists
        );

        let body = json!({"code": "already-tracked", "error": "table already tracked"});
        assert_eq!(
            classify_track_table(RawResponse::new(400, &body)),
            TrackTableOutcome::AlreadyTracked
        );

        let body = json!({"code": "already-untracked", "error": "table not tracked"});
        assert_eq!(
            classify_untrack_table(RawResponse::new(400, &body)),
            UntrackTableOutcome::NotTracked
        );

        let body = json!({"code": "not-exists", "error": "source does not exist"});
        assert_eq!(
            classify_drop_source(RawResponse::new(400, &body)),
            DropSourceOutcome::NotExists
        );
    }

    #[test]
    fn test_unknown_code_is_failure() {
        let body = json!({"code": "invalid-configuration", "error": "bad jdbc url"});
        assert_eq!(
            classify_add_source(RawResponse::new(400, &body)),
            AddSourceOutcome::Failure
        );
    }

    #[test]
    fn test_server_error_is_failure() {
        let body = json!({});
        assert_eq!(
            classify_track_table(RawResponse::new(500, &body)),
            TrackTableOutcome::Failure
        );
        assert_eq!(
            classify_untrack_table(RawResponse::new(503, &body)),
            UntrackTableOutcome::Failure
        );
    }

    #[test]
    fn test_drop_permission_missing_detection() {
        let body = json!({
            "code": "permission-denied",
            "error": "select permission for role r does not exist on table t",
        });
        assert_eq!(
            classify_drop_permission(RawResponse::new(400, &body)),
            DropPermissionOutcome::NotExists
        );

        // Same code without the marker text is a real refusal.
        let body = json!({"code": "permission-denied", "error": "access denied"});
        assert_eq!(
            classify_drop_permission(RawResponse::new(400, &body)),
            DropPermissionOutcome::Failure
        );
    }
}
