use axum::Json;
use axum::http::StatusCode;
use pronto_core::error::{AggregateError, SessionError, StoreError, SubmissionError};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub code: &'static str,
    pub message: String,
    pub correlation_id: Option<String>,
}

fn envelope(
    status: StatusCode,
    code: &'static str,
    message: String,
    correlation_id: Option<String>,
) -> (StatusCode, Json<ErrorEnvelope>) {
    (
        status,
        Json(ErrorEnvelope {
            code,
            message,
            correlation_id,
        }),
    )
}

/// A malformed path or query parameter, caught before the workflow runs.
pub fn invalid_input(
    message: String,
    correlation_id: Option<String>,
) -> (StatusCode, Json<ErrorEnvelope>) {
    envelope(StatusCode::BAD_REQUEST, "invalid_input", message, correlation_id)
}

pub fn map_submission_error(
    err: &SubmissionError,
    correlation_id: Option<String>,
) -> (StatusCode, Json<ErrorEnvelope>) {
    let (status, code) = match err {
        SubmissionError::MissingTarget | SubmissionError::InvalidRating { .. } => {
            (StatusCode::BAD_REQUEST, "invalid_input")
        }
        SubmissionError::AuthenticationRequired => {
            (StatusCode::UNAUTHORIZED, "authentication_required")
        }
        SubmissionError::StoreUnavailable { .. } => {
            (StatusCode::SERVICE_UNAVAILABLE, "store_unavailable")
        }
    };
    envelope(status, code, err.to_string(), correlation_id)
}

pub fn map_store_error(
    err: &StoreError,
    correlation_id: Option<String>,
) -> (StatusCode, Json<ErrorEnvelope>) {
    let (status, code) = match err {
        StoreError::NotFound => (StatusCode::NOT_FOUND, "not_found"),
        StoreError::PermissionDenied { .. } => (StatusCode::FORBIDDEN, "permission_denied"),
        StoreError::Unavailable { .. } => (StatusCode::SERVICE_UNAVAILABLE, "store_unavailable"),
        StoreError::InvalidRecord { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
        }
    };
    envelope(status, code, err.to_string(), correlation_id)
}

pub fn map_aggregate_error(
    err: &AggregateError,
    correlation_id: Option<String>,
) -> (StatusCode, Json<ErrorEnvelope>) {
    let (status, code) = match err {
        AggregateError::ProviderNotFound => (StatusCode::NOT_FOUND, "not_found"),
        AggregateError::FetchFailed { .. } | AggregateError::UpdateFailed { .. } => {
            (StatusCode::BAD_GATEWAY, "aggregate_failed")
        }
    };
    envelope(status, code, err.to_string(), correlation_id)
}

pub fn map_session_error(
    err: &SessionError,
    correlation_id: Option<String>,
) -> (StatusCode, Json<ErrorEnvelope>) {
    let SessionError::Unavailable { .. } = err;
    envelope(
        StatusCode::SERVICE_UNAVAILABLE,
        "auth_unavailable",
        err.to_string(),
        correlation_id,
    )
}
