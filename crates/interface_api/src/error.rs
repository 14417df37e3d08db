//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use domain_ledger::LedgerError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Unavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "unavailable", msg.clone())
            }
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
            }
            ApiError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg.clone())
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match &err {
            LedgerError::InvalidAmount(_)
            | LedgerError::ExceedsOutstanding { .. }
            | LedgerError::NoOutstandingBalance(_) => ApiError::BadRequest(err.to_string()),
            LedgerError::EntityNotFound { .. } => ApiError::NotFound(err.to_string()),
            LedgerError::IntegrityMismatch { .. } => ApiError::Conflict(err.to_string()),
            LedgerError::Store(port_err) if port_err.is_transient() => {
                ApiError::Unavailable(err.to_string())
            }
            LedgerError::Store(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{Money, PortError};

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_domain_errors_map_to_client_codes() {
        let err = LedgerError::invalid_amount("three decimal places");
        assert_eq!(status_of(err.into()), StatusCode::BAD_REQUEST);

        let err = LedgerError::ExceedsOutstanding {
            amount: Money::zero(),
            outstanding: Money::zero(),
        };
        assert_eq!(status_of(err.into()), StatusCode::BAD_REQUEST);

        let err = LedgerError::EntityNotFound {
            entity_type: "Customer",
            id: "missing".into(),
        };
        assert_eq!(status_of(err.into()), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_transient_store_errors_are_unavailable() {
        let err = LedgerError::Store(PortError::Unavailable {
            message: "pool exhausted".into(),
        });
        assert_eq!(status_of(err.into()), StatusCode::SERVICE_UNAVAILABLE);

        let err = LedgerError::Store(PortError::internal("corrupt row"));
        assert_eq!(status_of(err.into()), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
