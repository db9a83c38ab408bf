//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use core_kernel::PortError;
use domain_claims::{ClaimError, DocumentError, ReviewError};
use domain_hr::HrError;

/// API errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Unprocessable input; `details` lists each problem
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: Vec<String>,
    },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            details: Vec::new(),
        }
    }
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
        let (status, error_type) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            ApiError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
            ApiError::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
            ApiError::Validation { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
        };

        let (message, details) = match self {
            ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Forbidden(msg)
            | ApiError::Conflict(msg)
            | ApiError::PayloadTooLarge(msg)
            | ApiError::Internal(msg)
            | ApiError::Unavailable(msg) => (msg, None),
            ApiError::Unauthorized => ("Unauthorized".to_string(), None),
            ApiError::Validation { message, details } => {
                (message, (!details.is_empty()).then_some(details))
            }
        };

        if status.is_server_error() {
            tracing::error!(status = %status.as_u16(), %message, "Request failed");
        }

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        match &err {
            PortError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            PortError::Validation { .. } => ApiError::validation(err.to_string()),
            PortError::Conflict { .. } => ApiError::Conflict(err.to_string()),
            PortError::Connection { .. } | PortError::Timeout { .. } => {
                ApiError::Unavailable(err.to_string())
            }
            PortError::Internal { .. } => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<ClaimError> for ApiError {
    fn from(err: ClaimError) -> Self {
        match err {
            ClaimError::InvalidSubmission(problems) => ApiError::Validation {
                message: "Invalid claim".to_string(),
                details: problems,
            },
            ClaimError::InvalidStatusTransition { .. } => ApiError::Conflict(err.to_string()),
            ClaimError::UnknownStatus(_) => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl From<ReviewError> for ApiError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::NotFound(id) => ApiError::NotFound(format!("Claim {id}")),
            ReviewError::Unauthorized(_) | ReviewError::ApprovalDenied(_) => {
                ApiError::Forbidden(err.to_string())
            }
            ReviewError::ValidationBlocked(errors) => ApiError::Validation {
                message: "Cannot approve claim with validation errors".to_string(),
                details: errors,
            },
            ReviewError::Claim(e) => e.into(),
            ReviewError::Document(e) => e.into(),
            ReviewError::Port(e) => e.into(),
        }
    }
}

impl From<HrError> for ApiError {
    fn from(err: HrError) -> Self {
        match err {
            HrError::Unauthorized(_) => ApiError::Forbidden(err.to_string()),
            HrError::NotFound(what) => ApiError::NotFound(what),
            HrError::Validation(_) => ApiError::validation(err.to_string()),
            HrError::Period(_) => ApiError::BadRequest(err.to_string()),
            HrError::Export(_) => ApiError::Internal(err.to_string()),
            HrError::Port(e) => e.into(),
        }
    }
}

impl From<DocumentError> for ApiError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::TooLarge { .. } => ApiError::PayloadTooLarge(err.to_string()),
            DocumentError::InvalidType { .. } => ApiError::BadRequest(err.to_string()),
            DocumentError::Io(_) => ApiError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocked_approval_lists_errors() {
        let err: ApiError =
            ReviewError::ValidationBlocked(vec!["Hours worked (45) exceeds maximum allowed (40)".into()])
                .into();
        match err {
            ApiError::Validation { details, .. } => assert_eq!(details.len(), 1),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_status_codes() {
        let cases: Vec<(ApiError, StatusCode)> = vec![
            (ReviewError::Unauthorized("Lecturer".into()).into(), StatusCode::FORBIDDEN),
            (ReviewError::NotFound("CLM-1".into()).into(), StatusCode::NOT_FOUND),
            (HrError::Validation("email".into()).into(), StatusCode::UNPROCESSABLE_ENTITY),
            (PortError::conflict("already reviewed").into(), StatusCode::CONFLICT),
            (
                DocumentError::TooLarge { size: 11, max_bytes: 10 }.into(),
                StatusCode::PAYLOAD_TOO_LARGE,
            ),
            (ApiError::Unauthorized, StatusCode::UNAUTHORIZED),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
