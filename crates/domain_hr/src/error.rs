//! HR domain errors
//!
//! Errors raised while managing the lecturer roster, generating payment
//! reports and computing analytics.

use thiserror::Error;

use core_kernel::{PortError, TemporalError};

/// Errors that can occur in the HR domain
#[derive(Debug, Error)]
pub enum HrError {
    /// Caller's role has no HR access
    #[error("Role '{0}' may not access HR functions")]
    Unauthorized(String),

    /// Lecturer or report with the given ID was not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input failed validation
    #[error("Invalid lecturer data: {0}")]
    Validation(String),

    /// Reporting period is malformed
    #[error(transparent)]
    Period(#[from] TemporalError),

    /// CSV export failed
    #[error("Report export failed: {0}")]
    Export(String),

    /// Storage failure
    #[error(transparent)]
    Port(PortError),
}

impl HrError {
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        HrError::NotFound(format!("{entity} {id}"))
    }
}

impl From<validator::ValidationErrors> for HrError {
    fn from(errors: validator::ValidationErrors) -> Self {
        HrError::Validation(errors.to_string())
    }
}

impl From<PortError> for HrError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { entity_type, id } => HrError::NotFound(format!("{entity_type} {id}")),
            PortError::Validation { message } => HrError::Validation(message),
            other => HrError::Port(other),
        }
    }
}

impl From<csv::Error> for HrError {
    fn from(err: csv::Error) -> Self {
        HrError::Export(err.to_string())
    }
}

impl From<HrError> for PortError {
    fn from(err: HrError) -> Self {
        match err {
            HrError::Validation(message) => PortError::validation(message),
            HrError::Port(inner) => inner,
            other => PortError::internal(other.to_string()),
        }
    }
}
