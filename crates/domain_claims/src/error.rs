//! Claims domain errors

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Unknown claim status: {0}")]
    UnknownStatus(String),

    #[error("Invalid claim: {}", .0.join(" "))]
    InvalidSubmission(Vec<String>),
}

/// Errors raised while reviewing claims
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("Claim not found: {0}")]
    NotFound(String),

    #[error("Role '{0}' may not review claims")]
    Unauthorized(String),

    #[error("Cannot approve claim with validation errors: {}", .0.join(", "))]
    ValidationBlocked(Vec<String>),

    #[error("Approval denied: {0}")]
    ApprovalDenied(String),

    #[error(transparent)]
    Claim(#[from] ClaimError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Port(PortError),
}

impl From<PortError> for ReviewError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { id, .. } => ReviewError::NotFound(id),
            other => ReviewError::Port(other),
        }
    }
}

/// Errors raised by document storage
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("File size exceeds the 10MB limit.")]
    TooLarge { size: u64, max_bytes: u64 },

    #[error("Invalid file type. Only PDF, DOCX, and XLSX files are allowed.")]
    InvalidType { extension: String },

    #[error("Document storage failed: {0}")]
    Io(#[from] std::io::Error),
}
