//! Lecturer Claims Domain
//!
//! This crate implements the claim validation and approval engine together
//! with the claim lifecycle around it.
//!
//! # Engine
//!
//! ```text
//! Claim -> ClaimValidator -> findings -> ApprovalAuthority -> can approve?
//!                                     -> WorkflowAdvisor   -> routing message
//! ```
//!
//! The engine is pure and synchronous. [`ApprovalService`] owns the rule set
//! and is the entry point; [`review::ClaimReviewService`] drives storage
//! through the [`ports::ClaimPort`] trait.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Pending -> Approved | Rejected
//! ```

pub mod claim;
pub mod rules;
pub mod validation;
pub mod authority;
pub mod workflow;
pub mod service;
pub mod ports;
pub mod adapters;
pub mod review;
pub mod documents;
pub mod error;

pub use claim::{Claim, ClaimStatus, ClaimSubmission};
pub use rules::ApprovalRules;
pub use validation::{ClaimValidator, Finding, Severity};
pub use authority::{ApprovalAuthority, ApprovalDecision, ApproverRole};
pub use workflow::WorkflowAdvisor;
pub use service::ApprovalService;
pub use ports::ClaimPort;
pub use adapters::InMemoryClaimStore;
pub use review::{Actor, ClaimAssessment, ClaimReviewService, ReviewItem};
pub use documents::{
    DocumentStore, DocumentUpload, InMemoryDocumentStore, LocalDocumentStore,
};
pub use error::{ClaimError, DocumentError, ReviewError};
