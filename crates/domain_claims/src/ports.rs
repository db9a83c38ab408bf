//! Claim Provider Port
//!
//! The `ClaimPort` trait is everything the review layer needs from claim
//! storage. Two adapters implement it and one is chosen at startup:
//!
//! - **In-memory**: [`crate::adapters::InMemoryClaimStore`], optionally seeded
//!   with sample claims
//! - **PostgreSQL**: `infra_db::adapters::PostgresClaimAdapter`
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_claims::ports::ClaimPort;
//! use std::sync::Arc;
//!
//! pub struct ClaimReviewService {
//!     claims: Arc<dyn ClaimPort>,
//! }
//! ```

use async_trait::async_trait;

use core_kernel::{ClaimId, DomainPort, HealthCheckable, PortError};

use crate::claim::Claim;

/// Storage operations for claims
///
/// All listings are ordered newest first by claim date.
#[async_trait]
pub trait ClaimPort: DomainPort + HealthCheckable {
    /// Retrieves a claim by ID
    ///
    /// # Returns
    ///
    /// `None` if no claim has this id
    async fn get_claim(&self, id: ClaimId) -> Result<Option<Claim>, PortError>;

    /// Claims awaiting review
    async fn pending_claims(&self) -> Result<Vec<Claim>, PortError>;

    /// Claims that have been approved
    async fn approved_claims(&self) -> Result<Vec<Claim>, PortError>;

    /// Claims submitted by one lecturer
    ///
    /// # Arguments
    ///
    /// * `lecturer` - The lecturer's username
    async fn claims_for_lecturer(&self, lecturer: &str) -> Result<Vec<Claim>, PortError>;

    /// Stores a newly submitted claim
    async fn submit_claim(&self, claim: &Claim) -> Result<(), PortError>;

    /// Marks a pending claim approved
    ///
    /// # Returns
    ///
    /// The updated claim, `PortError::NotFound` for an unknown id, or
    /// `PortError::Conflict` if the claim was already reviewed
    async fn approve_claim(&self, id: ClaimId, approved_by: &str) -> Result<Claim, PortError>;

    /// Marks a pending claim rejected
    async fn reject_claim(&self, id: ClaimId, notes: Option<String>) -> Result<Claim, PortError>;
}

/// Orders claims newest first
pub fn sort_newest_first(claims: &mut [Claim]) {
    claims.sort_by(|a, b| b.date.cmp(&a.date));
}
