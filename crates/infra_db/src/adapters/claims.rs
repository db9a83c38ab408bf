//! PostgreSQL Claim Adapter
//!
//! Implements `ClaimPort` on top of the `ClaimsRepository`. Status rules stay
//! in the domain: a review is applied to the loaded `Claim` first, and only
//! the resulting fields are written back, guarded on the row still being
//! pending.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{ClaimId, DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_claims::{Claim, ClaimError, ClaimPort, ClaimStatus};

use crate::error::{db_to_port_error, DatabaseError};
use crate::repositories::claims::{
    ClaimReview, ClaimRow, ClaimStatus as DbClaimStatus, ClaimsRepository,
};

/// PostgreSQL-backed implementation of the ClaimPort trait
#[derive(Debug, Clone)]
pub struct PostgresClaimAdapter {
    repository: ClaimsRepository,
    pool: PgPool,
}

impl PostgresClaimAdapter {
    /// Creates a new PostgreSQL claim adapter
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ClaimsRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn repository(&self) -> &ClaimsRepository {
        &self.repository
    }

    async fn load(&self, id: ClaimId) -> Result<Claim, PortError> {
        self.repository
            .find_by_id(*id.as_uuid())
            .await
            .map_err(db_to_port_error)?
            .map(row_to_claim)
            .ok_or_else(|| PortError::not_found("Claim", id))
    }

    async fn review<F>(&self, id: ClaimId, apply: F) -> Result<Claim, PortError>
    where
        F: FnOnce(&mut Claim) -> Result<(), ClaimError>,
    {
        let mut claim = self.load(id).await?;
        apply(&mut claim).map_err(|e| PortError::conflict(e.to_string()))?;

        let review = ClaimReview {
            claim_id: *claim.id.as_uuid(),
            status: domain_to_db_status(claim.status),
            approved_by: claim.approved_by.clone(),
            reviewed_at: claim.reviewed_at.unwrap_or_else(chrono::Utc::now),
            review_notes: claim.review_notes.clone(),
        };

        self.repository
            .record_review(&review)
            .await
            .map(row_to_claim)
            .map_err(db_to_port_error)
    }
}

impl DomainPort for PostgresClaimAdapter {}

#[async_trait]
impl HealthCheckable for PostgresClaimAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::check_pool(&self.pool, "postgres-claims").await
    }
}

#[async_trait]
impl ClaimPort for PostgresClaimAdapter {
    #[instrument(skip(self), fields(claim_id = %id))]
    async fn get_claim(&self, id: ClaimId) -> Result<Option<Claim>, PortError> {
        let row = self
            .repository
            .find_by_id(*id.as_uuid())
            .await
            .map_err(db_to_port_error)?;

        Ok(row.map(row_to_claim))
    }

    async fn pending_claims(&self) -> Result<Vec<Claim>, PortError> {
        let rows = self
            .repository
            .find_by_status(DbClaimStatus::Pending)
            .await
            .map_err(db_to_port_error)?;

        debug!(count = rows.len(), "Loaded pending claims");
        Ok(rows.into_iter().map(row_to_claim).collect())
    }

    async fn approved_claims(&self) -> Result<Vec<Claim>, PortError> {
        let rows = self
            .repository
            .find_by_status(DbClaimStatus::Approved)
            .await
            .map_err(db_to_port_error)?;

        Ok(rows.into_iter().map(row_to_claim).collect())
    }

    async fn claims_for_lecturer(&self, lecturer: &str) -> Result<Vec<Claim>, PortError> {
        let rows = self
            .repository
            .find_by_lecturer(lecturer)
            .await
            .map_err(db_to_port_error)?;

        Ok(rows.into_iter().map(row_to_claim).collect())
    }

    #[instrument(skip(self, claim), fields(claim_id = %claim.id, lecturer = %claim.lecturer))]
    async fn submit_claim(&self, claim: &Claim) -> Result<(), PortError> {
        self.repository
            .insert(&claim_to_row(claim))
            .await
            .map_err(|e| match e {
                DatabaseError::DuplicateEntry(_) => {
                    PortError::conflict(format!("Claim {} already exists", claim.id))
                }
                other => db_to_port_error(other),
            })?;

        debug!("Claim stored");
        Ok(())
    }

    #[instrument(skip(self), fields(claim_id = %id))]
    async fn approve_claim(&self, id: ClaimId, approved_by: &str) -> Result<Claim, PortError> {
        self.review(id, |claim| claim.approve(approved_by)).await
    }

    #[instrument(skip(self, notes), fields(claim_id = %id))]
    async fn reject_claim(&self, id: ClaimId, notes: Option<String>) -> Result<Claim, PortError> {
        self.review(id, |claim| claim.reject(notes)).await
    }
}

// ============================================================================
// Row conversions
// ============================================================================

fn domain_to_db_status(status: ClaimStatus) -> DbClaimStatus {
    match status {
        ClaimStatus::Pending => DbClaimStatus::Pending,
        ClaimStatus::Approved => DbClaimStatus::Approved,
        ClaimStatus::Rejected => DbClaimStatus::Rejected,
    }
}

fn db_to_domain_status(status: DbClaimStatus) -> ClaimStatus {
    match status {
        DbClaimStatus::Pending => ClaimStatus::Pending,
        DbClaimStatus::Approved => ClaimStatus::Approved,
        DbClaimStatus::Rejected => ClaimStatus::Rejected,
    }
}

fn row_to_claim(row: ClaimRow) -> Claim {
    Claim {
        id: ClaimId::from_uuid(row.claim_id),
        lecturer: row.lecturer,
        date: row.claim_date,
        hours: row.hours,
        rate: row.rate,
        notes: row.notes,
        document: row.document,
        status: db_to_domain_status(row.status),
        approved_by: row.approved_by,
        reviewed_at: row.reviewed_at,
        review_notes: row.review_notes,
    }
}

fn claim_to_row(claim: &Claim) -> ClaimRow {
    ClaimRow {
        claim_id: *claim.id.as_uuid(),
        lecturer: claim.lecturer.clone(),
        claim_date: claim.date,
        hours: claim.hours,
        rate: claim.rate,
        notes: claim.notes.clone(),
        document: claim.document.clone(),
        status: domain_to_db_status(claim.status),
        approved_by: claim.approved_by.clone(),
        reviewed_at: claim.reviewed_at,
        review_notes: claim.review_notes.clone(),
    }
}
