//! Claims repository implementation
//!
//! This module provides database access for lecturer claims: submission,
//! the status listings the review queue and payment reports read, and the
//! guarded status update that records a review.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

const CLAIM_COLUMNS: &str = r#"
    claim_id,
    lecturer,
    claim_date,
    hours,
    rate,
    notes,
    document,
    status,
    approved_by,
    reviewed_at,
    review_notes
"#;

/// Repository for managing claims data
#[derive(Debug, Clone)]
pub struct ClaimsRepository {
    pool: PgPool,
}

impl ClaimsRepository {
    /// Creates a new ClaimsRepository with the given connection pool
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a claim by its identifier
    pub async fn find_by_id(&self, claim_id: Uuid) -> Result<Option<ClaimRow>, DatabaseError> {
        let sql = format!("SELECT {CLAIM_COLUMNS} FROM claims WHERE claim_id = $1");
        let row = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(claim_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    /// Retrieves all claims in a status, newest first
    pub async fn find_by_status(&self, status: ClaimStatus) -> Result<Vec<ClaimRow>, DatabaseError> {
        let sql = format!(
            "SELECT {CLAIM_COLUMNS} FROM claims WHERE status = $1 ORDER BY claim_date DESC"
        );
        let rows = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(status)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Retrieves all claims filed by a lecturer, newest first
    ///
    /// # Arguments
    ///
    /// * `lecturer` - The lecturer's username
    pub async fn find_by_lecturer(&self, lecturer: &str) -> Result<Vec<ClaimRow>, DatabaseError> {
        let sql = format!(
            "SELECT {CLAIM_COLUMNS} FROM claims WHERE lecturer = $1 ORDER BY claim_date DESC"
        );
        let rows = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(lecturer)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Inserts a new claim
    pub async fn insert(&self, claim: &ClaimRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO claims (
                claim_id, lecturer, claim_date, hours, rate, notes, document,
                status, approved_by, reviewed_at, review_notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(claim.claim_id)
        .bind(&claim.lecturer)
        .bind(claim.claim_date)
        .bind(claim.hours)
        .bind(claim.rate)
        .bind(&claim.notes)
        .bind(&claim.document)
        .bind(claim.status)
        .bind(&claim.approved_by)
        .bind(claim.reviewed_at)
        .bind(&claim.review_notes)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        Ok(())
    }

    /// Records a review on a claim that is still pending
    ///
    /// The update only applies while the stored status is `pending`, so two
    /// reviewers racing on the same claim cannot both succeed.
    ///
    /// # Returns
    ///
    /// The updated row, or `ConcurrentModification` if the claim was no
    /// longer pending
    pub async fn record_review(&self, review: &ClaimReview) -> Result<ClaimRow, DatabaseError> {
        let sql = format!(
            r#"
            UPDATE claims
            SET status = $2, approved_by = $3, reviewed_at = $4, review_notes = $5
            WHERE claim_id = $1 AND status = 'pending'
            RETURNING {CLAIM_COLUMNS}
            "#
        );
        sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(review.claim_id)
            .bind(review.status)
            .bind(&review.approved_by)
            .bind(review.reviewed_at)
            .bind(&review.review_notes)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                DatabaseError::ConcurrentModification(format!(
                    "Claim {} is no longer pending",
                    review.claim_id
                ))
            })
    }
}

// ============================================================================
// Type definitions
// ============================================================================

/// Claim status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "claim_status", rename_all = "snake_case")]
pub enum ClaimStatus {
    Pending,
    Approved,
    Rejected,
}

/// Database row for a claim
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimRow {
    pub claim_id: Uuid,
    pub lecturer: String,
    pub claim_date: DateTime<Utc>,
    pub hours: Decimal,
    pub rate: Decimal,
    pub notes: Option<String>,
    pub document: Option<String>,
    pub status: ClaimStatus,
    pub approved_by: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub review_notes: Option<String>,
}

/// The review fields written when a claim leaves `pending`
#[derive(Debug, Clone)]
pub struct ClaimReview {
    pub claim_id: Uuid,
    pub status: ClaimStatus,
    pub approved_by: Option<String>,
    pub reviewed_at: DateTime<Utc>,
    pub review_notes: Option<String>,
}
