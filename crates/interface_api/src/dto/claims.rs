//! Claim DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::ClaimId;
use domain_claims::{Claim, ClaimStatus};

/// A claim as returned to clients, with its computed total
#[derive(Debug, Serialize, Deserialize)]
pub struct ClaimResponse {
    pub id: ClaimId,
    pub lecturer: String,
    pub date: DateTime<Utc>,
    pub hours: Decimal,
    pub rate: Decimal,
    pub total: Decimal,
    pub notes: Option<String>,
    pub document: Option<String>,
    pub status: ClaimStatus,
    pub approved_by: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub review_notes: Option<String>,
}

impl From<Claim> for ClaimResponse {
    fn from(claim: Claim) -> Self {
        Self {
            total: claim.total(),
            id: claim.id,
            lecturer: claim.lecturer,
            date: claim.date,
            hours: claim.hours,
            rate: claim.rate,
            notes: claim.notes,
            document: claim.document,
            status: claim.status,
            approved_by: claim.approved_by,
            reviewed_at: claim.reviewed_at,
            review_notes: claim.review_notes,
        }
    }
}

pub fn claim_responses(claims: Vec<Claim>) -> Vec<ClaimResponse> {
    claims.into_iter().map(ClaimResponse::from).collect()
}
