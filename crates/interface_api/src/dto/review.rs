//! Review DTOs

use serde::{Deserialize, Serialize};

use domain_claims::{Finding, ReviewItem};

use super::claims::ClaimResponse;

#[derive(Debug, Default, Deserialize)]
pub struct RejectRequest {
    #[serde(default)]
    pub notes: Option<String>,
}

/// One row of the review queue
#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewItemResponse {
    pub claim: ClaimResponse,
    pub findings: Vec<Finding>,
    pub can_approve: bool,
    pub approval_workflow: String,
}

impl From<ReviewItem> for ReviewItemResponse {
    fn from(item: ReviewItem) -> Self {
        Self {
            claim: item.claim.into(),
            findings: item.findings,
            can_approve: item.can_approve,
            approval_workflow: item.approval_workflow,
        }
    }
}
