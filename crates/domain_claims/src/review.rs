//! Claim review orchestration
//!
//! Ties the approval engine to claim storage. Lecturers submit and list
//! their own claims; reviewers see the pending queue with findings, assess a
//! single claim, and approve or reject it. Approval is gated on the engine:
//!
//! ```text
//! approve(id) -> lookup -> any Error finding?  -> ValidationBlocked
//!                       -> role may approve?   -> ApprovalDenied
//!                       -> Pending -> Approved
//! ```

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use core_kernel::ClaimId;

use crate::authority::ApproverRole;
use crate::claim::{Claim, ClaimSubmission};
use crate::documents::DocumentStore;
use crate::error::{ClaimError, ReviewError};
use crate::ports::ClaimPort;
use crate::service::ApprovalService;
use crate::validation::{error_messages, Finding};

/// Who is acting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub username: Option<String>,
    pub role: ApproverRole,
}

impl Actor {
    pub fn new(username: Option<String>, role: ApproverRole) -> Self {
        Self {
            username: username.filter(|u| !u.trim().is_empty()),
            role,
        }
    }

    /// Name recorded as the approver: the username, else the role name
    pub fn approver_name(&self) -> String {
        self.username
            .clone()
            .unwrap_or_else(|| self.role.to_string())
    }

    fn require_reviewer(&self) -> Result<(), ReviewError> {
        if self.role.can_review() {
            Ok(())
        } else {
            Err(ReviewError::Unauthorized(self.role.to_string()))
        }
    }

    fn require_lecturer(&self) -> Result<&str, ReviewError> {
        match (&self.role, self.username.as_deref()) {
            (ApproverRole::Lecturer, Some(username)) => Ok(username),
            _ => Err(ReviewError::Unauthorized(self.role.to_string())),
        }
    }
}

/// A pending claim with its findings, as shown in the review queue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewItem {
    pub claim: Claim,
    pub findings: Vec<Finding>,
    pub can_approve: bool,
    pub approval_workflow: String,
}

/// Full assessment of one claim for one reviewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimAssessment {
    pub claim_id: ClaimId,
    pub findings: Vec<Finding>,
    pub can_approve: bool,
    pub approval_workflow: String,
    pub requires_higher_approval: bool,
}

/// Claim review service
#[derive(Clone)]
pub struct ClaimReviewService {
    claims: Arc<dyn ClaimPort>,
    approvals: ApprovalService,
    documents: Option<Arc<dyn DocumentStore>>,
}

impl ClaimReviewService {
    pub fn new(claims: Arc<dyn ClaimPort>, approvals: ApprovalService) -> Self {
        Self {
            claims,
            approvals,
            documents: None,
        }
    }

    /// Checks submitted document references against `store`
    pub fn with_documents(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.documents = Some(store);
        self
    }

    pub fn approvals(&self) -> &ApprovalService {
        &self.approvals
    }

    /// Validates a lecturer's submission and stores it as a pending claim
    #[instrument(skip(self, submission), fields(role = %actor.role))]
    pub async fn submit(
        &self,
        actor: &Actor,
        submission: ClaimSubmission,
    ) -> Result<Claim, ReviewError> {
        let lecturer = actor.require_lecturer()?;
        let claim = submission.into_claim(lecturer)?;
        self.check_document(&claim).await?;
        self.claims.submit_claim(&claim).await?;

        info!(claim_id = %claim.id, lecturer = %claim.lecturer, total = %claim.total(), "Claim submitted");
        Ok(claim)
    }

    /// A claim may only cite a document the store issued
    async fn check_document(&self, claim: &Claim) -> Result<(), ReviewError> {
        let (Some(store), Some(reference)) = (&self.documents, claim.document.as_deref()) else {
            return Ok(());
        };
        if store.exists(reference).await? {
            Ok(())
        } else {
            warn!(document = %reference, "Unknown document reference");
            Err(ClaimError::InvalidSubmission(vec![format!(
                "Supporting document {reference} was not found."
            )])
            .into())
        }
    }

    /// The acting lecturer's own claims, newest first
    pub async fn my_claims(&self, actor: &Actor) -> Result<Vec<Claim>, ReviewError> {
        let lecturer = actor.require_lecturer()?;
        Ok(self.claims.claims_for_lecturer(lecturer).await?)
    }

    /// Pending claims with their findings
    pub async fn review_queue(&self, actor: &Actor) -> Result<Vec<ReviewItem>, ReviewError> {
        actor.require_reviewer()?;
        let pending = self.claims.pending_claims().await?;

        Ok(pending
            .into_iter()
            .map(|claim| ReviewItem {
                findings: self.approvals.validate(&claim),
                can_approve: self.approvals.can_approve(&claim, &actor.role),
                approval_workflow: self.approvals.approval_workflow(&claim).to_string(),
                claim,
            })
            .collect())
    }

    pub async fn approved_claims(&self, actor: &Actor) -> Result<Vec<Claim>, ReviewError> {
        actor.require_reviewer()?;
        Ok(self.claims.approved_claims().await?)
    }

    async fn load(&self, id: ClaimId) -> Result<Claim, ReviewError> {
        self.claims
            .get_claim(id)
            .await?
            .ok_or_else(|| ReviewError::NotFound(id.to_string()))
    }

    /// Findings and approval outlook for one claim
    pub async fn assess(&self, id: ClaimId, actor: &Actor) -> Result<ClaimAssessment, ReviewError> {
        actor.require_reviewer()?;
        let claim = self.load(id).await?;
        let decision = self.approvals.decide(&claim, &actor.role);

        Ok(ClaimAssessment {
            claim_id: claim.id,
            findings: self.approvals.validate(&claim),
            can_approve: decision.can_approve,
            approval_workflow: decision.workflow_description,
            requires_higher_approval: decision.requires_higher_approval,
        })
    }

    /// Approves a claim if it is error-free and within the actor's authority
    #[instrument(skip(self), fields(claim_id = %id, role = %actor.role))]
    pub async fn approve(&self, id: ClaimId, actor: &Actor) -> Result<Claim, ReviewError> {
        actor.require_reviewer()?;
        let claim = self.load(id).await?;

        let findings = self.approvals.validate(&claim);
        let errors = error_messages(&findings);
        if !errors.is_empty() {
            warn!(errors = errors.len(), "Approval blocked by validation errors");
            return Err(ReviewError::ValidationBlocked(
                errors.into_iter().map(String::from).collect(),
            ));
        }

        if !self.approvals.can_approve(&claim, &actor.role) {
            let workflow = self.approvals.approval_workflow(&claim);
            warn!(workflow, "Approval denied for role");
            return Err(ReviewError::ApprovalDenied(workflow.to_string()));
        }

        let approved = self.claims.approve_claim(id, &actor.approver_name()).await?;
        info!(approved_by = ?approved.approved_by, total = %approved.total(), "Claim approved");
        Ok(approved)
    }

    /// Rejects a claim; findings never prevent rejection
    #[instrument(skip(self, notes), fields(claim_id = %id, role = %actor.role))]
    pub async fn reject(
        &self,
        id: ClaimId,
        actor: &Actor,
        notes: Option<String>,
    ) -> Result<Claim, ReviewError> {
        actor.require_reviewer()?;
        self.load(id).await?;

        let rejected = self.claims.reject_claim(id, notes).await?;
        info!("Claim rejected");
        Ok(rejected)
    }
}
