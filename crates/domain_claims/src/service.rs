//! Approval service
//!
//! Facade over the validator, the approval authority and the workflow
//! advisor. It owns the rule set, so callers never pass thresholds around.
//! Every method is pure and the service is cheap to clone.

use std::sync::Arc;

use crate::authority::{ApprovalAuthority, ApprovalDecision, ApproverRole};
use crate::claim::Claim;
use crate::rules::ApprovalRules;
use crate::validation::{ClaimValidator, Finding};
use crate::workflow::WorkflowAdvisor;

#[derive(Debug, Clone, Default)]
pub struct ApprovalService {
    rules: Arc<ApprovalRules>,
}

impl ApprovalService {
    pub fn new(rules: ApprovalRules) -> Self {
        Self { rules: Arc::new(rules) }
    }

    pub fn rules(&self) -> &ApprovalRules {
        &self.rules
    }

    pub fn validate(&self, claim: &Claim) -> Vec<Finding> {
        ClaimValidator::validate(claim, &self.rules)
    }

    pub fn can_approve(&self, claim: &Claim, role: &ApproverRole) -> bool {
        ApprovalAuthority::can_approve(claim, role, &self.rules)
    }

    pub fn requires_higher_approval(&self, claim: &Claim) -> bool {
        ApprovalAuthority::requires_higher_approval(claim, &self.rules)
    }

    pub fn approval_workflow(&self, claim: &Claim) -> &'static str {
        WorkflowAdvisor::approval_workflow(claim, &self.rules)
    }

    pub fn decide(&self, claim: &Claim, role: &ApproverRole) -> ApprovalDecision {
        ApprovalAuthority::decide(claim, role, &self.rules)
    }
}
