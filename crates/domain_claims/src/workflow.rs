//! Approval routing guidance
//!
//! The advisor tells reviewers who should sign a claim off. It looks only at
//! the total and the rate, never at validation findings, so it can name a
//! role that [`crate::authority::ApprovalAuthority`] would still refuse.
//! The authority's answer is binding; this message is guidance.

use crate::authority::COORDINATOR_TOTAL_LIMIT;
use crate::claim::Claim;
use crate::rules::ApprovalRules;

pub const MANAGER_REQUIRED_TOTAL: &str = "Academic Manager approval required (Total > $1000)";
pub const MANAGER_REQUIRED_RATE: &str = "Academic Manager approval required (Rate > standard limit)";
pub const COORDINATOR_CAN_APPROVE: &str = "Programme Coordinator can approve";

/// Workflow advisor
pub struct WorkflowAdvisor;

impl WorkflowAdvisor {
    /// Routing message for a claim
    pub fn approval_workflow(claim: &Claim, rules: &ApprovalRules) -> &'static str {
        if claim.total() > COORDINATOR_TOTAL_LIMIT {
            MANAGER_REQUIRED_TOTAL
        } else if claim.rate > rules.max_rate_standard {
            MANAGER_REQUIRED_RATE
        } else {
            COORDINATOR_CAN_APPROVE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_total_takes_precedence_over_rate() {
        let claim = Claim::new("jane.smith", dec!(20), dec!(100));
        assert_eq!(
            WorkflowAdvisor::approval_workflow(&claim, &ApprovalRules::default()),
            MANAGER_REQUIRED_TOTAL
        );
    }

    #[test]
    fn test_high_rate_small_total() {
        let claim = Claim::new("jane.smith", dec!(2), dec!(100));
        assert_eq!(
            WorkflowAdvisor::approval_workflow(&claim, &ApprovalRules::default()),
            MANAGER_REQUIRED_RATE
        );
    }
}
