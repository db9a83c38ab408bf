//! Role-based approval limits

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;

use crate::claim::Claim;
use crate::rules::ApprovalRules;
use crate::validation::{has_errors, ClaimValidator};
use crate::workflow::WorkflowAdvisor;

/// Highest total a Programme Coordinator may approve
pub const COORDINATOR_TOTAL_LIMIT: Decimal = dec!(1000);

/// The role a user acts under
///
/// Parsing never fails: unrecognised names are kept as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ApproverRole {
    ProgrammeCoordinator,
    AcademicManager,
    HrManager,
    Lecturer,
    Other(String),
}

impl ApproverRole {
    pub fn as_str(&self) -> &str {
        match self {
            ApproverRole::ProgrammeCoordinator => "Programme Coordinator",
            ApproverRole::AcademicManager => "Academic Manager",
            ApproverRole::HrManager => "HR Manager",
            ApproverRole::Lecturer => "Lecturer",
            ApproverRole::Other(name) => name,
        }
    }

    /// Roles allowed into the review queue: any named role except Lecturer
    pub fn can_review(&self) -> bool {
        match self {
            ApproverRole::Lecturer => false,
            ApproverRole::Other(name) => !name.trim().is_empty(),
            _ => true,
        }
    }

    /// Roles allowed to manage lecturers and payment reports
    pub fn can_access_hr(&self) -> bool {
        matches!(self, ApproverRole::HrManager | ApproverRole::AcademicManager)
    }
}

impl std::str::FromStr for ApproverRole {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Programme Coordinator" => ApproverRole::ProgrammeCoordinator,
            "Academic Manager" => ApproverRole::AcademicManager,
            "HR Manager" => ApproverRole::HrManager,
            "Lecturer" => ApproverRole::Lecturer,
            other => ApproverRole::Other(other.to_string()),
        })
    }
}

impl From<&str> for ApproverRole {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(role) => role,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for ApproverRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ApproverRole {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ApproverRole {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ApproverRole::from(s.as_str()))
    }
}

/// Outcome of asking whether a role may approve a claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalDecision {
    pub can_approve: bool,
    pub requires_higher_approval: bool,
    pub workflow_description: String,
}

/// Approval authority
pub struct ApprovalAuthority;

impl ApprovalAuthority {
    /// Whether `role` may approve `claim`
    ///
    /// Any error finding blocks every role. Otherwise a Programme
    /// Coordinator is limited to totals up to 1000 at a standard rate, and an
    /// Academic Manager to the per-claim maximum. No other role approves.
    pub fn can_approve(claim: &Claim, role: &ApproverRole, rules: &ApprovalRules) -> bool {
        if has_errors(&ClaimValidator::validate(claim, rules)) {
            return false;
        }

        let total = claim.total();
        match role {
            ApproverRole::ProgrammeCoordinator => {
                total <= COORDINATOR_TOTAL_LIMIT && claim.rate <= rules.max_rate_standard
            }
            ApproverRole::AcademicManager => total <= rules.max_total_per_claim,
            _ => false,
        }
    }

    /// Threshold check for UI hints, independent of findings
    pub fn requires_higher_approval(claim: &Claim, rules: &ApprovalRules) -> bool {
        claim.total() > COORDINATOR_TOTAL_LIMIT || claim.rate > rules.max_rate_standard
    }

    pub fn decide(claim: &Claim, role: &ApproverRole, rules: &ApprovalRules) -> ApprovalDecision {
        ApprovalDecision {
            can_approve: Self::can_approve(claim, role, rules),
            requires_higher_approval: Self::requires_higher_approval(claim, rules),
            workflow_description: WorkflowAdvisor::approval_workflow(claim, rules).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing_is_exact() {
        assert_eq!(ApproverRole::from("Academic Manager"), ApproverRole::AcademicManager);
        assert_eq!(
            ApproverRole::from("academic manager"),
            ApproverRole::Other("academic manager".to_string())
        );
    }

    #[test]
    fn test_role_display_round_trips() {
        for name in ["Programme Coordinator", "Academic Manager", "HR Manager", "Lecturer", "Dean"] {
            assert_eq!(ApproverRole::from(name).to_string(), name);
        }
    }

    #[test]
    fn test_review_access() {
        assert!(ApproverRole::HrManager.can_review());
        assert!(ApproverRole::from("Dean").can_review());
        assert!(!ApproverRole::Lecturer.can_review());
        assert!(!ApproverRole::from("").can_review());
    }

    #[test]
    fn test_hr_access() {
        assert!(ApproverRole::HrManager.can_access_hr());
        assert!(ApproverRole::AcademicManager.can_access_hr());
        assert!(!ApproverRole::ProgrammeCoordinator.can_access_hr());
    }

    #[test]
    fn test_hr_manager_never_approves() {
        let claim = Claim::new("john.doe", dec!(1), dec!(10));
        assert!(!ApprovalAuthority::can_approve(
            &claim,
            &ApproverRole::HrManager,
            &ApprovalRules::default()
        ));
    }

    #[test]
    fn test_coordinator_limit_is_inclusive() {
        let claim = Claim::new("john.doe", dec!(20), dec!(50)).with_document("/uploads/a.pdf");
        assert_eq!(claim.total(), dec!(1000));
        assert!(ApprovalAuthority::can_approve(
            &claim,
            &ApproverRole::ProgrammeCoordinator,
            &ApprovalRules::default()
        ));
        assert!(!ApprovalAuthority::requires_higher_approval(&claim, &ApprovalRules::default()));
    }
}
