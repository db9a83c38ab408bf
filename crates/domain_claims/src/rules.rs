//! Approval thresholds

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Numeric limits applied to every claim
///
/// Constructed once at startup and shared read-only behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApprovalRules {
    pub max_hours_per_claim: Decimal,
    /// Highest rate a Programme Coordinator may sign off
    pub max_rate_standard: Decimal,
    /// Highest rate any role may sign off
    pub max_rate_senior: Decimal,
    pub max_total_per_claim: Decimal,
    pub require_document_for_large_claims: bool,
    pub large_claim_threshold: Decimal,
}

impl Default for ApprovalRules {
    fn default() -> Self {
        Self {
            max_hours_per_claim: dec!(40),
            max_rate_standard: dec!(80),
            max_rate_senior: dec!(120),
            max_total_per_claim: dec!(5000),
            require_document_for_large_claims: true,
            large_claim_threshold: dec!(1000),
        }
    }
}

impl ApprovalRules {
    /// Fraction of a limit past which a warning is raised
    pub const APPROACHING_LIMIT_FACTOR: Decimal = dec!(0.8);

    pub fn hours_warning_level(&self) -> Decimal {
        self.max_hours_per_claim * Self::APPROACHING_LIMIT_FACTOR
    }

    pub fn total_warning_level(&self) -> Decimal {
        self.max_total_per_claim * Self::APPROACHING_LIMIT_FACTOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let rules = ApprovalRules::default();
        assert_eq!(rules.max_hours_per_claim, dec!(40));
        assert_eq!(rules.hours_warning_level(), dec!(32));
        assert_eq!(rules.total_warning_level(), dec!(4000));
        assert!(rules.require_document_for_large_claims);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let rules: ApprovalRules =
            serde_json::from_str(r#"{"max_hours_per_claim": "60"}"#).unwrap();
        assert_eq!(rules.max_hours_per_claim, dec!(60));
        assert_eq!(rules.max_rate_senior, dec!(120));
    }
}
