//! Claim validation rules
//!
//! Applies the [`ApprovalRules`] thresholds to a claim and reports every
//! issue found as a [`Finding`]. Findings are data, not errors: callers show
//! the whole list at once and decide what blocks.
//!
//! # Checks, in display order
//!
//! 1. Hours against the per-claim maximum
//! 2. Hourly rate against the standard and senior limits
//! 3. Total against the per-claim maximum
//! 4. Supporting document for large claims
//!
//! When nothing above fires, a single informational finding confirms the
//! claim is clean.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::claim::Claim;
use crate::rules::ApprovalRules;

/// How serious a finding is
///
/// Ordered so that `severity >= Severity::Error` identifies blockers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info => "Info",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        };
        f.write_str(s)
    }
}

/// One validation outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    pub fn info(message: impl Into<String>) -> Self {
        Self { severity: Severity::Info, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { severity: Severity::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { severity: Severity::Error, message: message.into() }
    }

    /// Only errors make a finding invalid
    pub fn is_valid(&self) -> bool {
        self.severity != Severity::Error
    }

    pub fn is_blocking(&self) -> bool {
        self.severity >= Severity::Error
    }
}

/// Message emitted when a claim passes every check
pub const CLEAN_CLAIM_MESSAGE: &str = "Claim meets all validation criteria";

/// Returns true if any finding blocks approval
pub fn has_errors(findings: &[Finding]) -> bool {
    findings.iter().any(Finding::is_blocking)
}

/// Messages of the blocking findings, in order
pub fn error_messages(findings: &[Finding]) -> Vec<&str> {
    findings
        .iter()
        .filter(|f| f.is_blocking())
        .map(|f| f.message.as_str())
        .collect()
}

/// Renders a decimal without trailing zeros (`45`, `45.5`)
fn num(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Claim validator
pub struct ClaimValidator;

impl ClaimValidator {
    /// Validates a claim against the rules
    ///
    /// # Arguments
    ///
    /// * `claim` - The claim to inspect
    /// * `rules` - Thresholds to apply
    ///
    /// # Returns
    ///
    /// Findings in display order; never empty.
    pub fn validate(claim: &Claim, rules: &ApprovalRules) -> Vec<Finding> {
        let mut findings = Vec::new();
        let total = claim.total();

        if claim.hours > rules.max_hours_per_claim {
            findings.push(Finding::error(format!(
                "Hours worked ({}) exceeds maximum allowed ({})",
                num(claim.hours),
                num(rules.max_hours_per_claim)
            )));
        } else if claim.hours > rules.hours_warning_level() {
            findings.push(Finding::warning(format!(
                "Hours worked ({}) is approaching maximum limit",
                num(claim.hours)
            )));
        }

        if claim.rate > rules.max_rate_senior {
            findings.push(Finding::error(format!(
                "Hourly rate (${}) exceeds maximum allowed (${})",
                num(claim.rate),
                num(rules.max_rate_senior)
            )));
        } else if claim.rate > rules.max_rate_standard {
            findings.push(Finding::warning(format!(
                "Hourly rate (${}) requires senior approval",
                num(claim.rate)
            )));
        }

        if total > rules.max_total_per_claim {
            findings.push(Finding::error(format!(
                "Total amount (${}) exceeds maximum allowed (${})",
                num(total),
                num(rules.max_total_per_claim)
            )));
        } else if total > rules.total_warning_level() {
            findings.push(Finding::warning(format!(
                "Total amount (${}) is approaching maximum limit",
                num(total)
            )));
        }

        // Advisory only; approval does not check for the document
        if rules.require_document_for_large_claims
            && total >= rules.large_claim_threshold
            && !claim.has_document()
        {
            findings.push(Finding::warning(format!(
                "Documentation required for claims over ${}",
                num(rules.large_claim_threshold)
            )));
        }

        if findings.iter().all(|f| f.severity == Severity::Info) {
            findings.push(Finding::info(CLEAN_CLAIM_MESSAGE));
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn claim(hours: Decimal, rate: Decimal) -> Claim {
        Claim::new("john.doe", hours, rate)
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn test_clean_claim_gets_single_info() {
        let findings = ClaimValidator::validate(&claim(dec!(10), dec!(50)), &ApprovalRules::default());
        assert_eq!(findings, vec![Finding::info(CLEAN_CLAIM_MESSAGE)]);
    }

    #[test]
    fn test_messages_use_normalized_numbers() {
        let findings = ClaimValidator::validate(&claim(dec!(45.50), dec!(20)), &ApprovalRules::default());
        assert_eq!(findings[0].message, "Hours worked (45.5) exceeds maximum allowed (40)");
    }

    #[test]
    fn test_findings_follow_check_order() {
        // Hours, rate, total and document all fire
        let findings = ClaimValidator::validate(&claim(dec!(50), dec!(130)), &ApprovalRules::default());
        let messages: Vec<_> = findings.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Hours worked (50) exceeds maximum allowed (40)",
                "Hourly rate ($130) exceeds maximum allowed ($120)",
                "Total amount ($6500) exceeds maximum allowed ($5000)",
                "Documentation required for claims over $1000",
            ]
        );
    }

    #[test]
    fn test_document_rule_can_be_disabled() {
        let rules = ApprovalRules {
            require_document_for_large_claims: false,
            ..ApprovalRules::default()
        };
        let findings = ClaimValidator::validate(&claim(dec!(20), dec!(60)), &rules);
        assert_eq!(findings, vec![Finding::info(CLEAN_CLAIM_MESSAGE)]);
    }
}
