//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::Money;
use domain_claims::{Claim, ClaimStatus, Finding, Severity};
use rust_decimal::Decimal;

/// Asserts that a Money value has the expected amount, ignoring scale
///
/// # Panics
///
/// Panics if the amounts differ
pub fn assert_money_eq(actual: &Money, expected: Decimal) {
    assert_eq!(
        actual.amount().normalize(),
        expected.normalize(),
        "Money amount mismatch: actual={}, expected={}",
        actual,
        expected
    );
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(
        money.is_zero(),
        "Expected zero money, got {} {}",
        money.currency().symbol(),
        money.amount()
    );
}

/// Asserts that the findings contain a message at the given severity
pub fn assert_finding(findings: &[Finding], severity: Severity, message: &str) {
    assert!(
        findings
            .iter()
            .any(|f| f.severity == severity && f.message == message),
        "Expected {} finding '{}', got: {:?}",
        severity,
        message,
        findings
    );
}

/// Asserts that no finding blocks approval
pub fn assert_no_errors(findings: &[Finding]) {
    let errors: Vec<_> = findings.iter().filter(|f| f.is_blocking()).collect();
    assert!(errors.is_empty(), "Expected no Error findings, got: {:?}", errors);
}

/// Asserts that at least one finding blocks approval
pub fn assert_has_errors(findings: &[Finding]) {
    assert!(
        findings.iter().any(Finding::is_blocking),
        "Expected an Error finding, got: {:?}",
        findings
    );
}

/// Asserts that a claim is approved and carries its approver
pub fn assert_approved_by(claim: &Claim, approver: &str) {
    assert_eq!(
        claim.status,
        ClaimStatus::Approved,
        "Claim {} is {}, expected Approved",
        claim.id,
        claim.status
    );
    assert_eq!(claim.approved_by.as_deref(), Some(approver));
    assert!(claim.reviewed_at.is_some(), "Approved claim has no review time");
}

/// Asserts that a claim was rejected and was never given an approver
pub fn assert_rejected(claim: &Claim) {
    assert_eq!(
        claim.status,
        ClaimStatus::Rejected,
        "Claim {} is {}, expected Rejected",
        claim.id,
        claim.status
    );
    assert!(claim.approved_by.is_none(), "Rejected claim has an approver");
}

/// Asserts that claims are ordered newest first
pub fn assert_newest_first(claims: &[Claim]) {
    for pair in claims.windows(2) {
        assert!(
            pair[0].date >= pair[1].date,
            "Claims out of order: {} ({}) before {} ({})",
            pair[0].id,
            pair[0].date,
            pair[1].id,
            pair[1].date
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::TestClaimBuilder;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_eq_ignores_scale() {
        assert_money_eq(&Money::new(dec!(250.00), Currency::USD), dec!(250));
    }

    #[test]
    #[should_panic(expected = "Expected an Error finding")]
    fn test_has_errors_panics_on_clean_findings() {
        assert_has_errors(&[Finding::info("Claim meets all validation criteria")]);
    }

    #[test]
    fn test_rejected_claim_passes() {
        assert_rejected(&TestClaimBuilder::new().rejected(Some("Duplicate")).build());
    }
}
