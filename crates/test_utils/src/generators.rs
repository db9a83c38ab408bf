//! Property-Based Test Generators
//!
//! Provides proptest strategies for claims and roles, and `fake`-backed
//! lecturer records for roster tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::Currency;
use domain_claims::{ApprovalRules, ApproverRole, Claim};
use domain_hr::NewLecturer;

/// Strategy for generating Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::USD),
        Just(Currency::ZAR),
        Just(Currency::GBP),
        Just(Currency::EUR),
    ]
}

/// Hours from 0.25 to 60, in quarter hours
pub fn hours_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=240i64).prop_map(|quarters| Decimal::new(quarters * 25, 2))
}

/// Rates from 1.00 to 150.00, to the cent
pub fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (100i64..=15_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for generating any of the named roles, plus an unknown one
pub fn role_strategy() -> impl Strategy<Value = ApproverRole> {
    prop_oneof![
        Just(ApproverRole::ProgrammeCoordinator),
        Just(ApproverRole::AcademicManager),
        Just(ApproverRole::HrManager),
        Just(ApproverRole::Lecturer),
        "[A-Z][a-z]{3,10}".prop_map(ApproverRole::Other),
    ]
}

/// Instants within 2024, to the second
pub fn instant_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..366 * 24 * 3600).prop_map(|secs| {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(secs)
    })
}

/// Pending claims with arbitrary hours, rate and document presence
pub fn claim_strategy() -> impl Strategy<Value = Claim> {
    (
        "[a-z]{3,8}\\.[a-z]{3,8}",
        hours_strategy(),
        rate_strategy(),
        any::<bool>(),
        instant_strategy(),
    )
        .prop_map(|(lecturer, hours, rate, documented, date)| {
            let claim = Claim::new(lecturer, hours, rate).with_date(date);
            if documented {
                claim.with_document("/uploads/evidence.pdf")
            } else {
                claim
            }
        })
}

/// Rule sets with a consistent ordering of limits
pub fn rules_strategy() -> impl Strategy<Value = ApprovalRules> {
    (10i64..80, 20i64..100, 0i64..100, 500i64..10_000, any::<bool>(), 100i64..3000).prop_map(
        |(hours, standard, senior_extra, total, require_doc, threshold)| ApprovalRules {
            max_hours_per_claim: Decimal::from(hours),
            max_rate_standard: Decimal::from(standard),
            max_rate_senior: Decimal::from(standard + senior_extra),
            max_total_per_claim: Decimal::from(total),
            require_document_for_large_claims: require_doc,
            large_claim_threshold: Decimal::from(threshold),
        },
    )
}

/// A lecturer registration with a random English name
///
/// `n` makes the employee id and username unique within a batch.
pub fn fake_new_lecturer(n: u32) -> NewLecturer {
    let first: String = FirstName().fake();
    let last: String = LastName().fake();
    let username = format!(
        "{}.{}{}",
        first.to_lowercase(),
        last.to_lowercase().replace(' ', ""),
        n
    );

    NewLecturer {
        employee_id: format!("EMP{:03}", 100 + n),
        email: format!("{username}@university.edu"),
        username,
        first_name: first,
        last_name: last,
        department: Some("Computer Science".to_string()),
        default_hourly_rate: Some(Decimal::new((30..90).fake::<i64>(), 0)),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    proptest! {
        #[test]
        fn generated_hours_and_rates_are_positive(hours in hours_strategy(), rate in rate_strategy()) {
            prop_assert!(hours > Decimal::ZERO);
            prop_assert!(rate > Decimal::ZERO);
        }

        #[test]
        fn generated_rules_keep_senior_above_standard(rules in rules_strategy()) {
            prop_assert!(rules.max_rate_senior >= rules.max_rate_standard);
        }
    }

    #[test]
    fn test_fake_lecturers_validate() {
        for n in 0..5 {
            let lecturer = fake_new_lecturer(n);
            assert!(lecturer.validate().is_ok(), "{lecturer:?}");
        }
    }
}
