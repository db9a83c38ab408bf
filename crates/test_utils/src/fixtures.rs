//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for claims, actors and reporting periods.
//! These fixtures are designed to be consistent and predictable for unit tests.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use core_kernel::{Currency, DateRange, Money, Timezone};
use domain_claims::{Actor, ApprovalRules, ApproverRole, Claim};
use once_cell::sync::Lazy;
use rust_decimal_macros::dec;

static JOHANNESBURG: Lazy<Timezone> = Lazy::new(|| {
    "Africa/Johannesburg"
        .parse()
        .expect("Africa/Johannesburg is a known zone")
});

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// The coordinator's approval limit
    pub fn usd_1000() -> Money {
        Money::new(dec!(1000.00), Currency::USD)
    }

    pub fn usd_zero() -> Money {
        Money::zero(Currency::USD)
    }

    pub fn zar_250() -> Money {
        Money::new(dec!(250.00), Currency::ZAR)
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// A mid-month instant (15 March 2024, 10:00 UTC)
    pub fn mid_march() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap()
    }

    /// An instant on the given March 2024 day at 10:00 UTC
    pub fn march_day(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 10, 0, 0).unwrap()
    }

    /// 1 to 31 March 2024
    pub fn march() -> DateRange {
        DateRange::month_of(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
    }

    pub fn utc() -> Timezone {
        Timezone::default()
    }

    /// UTC+2 all year
    pub fn johannesburg() -> Timezone {
        JOHANNESBURG.clone()
    }
}

/// Fixture for the people acting on claims
pub struct ActorFixtures;

impl ActorFixtures {
    pub fn lecturer(username: &str) -> Actor {
        Actor::new(Some(username.to_string()), ApproverRole::Lecturer)
    }

    pub fn coordinator() -> Actor {
        Actor::new(Some("p.coordinator".to_string()), ApproverRole::ProgrammeCoordinator)
    }

    pub fn academic_manager() -> Actor {
        Actor::new(Some("a.manager".to_string()), ApproverRole::AcademicManager)
    }

    pub fn hr_manager() -> Actor {
        Actor::new(Some("hr.manager".to_string()), ApproverRole::HrManager)
    }
}

/// Fixture for claims covering the approval boundaries
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// Well within every limit, with a supporting document
    pub fn routine() -> Claim {
        Claim::new("john.doe", dec!(10), dec!(50))
            .with_notes("Guest lecture")
            .with_document("/uploads/routine.pdf")
    }

    /// Total exactly at the coordinator limit (20h at 50/h)
    pub fn at_coordinator_limit() -> Claim {
        Claim::new("jane.smith", dec!(20), dec!(50)).with_document("/uploads/limit.pdf")
    }

    /// Total just above the coordinator limit
    pub fn over_coordinator_limit() -> Claim {
        Claim::new("jane.smith", dec!(20), dec!(50.05)).with_document("/uploads/over.pdf")
    }

    /// Exceeds the monthly hours limit, so validation blocks it
    pub fn excessive_hours() -> Claim {
        Claim::new("robert.johnson", dec!(45), dec!(20)).with_document("/uploads/hours.pdf")
    }

    /// Rate above the standard limit
    pub fn high_rate() -> Claim {
        Claim::new("robert.johnson", dec!(5), dec!(90)).with_document("/uploads/rate.pdf")
    }

    /// No supporting document
    pub fn undocumented() -> Claim {
        Claim::new("john.doe", dec!(5), dec!(50))
    }

    pub fn default_rules() -> ApprovalRules {
        ApprovalRules::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_claims_straddle_the_limit() {
        assert_eq!(ClaimFixtures::at_coordinator_limit().total(), dec!(1000));
        assert!(ClaimFixtures::over_coordinator_limit().total() > dec!(1000));
    }

    #[test]
    fn test_march_range() {
        let march = TemporalFixtures::march();
        assert_eq!(march.days(), 31);
        assert!(march.contains_instant(TemporalFixtures::march_day(31), &TemporalFixtures::utc()));
    }
}
