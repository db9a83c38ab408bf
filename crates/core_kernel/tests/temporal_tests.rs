//! Tests for reporting periods and the institution timezone

use chrono::{NaiveDate, TimeZone, Utc};
use core_kernel::{DateRange, TemporalError, Timezone};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

mod date_range {
    use super::*;

    #[test]
    fn test_start_after_end_is_rejected() {
        let err = DateRange::new(date(2024, 5, 2), date(2024, 5, 1)).unwrap_err();
        assert!(matches!(err, TemporalError::InvalidPeriod { .. }));
    }

    #[test]
    fn test_single_day_range_is_valid() {
        let range = DateRange::new(date(2024, 5, 1), date(2024, 5, 1)).unwrap();
        assert_eq!(range.days(), 1);
        assert!(range.contains(date(2024, 5, 1)));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        assert!(range.contains(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 1, 31)));
        assert!(!range.contains(date(2024, 2, 1)));
    }

    #[test]
    fn test_end_day_late_evening_is_included() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 0).unwrap();
        assert!(range.contains_instant(late, &Timezone::default()));
    }

    #[test]
    fn test_current_month() {
        let now = Utc.with_ymd_and_hms(2024, 4, 15, 9, 0, 0).unwrap();
        let month = DateRange::current_month(&Timezone::default(), now);
        assert_eq!(month.start, date(2024, 4, 1));
        assert_eq!(month.end, date(2024, 4, 30));
    }
}

mod timezone {
    use super::*;

    #[test]
    fn test_parse_and_serialize_by_name() {
        let tz: Timezone = "Europe/London".parse().unwrap();
        assert_eq!(serde_json::to_string(&tz).unwrap(), "\"Europe/London\"");
    }

    #[test]
    fn test_unknown_timezone() {
        let err = "Nowhere/Atlantis".parse::<Timezone>().unwrap_err();
        assert_eq!(err, TemporalError::InvalidTimezone("Nowhere/Atlantis".to_string()));
    }
}
