//! HR DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{DateRange, Money, ReportId, Timezone};
use domain_hr::PaymentReport;

use crate::error::ApiError;

/// Reporting period; both bounds are inclusive local dates
///
/// Leaving both out selects the current month.
#[derive(Debug, Default, Deserialize)]
pub struct PeriodRequest {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl PeriodRequest {
    pub fn resolve(&self, tz: &Timezone, now: DateTime<Utc>) -> Result<DateRange, ApiError> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => {
                DateRange::new(start, end).map_err(|e| ApiError::BadRequest(e.to_string()))
            }
            (None, None) => Ok(DateRange::current_month(tz, now)),
            _ => Err(ApiError::BadRequest(
                "Both start and end dates are required".to_string(),
            )),
        }
    }
}

/// A stored report without its lines, for listings
#[derive(Debug, Serialize, Deserialize)]
pub struct ReportSummary {
    pub id: ReportId,
    pub name: String,
    pub generated_at: DateTime<Utc>,
    pub period: DateRange,
    pub total_amount: Money,
    pub total_claims: usize,
    pub generated_by: String,
}

impl From<PaymentReport> for ReportSummary {
    fn from(report: PaymentReport) -> Self {
        Self {
            id: report.id,
            name: report.name,
            generated_at: report.generated_at,
            period: report.period,
            total_amount: report.total_amount,
            total_claims: report.total_claims,
            generated_by: report.generated_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_empty_period_is_current_month() {
        let now = Utc.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap();
        let range = PeriodRequest::default()
            .resolve(&Timezone::default(), now)
            .unwrap();

        assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_half_open_period_is_rejected() {
        let request = PeriodRequest {
            start: NaiveDate::from_ymd_opt(2024, 3, 1),
            end: None,
        };
        assert!(request.resolve(&Timezone::default(), Utc::now()).is_err());
    }

    #[test]
    fn test_reversed_period_is_rejected() {
        let request = PeriodRequest {
            start: NaiveDate::from_ymd_opt(2024, 3, 31),
            end: NaiveDate::from_ymd_opt(2024, 3, 1),
        };
        assert!(matches!(
            request.resolve(&Timezone::default(), Utc::now()),
            Err(ApiError::BadRequest(_))
        ));
    }
}
