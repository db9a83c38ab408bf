//! Payment reports
//!
//! A payment report lists every approved claim dated within a period, with
//! the amount owed per claim and in total. Reports are stored as generated
//! and can be exported as CSV for payroll.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, DateRange, Money, ReportId, Timezone};
use domain_claims::{Claim, ClaimStatus};

use crate::error::HrError;

/// One approved claim in a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentLine {
    pub lecturer: String,
    /// Claim date in the institution's calendar
    pub date: NaiveDate,
    pub hours: Decimal,
    pub rate: Decimal,
    pub total: Decimal,
    pub approved_by: Option<String>,
}

impl PaymentLine {
    pub fn from_claim(claim: &Claim, tz: &Timezone) -> Self {
        Self {
            lecturer: claim.lecturer.clone(),
            date: tz.local_date(claim.date),
            hours: claim.hours,
            rate: claim.rate,
            total: claim.total(),
            approved_by: claim.approved_by.clone(),
        }
    }
}

/// A generated payment report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReport {
    pub id: ReportId,
    pub name: String,
    pub generated_at: DateTime<Utc>,
    pub period: DateRange,
    pub total_amount: Money,
    pub total_claims: usize,
    pub generated_by: String,
    pub lines: Vec<PaymentLine>,
}

impl PaymentReport {
    /// Builds a report from approved claims dated within `period`
    ///
    /// Claims that are not approved or fall outside the period are skipped.
    pub fn build(
        period: DateRange,
        claims: &[Claim],
        generated_by: impl Into<String>,
        tz: &Timezone,
        currency: Currency,
    ) -> Self {
        let lines: Vec<PaymentLine> = claims
            .iter()
            .filter(|c| c.status == ClaimStatus::Approved)
            .filter(|c| period.contains_instant(c.date, tz))
            .map(|c| PaymentLine::from_claim(c, tz))
            .collect();

        Self {
            id: ReportId::new_v7(),
            name: report_name(&period),
            generated_at: Utc::now(),
            period,
            total_amount: Money::sum(lines.iter().map(|l| l.total), currency),
            total_claims: lines.len(),
            generated_by: generated_by.into(),
            lines,
        }
    }

    /// Download name, e.g. `PaymentReport_20240101_20240131.csv`
    pub fn csv_file_name(&self) -> String {
        format!(
            "PaymentReport_{}_{}.csv",
            self.period.start.format("%Y%m%d"),
            self.period.end.format("%Y%m%d")
        )
    }

    /// Renders the report as CSV
    ///
    /// A summary block of label/value rows comes first, then a blank line,
    /// then one row per claim under a
    /// `Lecturer,Date,Hours,Rate,Total,Approved By` header.
    pub fn to_csv(&self, tz: &Timezone) -> Result<Vec<u8>, HrError> {
        let mut summary = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());
        summary.write_record(["Payment Report", self.name.as_str()])?;
        summary.write_record(["Period", period_label(&self.period).as_str()])?;
        summary.write_record([
            "Generated On",
            tz.to_local(self.generated_at).format("%Y-%m-%d %H:%M").to_string().as_str(),
        ])?;
        summary.write_record(["Generated By", self.generated_by.as_str()])?;
        summary.write_record(["Total Amount", self.total_amount.to_string().as_str()])?;
        summary.write_record(["Total Claims", self.total_claims.to_string().as_str()])?;

        let mut out = summary
            .into_inner()
            .map_err(|e| HrError::Export(e.to_string()))?;
        out.push(b'\n');

        let mut table = csv::Writer::from_writer(out);
        table.write_record(["Lecturer", "Date", "Hours", "Rate", "Total", "Approved By"])?;
        for line in &self.lines {
            table.write_record([
                line.lecturer.clone(),
                line.date.format("%Y-%m-%d").to_string(),
                line.hours.normalize().to_string(),
                line.rate.normalize().to_string(),
                line.total.normalize().to_string(),
                line.approved_by.clone().unwrap_or_default(),
            ])?;
        }

        table.into_inner().map_err(|e| HrError::Export(e.to_string()))
    }
}

fn period_label(period: &DateRange) -> String {
    format!("{} to {}", period.start.format("%Y-%m-%d"), period.end.format("%Y-%m-%d"))
}

/// `Payment Report 2024-01-01 to 2024-01-31`
pub fn report_name(period: &DateRange) -> String {
    format!("Payment Report {}", period_label(period))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn january() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
        .unwrap()
    }

    fn approved(lecturer: &str, hours: Decimal, rate: Decimal, day: u32) -> Claim {
        let mut claim = Claim::new(lecturer, hours, rate)
            .with_date(Utc.with_ymd_and_hms(2024, 1, day, 10, 0, 0).unwrap());
        claim.approve("Academic Manager").unwrap();
        claim
    }

    #[test]
    fn test_name_and_file_name() {
        let report = PaymentReport::build(january(), &[], "hr", &Timezone::default(), Currency::USD);
        assert_eq!(report.name, "Payment Report 2024-01-01 to 2024-01-31");
        assert_eq!(report.csv_file_name(), "PaymentReport_20240101_20240131.csv");
        assert!(report.total_amount.is_zero());
    }

    #[test]
    fn test_pending_claims_are_excluded() {
        let pending = Claim::new("john.doe", dec!(5), dec!(50))
            .with_date(Utc.with_ymd_and_hms(2024, 1, 10, 10, 0, 0).unwrap());
        let claims = vec![approved("jane.smith", dec!(8), dec!(45), 12), pending];

        let report = PaymentReport::build(january(), &claims, "hr", &Timezone::default(), Currency::USD);
        assert_eq!(report.total_claims, 1);
        assert_eq!(report.total_amount.amount(), dec!(360));
    }

    #[test]
    fn test_csv_layout() {
        let claims = vec![approved("john.doe", dec!(5), dec!(50), 3)];
        let report = PaymentReport::build(january(), &claims, "hr.manager", &Timezone::default(), Currency::USD);
        let csv = String::from_utf8(report.to_csv(&Timezone::default()).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Payment Report,Payment Report 2024-01-01 to 2024-01-31");
        assert_eq!(lines[1], "Period,2024-01-01 to 2024-01-31");
        assert!(lines[2].starts_with("Generated On,"));
        assert_eq!(lines[3], "Generated By,hr.manager");
        assert_eq!(lines[4], "Total Amount,$250.00");
        assert_eq!(lines[5], "Total Claims,1");
        assert_eq!(lines[6], "");
        assert_eq!(lines[7], "Lecturer,Date,Hours,Rate,Total,Approved By");
        assert_eq!(lines[8], "john.doe,2024-01-03,5,50,250,Academic Manager");
    }
}
