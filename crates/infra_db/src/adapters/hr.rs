//! PostgreSQL HR Adapter
//!
//! Implements `HrPort` using the lecturer and report repositories. Lecturer
//! validation runs in the domain before anything is written; uniqueness of
//! employee id and username is enforced by the table.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    Currency, DateRange, DomainPort, HealthCheckResult, HealthCheckable, LecturerId, Money,
    PortError, ReportId,
};
use domain_hr::{HrPort, Lecturer, LecturerUpdate, NewLecturer, PaymentLine, PaymentReport};

use crate::error::{db_to_port_error, DatabaseError};
use crate::repositories::lecturers::{LecturerRepository, LecturerRow};
use crate::repositories::reports::{ReportRepository, ReportRow};

/// PostgreSQL-backed implementation of the HrPort trait
#[derive(Debug, Clone)]
pub struct PostgresHrAdapter {
    lecturers: LecturerRepository,
    reports: ReportRepository,
    pool: PgPool,
}

impl PostgresHrAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            lecturers: LecturerRepository::new(pool.clone()),
            reports: ReportRepository::new(pool.clone()),
            pool,
        }
    }

    async fn load_lecturer(&self, id: LecturerId) -> Result<Lecturer, PortError> {
        self.lecturers
            .find_by_id(*id.as_uuid())
            .await
            .map_err(db_to_port_error)?
            .map(row_to_lecturer)
            .ok_or_else(|| PortError::not_found("Lecturer", id))
    }

    async fn store_lecturer(&self, lecturer: &Lecturer) -> Result<(), PortError> {
        self.lecturers
            .update(&lecturer_to_row(lecturer))
            .await
            .map_err(db_to_port_error)
    }
}

impl DomainPort for PostgresHrAdapter {}

#[async_trait]
impl HealthCheckable for PostgresHrAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::check_pool(&self.pool, "postgres-hr").await
    }
}

#[async_trait]
impl HrPort for PostgresHrAdapter {
    async fn list_lecturers(&self) -> Result<Vec<Lecturer>, PortError> {
        let rows = self.lecturers.list().await.map_err(db_to_port_error)?;
        Ok(rows.into_iter().map(row_to_lecturer).collect())
    }

    async fn get_lecturer(&self, id: LecturerId) -> Result<Option<Lecturer>, PortError> {
        let row = self
            .lecturers
            .find_by_id(*id.as_uuid())
            .await
            .map_err(db_to_port_error)?;

        Ok(row.map(row_to_lecturer))
    }

    async fn get_lecturer_by_employee_id(
        &self,
        employee_id: &str,
    ) -> Result<Option<Lecturer>, PortError> {
        let row = self
            .lecturers
            .find_by_employee_id(employee_id)
            .await
            .map_err(db_to_port_error)?;

        Ok(row.map(row_to_lecturer))
    }

    #[instrument(skip(self, new), fields(employee_id = %new.employee_id))]
    async fn create_lecturer(&self, new: NewLecturer) -> Result<Lecturer, PortError> {
        let lecturer = Lecturer::from_new(new)?;

        self.lecturers
            .insert(&lecturer_to_row(&lecturer))
            .await
            .map_err(|e| match e {
                DatabaseError::DuplicateEntry(_) => PortError::conflict(format!(
                    "Employee ID {} or username {} is already registered",
                    lecturer.employee_id, lecturer.username
                )),
                other => db_to_port_error(other),
            })?;

        debug!(lecturer_id = %lecturer.id, "Lecturer created");
        Ok(lecturer)
    }

    async fn update_lecturer(
        &self,
        id: LecturerId,
        update: LecturerUpdate,
    ) -> Result<Lecturer, PortError> {
        let mut lecturer = self.load_lecturer(id).await?;
        lecturer.apply(update)?;
        self.store_lecturer(&lecturer).await?;
        Ok(lecturer)
    }

    async fn deactivate_lecturer(&self, id: LecturerId) -> Result<(), PortError> {
        let mut lecturer = self.load_lecturer(id).await?;
        lecturer.deactivate();
        self.store_lecturer(&lecturer).await
    }

    #[instrument(skip(self, report), fields(report_id = %report.id))]
    async fn save_report(&self, report: &PaymentReport) -> Result<(), PortError> {
        let row = report_to_row(report)?;
        self.reports.insert(&row).await.map_err(db_to_port_error)
    }

    async fn list_reports(&self) -> Result<Vec<PaymentReport>, PortError> {
        let rows = self.reports.list().await.map_err(db_to_port_error)?;
        rows.into_iter().map(row_to_report).collect()
    }

    async fn get_report(&self, id: ReportId) -> Result<Option<PaymentReport>, PortError> {
        let row = self
            .reports
            .find_by_id(*id.as_uuid())
            .await
            .map_err(db_to_port_error)?;

        row.map(row_to_report).transpose()
    }
}

// ============================================================================
// Row conversions
// ============================================================================

fn row_to_lecturer(row: LecturerRow) -> Lecturer {
    Lecturer {
        id: LecturerId::from_uuid(row.lecturer_id),
        employee_id: row.employee_id,
        username: row.username,
        first_name: row.first_name,
        last_name: row.last_name,
        email: row.email,
        phone: row.phone,
        department: row.department,
        position: row.position,
        hire_date: row.hire_date,
        default_hourly_rate: row.default_hourly_rate,
        is_active: row.is_active,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn lecturer_to_row(lecturer: &Lecturer) -> LecturerRow {
    LecturerRow {
        lecturer_id: *lecturer.id.as_uuid(),
        employee_id: lecturer.employee_id.clone(),
        username: lecturer.username.clone(),
        first_name: lecturer.first_name.clone(),
        last_name: lecturer.last_name.clone(),
        email: lecturer.email.clone(),
        phone: lecturer.phone.clone(),
        department: lecturer.department.clone(),
        position: lecturer.position.clone(),
        hire_date: lecturer.hire_date,
        default_hourly_rate: lecturer.default_hourly_rate,
        is_active: lecturer.is_active,
        created_at: lecturer.created_at,
        updated_at: lecturer.updated_at,
    }
}

fn report_to_row(report: &PaymentReport) -> Result<ReportRow, PortError> {
    let lines = serde_json::to_value(&report.lines)
        .map_err(|e| PortError::internal(format!("Cannot encode report lines: {e}")))?;
    let total_claims = i32::try_from(report.total_claims)
        .map_err(|_| PortError::validation("Report has too many claims to store"))?;

    Ok(ReportRow {
        report_id: *report.id.as_uuid(),
        name: report.name.clone(),
        generated_at: report.generated_at,
        period_start: report.period.start,
        period_end: report.period.end,
        total_amount: report.total_amount.amount(),
        currency: report.total_amount.currency().code().to_string(),
        total_claims,
        generated_by: report.generated_by.clone(),
        lines: Json(lines),
    })
}

fn row_to_report(row: ReportRow) -> Result<PaymentReport, PortError> {
    let corrupt = |what: &str, detail: String| {
        db_to_port_error(DatabaseError::SerializationError(format!(
            "Report {} has an unreadable {what}: {detail}",
            row.report_id
        )))
    };

    let currency: Currency = row
        .currency
        .parse()
        .map_err(|e: core_kernel::MoneyError| corrupt("currency", e.to_string()))?;
    let period = DateRange::new(row.period_start, row.period_end)
        .map_err(|e| corrupt("period", e.to_string()))?;
    let lines: Vec<PaymentLine> = serde_json::from_value(row.lines.0.clone())
        .map_err(|e| corrupt("line list", e.to_string()))?;

    Ok(PaymentReport {
        id: ReportId::from_uuid(row.report_id),
        name: row.name,
        generated_at: row.generated_at,
        period,
        total_amount: Money::new(row.total_amount, currency),
        total_claims: row.total_claims.max(0) as usize,
        generated_by: row.generated_by,
        lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use core_kernel::Timezone;
    use domain_claims::Claim;
    use domain_hr::lecturer::sample_lecturers;
    use rust_decimal_macros::dec;

    #[test]
    fn test_lecturer_row_round_trip() {
        let lecturer = sample_lecturers().remove(0);
        assert_eq!(row_to_lecturer(lecturer_to_row(&lecturer)), lecturer);
    }

    #[test]
    fn test_report_row_round_trip() {
        let period = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        )
        .unwrap();
        let mut claim = Claim::new("jane.smith", dec!(8), dec!(45))
            .with_date(Utc.with_ymd_and_hms(2024, 3, 12, 10, 0, 0).unwrap());
        claim.approve("Academic Manager").unwrap();

        let report = PaymentReport::build(
            period,
            &[claim],
            "hr.admin",
            &Timezone::default(),
            Currency::ZAR,
        );
        let back = row_to_report(report_to_row(&report).unwrap()).unwrap();

        assert_eq!(back.lines, report.lines);
        assert_eq!(back.total_amount, report.total_amount);
        assert_eq!(back.period, report.period);
    }

    #[test]
    fn test_unknown_currency_is_reported() {
        let mut row = report_to_row(&PaymentReport::build(
            DateRange::month_of(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
            &[],
            "hr.admin",
            &Timezone::default(),
            Currency::USD,
        ))
        .unwrap();
        row.currency = "XXX".to_string();

        let err = row_to_report(row).unwrap_err();
        assert!(err.to_string().contains("currency"));
    }
}
