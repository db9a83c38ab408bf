//! HR service
//!
//! Role-checked entry point for roster management, payment reports and
//! analytics. Only HR Managers and Academic Managers get through.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, instrument};

use core_kernel::{Currency, DateRange, LecturerId, ReportId, Timezone};
use domain_claims::{Actor, Claim, ClaimPort};

use crate::analytics::HrAnalytics;
use crate::error::HrError;
use crate::lecturer::{Lecturer, LecturerUpdate, NewLecturer};
use crate::ports::HrPort;
use crate::report::PaymentReport;

#[derive(Clone)]
pub struct HrService {
    hr: Arc<dyn HrPort>,
    claims: Arc<dyn ClaimPort>,
    timezone: Timezone,
    currency: Currency,
}

impl HrService {
    pub fn new(
        hr: Arc<dyn HrPort>,
        claims: Arc<dyn ClaimPort>,
        timezone: Timezone,
        currency: Currency,
    ) -> Self {
        Self {
            hr,
            claims,
            timezone,
            currency,
        }
    }

    pub fn timezone(&self) -> &Timezone {
        &self.timezone
    }

    fn authorize(actor: &Actor) -> Result<(), HrError> {
        if actor.role.can_access_hr() {
            Ok(())
        } else {
            Err(HrError::Unauthorized(actor.role.to_string()))
        }
    }

    // ========================================================================
    // Lecturer Roster
    // ========================================================================

    pub async fn lecturers(&self, actor: &Actor) -> Result<Vec<Lecturer>, HrError> {
        Self::authorize(actor)?;
        Ok(self.hr.list_lecturers().await?)
    }

    pub async fn lecturer(&self, actor: &Actor, id: LecturerId) -> Result<Lecturer, HrError> {
        Self::authorize(actor)?;
        self.hr
            .get_lecturer(id)
            .await?
            .ok_or_else(|| HrError::not_found("Lecturer", id))
    }

    pub async fn lecturer_by_employee_id(
        &self,
        actor: &Actor,
        employee_id: &str,
    ) -> Result<Lecturer, HrError> {
        Self::authorize(actor)?;
        self.hr
            .get_lecturer_by_employee_id(employee_id)
            .await?
            .ok_or_else(|| HrError::not_found("Lecturer", employee_id))
    }

    #[instrument(skip(self, new), fields(role = %actor.role, employee_id = %new.employee_id))]
    pub async fn create_lecturer(
        &self,
        actor: &Actor,
        new: NewLecturer,
    ) -> Result<Lecturer, HrError> {
        Self::authorize(actor)?;
        let lecturer = self.hr.create_lecturer(new).await?;
        info!(lecturer_id = %lecturer.id, "Lecturer registered");
        Ok(lecturer)
    }

    pub async fn update_lecturer(
        &self,
        actor: &Actor,
        id: LecturerId,
        update: LecturerUpdate,
    ) -> Result<Lecturer, HrError> {
        Self::authorize(actor)?;
        Ok(self.hr.update_lecturer(id, update).await?)
    }

    #[instrument(skip(self), fields(role = %actor.role, lecturer_id = %id))]
    pub async fn deactivate_lecturer(&self, actor: &Actor, id: LecturerId) -> Result<(), HrError> {
        Self::authorize(actor)?;
        self.hr.deactivate_lecturer(id).await?;
        info!("Lecturer deactivated");
        Ok(())
    }

    // ========================================================================
    // Payment Reports
    // ========================================================================

    /// Approved claims dated within the period
    pub async fn claims_for_payment(
        &self,
        actor: &Actor,
        period: DateRange,
    ) -> Result<Vec<Claim>, HrError> {
        Self::authorize(actor)?;
        let approved = self.claims.approved_claims().await?;
        Ok(approved
            .into_iter()
            .filter(|c| period.contains_instant(c.date, &self.timezone))
            .collect())
    }

    /// Generates and stores a payment report
    #[instrument(skip(self), fields(role = %actor.role))]
    pub async fn generate_payment_report(
        &self,
        actor: &Actor,
        period: DateRange,
    ) -> Result<PaymentReport, HrError> {
        let claims = self.claims_for_payment(actor, period).await?;
        let report = PaymentReport::build(
            period,
            &claims,
            actor.approver_name(),
            &self.timezone,
            self.currency,
        );
        self.hr.save_report(&report).await?;

        info!(
            report_id = %report.id,
            total_claims = report.total_claims,
            total_amount = %report.total_amount,
            "Payment report generated"
        );
        Ok(report)
    }

    pub async fn reports(&self, actor: &Actor) -> Result<Vec<PaymentReport>, HrError> {
        Self::authorize(actor)?;
        Ok(self.hr.list_reports().await?)
    }

    pub async fn report(&self, actor: &Actor, id: ReportId) -> Result<PaymentReport, HrError> {
        Self::authorize(actor)?;
        self.hr
            .get_report(id)
            .await?
            .ok_or_else(|| HrError::not_found("Report", id))
    }

    /// A stored report rendered as CSV, with its download file name
    pub async fn export_report(
        &self,
        actor: &Actor,
        id: ReportId,
    ) -> Result<(String, Vec<u8>), HrError> {
        let report = self.report(actor, id).await?;
        let csv = report.to_csv(&self.timezone)?;
        Ok((report.csv_file_name(), csv))
    }

    // ========================================================================
    // Analytics
    // ========================================================================

    /// Dashboard figures for the month containing `now`
    pub async fn analytics_at(
        &self,
        actor: &Actor,
        now: DateTime<Utc>,
    ) -> Result<HrAnalytics, HrError> {
        Self::authorize(actor)?;
        let lecturers = self.hr.list_lecturers().await?;
        let approved = self.claims.approved_claims().await?;
        let month = DateRange::current_month(&self.timezone, now);

        Ok(HrAnalytics::compute(
            &lecturers,
            &approved,
            month,
            &self.timezone,
            self.currency,
        ))
    }

    pub async fn analytics(&self, actor: &Actor) -> Result<HrAnalytics, HrError> {
        self.analytics_at(actor, Utc::now()).await
    }
}
