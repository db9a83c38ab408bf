//! HR Provider Port
//!
//! Storage for the lecturer roster and generated payment reports. Two
//! adapters implement the port:
//!
//! - **In-memory**: [`crate::adapters::InMemoryHrStore`], optionally seeded
//!   with the sample roster
//! - **PostgreSQL**: `infra_db::adapters::PostgresHrAdapter`

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, LecturerId, PortError, ReportId};

use crate::lecturer::{Lecturer, LecturerUpdate, NewLecturer};
use crate::report::PaymentReport;

/// The main port trait for HR operations
#[async_trait]
pub trait HrPort: DomainPort + HealthCheckable {
    // ========================================================================
    // Lecturer Roster
    // ========================================================================

    /// All lecturers, sorted by last name then first name
    async fn list_lecturers(&self) -> Result<Vec<Lecturer>, PortError>;

    async fn get_lecturer(&self, id: LecturerId) -> Result<Option<Lecturer>, PortError>;

    /// Looks a lecturer up by staff number
    async fn get_lecturer_by_employee_id(
        &self,
        employee_id: &str,
    ) -> Result<Option<Lecturer>, PortError>;

    /// Registers a lecturer
    ///
    /// # Returns
    ///
    /// The stored lecturer, `PortError::Validation` for bad input, or
    /// `PortError::Conflict` if the employee id or username is taken
    async fn create_lecturer(&self, new: NewLecturer) -> Result<Lecturer, PortError>;

    /// Applies a partial update
    async fn update_lecturer(
        &self,
        id: LecturerId,
        update: LecturerUpdate,
    ) -> Result<Lecturer, PortError>;

    /// Marks a lecturer inactive
    async fn deactivate_lecturer(&self, id: LecturerId) -> Result<(), PortError>;

    // ========================================================================
    // Payment Reports
    // ========================================================================

    async fn save_report(&self, report: &PaymentReport) -> Result<(), PortError>;

    /// All reports, newest first
    async fn list_reports(&self) -> Result<Vec<PaymentReport>, PortError>;

    async fn get_report(&self, id: ReportId) -> Result<Option<PaymentReport>, PortError>;
}

/// Orders reports newest first
pub fn sort_reports_newest_first(reports: &mut [PaymentReport]) {
    reports.sort_by(|a, b| b.generated_at.cmp(&a.generated_at));
}
