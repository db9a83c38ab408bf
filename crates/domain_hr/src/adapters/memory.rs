//! In-memory HR store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use core_kernel::{
    AdapterType, DomainPort, HealthCheckResult, HealthCheckable, LecturerId, PortError, ReportId,
};

use crate::lecturer::{sample_lecturers, sort_by_name, Lecturer, LecturerUpdate, NewLecturer};
use crate::ports::{sort_reports_newest_first, HrPort};
use crate::report::PaymentReport;

/// In-memory implementation of HrPort
#[derive(Debug, Clone, Default)]
pub struct InMemoryHrStore {
    lecturers: Arc<RwLock<HashMap<LecturerId, Lecturer>>>,
    reports: Arc<RwLock<HashMap<ReportId, PaymentReport>>>,
}

impl InMemoryHrStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates with lecturers
    pub fn with_lecturers(lecturers: Vec<Lecturer>) -> Self {
        let map = lecturers.into_iter().map(|l| (l.id, l)).collect();
        Self {
            lecturers: Arc::new(RwLock::new(map)),
            reports: Arc::default(),
        }
    }

    /// A store holding the three sample lecturers
    pub fn with_sample_data() -> Self {
        Self::with_lecturers(sample_lecturers())
    }
}

impl DomainPort for InMemoryHrStore {}

#[async_trait]
impl HealthCheckable for InMemoryHrStore {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::healthy("memory-hr", AdapterType::InMemory)
    }
}

#[async_trait]
impl HrPort for InMemoryHrStore {
    async fn list_lecturers(&self) -> Result<Vec<Lecturer>, PortError> {
        let mut lecturers: Vec<_> = self.lecturers.read().await.values().cloned().collect();
        sort_by_name(&mut lecturers);
        Ok(lecturers)
    }

    async fn get_lecturer(&self, id: LecturerId) -> Result<Option<Lecturer>, PortError> {
        Ok(self.lecturers.read().await.get(&id).cloned())
    }

    async fn get_lecturer_by_employee_id(
        &self,
        employee_id: &str,
    ) -> Result<Option<Lecturer>, PortError> {
        Ok(self
            .lecturers
            .read()
            .await
            .values()
            .find(|l| l.employee_id == employee_id)
            .cloned())
    }

    #[instrument(skip(self, new), fields(employee_id = %new.employee_id))]
    async fn create_lecturer(&self, new: NewLecturer) -> Result<Lecturer, PortError> {
        let lecturer = Lecturer::from_new(new)?;

        let mut lecturers = self.lecturers.write().await;
        if lecturers.values().any(|l| l.employee_id == lecturer.employee_id) {
            return Err(PortError::conflict(format!(
                "Employee ID {} is already registered",
                lecturer.employee_id
            )));
        }
        if lecturers.values().any(|l| l.username == lecturer.username) {
            return Err(PortError::conflict(format!(
                "Username {} is already registered",
                lecturer.username
            )));
        }

        lecturers.insert(lecturer.id, lecturer.clone());
        debug!(lecturer_id = %lecturer.id, "Lecturer created");
        Ok(lecturer)
    }

    async fn update_lecturer(
        &self,
        id: LecturerId,
        update: LecturerUpdate,
    ) -> Result<Lecturer, PortError> {
        let mut lecturers = self.lecturers.write().await;
        let lecturer = lecturers
            .get_mut(&id)
            .ok_or_else(|| PortError::not_found("Lecturer", id))?;
        lecturer.apply(update)?;
        Ok(lecturer.clone())
    }

    async fn deactivate_lecturer(&self, id: LecturerId) -> Result<(), PortError> {
        let mut lecturers = self.lecturers.write().await;
        let lecturer = lecturers
            .get_mut(&id)
            .ok_or_else(|| PortError::not_found("Lecturer", id))?;
        lecturer.deactivate();
        Ok(())
    }

    async fn save_report(&self, report: &PaymentReport) -> Result<(), PortError> {
        self.reports.write().await.insert(report.id, report.clone());
        Ok(())
    }

    async fn list_reports(&self) -> Result<Vec<PaymentReport>, PortError> {
        let mut reports: Vec<_> = self.reports.read().await.values().cloned().collect();
        sort_reports_newest_first(&mut reports);
        Ok(reports)
    }

    async fn get_report(&self, id: ReportId) -> Result<Option<PaymentReport>, PortError> {
        Ok(self.reports.read().await.get(&id).cloned())
    }
}
