//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::{DateTime, NaiveDate, Utc};
use core_kernel::{ClaimId, LecturerId};
use domain_claims::{Claim, ClaimStatus};
use domain_hr::{Lecturer, NewLecturer};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Builder for constructing test claims
///
/// The status is applied through the claim's own transitions, so a built
/// approved claim has its approver and review time set.
pub struct TestClaimBuilder {
    lecturer: String,
    hours: Decimal,
    rate: Decimal,
    date: Option<DateTime<Utc>>,
    notes: Option<String>,
    document: Option<String>,
    status: ClaimStatus,
    approver: String,
    review_notes: Option<String>,
}

impl Default for TestClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClaimBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            lecturer: "john.doe".to_string(),
            hours: dec!(10),
            rate: dec!(50),
            date: None,
            notes: None,
            document: Some("/uploads/timesheet.pdf".to_string()),
            status: ClaimStatus::Pending,
            approver: "Academic Manager".to_string(),
            review_notes: None,
        }
    }

    pub fn with_lecturer(mut self, lecturer: impl Into<String>) -> Self {
        self.lecturer = lecturer.into();
        self
    }

    pub fn with_hours(mut self, hours: Decimal) -> Self {
        self.hours = hours;
        self
    }

    pub fn with_rate(mut self, rate: Decimal) -> Self {
        self.rate = rate;
        self
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Removes the supporting document
    pub fn without_document(mut self) -> Self {
        self.document = None;
        self
    }

    /// Marks the claim approved by `approver`
    pub fn approved_by(mut self, approver: impl Into<String>) -> Self {
        self.status = ClaimStatus::Approved;
        self.approver = approver.into();
        self
    }

    pub fn rejected(mut self, notes: Option<&str>) -> Self {
        self.status = ClaimStatus::Rejected;
        self.review_notes = notes.map(str::to_string);
        self
    }

    /// Builds the claim
    pub fn build(self) -> Claim {
        let mut claim = Claim::new(self.lecturer, self.hours, self.rate);
        if let Some(date) = self.date {
            claim = claim.with_date(date);
        }
        if let Some(notes) = self.notes {
            claim = claim.with_notes(notes);
        }
        if let Some(document) = self.document {
            claim = claim.with_document(document);
        }

        match self.status {
            ClaimStatus::Pending => {}
            ClaimStatus::Approved => claim.approve(self.approver).unwrap(),
            ClaimStatus::Rejected => claim.reject(self.review_notes).unwrap(),
        }
        claim
    }

    /// Builds the claim and returns its ID alongside
    pub fn build_with_id(self) -> (ClaimId, Claim) {
        let claim = self.build();
        (claim.id, claim)
    }
}

/// Builder for lecturers and lecturer registration input
pub struct TestLecturerBuilder {
    employee_id: String,
    first_name: String,
    last_name: String,
    department: Option<String>,
    rate: Decimal,
    hire_date: NaiveDate,
    active: bool,
}

impl Default for TestLecturerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestLecturerBuilder {
    pub fn new() -> Self {
        Self {
            employee_id: "EMP900".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            department: Some("Computer Science".to_string()),
            rate: dec!(50),
            hire_date: NaiveDate::from_ymd_opt(2020, 2, 1).unwrap(),
            active: true,
        }
    }

    pub fn with_employee_id(mut self, employee_id: impl Into<String>) -> Self {
        self.employee_id = employee_id.into();
        self
    }

    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    pub fn with_department(mut self, department: Option<&str>) -> Self {
        self.department = department.map(str::to_string);
        self
    }

    pub fn with_rate(mut self, rate: Decimal) -> Self {
        self.rate = rate;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Login name derived as `first.last`, lowercased
    pub fn username(&self) -> String {
        format!(
            "{}.{}",
            self.first_name.to_lowercase(),
            self.last_name.to_lowercase()
        )
    }

    /// Registration input for the HR service
    pub fn build_new(&self) -> NewLecturer {
        let username = self.username();
        NewLecturer {
            employee_id: self.employee_id.clone(),
            email: format!("{username}@university.edu"),
            username,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: None,
            department: self.department.clone(),
            position: Some("Lecturer".to_string()),
            hire_date: Some(self.hire_date),
            default_hourly_rate: Some(self.rate),
        }
    }

    /// A stored lecturer record
    pub fn build(self) -> Lecturer {
        let username = self.username();
        Lecturer {
            id: LecturerId::new_v7(),
            employee_id: self.employee_id,
            email: format!("{username}@university.edu"),
            username,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: None,
            department: self.department,
            position: Some("Lecturer".to_string()),
            hire_date: self.hire_date,
            default_hourly_rate: self.rate,
            is_active: self.active,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}
