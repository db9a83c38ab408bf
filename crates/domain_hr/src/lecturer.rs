//! Lecturer records

use chrono::{DateTime, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use core_kernel::LecturerId;

use crate::error::HrError;

/// Shown for lecturers with no department
pub const NO_DEPARTMENT: &str = "No Department";

/// A lecturer on the institution's roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lecturer {
    pub id: LecturerId,
    /// Staff number, e.g. `EMP001`
    pub employee_id: String,
    /// Login name; claims are filed under it
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub hire_date: NaiveDate,
    pub default_hourly_rate: Decimal,
    /// False once deactivated; records are never deleted
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Lecturer {
    /// Returns the full name in "First Last" format
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Department name, or "No Department" when blank
    pub fn department_name(&self) -> &str {
        self.department
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(NO_DEPARTMENT)
    }

    /// Builds an active lecturer from validated input
    pub fn from_new(new: NewLecturer) -> Result<Self, HrError> {
        new.validate()?;
        let now = Utc::now();
        Ok(Self {
            id: LecturerId::new_v7(),
            employee_id: new.employee_id.trim().to_string(),
            username: new.username.trim().to_string(),
            first_name: new.first_name.trim().to_string(),
            last_name: new.last_name.trim().to_string(),
            email: new.email.trim().to_string(),
            phone: new.phone.filter(|p| !p.trim().is_empty()),
            department: new.department.filter(|d| !d.trim().is_empty()),
            position: new.position.filter(|p| !p.trim().is_empty()),
            hire_date: new.hire_date.unwrap_or_else(|| now.date_naive()),
            default_hourly_rate: new.default_hourly_rate.unwrap_or(DEFAULT_HOURLY_RATE),
            is_active: true,
            created_at: now,
            updated_at: None,
        })
    }

    /// Applies a validated partial update
    pub fn apply(&mut self, update: LecturerUpdate) -> Result<(), HrError> {
        update.validate()?;

        if let Some(first_name) = update.first_name {
            self.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name.trim().to_string();
        }
        if let Some(email) = update.email {
            self.email = email.trim().to_string();
        }
        if let Some(phone) = update.phone {
            self.phone = Some(phone).filter(|p| !p.trim().is_empty());
        }
        if let Some(department) = update.department {
            self.department = Some(department).filter(|d| !d.trim().is_empty());
        }
        if let Some(position) = update.position {
            self.position = Some(position).filter(|p| !p.trim().is_empty());
        }
        if let Some(rate) = update.default_hourly_rate {
            self.default_hourly_rate = rate;
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        self.updated_at = Some(Utc::now());
        Ok(())
    }

    /// Soft delete
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Some(Utc::now());
    }
}

/// Hourly rate used when none is given
pub const DEFAULT_HOURLY_RATE: Decimal = dec!(50);

fn positive_rate(rate: &Decimal) -> Result<(), ValidationError> {
    if *rate > Decimal::ZERO {
        Ok(())
    } else {
        let mut err = ValidationError::new("positive_rate");
        err.message = Some("Default hourly rate must be positive".into());
        Err(err)
    }
}

/// Input for registering a lecturer
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NewLecturer {
    #[validate(length(min = 1, message = "Employee ID is required"))]
    pub employee_id: String,
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    #[validate(length(max = 32, message = "Phone number is too long"))]
    pub phone: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub hire_date: Option<NaiveDate>,
    #[validate(custom(function = "positive_rate"))]
    pub default_hourly_rate: Option<Decimal>,
}

/// Partial update of a lecturer; absent fields are left alone
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LecturerUpdate {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: Option<String>,
    #[validate(email(message = "Email must be a valid address"))]
    pub email: Option<String>,
    #[validate(length(max = 32, message = "Phone number is too long"))]
    pub phone: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    #[validate(custom(function = "positive_rate"))]
    pub default_hourly_rate: Option<Decimal>,
    pub is_active: Option<bool>,
}

/// The three lecturers the in-memory store starts with
pub fn sample_lecturers() -> Vec<Lecturer> {
    let now = Utc::now();
    let today = now.date_naive();
    let years_ago = |years: u32| {
        today
            .checked_sub_months(Months::new(12 * years))
            .unwrap_or(today)
    };

    let sample = |n: u32, first: &str, last: &str, department: &str, position: &str, rate: Decimal, years: u32| {
        let username = format!("{}.{}", first.to_lowercase(), last.to_lowercase());
        Lecturer {
            id: LecturerId::new_v7(),
            employee_id: format!("EMP{n:03}"),
            email: format!("{username}@university.edu"),
            username,
            first_name: first.to_string(),
            last_name: last.to_string(),
            phone: Some(format!("+123456789{}", n - 1)),
            department: Some(department.to_string()),
            position: Some(position.to_string()),
            hire_date: years_ago(years),
            default_hourly_rate: rate,
            is_active: true,
            created_at: now,
            updated_at: None,
        }
    };

    vec![
        sample(1, "John", "Doe", "Computer Science", "Senior Lecturer", dec!(55), 2),
        sample(2, "Jane", "Smith", "Mathematics", "Lecturer", dec!(45), 1),
        sample(3, "Robert", "Johnson", "Physics", "Associate Professor", dec!(65), 3),
    ]
}

/// Orders by last name, then first name
pub fn sort_by_name(lecturers: &mut [Lecturer]) {
    lecturers.sort_by(|a, b| {
        a.last_name
            .cmp(&b.last_name)
            .then_with(|| a.first_name.cmp(&b.first_name))
    });
}
