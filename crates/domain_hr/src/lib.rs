//! HR Domain
//!
//! This crate manages the lecturer roster and turns approved claims into
//! payment reports and dashboard analytics.
//!
//! - **Roster**: lecturers are registered, updated and deactivated, never
//!   deleted
//! - **Payment reports**: approved claims within a period, totalled and
//!   exportable as CSV
//! - **Analytics**: head counts and this month's payments, overall and per
//!   department
//!
//! Claims are attributed to lecturers by username. Calendar periods are
//! evaluated in the institution's timezone.

pub mod lecturer;
pub mod report;
pub mod analytics;
pub mod ports;
pub mod adapters;
pub mod service;
pub mod error;

pub use lecturer::{Lecturer, LecturerUpdate, NewLecturer};
pub use report::{PaymentLine, PaymentReport};
pub use analytics::{DepartmentSummary, HrAnalytics};
pub use ports::HrPort;
pub use adapters::InMemoryHrStore;
pub use service::HrService;
pub use error::HrError;
