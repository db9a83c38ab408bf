//! Repository implementations for domain entities
//!
//! This module provides concrete repository implementations that handle
//! database access for each table. Repositories encapsulate SQL queries and
//! map to plain row types; the adapters translate rows into domain types.
//!
//! # Architecture
//!
//! Each repository follows these principles:
//! - Runtime-checked queries mapped with `sqlx::FromRow`
//! - Postgres enums mirrored by `sqlx::Type` enums
//! - Status changes guarded in SQL so concurrent reviews cannot both apply

pub mod claims;
pub mod lecturers;
pub mod reports;

pub use claims::ClaimsRepository;
pub use lecturers::LecturerRepository;
pub use reports::ReportRepository;
