//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claims and HR test suites.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built claims, actors and periods
//! - `builders`: Builder patterns for claims and lecturers
//! - `database`: PostgreSQL testcontainer management
//! - `assertions`: Custom assertion helpers for domain types
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
