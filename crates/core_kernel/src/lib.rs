//! Core Kernel - Foundational types shared by the claims and HR domains
//!
//! This crate provides the building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic for payment totals
//! - Calendar types for reporting periods in the institution timezone
//! - Strongly-typed identifiers
//! - Port infrastructure (errors, health checks) for the provider traits

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod ports;

pub use money::{Money, Currency, MoneyError};
pub use temporal::{DateRange, Timezone, TemporalError};
pub use identifiers::{ClaimId, LecturerId, ReportId};
pub use ports::{
    AdapterHealth, AdapterType, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
