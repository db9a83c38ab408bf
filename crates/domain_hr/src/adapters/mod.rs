//! HR Port Adapters
//!
//! In-process implementation of [`crate::ports::HrPort`]. The PostgreSQL
//! adapter lives in `infra_db`.

pub mod memory;

pub use memory::InMemoryHrStore;
