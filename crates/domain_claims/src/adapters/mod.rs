//! Claim Port Adapters
//!
//! In-process implementations of the claims domain ports. The PostgreSQL
//! adapter lives in `infra_db`.

pub mod memory;

pub use memory::InMemoryClaimStore;
