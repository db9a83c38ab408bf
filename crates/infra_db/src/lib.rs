//! Infrastructure Database Layer
//!
//! This crate provides PostgreSQL storage for lecturer claims, the lecturer
//! roster and generated payment reports, using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern. Repositories own the SQL and
//! return plain row types; adapters implement the domain ports
//! (`ClaimPort`, `HrPort`) by translating rows to domain types.
//!
//! # Schema
//!
//! Migrations under `migrations/` are embedded at build time and applied
//! with [`run_migrations`].
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig};
//! use infra_db::adapters::PostgresClaimAdapter;
//!
//! let pool = create_pool(&DatabaseConfig::new("postgres://localhost/claims")).await?;
//! run_migrations(&pool).await?;
//! let claims = PostgresClaimAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig};
pub use error::{db_to_port_error, DatabaseError};
pub use adapters::{PostgresClaimAdapter, PostgresHrAdapter};
