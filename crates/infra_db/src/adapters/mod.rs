//! Domain Adapters
//!
//! This module provides adapter implementations for domain ports,
//! connecting domain interfaces to the PostgreSQL database layer.
//!
//! # Architecture
//!
//! Each domain has a corresponding adapter that:
//! - Implements the domain's port trait
//! - Translates between domain models and database row types
//! - Uses the repository layer for database operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresClaimAdapter;
//! use domain_claims::ClaimPort;
//!
//! let adapter = PostgresClaimAdapter::new(pool);
//! let pending = adapter.pending_claims().await?;
//! ```

use chrono::Utc;
use sqlx::PgPool;

use core_kernel::{AdapterHealth, AdapterType, HealthCheckResult};

pub mod claims;
pub mod hr;

pub use claims::PostgresClaimAdapter;
pub use hr::PostgresHrAdapter;

/// Runs `SELECT 1` against the pool and reports how it went
pub(crate) async fn check_pool(pool: &PgPool, adapter_id: &str) -> HealthCheckResult {
    let start = std::time::Instant::now();

    let result = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await;

    let latency_ms = start.elapsed().as_millis() as u64;

    let (status, message) = match result {
        Ok(_) => (AdapterHealth::Healthy, None),
        Err(e) => (AdapterHealth::Unhealthy, Some(format!("Database error: {}", e))),
    };

    HealthCheckResult {
        adapter_id: adapter_id.to_string(),
        adapter_type: AdapterType::Postgres,
        status,
        latency_ms,
        message,
        checked_at: Utc::now(),
    }
}
