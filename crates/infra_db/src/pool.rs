//! PostgreSQL pool and schema setup
//!
//! [`DatabaseConfig`] is the `database` section of the server configuration;
//! every field has a default, so only the URL usually needs setting.

use serde::Deserialize;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

use crate::error::DatabaseError;

/// Type alias for the PostgreSQL connection pool
pub type DatabasePool = PgPool;

/// Pool settings for the claims database
///
/// ```rust
/// use infra_db::DatabaseConfig;
///
/// let config = DatabaseConfig::new("postgres://localhost/claims");
/// assert_eq!(config.max_connections, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Connections kept open while idle
    pub min_connections: u32,
    /// Seconds to wait for a free connection
    pub acquire_timeout_secs: u64,
    /// Seconds before an unused connection is closed
    pub idle_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Rejects settings no pool could satisfy
    pub fn validate(&self) -> Result<(), DatabaseError> {
        if self.url.trim().is_empty() {
            return Err(DatabaseError::InvalidPoolSettings("url is empty".to_string()));
        }
        if self.max_connections == 0 {
            return Err(DatabaseError::InvalidPoolSettings(
                "max_connections must be at least 1".to_string(),
            ));
        }
        if self.min_connections > self.max_connections {
            return Err(DatabaseError::InvalidPoolSettings(format!(
                "min_connections ({}) exceeds max_connections ({})",
                self.min_connections, self.max_connections
            )));
        }
        Ok(())
    }

    fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/claims".to_string(),
            max_connections: 10,
            min_connections: 2,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

/// Opens a pool with the given settings
///
/// # Errors
///
/// `InvalidPoolSettings` before connecting, `ConnectionFailed` when the
/// server cannot be reached
pub async fn create_pool(config: &DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    config.validate()?;
    info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Creating database pool"
    );

    config
        .pool_options()
        .connect(&config.url)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))
}

/// Applies the schema migrations embedded from `migrations/`
///
/// Already-applied migrations are skipped, so this is safe to call on every
/// startup.
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), DatabaseError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

    info!("Database migrations applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_reach_pool_options() {
        let config = DatabaseConfig {
            max_connections: 4,
            min_connections: 1,
            acquire_timeout_secs: 5,
            ..DatabaseConfig::default()
        };
        let options = config.pool_options();

        assert_eq!(options.get_max_connections(), 4);
        assert_eq!(options.get_min_connections(), 1);
        assert_eq!(options.get_acquire_timeout(), Duration::from_secs(5));
        assert_eq!(options.get_idle_timeout(), Some(Duration::from_secs(600)));
    }

    #[test]
    fn test_min_above_max_is_refused() {
        let config = DatabaseConfig {
            max_connections: 2,
            min_connections: 3,
            ..DatabaseConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DatabaseError::InvalidPoolSettings(_))
        ));
    }

    #[test]
    fn test_empty_url_is_refused() {
        assert!(DatabaseConfig::new("  ").validate().is_err());
        assert!(DatabaseConfig::default().validate().is_ok());
    }

    #[tokio::test]
    async fn test_create_pool_checks_settings_before_connecting() {
        let config = DatabaseConfig {
            max_connections: 0,
            ..DatabaseConfig::default()
        };
        let err = create_pool(&config).await.unwrap_err();
        assert!(err.to_string().contains("max_connections"));
    }
}
