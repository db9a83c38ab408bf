//! API configuration
//!
//! Read from `API_`-prefixed environment variables. Nested fields use a
//! double underscore, e.g. `API_RULES__MAX_HOURS_PER_CLAIM=35` or
//! `API_DATABASE__URL=postgres://...`.

use serde::Deserialize;
use std::path::PathBuf;

use core_kernel::{Currency, Timezone};
use domain_claims::ApprovalRules;
use infra_db::DatabaseConfig;

/// Where claims, lecturers and reports are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process memory; lost on restart
    #[default]
    Memory,
    Postgres,
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    pub storage: StorageBackend,
    /// Pool settings, used with the postgres backend
    pub database: DatabaseConfig,
    /// Directory that `/uploads/...` document references live under
    pub upload_root: PathBuf,
    /// Seed the in-memory stores with demo lecturers and claims
    pub seed_sample_data: bool,
    /// Currency of report and analytics totals
    pub currency: Currency,
    /// Institution timezone used for reporting periods
    pub timezone: Timezone,
    pub rules: ApprovalRules,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            storage: StorageBackend::Memory,
            database: DatabaseConfig::default(),
            upload_root: PathBuf::from("wwwroot"),
            seed_sample_data: true,
            currency: Currency::USD,
            timezone: Timezone::default(),
            rules: ApprovalRules::default(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::with_prefix("API")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
