//! Shared application state
//!
//! Wires storage adapters into the claim review and HR services according
//! to [`StorageBackend`].

use std::sync::Arc;
use tracing::info;

use core_kernel::{HealthCheckResult, HealthCheckable};
use domain_claims::{
    ApprovalService, ClaimPort, ClaimReviewService, DocumentStore, InMemoryClaimStore,
    LocalDocumentStore,
};
use domain_hr::{HrPort, HrService, InMemoryHrStore};
use infra_db::{DatabaseError, PostgresClaimAdapter, PostgresHrAdapter};

use crate::config::{ApiConfig, StorageBackend};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ApiConfig>,
    pub reviews: ClaimReviewService,
    pub hr: HrService,
    pub documents: Arc<dyn DocumentStore>,
    adapters: Vec<Arc<dyn HealthCheckable>>,
}

impl AppState {
    /// Builds the state from concrete adapters
    pub fn from_parts<C, H, D>(
        config: ApiConfig,
        claims: Arc<C>,
        hr: Arc<H>,
        documents: Arc<D>,
    ) -> Self
    where
        C: ClaimPort,
        H: HrPort,
        D: DocumentStore,
    {
        let approvals = ApprovalService::new(config.rules.clone());
        let claim_port: Arc<dyn ClaimPort> = claims.clone();
        let hr_port: Arc<dyn HrPort> = hr.clone();
        let document_store: Arc<dyn DocumentStore> = documents.clone();

        Self {
            reviews: ClaimReviewService::new(claim_port.clone(), approvals)
                .with_documents(document_store.clone()),
            hr: HrService::new(hr_port, claim_port, config.timezone, config.currency),
            documents: document_store,
            adapters: vec![claims as Arc<dyn HealthCheckable>, hr, documents],
            config: Arc::new(config),
        }
    }

    /// In-memory stores, seeded when `seed_sample_data` is set
    pub fn in_memory(config: ApiConfig) -> Self {
        let (claims, hr) = if config.seed_sample_data {
            (
                InMemoryClaimStore::with_sample_data(),
                InMemoryHrStore::with_sample_data(),
            )
        } else {
            (InMemoryClaimStore::new(), InMemoryHrStore::new())
        };
        let documents = LocalDocumentStore::new(&config.upload_root);

        Self::from_parts(config, Arc::new(claims), Arc::new(hr), Arc::new(documents))
    }

    /// Builds the state for the configured backend
    ///
    /// The postgres backend connects and applies pending migrations first.
    pub async fn connect(config: ApiConfig) -> Result<Self, DatabaseError> {
        match config.storage {
            StorageBackend::Memory => {
                info!(seeded = config.seed_sample_data, "Using in-memory storage");
                Ok(Self::in_memory(config))
            }
            StorageBackend::Postgres => {
                info!("Connecting to database...");
                let pool = infra_db::create_pool(&config.database).await?;
                infra_db::run_migrations(&pool).await?;
                info!("Database ready");

                let documents = LocalDocumentStore::new(&config.upload_root);
                Ok(Self::from_parts(
                    config,
                    Arc::new(PostgresClaimAdapter::new(pool.clone())),
                    Arc::new(PostgresHrAdapter::new(pool)),
                    Arc::new(documents),
                ))
            }
        }
    }

    /// Health of every adapter behind the services
    pub async fn health_checks(&self) -> Vec<HealthCheckResult> {
        let mut results = Vec::with_capacity(self.adapters.len());
        for adapter in &self.adapters {
            results.push(adapter.health_check().await);
        }
        results
    }
}
