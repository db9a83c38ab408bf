//! In-memory claim store
//!
//! Each store owns its own map, so tests build isolated instances and the
//! server can run without a database.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use core_kernel::{
    AdapterType, ClaimId, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};

use crate::claim::{Claim, ClaimStatus};
use crate::ports::{sort_newest_first, ClaimPort};

/// In-memory implementation of ClaimPort
#[derive(Debug, Clone, Default)]
pub struct InMemoryClaimStore {
    claims: Arc<RwLock<HashMap<ClaimId, Claim>>>,
}

impl InMemoryClaimStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates with claims
    pub fn with_claims(claims: Vec<Claim>) -> Self {
        let map = claims.into_iter().map(|c| (c.id, c)).collect();
        Self {
            claims: Arc::new(RwLock::new(map)),
        }
    }

    /// A store holding three pending sample claims from the last few days
    pub fn with_sample_data() -> Self {
        let now = Utc::now();
        Self::with_claims(vec![
            Claim::new("john.doe", dec!(5), dec!(50))
                .with_notes("Guest lecture")
                .with_date(now - Duration::days(2)),
            Claim::new("jane.smith", dec!(8), dec!(45))
                .with_notes("Tutorial session")
                .with_date(now - Duration::days(1)),
            Claim::new("robert.johnson", dec!(12), dec!(60))
                .with_notes("Weekend workshop")
                .with_date(now - Duration::days(3)),
        ])
    }

    async fn filtered<F>(&self, predicate: F) -> Vec<Claim>
    where
        F: Fn(&Claim) -> bool,
    {
        let mut claims: Vec<Claim> = self
            .claims
            .read()
            .await
            .values()
            .filter(|c| predicate(c))
            .cloned()
            .collect();
        sort_newest_first(&mut claims);
        claims
    }

    async fn transition<F>(&self, id: ClaimId, apply: F) -> Result<Claim, PortError>
    where
        F: FnOnce(&mut Claim) -> Result<(), crate::error::ClaimError>,
    {
        let mut claims = self.claims.write().await;
        let claim = claims
            .get_mut(&id)
            .ok_or_else(|| PortError::not_found("Claim", id))?;
        apply(claim).map_err(|e| PortError::conflict(e.to_string()))?;
        Ok(claim.clone())
    }
}

impl DomainPort for InMemoryClaimStore {}

#[async_trait]
impl HealthCheckable for InMemoryClaimStore {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::healthy("memory-claims", AdapterType::InMemory)
    }
}

#[async_trait]
impl ClaimPort for InMemoryClaimStore {
    async fn get_claim(&self, id: ClaimId) -> Result<Option<Claim>, PortError> {
        Ok(self.claims.read().await.get(&id).cloned())
    }

    async fn pending_claims(&self) -> Result<Vec<Claim>, PortError> {
        let claims = self.filtered(|c| c.status == ClaimStatus::Pending).await;
        debug!(count = claims.len(), "Loaded pending claims");
        Ok(claims)
    }

    async fn approved_claims(&self) -> Result<Vec<Claim>, PortError> {
        Ok(self.filtered(|c| c.status == ClaimStatus::Approved).await)
    }

    async fn claims_for_lecturer(&self, lecturer: &str) -> Result<Vec<Claim>, PortError> {
        Ok(self.filtered(|c| c.lecturer == lecturer).await)
    }

    #[instrument(skip(self, claim), fields(claim_id = %claim.id, lecturer = %claim.lecturer))]
    async fn submit_claim(&self, claim: &Claim) -> Result<(), PortError> {
        let mut claims = self.claims.write().await;
        if claims.contains_key(&claim.id) {
            return Err(PortError::conflict(format!("Claim {} already exists", claim.id)));
        }
        claims.insert(claim.id, claim.clone());
        debug!("Claim stored");
        Ok(())
    }

    #[instrument(skip(self), fields(claim_id = %id))]
    async fn approve_claim(&self, id: ClaimId, approved_by: &str) -> Result<Claim, PortError> {
        self.transition(id, |claim| claim.approve(approved_by)).await
    }

    #[instrument(skip(self, notes), fields(claim_id = %id))]
    async fn reject_claim(&self, id: ClaimId, notes: Option<String>) -> Result<Claim, PortError> {
        self.transition(id, |claim| claim.reject(notes)).await
    }
}
