//! Claim Ports
//!
//! `ClaimPort` is everything the gateway needs from claim storage.
//! Implementations:
//!
//! - **PostgreSQL**: `infra_db::adapters::PostgresClaimAdapter`
//! - **In-memory**: [`mock::MockClaimPort`] for tests (feature `mock`)

use async_trait::async_trait;

use core_kernel::{ClaimId, ItemId, UserId, PortError, DomainPort, OperationMetadata, HealthCheckable};

use crate::claim::Claim;

/// Query parameters for finding claims
#[derive(Debug, Clone, Default)]
pub struct ClaimQuery {
    pub claimant_id: Option<UserId>,
    pub item_id: Option<ItemId>,
    /// Restrict to claims with (true) or without (false) a recorded pickup
    pub pickup_completed: Option<bool>,
}

impl ClaimQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_claimant(claimant_id: UserId) -> Self {
        Self {
            claimant_id: Some(claimant_id),
            ..Default::default()
        }
    }

    pub fn for_item(item_id: ItemId) -> Self {
        Self {
            item_id: Some(item_id),
            ..Default::default()
        }
    }

    /// Claims whose item has been collected
    pub fn picked_up() -> Self {
        Self {
            pickup_completed: Some(true),
            ..Default::default()
        }
    }

    pub fn and_item(mut self, item_id: ItemId) -> Self {
        self.item_id = Some(item_id);
        self
    }

    pub fn matches(&self, claim: &Claim) -> bool {
        self.claimant_id.map_or(true, |id| claim.claimant_id == id)
            && self.item_id.map_or(true, |id| claim.item_id == id)
            && self.pickup_completed.map_or(true, |done| claim.pickup_completed() == done)
    }
}

/// Storage operations for claims
///
/// Listing results are ordered newest first by creation time.
#[async_trait]
pub trait ClaimPort: DomainPort + HealthCheckable {
    async fn get_claim(
        &self,
        id: ClaimId,
        metadata: Option<OperationMetadata>,
    ) -> Result<Claim, PortError>;

    async fn find_claims(
        &self,
        query: ClaimQuery,
        metadata: Option<OperationMetadata>,
    ) -> Result<Vec<Claim>, PortError>;

    /// Stores a new claim; `PortError::Conflict` if the claimant already
    /// holds a claim for the same item
    async fn insert_claim(
        &self,
        claim: &Claim,
        metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError>;

    /// Overwrites an existing claim
    async fn save_claim(
        &self,
        claim: &Claim,
        metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError>;

    /// Removes a claim and returns what was removed
    async fn delete_claim(
        &self,
        id: ClaimId,
        metadata: Option<OperationMetadata>,
    ) -> Result<Claim, PortError>;

    /// Removes every claim filed against an item and returns how many went
    ///
    /// Called after the item itself is gone. Stores that cascade item
    /// deletes will usually find nothing left to remove.
    async fn delete_claims_for_item(
        &self,
        item_id: ItemId,
        metadata: Option<OperationMetadata>,
    ) -> Result<u64, PortError>;
}

/// In-memory implementation of ClaimPort for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use chrono::Utc;

    use core_kernel::{AdapterHealth, HealthCheckResult};

    #[derive(Debug, Default, Clone)]
    pub struct MockClaimPort {
        claims: Arc<RwLock<HashMap<ClaimId, Claim>>>,
    }

    impl MockClaimPort {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with claims for testing
        pub async fn with_claims(claims: Vec<Claim>) -> Self {
            let port = Self::new();
            {
                let mut stored = port.claims.write().await;
                for claim in claims {
                    stored.insert(claim.id, claim);
                }
            }
            port
        }

        pub async fn len(&self) -> usize {
            self.claims.read().await.len()
        }
    }

    impl DomainPort for MockClaimPort {}

    #[async_trait]
    impl HealthCheckable for MockClaimPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "mock-claim-port".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("Mock adapter always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl ClaimPort for MockClaimPort {
        async fn get_claim(
            &self,
            id: ClaimId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Claim, PortError> {
            self.claims
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Claim", id))
        }

        async fn find_claims(
            &self,
            query: ClaimQuery,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Vec<Claim>, PortError> {
            let claims = self.claims.read().await;
            let mut results: Vec<Claim> = claims
                .values()
                .filter(|claim| query.matches(claim))
                .cloned()
                .collect();
            results.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
            Ok(results)
        }

        async fn insert_claim(
            &self,
            claim: &Claim,
            _metadata: Option<OperationMetadata>,
        ) -> Result<(), PortError> {
            let mut claims = self.claims.write().await;
            if claims.contains_key(&claim.id) {
                return Err(PortError::conflict(format!("Claim {} already exists", claim.id)));
            }
            let duplicate = claims
                .values()
                .any(|c| c.item_id == claim.item_id && c.claimant_id == claim.claimant_id);
            if duplicate {
                return Err(PortError::conflict(format!(
                    "Claimant {} already has a claim for item {}",
                    claim.claimant_id, claim.item_id
                )));
            }
            claims.insert(claim.id, claim.clone());
            Ok(())
        }

        async fn save_claim(
            &self,
            claim: &Claim,
            _metadata: Option<OperationMetadata>,
        ) -> Result<(), PortError> {
            let mut claims = self.claims.write().await;
            match claims.get_mut(&claim.id) {
                Some(stored) => {
                    *stored = claim.clone();
                    Ok(())
                }
                None => Err(PortError::not_found("Claim", claim.id)),
            }
        }

        async fn delete_claim(
            &self,
            id: ClaimId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Claim, PortError> {
            self.claims
                .write()
                .await
                .remove(&id)
                .ok_or_else(|| PortError::not_found("Claim", id))
        }

        async fn delete_claims_for_item(
            &self,
            item_id: ItemId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<u64, PortError> {
            let mut claims = self.claims.write().await;
            let before = claims.len();
            claims.retain(|_, claim| claim.item_id != item_id);
            Ok((before - claims.len()) as u64)
        }
    }
}
