//! PostgreSQL Claim Adapter
//!
//! Implements `ClaimPort` on top of [`ClaimsRepository`]. The one-claim-per-
//! claimant-per-item rule is backed by a unique index, so a duplicate insert
//! surfaces as `PortError::Conflict`.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    ClaimId, ItemId, UserId, PortError, DomainPort, OperationMetadata,
    HealthCheckable, HealthCheckResult,
};
use domain_claims::{Claim, ClaimAnswer, ClaimPort, ClaimQuery, PickupRecord};

use super::{check_pool, transformation};
use crate::repositories::claims::{ClaimFilter, ClaimRow, ClaimsRepository};

/// PostgreSQL-backed implementation of the ClaimPort trait
#[derive(Debug, Clone)]
pub struct PostgresClaimAdapter {
    repository: ClaimsRepository,
    pool: PgPool,
}

impl PostgresClaimAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ClaimsRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn repository(&self) -> &ClaimsRepository {
        &self.repository
    }
}

impl DomainPort for PostgresClaimAdapter {}

#[async_trait]
impl HealthCheckable for PostgresClaimAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        check_pool(&self.pool, "postgres-claim-adapter").await
    }
}

#[async_trait]
impl ClaimPort for PostgresClaimAdapter {
    #[instrument(skip(self, _metadata), fields(claim_id = %id))]
    async fn get_claim(
        &self,
        id: ClaimId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Claim, PortError> {
        debug!("Fetching claim by ID");
        let row = self.repository.get_by_id(*id.as_uuid()).await?;
        row_to_claim(row)
    }

    #[instrument(skip(self, _metadata))]
    async fn find_claims(
        &self,
        query: ClaimQuery,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Vec<Claim>, PortError> {
        debug!("Finding claims with query: {:?}", query);

        let filter = ClaimFilter {
            claimant_id: query.claimant_id.map(|id| *id.as_uuid()),
            item_id: query.item_id.map(|id| *id.as_uuid()),
            picked_up: query.pickup_completed,
        };

        self.repository
            .find(&filter)
            .await?
            .into_iter()
            .map(row_to_claim)
            .collect()
    }

    #[instrument(skip(self, claim, _metadata), fields(claim_id = %claim.id, item_id = %claim.item_id))]
    async fn insert_claim(
        &self,
        claim: &Claim,
        _metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError> {
        debug!("Inserting claim");
        self.repository.insert(&claim_to_row(claim)?).await?;
        Ok(())
    }

    #[instrument(skip(self, claim, _metadata), fields(claim_id = %claim.id, status = %claim.status))]
    async fn save_claim(
        &self,
        claim: &Claim,
        _metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError> {
        debug!("Saving claim");
        self.repository.update(&claim_to_row(claim)?).await?;
        Ok(())
    }

    #[instrument(skip(self, _metadata), fields(claim_id = %id))]
    async fn delete_claim(
        &self,
        id: ClaimId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Claim, PortError> {
        debug!("Deleting claim");
        let row = self.repository.delete(*id.as_uuid()).await?;
        row_to_claim(row)
    }

    /// Claims normally leave with their item through `ON DELETE CASCADE`;
    /// this sweeps up anything that did not
    #[instrument(skip(self, _metadata), fields(item_id = %item_id))]
    async fn delete_claims_for_item(
        &self,
        item_id: ItemId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<u64, PortError> {
        let removed = self.repository.delete_for_item(*item_id.as_uuid()).await?;
        debug!(removed, "Deleted claims for item");
        Ok(removed)
    }
}

// ============================================================================
// Conversion functions
// ============================================================================

fn row_to_claim(row: ClaimRow) -> Result<Claim, PortError> {
    let answers: Vec<ClaimAnswer> =
        serde_json::from_value(row.answers.0).map_err(transformation("answers"))?;

    let pickup = match (
        row.pickup_date,
        row.pickup_verification_type,
        row.pickup_notes,
        row.pickup_recorded_by,
    ) {
        (Some(completed_at), Some(verification_type), Some(notes), Some(recorded_by)) => {
            Some(PickupRecord {
                completed_at,
                verification_type: verification_type
                    .parse()
                    .map_err(transformation("pickup_verification_type"))?,
                notes,
                recorded_by: UserId::from_uuid(recorded_by),
            })
        }
        (None, None, None, None) => None,
        _ => {
            return Err(PortError::transformation(format!(
                "claim {} has a partially recorded pickup",
                row.claim_id
            )))
        }
    };

    Ok(Claim {
        id: ClaimId::from_uuid(row.claim_id),
        item_id: ItemId::from_uuid(row.item_id),
        claimant_id: UserId::from_uuid(row.claimant_id),
        claimant_name: row.claimant_name,
        answers,
        additional_details: row.additional_details,
        contact_email: row.contact_email,
        contact_phone: row.contact_phone,
        status: row.status.parse().map_err(transformation("status"))?,
        review_notes: row.review_notes,
        reviewed_by: row.reviewed_by.map(UserId::from_uuid),
        reviewed_at: row.reviewed_at,
        pickup,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn claim_to_row(claim: &Claim) -> Result<ClaimRow, PortError> {
    let answers = serde_json::to_value(&claim.answers).map_err(transformation("answers"))?;
    let pickup = claim.pickup.as_ref();

    Ok(ClaimRow {
        claim_id: *claim.id.as_uuid(),
        item_id: *claim.item_id.as_uuid(),
        claimant_id: *claim.claimant_id.as_uuid(),
        claimant_name: claim.claimant_name.clone(),
        answers: Json(answers),
        additional_details: claim.additional_details.clone(),
        contact_email: claim.contact_email.clone(),
        contact_phone: claim.contact_phone.clone(),
        status: claim.status.as_str().to_string(),
        review_notes: claim.review_notes.clone(),
        reviewed_by: claim.reviewed_by.map(|id| *id.as_uuid()),
        reviewed_at: claim.reviewed_at,
        pickup_date: pickup.map(|p| p.completed_at),
        pickup_verification_type: pickup.map(|p| p.verification_type.as_str().to_string()),
        pickup_notes: pickup.map(|p| p.notes.clone()),
        pickup_recorded_by: pickup.map(|p| *p.recorded_by.as_uuid()),
        created_at: claim.created_at,
        updated_at: claim.updated_at,
    })
}
