//! PostgreSQL Found Item Adapter
//!
//! Implements `FoundItemPort` on top of [`FoundItemRepository`].

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    ItemId, UserId, PortError, DomainPort, OperationMetadata,
    HealthCheckable, HealthCheckResult,
};
use domain_items::{FoundItem, FoundItemPort, ItemQuery, VerificationQuestion};

use super::{check_pool, transformation};
use crate::repositories::items::{FoundItemRepository, FoundItemRow, ItemFilter};

/// PostgreSQL-backed implementation of the FoundItemPort trait
///
/// Database errors are translated to `PortError` through
/// `From<DatabaseError>`:
/// - `NotFound` -> `PortError::NotFound`
/// - `DuplicateEntry` -> `PortError::Conflict`
/// - connection problems -> transient port errors
#[derive(Debug, Clone)]
pub struct PostgresFoundItemAdapter {
    repository: FoundItemRepository,
    pool: PgPool,
}

impl PostgresFoundItemAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: FoundItemRepository::new(pool.clone()),
            pool,
        }
    }

    /// Returns a reference to the underlying repository
    pub fn repository(&self) -> &FoundItemRepository {
        &self.repository
    }
}

impl DomainPort for PostgresFoundItemAdapter {}

#[async_trait]
impl HealthCheckable for PostgresFoundItemAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        check_pool(&self.pool, "postgres-found-item-adapter").await
    }
}

#[async_trait]
impl FoundItemPort for PostgresFoundItemAdapter {
    #[instrument(skip(self, _metadata), fields(item_id = %id))]
    async fn get_item(
        &self,
        id: ItemId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<FoundItem, PortError> {
        debug!("Fetching item by ID");
        let row = self.repository.get_by_id(*id.as_uuid()).await?;
        row_to_item(row)
    }

    #[instrument(skip(self, _metadata))]
    async fn find_items(
        &self,
        query: ItemQuery,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Vec<FoundItem>, PortError> {
        debug!("Finding items with query: {:?}", query);

        let filter = ItemFilter {
            statuses: query
                .statuses
                .map(|statuses| statuses.iter().map(|s| s.as_str().to_string()).collect()),
        };

        self.repository
            .find(&filter)
            .await?
            .into_iter()
            .map(row_to_item)
            .collect()
    }

    #[instrument(skip(self, item, _metadata), fields(item_id = %item.id))]
    async fn insert_item(
        &self,
        item: &FoundItem,
        _metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError> {
        debug!("Inserting item");
        self.repository.insert(&item_to_row(item)?).await?;
        Ok(())
    }

    #[instrument(skip(self, item, _metadata), fields(item_id = %item.id))]
    async fn save_item(
        &self,
        item: &FoundItem,
        _metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError> {
        debug!("Saving item");
        self.repository.update(&item_to_row(item)?).await?;
        Ok(())
    }

    #[instrument(skip(self, _metadata), fields(item_id = %id))]
    async fn delete_item(
        &self,
        id: ItemId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<FoundItem, PortError> {
        debug!("Deleting item");
        let row = self.repository.delete(*id.as_uuid()).await?;
        row_to_item(row)
    }
}

// ============================================================================
// Conversion functions
// ============================================================================

fn row_to_item(row: FoundItemRow) -> Result<FoundItem, PortError> {
    let verification_questions: Vec<VerificationQuestion> =
        serde_json::from_value(row.verification_questions.0)
            .map_err(transformation("verification_questions"))?;

    Ok(FoundItem {
        id: ItemId::from_uuid(row.item_id),
        title: row.title,
        public_description: row.public_description,
        category: row.category.parse().map_err(transformation("category"))?,
        color: row.color,
        location_found: row.location_found,
        date_found: row.date_found,
        image_urls: row.image_urls,
        status: row.status.parse().map_err(transformation("status"))?,
        private_notes: row.private_notes,
        storage_location: row.storage_location,
        requires_id_for_pickup: row.requires_id_for_pickup,
        verification_questions,
        created_by: UserId::from_uuid(row.created_by),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn item_to_row(item: &FoundItem) -> Result<FoundItemRow, PortError> {
    let verification_questions = serde_json::to_value(&item.verification_questions)
        .map_err(transformation("verification_questions"))?;

    Ok(FoundItemRow {
        item_id: *item.id.as_uuid(),
        title: item.title.clone(),
        public_description: item.public_description.clone(),
        category: item.category.as_str().to_string(),
        color: item.color.clone(),
        location_found: item.location_found.clone(),
        date_found: item.date_found,
        image_urls: item.image_urls.clone(),
        status: item.status.as_str().to_string(),
        private_notes: item.private_notes.clone(),
        storage_location: item.storage_location.clone(),
        requires_id_for_pickup: item.requires_id_for_pickup,
        verification_questions: Json(verification_questions),
        created_by: *item.created_by.as_uuid(),
        created_at: item.created_at,
        updated_at: item.updated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use domain_items::{ItemCategory, ItemStatus, NewFoundItem};

    fn sample_item() -> FoundItem {
        FoundItem::log(
            NewFoundItem {
                title: "Blue umbrella".to_string(),
                public_description: "An umbrella".to_string(),
                category: ItemCategory::Other,
                color: Some("blue".to_string()),
                location_found: "Library".to_string(),
                date_found: NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
                image_urls: vec!["https://img/umbrella.jpg".to_string()],
                private_notes: Some("Bent spoke".to_string()),
                storage_location: Some("Bin 4".to_string()),
                requires_id_for_pickup: true,
                verification_questions: vec![
                    VerificationQuestion::new("Handle?", "Wooden"),
                    VerificationQuestion::new("Brand?", "Totes"),
                ],
            },
            UserId::new_v7(),
        )
        .unwrap()
    }

    #[test]
    fn test_row_conversion_preserves_item() {
        let item = sample_item();
        let row = item_to_row(&item).unwrap();

        assert_eq!(row.category, "OTHER");
        assert_eq!(row.status, "FOUND");
        assert_eq!(row_to_item(row).unwrap(), item);
    }

    #[test]
    fn test_unknown_stored_status_is_transformation_error() {
        let mut row = item_to_row(&sample_item()).unwrap();
        row.status = "LOST_AGAIN".to_string();

        let err = row_to_item(row).unwrap_err();
        assert!(matches!(err, PortError::Transformation { .. }));
        assert!(err.to_string().contains("status"));
    }

    #[test]
    fn test_status_names_match_schema() {
        let names: Vec<&str> = ItemStatus::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["FOUND", "CLAIMED", "DONATED", "DISPOSED"]);
    }
}
