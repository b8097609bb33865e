//! Found Item Ports
//!
//! `FoundItemPort` is everything the gateway needs from item storage.
//! Implementations:
//!
//! - **PostgreSQL**: `infra_db::adapters::PostgresFoundItemAdapter`
//! - **In-memory**: [`mock::MockFoundItemPort`] for tests (feature `mock`)
//!
//! ```rust,ignore
//! let items: Arc<dyn FoundItemPort> = Arc::new(PostgresFoundItemAdapter::new(pool));
//! let item = items.get_item(item_id, None).await?;
//! ```

use async_trait::async_trait;

use core_kernel::{ItemId, PortError, DomainPort, OperationMetadata, HealthCheckable};

use crate::item::{FoundItem, ItemStatus};

/// Query parameters for finding items
#[derive(Debug, Clone, Default)]
pub struct ItemQuery {
    /// Restrict to these statuses; `None` means any status
    pub statuses: Option<Vec<ItemStatus>>,
}

impl ItemQuery {
    /// Every item regardless of status
    pub fn all() -> Self {
        Self::default()
    }

    /// Items whose status allows public listing
    pub fn publicly_listed() -> Self {
        Self {
            statuses: Some(
                ItemStatus::ALL
                    .into_iter()
                    .filter(ItemStatus::is_public)
                    .collect(),
            ),
        }
    }

    pub fn accepts(&self, status: ItemStatus) -> bool {
        self.statuses
            .as_ref()
            .map_or(true, |statuses| statuses.contains(&status))
    }
}

/// Storage operations for found items
///
/// Listing results are ordered newest first by creation time.
#[async_trait]
pub trait FoundItemPort: DomainPort + HealthCheckable {
    /// Retrieves an item by ID, or `PortError::NotFound`
    async fn get_item(
        &self,
        id: ItemId,
        metadata: Option<OperationMetadata>,
    ) -> Result<FoundItem, PortError>;

    /// Finds items matching the query
    async fn find_items(
        &self,
        query: ItemQuery,
        metadata: Option<OperationMetadata>,
    ) -> Result<Vec<FoundItem>, PortError>;

    /// Stores a newly logged item
    async fn insert_item(
        &self,
        item: &FoundItem,
        metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError>;

    /// Overwrites an existing item
    async fn save_item(
        &self,
        item: &FoundItem,
        metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError>;

    /// Removes an item and returns what was removed
    async fn delete_item(
        &self,
        id: ItemId,
        metadata: Option<OperationMetadata>,
    ) -> Result<FoundItem, PortError>;
}

/// In-memory implementation of FoundItemPort for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use chrono::Utc;

    use core_kernel::{AdapterHealth, HealthCheckResult};

    #[derive(Debug, Default, Clone)]
    pub struct MockFoundItemPort {
        items: Arc<RwLock<HashMap<ItemId, FoundItem>>>,
    }

    impl MockFoundItemPort {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with items for testing
        pub async fn with_items(items: Vec<FoundItem>) -> Self {
            let port = Self::new();
            {
                let mut stored = port.items.write().await;
                for item in items {
                    stored.insert(item.id, item);
                }
            }
            port
        }

        pub async fn len(&self) -> usize {
            self.items.read().await.len()
        }
    }

    impl DomainPort for MockFoundItemPort {}

    #[async_trait]
    impl HealthCheckable for MockFoundItemPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "mock-found-item-port".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("Mock adapter always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl FoundItemPort for MockFoundItemPort {
        async fn get_item(
            &self,
            id: ItemId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<FoundItem, PortError> {
            self.items
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("FoundItem", id))
        }

        async fn find_items(
            &self,
            query: ItemQuery,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Vec<FoundItem>, PortError> {
            let items = self.items.read().await;
            let mut results: Vec<FoundItem> = items
                .values()
                .filter(|item| query.accepts(item.status))
                .cloned()
                .collect();
            results.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
            Ok(results)
        }

        async fn insert_item(
            &self,
            item: &FoundItem,
            _metadata: Option<OperationMetadata>,
        ) -> Result<(), PortError> {
            let mut items = self.items.write().await;
            if items.contains_key(&item.id) {
                return Err(PortError::conflict(format!("FoundItem {} already exists", item.id)));
            }
            items.insert(item.id, item.clone());
            Ok(())
        }

        async fn save_item(
            &self,
            item: &FoundItem,
            _metadata: Option<OperationMetadata>,
        ) -> Result<(), PortError> {
            let mut items = self.items.write().await;
            match items.get_mut(&item.id) {
                Some(stored) => {
                    *stored = item.clone();
                    Ok(())
                }
                None => Err(PortError::not_found("FoundItem", item.id)),
            }
        }

        async fn delete_item(
            &self,
            id: ItemId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<FoundItem, PortError> {
            self.items
                .write()
                .await
                .remove(&id)
                .ok_or_else(|| PortError::not_found("FoundItem", id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::mock::MockFoundItemPort;
    use chrono::NaiveDate;
    use core_kernel::UserId;

    use crate::item::{ItemCategory, NewFoundItem, VerificationQuestion};

    fn logged(title: &str) -> FoundItem {
        FoundItem::log(
            NewFoundItem {
                title: title.to_string(),
                public_description: "Something".to_string(),
                category: ItemCategory::Other,
                color: None,
                location_found: "Lobby".to_string(),
                date_found: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                image_urls: vec!["https://img/a.jpg".to_string()],
                private_notes: None,
                storage_location: None,
                requires_id_for_pickup: false,
                verification_questions: vec![
                    VerificationQuestion::new("Q1", "A1"),
                    VerificationQuestion::new("Q2", "A2"),
                ],
            },
            UserId::new(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_mock_port_insert_and_get() {
        let port = MockFoundItemPort::new();
        let item = logged("Umbrella");
        port.insert_item(&item, None).await.unwrap();

        let fetched = port.get_item(item.id, None).await.unwrap();
        assert_eq!(fetched, item);
    }

    #[tokio::test]
    async fn test_mock_port_duplicate_insert_conflicts() {
        let item = logged("Umbrella");
        let port = MockFoundItemPort::with_items(vec![item.clone()]).await;
        let result = port.insert_item(&item, None).await;
        assert!(matches!(result, Err(PortError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_mock_port_filters_by_status() {
        let mut donated = logged("Scarf");
        donated.status = ItemStatus::Donated;
        let found = logged("Keys");
        let port = MockFoundItemPort::with_items(vec![donated, found.clone()]).await;

        let public = port.find_items(ItemQuery::publicly_listed(), None).await.unwrap();
        assert_eq!(public, vec![found]);

        let all = port.find_items(ItemQuery::all(), None).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_mock_port_delete() {
        let item = logged("Laptop");
        let port = MockFoundItemPort::with_items(vec![item.clone()]).await;

        let removed = port.delete_item(item.id, None).await.unwrap();
        assert_eq!(removed.id, item.id);
        assert!(port.get_item(item.id, None).await.unwrap_err().is_not_found());
        assert!(port.delete_item(item.id, None).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_mock_port_save_missing_item() {
        let port = MockFoundItemPort::new();
        let result = port.save_item(&logged("Wallet"), None).await;
        assert!(result.unwrap_err().is_not_found());
    }
}
