//! End-to-end gateway tests over the in-memory ports

use std::sync::Arc;

use chrono::NaiveDate;

use async_trait::async_trait;

use core_kernel::{
    Actor, CoreError, DomainPort, HealthCheckResult, HealthCheckable, ItemId, OperationMetadata,
    PortError, Session, SortDirection, UserId,
};
use domain_access::{ClaimSortField, ItemAffordance, ItemSortField};
use domain_claims::ports::mock::MockClaimPort;
use domain_claims::{
    ClaimAction, ClaimAmendment, ClaimAnswer, ClaimStatus, NewClaim, PickupCompletion,
    PickupVerificationType, Review,
};
use domain_items::ports::mock::MockFoundItemPort;
use domain_items::{
    FoundItem, FoundItemPort, FoundItemUpdate, ItemCategory, ItemQuery, ItemStatus, NewFoundItem,
    VerificationQuestion,
};
use gateway::{ListOptions, LostFoundGateway};

struct Harness {
    gateway: LostFoundGateway,
    items: MockFoundItemPort,
    claims: MockClaimPort,
    staff: Session,
}

impl Harness {
    fn new() -> Self {
        let items = MockFoundItemPort::new();
        let claims = MockClaimPort::new();
        let gateway = LostFoundGateway::new(Arc::new(items.clone()), Arc::new(claims.clone()));
        Self {
            gateway,
            items,
            claims,
            staff: Session::Staff(Actor::new(UserId::new_v7(), "frontdesk")),
        }
    }

    async fn log_item(&self, title: &str) -> ItemId {
        self.gateway
            .create_item(&self.staff, new_item(title))
            .await
            .unwrap()
            .item
            .id
    }
}

/// Item store whose deletes fail as if the database dropped the connection
struct DeleteFailsItemPort {
    inner: MockFoundItemPort,
}

impl DomainPort for DeleteFailsItemPort {}

#[async_trait]
impl HealthCheckable for DeleteFailsItemPort {
    async fn health_check(&self) -> HealthCheckResult {
        self.inner.health_check().await
    }
}

#[async_trait]
impl FoundItemPort for DeleteFailsItemPort {
    async fn get_item(&self, id: ItemId, metadata: Option<OperationMetadata>) -> Result<FoundItem, PortError> {
        self.inner.get_item(id, metadata).await
    }

    async fn find_items(
        &self,
        query: ItemQuery,
        metadata: Option<OperationMetadata>,
    ) -> Result<Vec<FoundItem>, PortError> {
        self.inner.find_items(query, metadata).await
    }

    async fn insert_item(&self, item: &FoundItem, metadata: Option<OperationMetadata>) -> Result<(), PortError> {
        self.inner.insert_item(item, metadata).await
    }

    async fn save_item(&self, item: &FoundItem, metadata: Option<OperationMetadata>) -> Result<(), PortError> {
        self.inner.save_item(item, metadata).await
    }

    async fn delete_item(&self, _id: ItemId, _metadata: Option<OperationMetadata>) -> Result<FoundItem, PortError> {
        Err(PortError::connection("connection reset"))
    }
}

fn visitor(name: &str) -> Session {
    Session::Visitor(Actor::new(UserId::new_v7(), name))
}

fn new_item(title: &str) -> NewFoundItem {
    NewFoundItem {
        title: title.to_string(),
        public_description: format!("{title} (vague)"),
        category: ItemCategory::Other,
        color: Some("grey".to_string()),
        location_found: "Library".to_string(),
        date_found: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        image_urls: vec!["https://img/item.jpg".to_string()],
        private_notes: Some("Scratched on back".to_string()),
        storage_location: Some("Bin 7".to_string()),
        requires_id_for_pickup: true,
        verification_questions: vec![
            VerificationQuestion::new("Q1", "A1"),
            VerificationQuestion::new("Q2", "A2"),
        ],
    }
}

fn new_claim(item_id: ItemId) -> NewClaim {
    NewClaim {
        item_id,
        answers: vec![ClaimAnswer::new("Q1", "A1"), ClaimAnswer::new("Q2", "A2")],
        additional_details: None,
        contact_email: "a@b.com".to_string(),
        contact_phone: None,
    }
}

#[tokio::test]
async fn test_claim_lifecycle_removes_item_from_public_listing() {
    let h = Harness::new();
    let item_id = h.log_item("Silver laptop").await;
    let alice = visitor("alice");

    let claim = h.gateway.create_claim(&alice, new_claim(item_id)).await.unwrap();
    assert_eq!(claim.claim.status, ClaimStatus::Pending);
    assert_eq!(claim.label.as_deref(), Some("Edit Claim"));

    let approved = h
        .gateway
        .review_claim(&h.staff, claim.claim.id, Review::new(ClaimStatus::Approved, "ID matches"))
        .await
        .unwrap();
    assert_eq!(approved.claim.status, ClaimStatus::Approved);
    assert_eq!(approved.claim.review_notes.as_deref(), Some("ID matches"));
    assert_eq!(approved.actions, vec![ClaimAction::View, ClaimAction::Review, ClaimAction::CompletePickup, ClaimAction::Delete]);

    let listed = h.gateway.list_public_items(&Session::Guest, &ListOptions::default()).await.unwrap();
    assert_eq!(listed.len(), 1);

    let picked = h
        .gateway
        .complete_pickup(
            &h.staff,
            claim.claim.id,
            PickupCompletion::new(PickupVerificationType::IdChecked, "Showed license"),
        )
        .await
        .unwrap();
    assert!(picked.pickup_completed);

    let listed = h.gateway.list_public_items(&Session::Guest, &ListOptions::default()).await.unwrap();
    assert!(listed.is_empty());

    let public = h.gateway.get_public_item(&Session::Guest, item_id).await;
    assert!(matches!(public, Err(CoreError::NotFound(_))));

    let staff_view = h.gateway.get_staff_item(&h.staff, item_id).await.unwrap();
    assert!(staff_view.pickup_completed);
}

#[tokio::test]
async fn test_visitor_cannot_view_another_visitors_claim() {
    let h = Harness::new();
    let item_id = h.log_item("Wallet").await;
    let claim = h.gateway.create_claim(&visitor("alice"), new_claim(item_id)).await.unwrap();

    let result = h.gateway.get_claim(&visitor("mallory"), claim.claim.id).await;
    assert!(matches!(result, Err(CoreError::Authorization(_))));

    let result = h.gateway.get_claim(&Session::Guest, claim.claim.id).await;
    assert_eq!(result.unwrap_err(), CoreError::Unauthenticated);
}

#[tokio::test]
async fn test_unknown_claim_is_not_found() {
    let h = Harness::new();
    let result = h
        .gateway
        .review_claim(&h.staff, core_kernel::ClaimId::new_v7(), Review::new(ClaimStatus::Approved, "ok"))
        .await;
    assert!(result.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_second_claim_on_same_item_conflicts() {
    let h = Harness::new();
    let item_id = h.log_item("Umbrella").await;
    let alice = visitor("alice");

    h.gateway.create_claim(&alice, new_claim(item_id)).await.unwrap();
    let second = h.gateway.create_claim(&alice, new_claim(item_id)).await;
    assert!(matches!(second, Err(CoreError::Conflict(_))));
    assert_eq!(h.claims.len().await, 1);

    let detail = h.gateway.get_public_item(&alice, item_id).await.unwrap();
    assert_eq!(detail.affordances, vec![ItemAffordance::ViewMyClaims]);
    assert_eq!(detail.my_claim_status, Some(ClaimStatus::Pending));
}

#[tokio::test]
async fn test_review_with_blank_notes_persists_nothing() {
    let h = Harness::new();
    let item_id = h.log_item("Keys").await;
    let claim = h.gateway.create_claim(&visitor("alice"), new_claim(item_id)).await.unwrap();

    let result = h
        .gateway
        .review_claim(&h.staff, claim.claim.id, Review::new(ClaimStatus::Denied, "   "))
        .await;
    assert!(result.unwrap_err().is_validation());

    let stored = h.gateway.get_claim(&h.staff, claim.claim.id).await.unwrap();
    assert_eq!(stored.claim.status, ClaimStatus::Pending);
    assert_eq!(stored.claim.review_notes, None);
}

#[tokio::test]
async fn test_pickup_rejected_before_approval() {
    let h = Harness::new();
    let item_id = h.log_item("Scarf").await;
    let claim = h.gateway.create_claim(&visitor("alice"), new_claim(item_id)).await.unwrap();

    let result = h
        .gateway
        .complete_pickup(
            &h.staff,
            claim.claim.id,
            PickupCompletion::new(PickupVerificationType::Other, "Walked in"),
        )
        .await;
    assert!(matches!(result, Err(CoreError::InvalidStateTransition(_))));
}

#[tokio::test]
async fn test_visitor_cannot_use_staff_operations() {
    let h = Harness::new();
    let item_id = h.log_item("Phone").await;
    let alice = visitor("alice");
    let claim = h.gateway.create_claim(&alice, new_claim(item_id)).await.unwrap();

    assert!(matches!(
        h.gateway.create_item(&alice, new_item("Hat")).await,
        Err(CoreError::Authorization(_))
    ));
    assert!(matches!(
        h.gateway
            .review_claim(&alice, claim.claim.id, Review::new(ClaimStatus::Approved, "mine"))
            .await,
        Err(CoreError::Authorization(_))
    ));
    assert!(matches!(
        h.gateway.list_staff_items(&alice, &ListOptions::default()).await,
        Err(CoreError::Authorization(_))
    ));
    assert_eq!(
        h.gateway.delete_item(&Session::Guest, item_id).await.unwrap_err(),
        CoreError::Unauthenticated
    );
}

#[tokio::test]
async fn test_amend_only_while_pending() {
    let h = Harness::new();
    let item_id = h.log_item("Bottle").await;
    let alice = visitor("alice");
    let claim = h.gateway.create_claim(&alice, new_claim(item_id)).await.unwrap();

    let amended = h
        .gateway
        .update_claim(
            &alice,
            claim.claim.id,
            ClaimAmendment {
                answers: Some(vec![ClaimAnswer::new("Q1", "A1"), ClaimAnswer::new("Q2", "Blue lid")]),
                contact_phone: Some("555-0101".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(amended.claim.answers[1].answer, "Blue lid");
    assert_eq!(amended.claim.status, ClaimStatus::Pending);

    h.gateway
        .review_claim(&h.staff, claim.claim.id, Review::new(ClaimStatus::Denied, "Wrong answers"))
        .await
        .unwrap();

    let late = h
        .gateway
        .update_claim(&alice, claim.claim.id, ClaimAmendment::default())
        .await;
    assert!(matches!(late, Err(CoreError::InvalidStateTransition(_))));

    let denied = h.gateway.get_claim(&alice, claim.claim.id).await.unwrap();
    assert_eq!(denied.label.as_deref(), Some("View Details"));
}

#[tokio::test]
async fn test_list_claims_scoped_and_sorted() {
    let h = Harness::new();
    let umbrella = h.log_item("Umbrella").await;
    let gloves = h.log_item("Gloves").await;
    let alice = visitor("alice");
    let bob = visitor("Bob");

    h.gateway.create_claim(&alice, new_claim(umbrella)).await.unwrap();
    h.gateway.create_claim(&alice, new_claim(gloves)).await.unwrap();
    h.gateway.create_claim(&bob, new_claim(umbrella)).await.unwrap();

    let mine = h.gateway.list_claims(&alice, &ListOptions::default()).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|c| c.claim.claimant_name == "alice"));

    let all = h
        .gateway
        .list_claims(&h.staff, &ListOptions::sorted_by(ClaimSortField::Claimant, SortDirection::Ascending))
        .await
        .unwrap();
    let names: Vec<&str> = all.iter().map(|c| c.claim.claimant_name.as_str()).collect();
    assert_eq!(names, vec!["alice", "alice", "Bob"]);

    let gloves_only = h
        .gateway
        .list_claims(&h.staff, &ListOptions::default().with_query("gloves"))
        .await
        .unwrap();
    assert_eq!(gloves_only.len(), 1);

    let staff_rows = h
        .gateway
        .list_staff_items(&h.staff, &ListOptions::sorted_by(ItemSortField::Claims, SortDirection::Descending))
        .await
        .unwrap();
    assert_eq!(staff_rows[0].item.id, umbrella);
    assert_eq!(staff_rows[0].claim_count, 2);
}

#[tokio::test]
async fn test_retired_items_leave_listings_but_stay_reachable_by_staff() {
    let h = Harness::new();
    let item_id = h.log_item("Jacket").await;

    h.gateway
        .update_item(
            &h.staff,
            item_id,
            FoundItemUpdate {
                status: Some(ItemStatus::Donated),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(h.gateway.list_public_items(&Session::Guest, &ListOptions::default()).await.unwrap().is_empty());
    assert!(h.gateway.list_staff_items(&h.staff, &ListOptions::default()).await.unwrap().is_empty());
    assert_eq!(
        h.gateway.get_staff_item(&h.staff, item_id).await.unwrap().item.status,
        ItemStatus::Donated
    );

    let claim = h.gateway.create_claim(&visitor("alice"), new_claim(item_id)).await;
    assert!(claim.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_staff_status_search_covers_listed_items_only() {
    let h = Harness::new();
    let claimed = h.log_item("Jacket").await;
    h.log_item("Scarf").await;
    let donated = h.log_item("Gloves").await;

    for (id, status) in [(claimed, ItemStatus::Claimed), (donated, ItemStatus::Donated)] {
        h.gateway
            .update_item(
                &h.staff,
                id,
                FoundItemUpdate {
                    status: Some(status),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    let by_status = |query: &str| ListOptions::<ItemSortField>::default().with_query(query);

    let rows = h.gateway.list_staff_items(&h.staff, &by_status("claimed")).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].item.id, claimed);

    assert_eq!(h.gateway.list_staff_items(&h.staff, &by_status("found")).await.unwrap().len(), 1);
    assert!(h.gateway.list_staff_items(&h.staff, &by_status("donated")).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_item_removes_its_claims() {
    let h = Harness::new();
    let item_id = h.log_item("Ring").await;
    let claim = h.gateway.create_claim(&visitor("alice"), new_claim(item_id)).await.unwrap();

    let removed = h.gateway.delete_item(&h.staff, item_id).await.unwrap();
    assert_eq!(removed.id, item_id);
    assert_eq!(h.items.len().await, 0);
    assert_eq!(h.claims.len().await, 0);
    assert!(h.gateway.get_claim(&h.staff, claim.claim.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_staff_delete_claim_lets_visitor_file_again() {
    let h = Harness::new();
    let item_id = h.log_item("Scarf").await;
    let alice = visitor("alice");
    let claim = h.gateway.create_claim(&alice, new_claim(item_id)).await.unwrap();

    let denied = h.gateway.delete_claim(&alice, claim.claim.id).await;
    assert!(denied.unwrap_err().is_authorization());

    let removed = h.gateway.delete_claim(&h.staff, claim.claim.id).await.unwrap();
    assert_eq!(removed.id, claim.claim.id);
    assert_eq!(h.claims.len().await, 0);

    h.gateway.create_claim(&alice, new_claim(item_id)).await.unwrap();
}

#[tokio::test]
async fn test_failed_item_delete_keeps_its_claims() {
    let items = MockFoundItemPort::new();
    let claims = MockClaimPort::new();
    let gateway = LostFoundGateway::new(
        Arc::new(DeleteFailsItemPort { inner: items.clone() }),
        Arc::new(claims.clone()),
    );
    let staff = Session::Staff(Actor::new(UserId::new_v7(), "frontdesk"));
    let item_id = gateway.create_item(&staff, new_item("Ring")).await.unwrap().item.id;
    gateway.create_claim(&visitor("alice"), new_claim(item_id)).await.unwrap();

    let result = gateway.delete_item(&staff, item_id).await;

    assert!(matches!(result, Err(CoreError::Network(_))));
    assert_eq!(items.len().await, 1);
    assert_eq!(claims.len().await, 1);
}

#[tokio::test]
async fn test_delete_unknown_item_is_not_found() {
    let h = Harness::new();
    let result = h.gateway.delete_item(&h.staff, ItemId::new()).await;
    assert!(result.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_public_detail_hides_staff_fields_and_offers_sign_in() {
    let h = Harness::new();
    let item_id = h.log_item("Camera").await;

    let detail = h.gateway.get_public_item(&Session::Guest, item_id).await.unwrap();
    assert_eq!(
        detail.affordances,
        vec![ItemAffordance::SignInToClaim, ItemAffordance::CreateAccount]
    );

    let json = serde_json::to_string(&detail).unwrap();
    assert!(!json.contains("Bin 7"));
    assert!(!json.contains("Scratched"));
    assert!(!json.contains("A1"));
}

#[tokio::test]
async fn test_health_reports_both_ports() {
    let h = Harness::new();
    let health = h.gateway.health().await;
    assert_eq!(health.len(), 2);
    assert!(health.iter().all(|r| r.is_healthy()));
}
