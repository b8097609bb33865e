//! PostgreSQL adapter integration tests
//!
//! Each test starts its own container; run with `cargo test -- --ignored`
//! on a machine with Docker.

use core_kernel::{PortError, AdapterHealth};
use domain_claims::{
    ClaimLifecycle, ClaimPhase, ClaimPort, ClaimQuery, PickupCompletion, PickupVerificationType,
};
use domain_items::{FoundItemPort, ItemQuery, ItemStatus};
use infra_db::{PostgresClaimAdapter, PostgresFoundItemAdapter};
use test_utils::{create_isolated_test_database, ClaimBuilder, FoundItemBuilder};

#[tokio::test]
#[ignore = "requires Docker"]
async fn item_round_trips_through_postgres() {
    let db = create_isolated_test_database().await.unwrap();
    let items = PostgresFoundItemAdapter::new(db.pool().clone());

    let item = FoundItemBuilder::new().build();
    items.insert_item(&item, None).await.unwrap();

    let loaded = items.get_item(item.id, None).await.unwrap();
    assert_eq!(loaded.title, item.title);
    assert_eq!(loaded.verification_questions, item.verification_questions);
    assert_eq!(loaded.image_urls, item.image_urls);
    assert_eq!(loaded.status, ItemStatus::Found);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn public_query_skips_retired_items() {
    let db = create_isolated_test_database().await.unwrap();
    let items = PostgresFoundItemAdapter::new(db.pool().clone());

    let open = FoundItemBuilder::new().build();
    let donated = FoundItemBuilder::new().with_status(ItemStatus::Donated).build();
    items.insert_item(&open, None).await.unwrap();
    items.insert_item(&donated, None).await.unwrap();

    let listed = items.find_items(ItemQuery::publicly_listed(), None).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, open.id);

    let all = items.find_items(ItemQuery::all(), None).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn second_claim_by_same_visitor_conflicts() {
    let db = create_isolated_test_database().await.unwrap();
    let items = PostgresFoundItemAdapter::new(db.pool().clone());
    let claims = PostgresClaimAdapter::new(db.pool().clone());

    let item = FoundItemBuilder::new().build();
    items.insert_item(&item, None).await.unwrap();

    let first = ClaimBuilder::for_item(&item).by_visitor().build();
    let second = ClaimBuilder::for_item(&item).by_visitor().build();
    claims.insert_claim(&first, None).await.unwrap();

    let err = claims.insert_claim(&second, None).await.unwrap_err();
    assert!(matches!(err, PortError::Conflict { .. }));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn pickup_record_persists_and_filters() {
    let db = create_isolated_test_database().await.unwrap();
    let items = PostgresFoundItemAdapter::new(db.pool().clone());
    let claims = PostgresClaimAdapter::new(db.pool().clone());

    let item = FoundItemBuilder::new().build();
    items.insert_item(&item, None).await.unwrap();

    let mut claim = ClaimBuilder::for_item(&item).in_phase(ClaimPhase::Approved).build();
    claims.insert_claim(&claim, None).await.unwrap();

    let staff = test_utils::SessionFixtures::staff();
    ClaimLifecycle::complete_pickup(
        &mut claim,
        &staff,
        PickupCompletion::new(PickupVerificationType::IdChecked, "Showed license"),
    )
    .unwrap();
    claims.save_claim(&claim, None).await.unwrap();

    let loaded = claims.get_claim(claim.id, None).await.unwrap();
    assert_eq!(ClaimLifecycle::phase(&loaded), ClaimPhase::PickedUp);

    let picked = claims.find_claims(ClaimQuery::picked_up(), None).await.unwrap();
    assert_eq!(picked.len(), 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn deleting_item_cascades_to_claims() {
    let db = create_isolated_test_database().await.unwrap();
    let items = PostgresFoundItemAdapter::new(db.pool().clone());
    let claims = PostgresClaimAdapter::new(db.pool().clone());

    let item = FoundItemBuilder::new().build();
    items.insert_item(&item, None).await.unwrap();
    let claim = ClaimBuilder::for_item(&item).build();
    claims.insert_claim(&claim, None).await.unwrap();

    items.delete_item(item.id, None).await.unwrap();

    assert!(claims.get_claim(claim.id, None).await.unwrap_err().is_not_found());
    assert!(items.get_item(item.id, None).await.unwrap_err().is_not_found());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn adapters_report_healthy() {
    use core_kernel::HealthCheckable;

    let db = create_isolated_test_database().await.unwrap();
    let items = PostgresFoundItemAdapter::new(db.pool().clone());

    assert_eq!(items.health_check().await.status, AdapterHealth::Healthy);
}
