//! Visibility and listing properties for domain_access

use chrono::NaiveDate;
use proptest::prelude::*;

use core_kernel::{apply_listing, filter_entries, Actor, SortDirection, SortState, Session, UserId};
use domain_access::{ClaimSortField, ClaimView, ItemSortField, ItemView, PublicItemDetail, PublicItemView};
use domain_claims::{Claim, ClaimAnswer, NewClaim};
use domain_items::{FoundItem, ItemCategory, NewFoundItem, VerificationQuestion};

fn category_strategy() -> impl Strategy<Value = ItemCategory> {
    proptest::sample::select(ItemCategory::ALL.to_vec())
}

prop_compose! {
    /// Items whose staff-only values carry a marker that must never leak
    fn secret_item()(
        title in "[A-Za-z ]{1,20}",
        description in "[A-Za-z ]{1,20}",
        category in category_strategy(),
        day in 1u32..28,
        secret in "[a-z]{6}",
        requires_id in any::<bool>(),
    ) -> FoundItem {
        let marker = format!("SECRET{secret}");
        FoundItem::log(
            NewFoundItem {
                title: format!("t{title}"),
                public_description: format!("d{description}"),
                category,
                color: None,
                location_found: "Front desk".to_string(),
                date_found: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
                image_urls: vec!["https://img/item.jpg".to_string()],
                private_notes: Some(format!("{marker}-notes")),
                storage_location: Some(format!("{marker}-shelf")),
                requires_id_for_pickup: requires_id,
                verification_questions: vec![
                    VerificationQuestion::new("First?", format!("{marker}-a1")),
                    VerificationQuestion::new("Second?", format!("{marker}-a2")),
                ],
            },
            UserId::new_v7(),
        )
        .unwrap()
    }
}

fn non_staff_strategy() -> impl Strategy<Value = Session> {
    prop_oneof![
        Just(Session::Guest),
        "[a-z]{3,10}".prop_map(|name| Session::Visitor(Actor::new(UserId::new_v7(), name))),
    ]
}

fn assert_no_staff_fields(json: &serde_json::Value) -> Result<(), TestCaseError> {
    let text = json.to_string();
    prop_assert!(!text.contains("SECRET"));
    prop_assert!(!text.contains("privateNotes"));
    prop_assert!(!text.contains("storageLocation"));
    prop_assert!(!text.contains("requiresIdForPickup"));
    Ok(())
}

proptest! {
    #[test]
    fn public_views_never_reveal_staff_fields(item in secret_item(), session in non_staff_strategy()) {
        let detail = PublicItemDetail::new(&item, &session, None);
        assert_no_staff_fields(&serde_json::to_value(&detail).unwrap())?;

        let embedded = ItemView::for_session(&item, &session);
        assert_no_staff_fields(&serde_json::to_value(&embedded).unwrap())?;
    }

    #[test]
    fn claim_views_for_claimant_never_reveal_item_answers(item in secret_item(), name in "[a-z]{3,10}") {
        let claimant = Actor::new(UserId::new_v7(), name);
        let claim = Claim::file(
            NewClaim {
                item_id: item.id,
                answers: vec![ClaimAnswer::new("First?", "my guess"), ClaimAnswer::new("Second?", "no idea")],
                additional_details: None,
                contact_email: "me@example.com".to_string(),
                contact_phone: None,
            },
            &claimant,
            &item.question_texts(),
        )
        .unwrap();

        let view = ClaimView::new(claim, Some(&item), &Session::Visitor(claimant));
        assert_no_staff_fields(&serde_json::to_value(&view).unwrap())?;
    }

    #[test]
    fn blank_query_is_identity(items in proptest::collection::vec(secret_item(), 0..12), blank in "[ \t]{0,4}") {
        let views: Vec<PublicItemView> = items.iter().map(PublicItemView::from).collect();
        prop_assert_eq!(filter_entries(&views, &blank), views);
    }

    #[test]
    fn ascending_and_descending_are_reverses(days in proptest::collection::btree_set(1u32..28, 0..20)) {
        let views: Vec<PublicItemView> = days
            .iter()
            .map(|day| PublicItemView {
                id: core_kernel::ItemId::new_v7(),
                title: "Thing".to_string(),
                public_description: "Thing".to_string(),
                category: ItemCategory::Other,
                color: None,
                location_found: "Lobby".to_string(),
                date_found: NaiveDate::from_ymd_opt(2024, 5, *day).unwrap(),
                image_urls: vec!["https://img/t.jpg".to_string()],
                status: Default::default(),
                verification_questions: vec![],
            })
            .collect();

        let asc = apply_listing(&views, "", SortState::with_direction(ItemSortField::DateFound, SortDirection::Ascending));
        let mut desc = apply_listing(&views, "", SortState::with_direction(ItemSortField::DateFound, SortDirection::Descending));
        desc.reverse();
        prop_assert_eq!(asc, desc);
    }
}

#[test]
fn claim_list_filters_by_claimant_and_item() {
    let item = FoundItem::log(
        NewFoundItem {
            title: "Red scarf".to_string(),
            public_description: "Scarf".to_string(),
            category: ItemCategory::Clothing,
            color: Some("red".to_string()),
            location_found: "Bus stop".to_string(),
            date_found: NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
            image_urls: vec!["https://img/scarf.jpg".to_string()],
            private_notes: None,
            storage_location: None,
            requires_id_for_pickup: false,
            verification_questions: vec![
                VerificationQuestion::new("Brand?", "Acme"),
                VerificationQuestion::new("Length?", "Long"),
            ],
        },
        UserId::new_v7(),
    )
    .unwrap();
    let staff = Session::Staff(Actor::new(UserId::new_v7(), "desk"));

    let views: Vec<ClaimView> = ["alice", "Bob"]
        .into_iter()
        .map(|name| {
            let claim = Claim::file(
                NewClaim {
                    item_id: item.id,
                    answers: vec![ClaimAnswer::new("Brand?", "Acme"), ClaimAnswer::new("Length?", "Long")],
                    additional_details: None,
                    contact_email: format!("{name}@example.com"),
                    contact_phone: None,
                },
                &Actor::new(UserId::new_v7(), name),
                &item.question_texts(),
            )
            .unwrap();
            ClaimView::new(claim, Some(&item), &staff)
        })
        .collect();

    let bob = apply_listing(&views, "bob", SortState::new(ClaimSortField::Submitted));
    assert_eq!(bob.len(), 1);
    assert_eq!(bob[0].claim.claimant_name, "Bob");

    let by_item = apply_listing(&views, "SCARF", SortState::new(ClaimSortField::Claimant));
    let names: Vec<&str> = by_item.iter().map(|v| v.claim.claimant_name.as_str()).collect();
    assert_eq!(names, vec!["Bob", "alice"]);
    assert_eq!(by_item[0].label.as_deref(), Some("Review"));
}
