//! Property-Based Test Generators
//!
//! proptest strategies producing values that satisfy domain validation.

use chrono::NaiveDate;
use proptest::prelude::*;

use core_kernel::{Actor, Session, SortDirection, UserId};
use domain_claims::{Claim, ClaimPhase, ClaimStatus, PickupVerificationType};
use domain_items::{FoundItem, ItemCategory, ItemStatus, VerificationQuestion};

use crate::builders::{ClaimBuilder, FoundItemBuilder};

pub fn category_strategy() -> impl Strategy<Value = ItemCategory> {
    proptest::sample::select(ItemCategory::ALL.to_vec())
}

pub fn item_status_strategy() -> impl Strategy<Value = ItemStatus> {
    proptest::sample::select(ItemStatus::ALL.to_vec())
}

pub fn claim_status_strategy() -> impl Strategy<Value = ClaimStatus> {
    proptest::sample::select(ClaimStatus::ALL.to_vec())
}

/// Only the statuses a review may set
pub fn decision_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop_oneof![Just(ClaimStatus::Approved), Just(ClaimStatus::Denied)]
}

pub fn claim_phase_strategy() -> impl Strategy<Value = ClaimPhase> {
    prop_oneof![
        Just(ClaimPhase::Pending),
        Just(ClaimPhase::Approved),
        Just(ClaimPhase::Denied),
        Just(ClaimPhase::PickedUp),
    ]
}

pub fn verification_type_strategy() -> impl Strategy<Value = PickupVerificationType> {
    proptest::sample::select(PickupVerificationType::ALL.to_vec())
}

pub fn direction_strategy() -> impl Strategy<Value = SortDirection> {
    prop_oneof![Just(SortDirection::Ascending), Just(SortDirection::Descending)]
}

/// Empty or whitespace-only text
pub fn blank_text_strategy() -> impl Strategy<Value = String> {
    "[ \t\n]{0,6}"
}

/// Text with at least one visible character
pub fn non_blank_text_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ,.]{0,30}"
}

/// Days in 2024 so generated items are never found in the future
pub fn date_found_strategy() -> impl Strategy<Value = NaiveDate> {
    (1u32..=12, 1u32..=28).prop_map(|(month, day)| {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap_or_default()
    })
}

fn actor_strategy() -> impl Strategy<Value = Actor> {
    "[a-z]{3,12}".prop_map(|name| Actor::new(UserId::new_v7(), name))
}

/// Any session, including guests
pub fn session_strategy() -> impl Strategy<Value = Session> {
    prop_oneof![
        Just(Session::Guest),
        actor_strategy().prop_map(Session::Visitor),
        actor_strategy().prop_map(Session::Staff),
    ]
}

/// Guests and visitors
pub fn non_staff_session_strategy() -> impl Strategy<Value = Session> {
    prop_oneof![
        Just(Session::Guest),
        actor_strategy().prop_map(Session::Visitor),
    ]
}

prop_compose! {
    /// Valid found items with arbitrary text, category, date and status
    pub fn found_item_strategy()(
        title in non_blank_text_strategy(),
        description in non_blank_text_strategy(),
        category in category_strategy(),
        location in non_blank_text_strategy(),
        date in date_found_strategy(),
        status in item_status_strategy(),
        answers in proptest::collection::vec(non_blank_text_strategy(), 2..4),
    ) -> FoundItem {
        let questions = answers
            .into_iter()
            .enumerate()
            .map(|(i, answer)| VerificationQuestion::new(format!("Question {}?", i + 1), answer))
            .collect();

        FoundItemBuilder::new()
            .with_title(title)
            .with_public_description(description)
            .with_category(category)
            .with_location(location)
            .with_date_found(date)
            .with_questions(questions)
            .with_status(status)
            .build()
    }
}

prop_compose! {
    /// An item together with a claim on it in an arbitrary phase
    pub fn item_with_claim_strategy()(
        item in found_item_strategy(),
        claimant in actor_strategy(),
        phase in claim_phase_strategy(),
    ) -> (FoundItem, Claim) {
        let claim = ClaimBuilder::for_item(&item).by(claimant).in_phase(phase).build();
        (item, claim)
    }
}
