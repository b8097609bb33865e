//! Pre-built Test Fixtures
//!
//! Ready-to-use sessions, items and answers. Values are fixed so tests can
//! assert on them directly.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use uuid::Uuid;

use core_kernel::{Actor, Session, UserId};
use domain_claims::{ClaimAnswer, NewClaim};
use domain_items::{ItemCategory, NewFoundItem, VerificationQuestion};

/// Day every fixture item was found on
pub static FOUND_ON: Lazy<NaiveDate> =
    Lazy::new(|| NaiveDate::from_ymd_opt(2024, 10, 14).unwrap_or_default());

/// Fixed user identifiers
pub struct IdFixtures;

impl IdFixtures {
    pub fn staff_id() -> UserId {
        UserId::from_uuid(Uuid::from_u128(0x5747_0000_0000_0000_0000_0000_0000_0001))
    }

    pub fn visitor_id() -> UserId {
        UserId::from_uuid(Uuid::from_u128(0x7157_0000_0000_0000_0000_0000_0000_0001))
    }

    pub fn other_visitor_id() -> UserId {
        UserId::from_uuid(Uuid::from_u128(0x7157_0000_0000_0000_0000_0000_0000_0002))
    }
}

/// Sessions for each role
pub struct SessionFixtures;

impl SessionFixtures {
    pub fn guest() -> Session {
        Session::Guest
    }

    /// The front-desk staff member
    pub fn staff() -> Session {
        Session::Staff(Actor::new(IdFixtures::staff_id(), "frontdesk"))
    }

    /// The visitor who owns the fixture items
    pub fn visitor() -> Session {
        Session::Visitor(Actor::new(IdFixtures::visitor_id(), "alice"))
    }

    /// A second visitor with no relation to the first
    pub fn other_visitor() -> Session {
        Session::Visitor(Actor::new(IdFixtures::other_visitor_id(), "bob"))
    }
}

/// Staff input for commonly used items
pub struct ItemFixtures;

impl ItemFixtures {
    /// A black leather wallet with two questions
    pub fn wallet() -> NewFoundItem {
        NewFoundItem {
            title: "Black leather wallet".to_string(),
            public_description: "A wallet".to_string(),
            category: ItemCategory::Bag,
            color: Some("black".to_string()),
            location_found: "Main library, 2nd floor".to_string(),
            date_found: *FOUND_ON,
            image_urls: vec!["https://img.example.com/wallet.jpg".to_string()],
            private_notes: Some("Contains a transit card".to_string()),
            storage_location: Some("Safe, shelf B".to_string()),
            requires_id_for_pickup: true,
            verification_questions: vec![
                VerificationQuestion::new("What brand is it?", "Fossil"),
                VerificationQuestion::new("What is inside the coin pocket?", "A guitar pick"),
            ],
        }
    }

    /// A blue water bottle
    pub fn water_bottle() -> NewFoundItem {
        NewFoundItem {
            title: "Blue steel water bottle".to_string(),
            public_description: "A drink container".to_string(),
            category: ItemCategory::Drinkware,
            color: Some("blue".to_string()),
            location_found: "Gym lobby".to_string(),
            date_found: *FOUND_ON,
            image_urls: vec!["https://img.example.com/bottle.jpg".to_string()],
            private_notes: None,
            storage_location: Some("Bin 3".to_string()),
            requires_id_for_pickup: false,
            verification_questions: vec![
                VerificationQuestion::new("Any stickers?", "A mountain sticker"),
                VerificationQuestion::new("What size?", "750ml"),
            ],
        }
    }
}

/// Claimant input matching [`ItemFixtures`]
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// Correct answers for [`ItemFixtures::wallet`]
    pub fn wallet_answers() -> Vec<ClaimAnswer> {
        vec![
            ClaimAnswer::new("What brand is it?", "Fossil"),
            ClaimAnswer::new("What is inside the coin pocket?", "A guitar pick"),
        ]
    }

    /// A claim on the given item using the wallet answers
    pub fn wallet_claim(item_id: core_kernel::ItemId) -> NewClaim {
        NewClaim {
            item_id,
            answers: Self::wallet_answers(),
            additional_details: Some("Lost it during finals week".to_string()),
            contact_email: "alice@example.com".to_string(),
            contact_phone: None,
        }
    }
}
