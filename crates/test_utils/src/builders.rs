//! Test Data Builders
//!
//! Builders for items and claims that let a test name only the fields it
//! cares about. Claims can be produced directly in any phase, which the
//! lifecycle itself would only reach through several staff actions.

use chrono::{NaiveDate, Utc};
use fake::faker::internet::en::{SafeEmail, Username};
use fake::Fake;

use core_kernel::{Actor, UserId};
use domain_claims::{Claim, ClaimAnswer, ClaimPhase, ClaimStatus, NewClaim, PickupRecord, PickupVerificationType};
use domain_items::{FoundItem, ItemCategory, ItemStatus, NewFoundItem, VerificationQuestion};

use crate::fixtures::{IdFixtures, ItemFixtures};

/// Builder for found items
pub struct FoundItemBuilder {
    new_item: NewFoundItem,
    status: ItemStatus,
    created_by: UserId,
}

impl Default for FoundItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FoundItemBuilder {
    /// Starts from the wallet fixture
    pub fn new() -> Self {
        Self {
            new_item: ItemFixtures::wallet(),
            status: ItemStatus::Found,
            created_by: IdFixtures::staff_id(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.new_item.title = title.into();
        self
    }

    pub fn with_public_description(mut self, description: impl Into<String>) -> Self {
        self.new_item.public_description = description.into();
        self
    }

    pub fn with_category(mut self, category: ItemCategory) -> Self {
        self.new_item.category = category;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.new_item.color = Some(color.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.new_item.location_found = location.into();
        self
    }

    pub fn with_date_found(mut self, date: NaiveDate) -> Self {
        self.new_item.date_found = date;
        self
    }

    pub fn with_private_notes(mut self, notes: impl Into<String>) -> Self {
        self.new_item.private_notes = Some(notes.into());
        self
    }

    pub fn with_questions(mut self, questions: Vec<VerificationQuestion>) -> Self {
        self.new_item.verification_questions = questions;
        self
    }

    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    /// Returns the staff input without logging it
    pub fn build_new(self) -> NewFoundItem {
        self.new_item
    }

    /// Logs the item and applies the requested status
    ///
    /// # Panics
    ///
    /// Panics if the configured fields fail item validation
    pub fn build(self) -> FoundItem {
        let mut item = FoundItem::log(self.new_item, self.created_by)
            .expect("builder produced an invalid item");
        item.status = self.status;
        item
    }
}

/// Builder for claims on a given item
pub struct ClaimBuilder {
    item_id: core_kernel::ItemId,
    questions: Vec<String>,
    claimant: Actor,
    answers: Option<Vec<ClaimAnswer>>,
    contact_email: String,
    phase: ClaimPhase,
}

impl ClaimBuilder {
    /// A pending claim on `item` by a random visitor
    pub fn for_item(item: &FoundItem) -> Self {
        let username: String = Username().fake();
        Self {
            item_id: item.id,
            questions: item.question_texts(),
            claimant: Actor::new(UserId::new_v7(), username),
            answers: None,
            contact_email: SafeEmail().fake(),
            phase: ClaimPhase::Pending,
        }
    }

    pub fn by(mut self, claimant: Actor) -> Self {
        self.claimant = claimant;
        self
    }

    pub fn by_visitor(self) -> Self {
        self.by(Actor::new(IdFixtures::visitor_id(), "alice"))
    }

    pub fn with_answers(mut self, answers: Vec<ClaimAnswer>) -> Self {
        self.answers = Some(answers);
        self
    }

    pub fn with_contact_email(mut self, email: impl Into<String>) -> Self {
        self.contact_email = email.into();
        self
    }

    pub fn in_phase(mut self, phase: ClaimPhase) -> Self {
        self.phase = phase;
        self
    }

    /// Files the claim and moves it straight into the requested phase
    ///
    /// # Panics
    ///
    /// Panics if the answers or contact email fail claim validation
    pub fn build(self) -> Claim {
        let answers = self.answers.unwrap_or_else(|| {
            self.questions
                .iter()
                .map(|q| ClaimAnswer::new(q.clone(), "My answer"))
                .collect()
        });

        let mut claim = Claim::file(
            NewClaim {
                item_id: self.item_id,
                answers,
                additional_details: None,
                contact_email: self.contact_email,
                contact_phone: None,
            },
            &self.claimant,
            &self.questions,
        )
        .expect("builder produced an invalid claim");

        let now = Utc::now();
        let (status, picked_up) = match self.phase {
            ClaimPhase::Pending => (ClaimStatus::Pending, false),
            ClaimPhase::Approved => (ClaimStatus::Approved, false),
            ClaimPhase::Denied => (ClaimStatus::Denied, false),
            ClaimPhase::PickedUp => (ClaimStatus::Approved, true),
        };

        if status.is_decision() {
            claim.status = status;
            claim.review_notes = Some("Reviewed in test".to_string());
            claim.reviewed_by = Some(IdFixtures::staff_id());
            claim.reviewed_at = Some(now);
        }
        if picked_up {
            claim.pickup = Some(PickupRecord {
                completed_at: now,
                verification_type: PickupVerificationType::IdChecked,
                notes: "Showed license".to_string(),
                recorded_by: IdFixtures::staff_id(),
            });
        }
        claim
    }
}
