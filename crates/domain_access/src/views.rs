//! Role-shaped projections of items and claims

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{ItemId, Session};
use domain_claims::{Claim, ClaimAction, ClaimLifecycle, ClaimStatus};
use domain_items::{FoundItem, ItemCategory, ItemStatus};

use crate::visibility::{ItemAffordance, VisibilityPolicy};

/// A found item as guests and visitors see it
///
/// Has no private notes, storage location, ID requirement or answers.
/// Verification questions are listed without answers so a visitor can file
/// a claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicItemView {
    pub id: ItemId,
    pub title: String,
    pub public_description: String,
    pub category: ItemCategory,
    pub color: Option<String>,
    pub location_found: String,
    pub date_found: NaiveDate,
    pub image_urls: Vec<String>,
    pub status: ItemStatus,
    pub verification_questions: Vec<String>,
}

impl From<&FoundItem> for PublicItemView {
    fn from(item: &FoundItem) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            public_description: item.public_description.clone(),
            category: item.category,
            color: item.color.clone(),
            location_found: item.location_found.clone(),
            date_found: item.date_found,
            image_urls: item.image_urls.clone(),
            status: item.status,
            verification_questions: item.question_texts(),
        }
    }
}

/// Public item page: the item plus what the session may do with it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicItemDetail {
    #[serde(flatten)]
    pub item: PublicItemView,
    pub affordances: Vec<ItemAffordance>,
    /// Status of the session's own claim on this item, if any
    pub my_claim_status: Option<ClaimStatus>,
}

impl PublicItemDetail {
    pub fn new(item: &FoundItem, session: &Session, my_claim: Option<&Claim>) -> Self {
        Self {
            item: PublicItemView::from(item),
            affordances: VisibilityPolicy::item_affordances(session, my_claim.is_some()),
            my_claim_status: my_claim.map(|c| c.status),
        }
    }
}

/// The complete item record, staff only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffItemView {
    #[serde(flatten)]
    pub item: FoundItem,
    pub pickup_completed: bool,
}

impl StaffItemView {
    pub fn new(item: FoundItem, claims: &[Claim]) -> Self {
        Self {
            pickup_completed: claims
                .iter()
                .any(|c| c.item_id == item.id && c.pickup_completed()),
            item,
        }
    }
}

/// A row on the staff dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffItemSummary {
    #[serde(flatten)]
    pub item: FoundItem,
    pub claim_count: u64,
    pub pickup_completed: bool,
}

impl StaffItemSummary {
    /// `claims` may include claims on other items; only this item's are counted
    pub fn new(item: FoundItem, claims: &[Claim]) -> Self {
        let own: Vec<&Claim> = claims.iter().filter(|c| c.item_id == item.id).collect();
        Self {
            claim_count: own.len() as u64,
            pickup_completed: own.iter().any(|c| c.pickup_completed()),
            item,
        }
    }
}

/// An item embedded in another view, shaped for the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemView {
    Staff(Box<FoundItem>),
    Public(PublicItemView),
}

impl ItemView {
    /// The only place a full item is chosen over the public projection
    pub fn for_session(item: &FoundItem, session: &Session) -> Self {
        if VisibilityPolicy::can_view_staff_fields(session) {
            ItemView::Staff(Box::new(item.clone()))
        } else {
            ItemView::Public(PublicItemView::from(item))
        }
    }

    pub fn id(&self) -> ItemId {
        match self {
            ItemView::Staff(item) => item.id,
            ItemView::Public(item) => item.id,
        }
    }

    /// Text used for the "Item" column
    pub fn display_name(&self) -> &str {
        match self {
            ItemView::Staff(item) => &item.title,
            ItemView::Public(item) => &item.public_description,
        }
    }
}

/// A claim with its item, list label and permitted actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimView {
    #[serde(flatten)]
    pub claim: Claim,
    pub pickup_completed: bool,
    /// `None` when the item has since been removed
    pub item: Option<ItemView>,
    pub label: Option<String>,
    pub actions: Vec<ClaimAction>,
}

impl ClaimView {
    pub fn new(claim: Claim, item: Option<&FoundItem>, session: &Session) -> Self {
        Self {
            pickup_completed: claim.pickup_completed(),
            item: item.map(|i| ItemView::for_session(i, session)),
            label: VisibilityPolicy::claim_label(session, &claim).map(str::to_string),
            actions: ClaimLifecycle::available_actions(&claim, session),
            claim,
        }
    }
}
