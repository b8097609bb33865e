//! Found item aggregate

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{ItemId, UserId};

use crate::error::ItemError;
use crate::validation::ItemValidator;

/// Broad kind of object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemCategory {
    Clothing,
    Electronics,
    Jewelry,
    Bag,
    Drinkware,
    Keys,
    Other,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 7] = [
        ItemCategory::Clothing,
        ItemCategory::Electronics,
        ItemCategory::Jewelry,
        ItemCategory::Bag,
        ItemCategory::Drinkware,
        ItemCategory::Keys,
        ItemCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemCategory::Clothing => "CLOTHING",
            ItemCategory::Electronics => "ELECTRONICS",
            ItemCategory::Jewelry => "JEWELRY",
            ItemCategory::Bag => "BAG",
            ItemCategory::Drinkware => "DRINKWARE",
            ItemCategory::Keys => "KEYS",
            ItemCategory::Other => "OTHER",
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemCategory {
    type Err = ItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ItemError::validation(format!("Unknown category: {}", s)))
    }
}

/// Where the item is in its custody lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    /// Held by staff, open for claims
    #[default]
    Found,
    /// A claim has been accepted for the item
    Claimed,
    /// Given away after the holding period
    Donated,
    /// Thrown away
    Disposed,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 4] = [
        ItemStatus::Found,
        ItemStatus::Claimed,
        ItemStatus::Donated,
        ItemStatus::Disposed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Found => "FOUND",
            ItemStatus::Claimed => "CLAIMED",
            ItemStatus::Donated => "DONATED",
            ItemStatus::Disposed => "DISPOSED",
        }
    }

    /// Only FOUND and CLAIMED items appear in public listings
    pub fn is_public(&self) -> bool {
        matches!(self, ItemStatus::Found | ItemStatus::Claimed)
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = ItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemStatus::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ItemError::validation(format!("Unknown item status: {}", s)))
    }
}

/// A staff-authored question with the answer only the owner should know
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationQuestion {
    pub question: String,
    pub answer: String,
}

impl VerificationQuestion {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// A physical object turned in and logged by staff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoundItem {
    pub id: ItemId,
    /// Staff-facing title
    pub title: String,
    /// Deliberately vague description shown to visitors
    pub public_description: String,
    pub category: ItemCategory,
    pub color: Option<String>,
    pub location_found: String,
    pub date_found: NaiveDate,
    /// Ordered photo URLs; the first is required
    pub image_urls: Vec<String>,
    pub status: ItemStatus,
    // Staff-only below
    pub private_notes: Option<String>,
    pub storage_location: Option<String>,
    pub requires_id_for_pickup: bool,
    pub verification_questions: Vec<VerificationQuestion>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields staff supply when logging an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFoundItem {
    pub title: String,
    pub public_description: String,
    pub category: ItemCategory,
    #[serde(default)]
    pub color: Option<String>,
    pub location_found: String,
    pub date_found: NaiveDate,
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub private_notes: Option<String>,
    #[serde(default)]
    pub storage_location: Option<String>,
    #[serde(default)]
    pub requires_id_for_pickup: bool,
    pub verification_questions: Vec<VerificationQuestion>,
}

/// A staff edit; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FoundItemUpdate {
    pub title: Option<String>,
    pub public_description: Option<String>,
    pub category: Option<ItemCategory>,
    pub color: Option<String>,
    pub location_found: Option<String>,
    pub date_found: Option<NaiveDate>,
    pub image_urls: Option<Vec<String>>,
    pub status: Option<ItemStatus>,
    pub private_notes: Option<String>,
    pub storage_location: Option<String>,
    pub requires_id_for_pickup: Option<bool>,
    pub verification_questions: Option<Vec<VerificationQuestion>>,
}

impl FoundItemUpdate {
    pub fn is_empty(&self) -> bool {
        *self == FoundItemUpdate::default()
    }
}

impl FoundItem {
    /// Logs a new item after validating the staff input
    ///
    /// # Errors
    ///
    /// Returns `ItemError::Validation` listing every failed rule
    pub fn log(new_item: NewFoundItem, created_by: UserId) -> Result<Self, ItemError> {
        let now = Utc::now();
        let item = Self {
            id: ItemId::new_v7(),
            title: new_item.title.trim().to_string(),
            public_description: new_item.public_description.trim().to_string(),
            category: new_item.category,
            color: non_blank(new_item.color),
            location_found: new_item.location_found.trim().to_string(),
            date_found: new_item.date_found,
            image_urls: trim_image_urls(new_item.image_urls),
            status: ItemStatus::Found,
            private_notes: non_blank(new_item.private_notes),
            storage_location: non_blank(new_item.storage_location),
            requires_id_for_pickup: new_item.requires_id_for_pickup,
            verification_questions: new_item.verification_questions,
            created_by,
            created_at: now,
            updated_at: now,
        };

        ItemValidator::validate(&item).into_result()?;
        Ok(item)
    }

    /// Applies a staff edit
    ///
    /// The edit is validated on a copy; on error `self` is left unchanged.
    pub fn apply_update(&mut self, update: FoundItemUpdate) -> Result<(), ItemError> {
        let mut next = self.clone();

        if let Some(title) = update.title {
            next.title = title.trim().to_string();
        }
        if let Some(description) = update.public_description {
            next.public_description = description.trim().to_string();
        }
        if let Some(category) = update.category {
            next.category = category;
        }
        if update.color.is_some() {
            next.color = non_blank(update.color);
        }
        if let Some(location) = update.location_found {
            next.location_found = location.trim().to_string();
        }
        if let Some(date) = update.date_found {
            next.date_found = date;
        }
        if let Some(urls) = update.image_urls {
            next.image_urls = trim_image_urls(urls);
        }
        if let Some(status) = update.status {
            next.status = status;
        }
        if update.private_notes.is_some() {
            next.private_notes = non_blank(update.private_notes);
        }
        if update.storage_location.is_some() {
            next.storage_location = non_blank(update.storage_location);
        }
        if let Some(requires_id) = update.requires_id_for_pickup {
            next.requires_id_for_pickup = requires_id;
        }
        if let Some(questions) = update.verification_questions {
            next.verification_questions = questions;
        }

        ItemValidator::validate(&next).into_result()?;

        next.updated_at = Utc::now();
        *self = next;
        Ok(())
    }

    /// True if the item's status allows it in public listings
    pub fn is_publicly_listed_status(&self) -> bool {
        self.status.is_public()
    }

    /// The photo shown in list thumbnails
    pub fn primary_image(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }

    /// Question texts without answers, in order
    pub fn question_texts(&self) -> Vec<String> {
        self.verification_questions
            .iter()
            .map(|q| q.question.clone())
            .collect()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Drops empty trailing photo slots; the form submits a fixed number of inputs
fn trim_image_urls(urls: Vec<String>) -> Vec<String> {
    let mut urls: Vec<String> = urls.into_iter().map(|u| u.trim().to_string()).collect();
    while urls.len() > 1 && urls.last().is_some_and(|u| u.is_empty()) {
        urls.pop();
    }
    urls
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_item() -> NewFoundItem {
        NewFoundItem {
            title: "Black Hydro Flask".to_string(),
            public_description: "Water bottle".to_string(),
            category: ItemCategory::Drinkware,
            color: Some("black".to_string()),
            location_found: "Gym".to_string(),
            date_found: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            image_urls: vec!["https://img/1.jpg".to_string(), "".to_string(), "".to_string()],
            private_notes: Some("  ".to_string()),
            storage_location: Some("Shelf B".to_string()),
            requires_id_for_pickup: false,
            verification_questions: vec![
                VerificationQuestion::new("Any stickers?", "A cat sticker"),
                VerificationQuestion::new("Lid color?", "Blue"),
            ],
        }
    }

    #[test]
    fn test_log_sets_found_status_and_trims() {
        let item = FoundItem::log(new_item(), UserId::new()).unwrap();
        assert_eq!(item.status, ItemStatus::Found);
        assert_eq!(item.image_urls, vec!["https://img/1.jpg".to_string()]);
        assert_eq!(item.private_notes, None);
        assert_eq!(item.primary_image(), Some("https://img/1.jpg"));
    }

    #[test]
    fn test_update_rejected_leaves_item_unchanged() {
        let mut item = FoundItem::log(new_item(), UserId::new()).unwrap();
        let before = item.clone();
        let result = item.apply_update(FoundItemUpdate {
            verification_questions: Some(vec![VerificationQuestion::new("Only one?", "yes")]),
            ..Default::default()
        });
        assert!(result.is_err());
        assert_eq!(item, before);
    }

    #[test]
    fn test_update_status() {
        let mut item = FoundItem::log(new_item(), UserId::new()).unwrap();
        item.apply_update(FoundItemUpdate {
            status: Some(ItemStatus::Donated),
            ..Default::default()
        })
        .unwrap();
        assert!(!item.is_publicly_listed_status());
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("keys".parse::<ItemCategory>().unwrap(), ItemCategory::Keys);
        assert!("SHOES".parse::<ItemCategory>().is_err());
    }

    #[test]
    fn test_wire_format() {
        let item = FoundItem::log(new_item(), UserId::new()).unwrap();
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["category"], "DRINKWARE");
        assert_eq!(json["status"], "FOUND");
        assert!(json.get("publicDescription").is_some());
    }
}
