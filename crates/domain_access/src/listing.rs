//! Sort columns and search fields for item and claim views
//!
//! The ordering itself is [`core_kernel::apply_listing`]; this module only
//! says which columns exist and what the text filter looks at.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use core_kernel::{CoreError, Listable, SortKey};

use crate::views::{ClaimView, ItemView, PublicItemView, StaffItemSummary};

/// Sortable columns of an item list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemSortField {
    Item,
    #[default]
    DateFound,
    Category,
    Location,
    Color,
    /// Public views carry no claim count, so this keeps their order
    Claims,
}

impl FromStr for ItemSortField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "item" | "title" => Ok(ItemSortField::Item),
            "datefound" | "date_found" | "date" => Ok(ItemSortField::DateFound),
            "category" => Ok(ItemSortField::Category),
            "location" | "locationfound" => Ok(ItemSortField::Location),
            "color" => Ok(ItemSortField::Color),
            "claims" => Ok(ItemSortField::Claims),
            other => Err(CoreError::validation(format!("Unknown item sort field: {}", other))),
        }
    }
}

/// Sortable columns of a claim list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClaimSortField {
    Item,
    Claimant,
    Status,
    #[default]
    Submitted,
}

impl FromStr for ClaimSortField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "item" => Ok(ClaimSortField::Item),
            "claimant" => Ok(ClaimSortField::Claimant),
            "status" => Ok(ClaimSortField::Status),
            "submitted" | "createdat" | "created_at" => Ok(ClaimSortField::Submitted),
            other => Err(CoreError::validation(format!("Unknown claim sort field: {}", other))),
        }
    }
}

fn color_key(color: &Option<String>) -> SortKey {
    SortKey::text(color.as_deref().unwrap_or(""))
}

impl Listable for PublicItemView {
    type Field = ItemSortField;

    fn sort_key(&self, field: ItemSortField) -> SortKey {
        match field {
            ItemSortField::Item => SortKey::text(&self.public_description),
            ItemSortField::DateFound => SortKey::Day(self.date_found),
            ItemSortField::Category => SortKey::text(self.category.as_str()),
            ItemSortField::Location => SortKey::text(&self.location_found),
            ItemSortField::Color => color_key(&self.color),
            ItemSortField::Claims => SortKey::Count(0),
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.public_description.as_str(),
            self.category.as_str(),
            self.location_found.as_str(),
        ];
        fields.extend(self.color.as_deref());
        fields
    }
}

impl Listable for StaffItemSummary {
    type Field = ItemSortField;

    fn sort_key(&self, field: ItemSortField) -> SortKey {
        let item = &self.item;
        match field {
            ItemSortField::Item => SortKey::text(&item.title),
            ItemSortField::DateFound => SortKey::Day(item.date_found),
            ItemSortField::Category => SortKey::text(item.category.as_str()),
            ItemSortField::Location => SortKey::text(&item.location_found),
            ItemSortField::Color => color_key(&item.color),
            ItemSortField::Claims => SortKey::Count(self.claim_count),
        }
    }

    /// Rows only exist for browsable items, so `status` is FOUND or CLAIMED
    fn search_fields(&self) -> Vec<&str> {
        let item = &self.item;
        let mut fields = vec![
            item.title.as_str(),
            item.public_description.as_str(),
            item.category.as_str(),
            item.location_found.as_str(),
            item.status.as_str(),
        ];
        fields.extend(item.color.as_deref());
        fields
    }
}

impl Listable for ClaimView {
    type Field = ClaimSortField;

    fn sort_key(&self, field: ClaimSortField) -> SortKey {
        match field {
            ClaimSortField::Item => SortKey::text(self.item.as_ref().map_or("", ItemView::display_name)),
            ClaimSortField::Claimant => SortKey::text(&self.claim.claimant_name),
            ClaimSortField::Status => SortKey::text(self.claim.status.as_str()),
            ClaimSortField::Submitted => SortKey::Instant(self.claim.created_at),
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.claim.claimant_name.as_str()];
        match &self.item {
            Some(ItemView::Staff(item)) => {
                fields.push(item.title.as_str());
                fields.push(item.public_description.as_str());
            }
            Some(ItemView::Public(item)) => {
                fields.push(item.title.as_str());
                fields.push(item.public_description.as_str());
            }
            None => {}
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::{apply_listing, ItemId, SortDirection, SortState};
    use domain_items::{ItemCategory, ItemStatus};

    fn view(description: &str, category: ItemCategory, day: u32, color: Option<&str>) -> PublicItemView {
        PublicItemView {
            id: ItemId::new(),
            title: format!("{description} (staff)"),
            public_description: description.to_string(),
            category,
            color: color.map(str::to_string),
            location_found: "Main hall".to_string(),
            date_found: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            image_urls: vec!["https://img/x.jpg".to_string()],
            status: ItemStatus::Found,
            verification_questions: vec![],
        }
    }

    #[test]
    fn test_default_sort_is_newest_found_first() {
        let items = vec![
            view("Umbrella", ItemCategory::Other, 3, None),
            view("Phone", ItemCategory::Electronics, 9, Some("black")),
            view("Keys", ItemCategory::Keys, 5, None),
        ];
        let sorted = apply_listing(&items, "", SortState::new(ItemSortField::default()));
        let names: Vec<&str> = sorted.iter().map(|v| v.public_description.as_str()).collect();
        assert_eq!(names, vec!["Phone", "Keys", "Umbrella"]);
    }

    #[test]
    fn test_filter_matches_category_and_color() {
        let items = vec![
            view("Umbrella", ItemCategory::Other, 3, Some("Red")),
            view("Phone", ItemCategory::Electronics, 9, Some("black")),
        ];
        let by_category = apply_listing(&items, "electr", SortState::new(ItemSortField::Item));
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].public_description, "Phone");

        let by_color = apply_listing(&items, "RED", SortState::new(ItemSortField::Item));
        assert_eq!(by_color[0].public_description, "Umbrella");
    }

    #[test]
    fn test_public_filter_ignores_staff_title() {
        let items = vec![view("Umbrella", ItemCategory::Other, 3, None)];
        assert!(apply_listing(&items, "(staff)", SortState::new(ItemSortField::Item)).is_empty());
    }

    #[test]
    fn test_sort_item_ascending_case_insensitive() {
        let items = vec![
            view("bottle", ItemCategory::Drinkware, 1, None),
            view("Apple watch", ItemCategory::Electronics, 2, None),
            view("Cap", ItemCategory::Clothing, 3, None),
        ];
        let sorted = apply_listing(
            &items,
            "  ",
            SortState::with_direction(ItemSortField::Item, SortDirection::Ascending),
        );
        let names: Vec<&str> = sorted.iter().map(|v| v.public_description.as_str()).collect();
        assert_eq!(names, vec!["Apple watch", "bottle", "Cap"]);
    }

    #[test]
    fn test_sort_field_parsing() {
        assert_eq!("dateFound".parse::<ItemSortField>().unwrap(), ItemSortField::DateFound);
        assert_eq!("Claims".parse::<ItemSortField>().unwrap(), ItemSortField::Claims);
        assert_eq!("claimant".parse::<ClaimSortField>().unwrap(), ClaimSortField::Claimant);
        assert!("price".parse::<ItemSortField>().is_err());
    }
}
