//! Found item DTOs

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use domain_items::{FoundItemUpdate, ItemCategory, ItemStatus, NewFoundItem, VerificationQuestion};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 500))]
    pub public_description: String,
    pub category: ItemCategory,
    #[validate(length(max = 50))]
    pub color: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub location_found: String,
    pub date_found: NaiveDate,
    #[validate(length(min = 1))]
    pub image_urls: Vec<String>,
    pub private_notes: Option<String>,
    #[validate(length(max = 200))]
    pub storage_location: Option<String>,
    #[serde(default)]
    pub requires_id_for_pickup: bool,
    #[validate(length(min = 2))]
    pub verification_questions: Vec<VerificationQuestion>,
}

impl From<CreateItemRequest> for NewFoundItem {
    fn from(request: CreateItemRequest) -> Self {
        NewFoundItem {
            title: request.title,
            public_description: request.public_description,
            category: request.category,
            color: request.color,
            location_found: request.location_found,
            date_found: request.date_found,
            image_urls: request.image_urls,
            private_notes: request.private_notes,
            storage_location: request.storage_location,
            requires_id_for_pickup: request.requires_id_for_pickup,
            verification_questions: request.verification_questions,
        }
    }
}

/// Partial edit; absent fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateItemRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 500))]
    pub public_description: Option<String>,
    pub category: Option<ItemCategory>,
    #[validate(length(max = 50))]
    pub color: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub location_found: Option<String>,
    pub date_found: Option<NaiveDate>,
    #[validate(length(min = 1))]
    pub image_urls: Option<Vec<String>>,
    pub status: Option<ItemStatus>,
    pub private_notes: Option<String>,
    #[validate(length(max = 200))]
    pub storage_location: Option<String>,
    pub requires_id_for_pickup: Option<bool>,
    #[validate(length(min = 2))]
    pub verification_questions: Option<Vec<VerificationQuestion>>,
}

impl From<UpdateItemRequest> for FoundItemUpdate {
    fn from(request: UpdateItemRequest) -> Self {
        FoundItemUpdate {
            title: request.title,
            public_description: request.public_description,
            category: request.category,
            color: request.color,
            location_found: request.location_found,
            date_found: request.date_found,
            image_urls: request.image_urls,
            status: request.status,
            private_notes: request.private_notes,
            storage_location: request.storage_location,
            requires_id_for_pickup: request.requires_id_for_pickup,
            verification_questions: request.verification_questions,
        }
    }
}
