//! Claim DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use core_kernel::ItemId;
use domain_claims::{
    ClaimAmendment, ClaimAnswer, ClaimStatus, NewClaim, PickupCompletion, PickupVerificationType, Review,
};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateClaimRequest {
    pub item_id: Uuid,
    #[validate(length(min = 1))]
    pub answers: Vec<ClaimAnswer>,
    #[validate(length(max = 2000))]
    pub additional_details: Option<String>,
    #[validate(length(min = 1, max = 254))]
    pub contact_email: String,
    #[validate(length(max = 40))]
    pub contact_phone: Option<String>,
}

impl From<CreateClaimRequest> for NewClaim {
    fn from(request: CreateClaimRequest) -> Self {
        NewClaim {
            item_id: ItemId::from_uuid(request.item_id),
            answers: request.answers,
            additional_details: request.additional_details,
            contact_email: request.contact_email,
            contact_phone: request.contact_phone,
        }
    }
}

/// Claimant edit of a pending claim
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateClaimRequest {
    #[validate(length(min = 1))]
    pub answers: Option<Vec<ClaimAnswer>>,
    #[validate(length(max = 2000))]
    pub additional_details: Option<String>,
    #[validate(length(min = 1, max = 254))]
    pub contact_email: Option<String>,
    #[validate(length(max = 40))]
    pub contact_phone: Option<String>,
}

impl From<UpdateClaimRequest> for ClaimAmendment {
    fn from(request: UpdateClaimRequest) -> Self {
        ClaimAmendment {
            answers: request.answers,
            additional_details: request.additional_details,
            contact_email: request.contact_email,
            contact_phone: request.contact_phone,
        }
    }
}

/// Staff decision; blank notes are rejected by the lifecycle
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReviewClaimRequest {
    pub status: ClaimStatus,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub review_notes: String,
}

impl From<ReviewClaimRequest> for Review {
    fn from(request: ReviewClaimRequest) -> Self {
        Review::new(request.status, request.review_notes)
    }
}

/// Pickup record; a missing verification type is reported by the lifecycle
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompletePickupRequest {
    #[serde(default)]
    pub pickup_verification_type: Option<PickupVerificationType>,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub pickup_notes: String,
}

impl From<CompletePickupRequest> for PickupCompletion {
    fn from(request: CompletePickupRequest) -> Self {
        PickupCompletion {
            verification_type: request.pickup_verification_type,
            notes: request.pickup_notes,
        }
    }
}
