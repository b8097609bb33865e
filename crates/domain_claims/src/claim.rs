//! Claim aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{Actor, ClaimId, ItemId, UserId};

use crate::error::ClaimError;

/// Review outcome of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimStatus {
    /// Awaiting staff review
    #[default]
    Pending,
    Approved,
    Denied,
}

impl ClaimStatus {
    pub const ALL: [ClaimStatus; 3] = [
        ClaimStatus::Pending,
        ClaimStatus::Approved,
        ClaimStatus::Denied,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "PENDING",
            ClaimStatus::Approved => "APPROVED",
            ClaimStatus::Denied => "DENIED",
        }
    }

    /// True for the outcomes a staff review may set
    pub fn is_decision(&self) -> bool {
        !matches!(self, ClaimStatus::Pending)
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClaimStatus::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ClaimError::validation(format!("Unknown claim status: {}", s)))
    }
}

/// How staff confirmed the claimant at pickup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PickupVerificationType {
    IdChecked,
    MatchedDescription,
    Other,
}

impl PickupVerificationType {
    pub const ALL: [PickupVerificationType; 3] = [
        PickupVerificationType::IdChecked,
        PickupVerificationType::MatchedDescription,
        PickupVerificationType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PickupVerificationType::IdChecked => "ID_CHECKED",
            PickupVerificationType::MatchedDescription => "MATCHED_DESCRIPTION",
            PickupVerificationType::Other => "OTHER",
        }
    }
}

impl fmt::Display for PickupVerificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PickupVerificationType {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PickupVerificationType::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ClaimError::validation(format!("Unknown verification type: {}", s)))
    }
}

/// The claimant's answer to one of the item's verification questions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimAnswer {
    pub question: String,
    pub answer: String,
}

impl ClaimAnswer {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Recorded when an approved claimant collects the item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupRecord {
    #[serde(rename = "pickupDate")]
    pub completed_at: DateTime<Utc>,
    #[serde(rename = "pickupVerificationType")]
    pub verification_type: PickupVerificationType,
    #[serde(rename = "pickupNotes")]
    pub notes: String,
    pub recorded_by: UserId,
}

/// A visitor's claim of ownership over a found item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub id: ClaimId,
    pub item_id: ItemId,
    pub claimant_id: UserId,
    /// Username captured when the claim was filed
    pub claimant_name: String,
    /// Ordered like the item's verification questions
    pub answers: Vec<ClaimAnswer>,
    pub additional_details: Option<String>,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub status: ClaimStatus,
    /// Overwritten on every review
    pub review_notes: Option<String>,
    pub reviewed_by: Option<UserId>,
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Present once the item has been collected
    pub pickup: Option<PickupRecord>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a visitor submits when filing a claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClaim {
    pub item_id: ItemId,
    pub answers: Vec<ClaimAnswer>,
    #[serde(default)]
    pub additional_details: Option<String>,
    pub contact_email: String,
    #[serde(default)]
    pub contact_phone: Option<String>,
}

/// A claimant's edit of a pending claim; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClaimAmendment {
    pub answers: Option<Vec<ClaimAnswer>>,
    pub additional_details: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

impl ClaimAmendment {
    pub fn is_empty(&self) -> bool {
        *self == ClaimAmendment::default()
    }
}

impl Claim {
    /// Files a new PENDING claim
    ///
    /// `item_questions` are the question texts of the claimed item. Answers
    /// mirror them: exactly one per question, in the item's order.
    ///
    /// # Errors
    ///
    /// Returns `ClaimError::Validation` if an answer is missing, blank, out
    /// of order or repeated, or if the contact email is missing or invalid.
    pub fn file(new_claim: NewClaim, claimant: &Actor, item_questions: &[String]) -> Result<Self, ClaimError> {
        let now = Utc::now();
        let claim = Self {
            id: ClaimId::new_v7(),
            item_id: new_claim.item_id,
            claimant_id: claimant.id,
            claimant_name: claimant.username.clone(),
            answers: trim_answers(new_claim.answers),
            additional_details: non_blank(new_claim.additional_details),
            contact_email: new_claim.contact_email.trim().to_string(),
            contact_phone: non_blank(new_claim.contact_phone),
            status: ClaimStatus::Pending,
            review_notes: None,
            reviewed_by: None,
            reviewed_at: None,
            pickup: None,
            created_at: now,
            updated_at: now,
        };

        claim.validate_submission(item_questions)?;
        Ok(claim)
    }

    /// Applies the claimant-editable fields of an amendment on a copy
    ///
    /// Status checks belong to `ClaimLifecycle::amend`; this only validates
    /// the resulting content.
    pub(crate) fn amended(&self, amendment: ClaimAmendment, item_questions: &[String]) -> Result<Self, ClaimError> {
        let mut next = self.clone();

        if let Some(answers) = amendment.answers {
            next.answers = trim_answers(answers);
        }
        if amendment.additional_details.is_some() {
            next.additional_details = non_blank(amendment.additional_details);
        }
        if let Some(email) = amendment.contact_email {
            next.contact_email = email.trim().to_string();
        }
        if amendment.contact_phone.is_some() {
            next.contact_phone = non_blank(amendment.contact_phone);
        }

        next.validate_submission(item_questions)?;
        next.updated_at = Utc::now();
        Ok(next)
    }

    fn validate_submission(&self, item_questions: &[String]) -> Result<(), ClaimError> {
        let mut errors = Vec::new();

        if self.answers.len() != item_questions.len() {
            errors.push(format!(
                "Expected {} answers, one per verification question, got {}",
                item_questions.len(),
                self.answers.len()
            ));
        }
        for (index, (answer, question)) in self.answers.iter().zip(item_questions).enumerate() {
            if answer.question != question.trim() {
                errors.push(format!("Answer {} must answer \"{}\"", index + 1, question.trim()));
            }
        }
        for (index, answer) in self.answers.iter().enumerate() {
            if answer.answer.is_empty() {
                errors.push(format!("Answer {} is empty", index + 1));
            }
        }

        if self.contact_email.is_empty() {
            errors.push("Contact email is required".to_string());
        } else if !self.contact_email.contains('@') {
            errors.push("Contact email is not a valid address".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ClaimError::Validation(errors.join("; ")))
        }
    }

    /// True once pickup has been recorded
    pub fn pickup_completed(&self) -> bool {
        self.pickup.is_some()
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.claimant_id == user_id
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn trim_answers(answers: Vec<ClaimAnswer>) -> Vec<ClaimAnswer> {
    answers
        .into_iter()
        .map(|a| ClaimAnswer::new(a.question.trim(), a.answer.trim()))
        .collect()
}
