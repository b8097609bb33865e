//! Claim lifecycle state machine
//!
//! Decides what may happen to a claim next and applies the transitions.
//! Every transition checks, in order, who is acting, what they submitted, and
//! whether the claim's current phase allows it. All checks run before the
//! claim is touched, so an `Err` always means the claim is unchanged.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use core_kernel::Session;

use crate::claim::{Claim, ClaimAmendment, ClaimStatus, PickupRecord, PickupVerificationType};
use crate::error::ClaimError;

/// Where a claim is in its lifecycle
///
/// `PickedUp` is only reachable from `Approved` and is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimPhase {
    Pending,
    Approved,
    Denied,
    PickedUp,
}

impl ClaimPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimPhase::Pending => "PENDING",
            ClaimPhase::Approved => "APPROVED",
            ClaimPhase::Denied => "DENIED",
            ClaimPhase::PickedUp => "PICKED_UP",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ClaimPhase::PickedUp)
    }
}

impl fmt::Display for ClaimPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something an actor can do with a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimAction {
    View,
    Amend,
    Review,
    CompletePickup,
    Delete,
}

impl ClaimAction {
    fn verb(&self) -> &'static str {
        match self {
            ClaimAction::View => "view",
            ClaimAction::Amend => "amend",
            ClaimAction::Review => "review",
            ClaimAction::CompletePickup => "complete pickup for",
            ClaimAction::Delete => "delete",
        }
    }
}

/// A staff decision on a claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub status: ClaimStatus,
    pub notes: String,
}

impl Review {
    pub fn new(status: ClaimStatus, notes: impl Into<String>) -> Self {
        Self {
            status,
            notes: notes.into(),
        }
    }
}

/// What staff record when the claimant collects the item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupCompletion {
    /// `None` when the form was submitted without a selection
    pub verification_type: Option<PickupVerificationType>,
    pub notes: String,
}

impl PickupCompletion {
    pub fn new(verification_type: PickupVerificationType, notes: impl Into<String>) -> Self {
        Self {
            verification_type: Some(verification_type),
            notes: notes.into(),
        }
    }
}

/// Claim lifecycle rules
pub struct ClaimLifecycle;

impl ClaimLifecycle {
    pub fn phase(claim: &Claim) -> ClaimPhase {
        if claim.pickup_completed() {
            return ClaimPhase::PickedUp;
        }
        match claim.status {
            ClaimStatus::Pending => ClaimPhase::Pending,
            ClaimStatus::Approved => ClaimPhase::Approved,
            ClaimStatus::Denied => ClaimPhase::Denied,
        }
    }

    /// Statuses a review may move the claim to
    ///
    /// Re-affirming the current decision is allowed and only replaces the
    /// notes, so APPROVED and DENIED are both offered until pickup.
    pub fn next_statuses(claim: &Claim) -> Vec<ClaimStatus> {
        if Self::phase(claim).is_terminal() {
            Vec::new()
        } else {
            vec![ClaimStatus::Approved, ClaimStatus::Denied]
        }
    }

    /// Actions the session may perform on the claim right now
    pub fn available_actions(claim: &Claim, session: &Session) -> Vec<ClaimAction> {
        let phase = Self::phase(claim);

        match session {
            Session::Guest => Vec::new(),
            Session::Visitor(actor) if claim.is_owned_by(actor.id) => {
                let mut actions = vec![ClaimAction::View];
                if phase == ClaimPhase::Pending {
                    actions.push(ClaimAction::Amend);
                }
                actions
            }
            Session::Visitor(_) => Vec::new(),
            Session::Staff(_) => {
                let mut actions = vec![ClaimAction::View];
                if !phase.is_terminal() {
                    actions.push(ClaimAction::Review);
                }
                if phase == ClaimPhase::Approved {
                    actions.push(ClaimAction::CompletePickup);
                }
                actions.push(ClaimAction::Delete);
                actions
            }
        }
    }

    pub fn can(claim: &Claim, session: &Session, action: ClaimAction) -> bool {
        Self::available_actions(claim, session).contains(&action)
    }

    /// Records a staff decision
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the session is not staff
    /// - `Validation` if the notes are blank or the target is PENDING
    /// - `InvalidTransition` once pickup has been recorded
    pub fn review(claim: &mut Claim, session: &Session, review: Review) -> Result<(), ClaimError> {
        let reviewer = match session {
            Session::Staff(actor) => actor.id,
            _ => return Err(ClaimError::forbidden("Only staff can review claims")),
        };

        let notes = review.notes.trim();
        if notes.is_empty() {
            return Err(ClaimError::validation("Review notes are required"));
        }
        if !review.status.is_decision() {
            return Err(ClaimError::validation("A review must approve or deny the claim"));
        }

        Self::require_phase(claim, ClaimAction::Review, |p| !p.is_terminal())?;

        debug!(claim_id = %claim.id, from = %claim.status, to = %review.status, "Applying claim review");

        let now = Utc::now();
        claim.status = review.status;
        claim.review_notes = Some(notes.to_string());
        claim.reviewed_by = Some(reviewer);
        claim.reviewed_at = Some(now);
        claim.updated_at = now;
        Ok(())
    }

    /// Records that the approved claimant collected the item
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the session is not staff
    /// - `Validation` if notes are blank or no verification type was chosen
    /// - `InvalidTransition` unless the claim is APPROVED and not picked up
    pub fn complete_pickup(
        claim: &mut Claim,
        session: &Session,
        completion: PickupCompletion,
    ) -> Result<(), ClaimError> {
        let recorder = match session {
            Session::Staff(actor) => actor.id,
            _ => return Err(ClaimError::forbidden("Only staff can complete pickups")),
        };

        let notes = completion.notes.trim();
        let mut missing = Vec::new();
        if completion.verification_type.is_none() {
            missing.push("Pickup verification type is required");
        }
        if notes.is_empty() {
            missing.push("Pickup notes are required");
        }
        let verification_type = match completion.verification_type {
            Some(v) if missing.is_empty() => v,
            _ => return Err(ClaimError::validation(missing.join("; "))),
        };

        Self::require_phase(claim, ClaimAction::CompletePickup, |p| p == ClaimPhase::Approved)?;

        let now = Utc::now();
        claim.pickup = Some(PickupRecord {
            completed_at: now,
            verification_type,
            notes: notes.to_string(),
            recorded_by: recorder,
        });
        claim.updated_at = now;
        Ok(())
    }

    /// Applies the claimant's edit to a PENDING claim
    ///
    /// The status is never changed by an amendment.
    pub fn amend(
        claim: &mut Claim,
        session: &Session,
        amendment: ClaimAmendment,
        item_questions: &[String],
    ) -> Result<(), ClaimError> {
        match session {
            Session::Visitor(actor) if claim.is_owned_by(actor.id) => {}
            _ => return Err(ClaimError::forbidden("Only the claimant can edit this claim")),
        }

        Self::require_phase(claim, ClaimAction::Amend, |p| p == ClaimPhase::Pending)?;

        *claim = claim.amended(amendment, item_questions)?;
        Ok(())
    }

    fn require_phase(
        claim: &Claim,
        action: ClaimAction,
        allowed: impl Fn(ClaimPhase) -> bool,
    ) -> Result<(), ClaimError> {
        let phase = Self::phase(claim);
        if allowed(phase) {
            Ok(())
        } else {
            Err(ClaimError::InvalidTransition {
                phase: phase.to_string(),
                action: action.verb().to_string(),
            })
        }
    }
}
