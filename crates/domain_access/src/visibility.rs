//! Role-gated visibility rules
//!
//! Rules are evaluated in this order:
//!
//! 1. GUEST sees public item fields only and is prompted to sign in or sign
//!    up instead of being offered claim actions.
//! 2. VISITOR sees public item fields and their own claims; may file one
//!    claim per item and edit it while PENDING.
//! 3. STAFF sees everything and manages items and claims.
//! 4. For every role, an item that is DONATED/DISPOSED or has a picked-up
//!    claim is left out of browse lists. Staff can still open it directly.

use serde::{Deserialize, Serialize};

use core_kernel::{Actor, CoreError, Session};
use domain_claims::{Claim, ClaimLifecycle, ClaimPhase, ClaimStatus};
use domain_items::FoundItem;

/// Calls to action shown alongside a found item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemAffordance {
    SignInToClaim,
    CreateAccount,
    FileClaim,
    ViewMyClaims,
    EditItem,
    DeleteItem,
    ViewStaffDetails,
}

/// Visibility rules shared by the gateway and the HTTP layer
pub struct VisibilityPolicy;

impl VisibilityPolicy {
    /// Staff-only item fields may be shown
    pub fn can_view_staff_fields(session: &Session) -> bool {
        session.is_staff()
    }

    /// May create, edit and delete found items
    pub fn can_manage_items(session: &Session) -> bool {
        session.is_staff()
    }

    /// Staff see every claim; visitors only their own
    pub fn can_view_claim(session: &Session, claim: &Claim) -> bool {
        match session {
            Session::Guest => false,
            Session::Visitor(actor) => claim.is_owned_by(actor.id),
            Session::Staff(_) => true,
        }
    }

    /// Only a visitor without an existing claim on the item may file one
    pub fn can_file_claim(session: &Session, holds_claim_for_item: bool) -> bool {
        matches!(session, Session::Visitor(_)) && !holds_claim_for_item
    }

    /// Calls to action for an item detail page
    pub fn item_affordances(session: &Session, holds_claim_for_item: bool) -> Vec<ItemAffordance> {
        match session {
            Session::Guest => vec![ItemAffordance::SignInToClaim, ItemAffordance::CreateAccount],
            Session::Visitor(_) if holds_claim_for_item => vec![ItemAffordance::ViewMyClaims],
            Session::Visitor(_) => vec![ItemAffordance::FileClaim],
            Session::Staff(_) => vec![
                ItemAffordance::ViewStaffDetails,
                ItemAffordance::EditItem,
                ItemAffordance::DeleteItem,
            ],
        }
    }

    /// Link text for a claim in a claims list
    ///
    /// `None` when the session may not see the claim at all.
    pub fn claim_label(session: &Session, claim: &Claim) -> Option<&'static str> {
        match session {
            Session::Guest => None,
            Session::Visitor(actor) if !claim.is_owned_by(actor.id) => None,
            Session::Visitor(_) => Some(match claim.status {
                ClaimStatus::Pending => "Edit Claim",
                ClaimStatus::Approved => "See Pickup Details",
                ClaimStatus::Denied => "View Details",
            }),
            Session::Staff(_) => Some(match ClaimLifecycle::phase(claim) {
                ClaimPhase::Pending => "Review",
                _ => "View/Edit",
            }),
        }
    }

    /// Whether the item belongs in a browse or list view
    ///
    /// `claims` are the claims filed against this item.
    pub fn is_browsable(item: &FoundItem, claims: &[Claim]) -> bool {
        item.is_publicly_listed_status()
            && !claims
                .iter()
                .any(|claim| claim.item_id == item.id && claim.pickup_completed())
    }

    /// Requires a staff session
    ///
    /// A guest gets `Unauthenticated`, a visitor gets `Authorization`.
    pub fn require_staff(session: &Session) -> Result<&Actor, CoreError> {
        match session {
            Session::Staff(actor) => Ok(actor),
            Session::Visitor(_) => Err(CoreError::authorization("Staff access required")),
            Session::Guest => Err(CoreError::Unauthenticated),
        }
    }

    /// Requires a visitor session
    pub fn require_visitor(session: &Session) -> Result<&Actor, CoreError> {
        match session {
            Session::Visitor(actor) => Ok(actor),
            Session::Staff(_) => Err(CoreError::authorization("Only visitors can file claims")),
            Session::Guest => Err(CoreError::Unauthenticated),
        }
    }

    /// Requires any signed-in session
    pub fn require_authenticated(session: &Session) -> Result<&Actor, CoreError> {
        session.actor().ok_or(CoreError::Unauthenticated)
    }
}
