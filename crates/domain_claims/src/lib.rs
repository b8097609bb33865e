//! Claims Domain
//!
//! A visitor files a `Claim` asserting ownership of a found item, backed by
//! answers to the item's verification questions. Staff review the claim and,
//! once approved, record the physical pickup.
//!
//! # Claim Lifecycle
//!
//! ```text
//!            review             pickup
//! PENDING ──────────> APPROVED ────────> APPROVED + picked up (terminal)
//!    │                  ▲   │
//!    │ review    review │   │ review
//!    └──────────> DENIED ───┘
//! ```
//!
//! Every review must carry notes. Claimants may amend their claim only while
//! it is PENDING.

pub mod claim;
pub mod lifecycle;
pub mod ports;
pub mod error;

pub use claim::{
    Claim, ClaimStatus, ClaimAnswer, PickupRecord, PickupVerificationType,
    NewClaim, ClaimAmendment,
};
pub use lifecycle::{ClaimLifecycle, ClaimPhase, ClaimAction, Review, PickupCompletion};
pub use ports::{ClaimPort, ClaimQuery};
pub use error::ClaimError;
