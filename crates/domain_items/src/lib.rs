//! Found Item Domain
//!
//! Staff log physical objects that were turned in as `FoundItem`s. An item
//! carries a vague public description for visitors and staff-only details
//! (private notes, storage location, verification answers) used to check a
//! claimant's knowledge.
//!
//! # Item Status
//!
//! ```text
//! FOUND <-> CLAIMED -> DONATED | DISPOSED
//! ```
//!
//! Only FOUND and CLAIMED items are ever listed publicly. Deletion is a
//! separate, terminal staff action.

pub mod item;
pub mod validation;
pub mod ports;
pub mod error;

pub use item::{
    FoundItem, ItemCategory, ItemStatus, VerificationQuestion,
    NewFoundItem, FoundItemUpdate,
};
pub use validation::{ItemValidator, ValidationResult};
pub use ports::{FoundItemPort, ItemQuery};
pub use error::ItemError;
