//! Access Domain
//!
//! Decides what each session may see and do:
//!
//! - [`VisibilityPolicy`]: role and ownership checks, item affordances,
//!   claim action labels and the browse exclusion rule
//! - [`views`]: role-shaped projections of items and claims. Records only
//!   reach a guest or visitor through [`PublicItemView`], which has no
//!   staff-only fields.
//! - [`listing`]: sort columns and search fields for those views

pub mod visibility;
pub mod views;
pub mod listing;

pub use visibility::{VisibilityPolicy, ItemAffordance};
pub use views::{PublicItemView, PublicItemDetail, StaffItemView, StaffItemSummary, ItemView, ClaimView};
pub use listing::{ItemSortField, ClaimSortField};
