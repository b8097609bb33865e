//! Core Kernel - Foundational types shared by every lost and found crate
//!
//! This crate provides the building blocks used across the domain modules:
//! - Strongly-typed identifiers for items, claims and users
//! - The explicit `Session` describing who is acting
//! - The error taxonomy surfaced to callers
//! - Port infrastructure for storage adapters
//! - Pure sorting/filtering over already-fetched collections

pub mod identifiers;
pub mod session;
pub mod error;
pub mod ports;
pub mod listing;

pub use identifiers::{ItemId, ClaimId, UserId};
pub use session::{Actor, Role, Session};
pub use error::CoreError;
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
    OperationMetadata,
};
pub use listing::{
    Listable, SortDirection, SortKey, SortState,
    apply_listing, filter_entries, sort_entries,
};
