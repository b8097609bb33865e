//! Repository implementations
//!
//! Each repository owns the SQL for one table and maps between rows and
//! query parameters. Domain types never appear here; the adapters convert.
//!
//! Queries are built at runtime with `sqlx::query_as::<_, Row>` against
//! `#[derive(sqlx::FromRow)]` row types, so the crate builds without a live
//! database.

pub mod items;
pub mod claims;

pub use items::{FoundItemRepository, FoundItemRow, ItemFilter};
pub use claims::{ClaimsRepository, ClaimRow, ClaimFilter};
