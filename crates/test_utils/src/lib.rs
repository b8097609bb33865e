//! Test Utilities Crate
//!
//! Shared test infrastructure, fixtures, and helpers for the lost and found
//! test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built sessions, items and claim answers
//! - `builders`: Builder patterns for items and claims in any phase
//! - `database`: PostgreSQL test containers with the schema applied
//! - `assertions`: Assertion helpers for errors, views and orderings
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
