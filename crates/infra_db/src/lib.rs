//! Infrastructure Database Layer
//!
//! PostgreSQL storage for the lost-and-found system using SQLx.
//!
//! # Architecture
//!
//! Two layers sit on top of the connection pool:
//!
//! - **Repositories** own the SQL and speak in row types
//! - **Adapters** implement `FoundItemPort` and `ClaimPort`, translating
//!   rows to domain values and database errors to `PortError`
//!
//! Item categories and statuses are stored as their upper-case text names.
//! Verification questions and claim answers are stored as JSONB arrays.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig};
//! use infra_db::adapters::{PostgresClaimAdapter, PostgresFoundItemAdapter};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/claim_regain")).await?;
//! run_migrations(&pool).await?;
//! let items = PostgresFoundItemAdapter::new(pool.clone());
//! let claims = PostgresClaimAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, create_pool_from_url, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use adapters::{PostgresClaimAdapter, PostgresFoundItemAdapter};
