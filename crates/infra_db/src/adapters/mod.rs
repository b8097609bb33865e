//! Domain Adapters
//!
//! PostgreSQL implementations of the domain ports. Each adapter:
//! - Implements the domain's port trait
//! - Translates between domain models and database row types
//! - Uses the repository layer for database operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresClaimAdapter;
//! use domain_claims::ClaimPort;
//!
//! let adapter = PostgresClaimAdapter::new(pool);
//! let claim = adapter.get_claim(claim_id, None).await?;
//! ```

pub mod items;
pub mod claims;

pub use items::PostgresFoundItemAdapter;
pub use claims::PostgresClaimAdapter;

use chrono::Utc;
use sqlx::PgPool;

use core_kernel::{AdapterHealth, HealthCheckResult, PortError};

/// Runs `SELECT 1` against the pool and reports the outcome
pub(crate) async fn check_pool(pool: &PgPool, adapter_id: &str) -> HealthCheckResult {
    let start = std::time::Instant::now();

    let result = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await;

    let latency_ms = start.elapsed().as_millis() as u64;

    let (status, message) = match result {
        Ok(_) => (AdapterHealth::Healthy, None),
        Err(e) => (AdapterHealth::Unhealthy, Some(format!("Database error: {}", e))),
    };

    HealthCheckResult {
        adapter_id: adapter_id.to_string(),
        status,
        latency_ms,
        message,
        checked_at: Utc::now(),
    }
}

/// Maps a stored value that no longer parses into a domain value
pub(crate) fn transformation<E: std::fmt::Display>(column: &str) -> impl FnOnce(E) -> PortError + '_ {
    move |e| PortError::transformation(format!("{}: {}", column, e))
}
