//! Claims repository
//!
//! SQL for the `claims` table. Pickup details live in four nullable columns
//! that are either all set or all empty.

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

const CLAIM_COLUMNS: &str = r#"
    claim_id, item_id, claimant_id, claimant_name, answers, additional_details,
    contact_email, contact_phone, status, review_notes, reviewed_by, reviewed_at,
    pickup_date, pickup_verification_type, pickup_notes, pickup_recorded_by,
    created_at, updated_at
"#;

/// Database row for a claim
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimRow {
    pub claim_id: Uuid,
    pub item_id: Uuid,
    pub claimant_id: Uuid,
    pub claimant_name: String,
    /// Array of `{question, answer}` objects
    pub answers: Json<JsonValue>,
    pub additional_details: Option<String>,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub status: String,
    pub review_notes: Option<String>,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub pickup_date: Option<DateTime<Utc>>,
    pub pickup_verification_type: Option<String>,
    pub pickup_notes: Option<String>,
    pub pickup_recorded_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Filter for listing claims; every field narrows the result
#[derive(Debug, Clone, Default)]
pub struct ClaimFilter {
    pub claimant_id: Option<Uuid>,
    pub item_id: Option<Uuid>,
    pub picked_up: Option<bool>,
}

/// Repository for the `claims` table
#[derive(Debug, Clone)]
pub struct ClaimsRepository {
    pool: PgPool,
}

impl ClaimsRepository {
    /// Creates a new ClaimsRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a claim by its identifier
    ///
    /// # Returns
    ///
    /// The claim record or NotFound error
    pub async fn get_by_id(&self, claim_id: Uuid) -> Result<ClaimRow, DatabaseError> {
        let sql = format!("SELECT {CLAIM_COLUMNS} FROM claims WHERE claim_id = $1");

        sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(claim_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Claim", claim_id))
    }

    /// Lists claims newest first
    pub async fn find(&self, filter: &ClaimFilter) -> Result<Vec<ClaimRow>, DatabaseError> {
        let sql = format!(
            r#"
            SELECT {CLAIM_COLUMNS}
            FROM claims
            WHERE ($1::uuid IS NULL OR claimant_id = $1)
              AND ($2::uuid IS NULL OR item_id = $2)
              AND ($3::boolean IS NULL OR (pickup_date IS NOT NULL) = $3)
            ORDER BY created_at DESC, claim_id DESC
            "#
        );

        let rows = sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(filter.claimant_id)
            .bind(filter.item_id)
            .bind(filter.picked_up)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Inserts a new claim
    ///
    /// # Errors
    ///
    /// `DatabaseError::DuplicateEntry` when the claimant already holds a
    /// claim on the item
    pub async fn insert(&self, row: &ClaimRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO claims (
                claim_id, item_id, claimant_id, claimant_name, answers, additional_details,
                contact_email, contact_phone, status, review_notes, reviewed_by, reviewed_at,
                pickup_date, pickup_verification_type, pickup_notes, pickup_recorded_by,
                created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18
            )
            "#,
        )
        .bind(row.claim_id)
        .bind(row.item_id)
        .bind(row.claimant_id)
        .bind(&row.claimant_name)
        .bind(&row.answers)
        .bind(&row.additional_details)
        .bind(&row.contact_email)
        .bind(&row.contact_phone)
        .bind(&row.status)
        .bind(&row.review_notes)
        .bind(row.reviewed_by)
        .bind(row.reviewed_at)
        .bind(row.pickup_date)
        .bind(&row.pickup_verification_type)
        .bind(&row.pickup_notes)
        .bind(row.pickup_recorded_by)
        .bind(row.created_at)
        .bind(row.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Overwrites the mutable columns of an existing claim
    pub async fn update(&self, row: &ClaimRow) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE claims SET
                answers = $2,
                additional_details = $3,
                contact_email = $4,
                contact_phone = $5,
                status = $6,
                review_notes = $7,
                reviewed_by = $8,
                reviewed_at = $9,
                pickup_date = $10,
                pickup_verification_type = $11,
                pickup_notes = $12,
                pickup_recorded_by = $13,
                updated_at = $14
            WHERE claim_id = $1
            "#,
        )
        .bind(row.claim_id)
        .bind(&row.answers)
        .bind(&row.additional_details)
        .bind(&row.contact_email)
        .bind(&row.contact_phone)
        .bind(&row.status)
        .bind(&row.review_notes)
        .bind(row.reviewed_by)
        .bind(row.reviewed_at)
        .bind(row.pickup_date)
        .bind(&row.pickup_verification_type)
        .bind(&row.pickup_notes)
        .bind(row.pickup_recorded_by)
        .bind(row.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Claim", row.claim_id));
        }
        Ok(())
    }

    /// Deletes a claim and returns the removed row
    pub async fn delete(&self, claim_id: Uuid) -> Result<ClaimRow, DatabaseError> {
        let sql = format!("DELETE FROM claims WHERE claim_id = $1 RETURNING {CLAIM_COLUMNS}");

        sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(claim_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Claim", claim_id))
    }

    /// Deletes every claim on an item and returns the number of rows removed
    pub async fn delete_for_item(&self, item_id: Uuid) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM claims WHERE item_id = $1")
            .bind(item_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
