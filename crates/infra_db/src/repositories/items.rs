//! Found items repository
//!
//! SQL for the `found_items` table.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value as JsonValue;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

const ITEM_COLUMNS: &str = r#"
    item_id, title, public_description, category, color, location_found,
    date_found, image_urls, status, private_notes, storage_location,
    requires_id_for_pickup, verification_questions, created_by,
    created_at, updated_at
"#;

/// Database row for a found item
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FoundItemRow {
    pub item_id: Uuid,
    pub title: String,
    pub public_description: String,
    pub category: String,
    pub color: Option<String>,
    pub location_found: String,
    pub date_found: NaiveDate,
    pub image_urls: Vec<String>,
    pub status: String,
    pub private_notes: Option<String>,
    pub storage_location: Option<String>,
    pub requires_id_for_pickup: bool,
    /// Array of `{question, answer}` objects
    pub verification_questions: Json<JsonValue>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Filter for listing items
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    /// Status names to include; `None` means all
    pub statuses: Option<Vec<String>>,
}

/// Repository for the `found_items` table
#[derive(Debug, Clone)]
pub struct FoundItemRepository {
    pool: PgPool,
}

impl FoundItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves an item by its identifier
    pub async fn get_by_id(&self, item_id: Uuid) -> Result<FoundItemRow, DatabaseError> {
        let sql = format!("SELECT {ITEM_COLUMNS} FROM found_items WHERE item_id = $1");

        sqlx::query_as::<_, FoundItemRow>(&sql)
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("FoundItem", item_id))
    }

    /// Lists items newest first
    pub async fn find(&self, filter: &ItemFilter) -> Result<Vec<FoundItemRow>, DatabaseError> {
        let sql = format!(
            r#"
            SELECT {ITEM_COLUMNS}
            FROM found_items
            WHERE ($1::text[] IS NULL OR status = ANY($1))
            ORDER BY created_at DESC, item_id DESC
            "#
        );

        let rows = sqlx::query_as::<_, FoundItemRow>(&sql)
            .bind(filter.statuses.as_deref())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Inserts a newly logged item
    pub async fn insert(&self, row: &FoundItemRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO found_items (
                item_id, title, public_description, category, color, location_found,
                date_found, image_urls, status, private_notes, storage_location,
                requires_id_for_pickup, verification_questions, created_by,
                created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16
            )
            "#,
        )
        .bind(row.item_id)
        .bind(&row.title)
        .bind(&row.public_description)
        .bind(&row.category)
        .bind(&row.color)
        .bind(&row.location_found)
        .bind(row.date_found)
        .bind(&row.image_urls)
        .bind(&row.status)
        .bind(&row.private_notes)
        .bind(&row.storage_location)
        .bind(row.requires_id_for_pickup)
        .bind(&row.verification_questions)
        .bind(row.created_by)
        .bind(row.created_at)
        .bind(row.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Overwrites every mutable column of an existing item
    pub async fn update(&self, row: &FoundItemRow) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE found_items SET
                title = $2,
                public_description = $3,
                category = $4,
                color = $5,
                location_found = $6,
                date_found = $7,
                image_urls = $8,
                status = $9,
                private_notes = $10,
                storage_location = $11,
                requires_id_for_pickup = $12,
                verification_questions = $13,
                updated_at = $14
            WHERE item_id = $1
            "#,
        )
        .bind(row.item_id)
        .bind(&row.title)
        .bind(&row.public_description)
        .bind(&row.category)
        .bind(&row.color)
        .bind(&row.location_found)
        .bind(row.date_found)
        .bind(&row.image_urls)
        .bind(&row.status)
        .bind(&row.private_notes)
        .bind(&row.storage_location)
        .bind(row.requires_id_for_pickup)
        .bind(&row.verification_questions)
        .bind(row.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("FoundItem", row.item_id));
        }
        Ok(())
    }

    /// Deletes an item; its claims go with it through the foreign key
    pub async fn delete(&self, item_id: Uuid) -> Result<FoundItemRow, DatabaseError> {
        let sql = format!("DELETE FROM found_items WHERE item_id = $1 RETURNING {ITEM_COLUMNS}");

        sqlx::query_as::<_, FoundItemRow>(&sql)
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("FoundItem", item_id))
    }
}
