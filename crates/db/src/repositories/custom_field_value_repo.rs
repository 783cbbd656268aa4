//! Repository for the `custom_field_values` table.

use helpdesk_core::fields::set::FieldValueWrite;
use helpdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::custom_field_value::CustomFieldValue;

const COLUMNS: &str = "id, ticket_id, custom_field_id, value, created_at, updated_at";

/// Provides access to stored per-ticket field values.
pub struct CustomFieldValueRepo;

impl CustomFieldValueRepo {
    /// List all stored values for one ticket.
    pub async fn list_for_ticket(
        pool: &PgPool,
        ticket_id: DbId,
    ) -> Result<Vec<CustomFieldValue>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM custom_field_values \
             WHERE ticket_id = $1 \
             ORDER BY custom_field_id ASC"
        );
        sqlx::query_as::<_, CustomFieldValue>(&query)
            .bind(ticket_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a save batch: upsert each (ticket, field) pair in one
    /// transaction. Field ids absent from the batch are left untouched.
    pub async fn upsert_batch(
        pool: &PgPool,
        ticket_id: DbId,
        writes: &[FieldValueWrite],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        for write in writes {
            sqlx::query(
                "INSERT INTO custom_field_values (ticket_id, custom_field_id, value) \
                 VALUES ($1, $2, $3) \
                 ON CONFLICT (ticket_id, custom_field_id) \
                 DO UPDATE SET value = EXCLUDED.value, updated_at = now()",
            )
            .bind(ticket_id)
            .bind(write.custom_field_id)
            .bind(&write.value)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        tracing::debug!(ticket_id, count = writes.len(), "Applied custom field value batch");
        Ok(writes.len() as u64)
    }
}
