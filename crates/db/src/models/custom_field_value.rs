//! Stored custom field value models and DTOs.

use helpdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `custom_field_values` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CustomFieldValue {
    pub id: DbId,
    pub ticket_id: DbId,
    pub custom_field_id: DbId,
    pub value: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Batch save body: a full overwrite for exactly the field ids present.
/// Omitted ids are left untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldValueBatch {
    pub values: Vec<FieldValueEntry>,
}

/// One entry of a batch save.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldValueEntry {
    pub custom_field_id: DbId,
    pub value: Option<String>,
}
