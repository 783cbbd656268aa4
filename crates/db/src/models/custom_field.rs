//! Custom field definition models and DTOs.

use helpdesk_core::fields::{FieldConfig, FieldDefinition, FieldType};
use helpdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `custom_fields` table.
///
/// `field_type` and `config` are stored in their raw forms (text tag and
/// JSONB); [`CustomField::to_definition`] converts them into the typed
/// shapes the engine works with.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CustomField {
    pub id: DbId,
    pub name: String,
    pub label: String,
    pub label_en: Option<String>,
    pub field_type: String,
    pub config: Option<serde_json::Value>,
    pub is_required: bool,
    pub is_visible_to_user: bool,
    pub is_editable_by_user: bool,
    pub default_value: Option<String>,
    pub display_order: i32,
    pub category: Option<String>,
    pub department_id: Option<DbId>,
    pub branch_id: Option<DbId>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CustomField {
    /// Convert the raw row into an engine definition. Unknown type tags
    /// degrade to text; malformed config degrades to no config.
    pub fn to_definition(&self) -> FieldDefinition {
        FieldDefinition {
            id: self.id,
            name: self.name.clone(),
            label: self.label.clone(),
            label_en: self.label_en.clone(),
            field_type: FieldType::parse(&self.field_type),
            config: self
                .config
                .clone()
                .and_then(|raw| serde_json::from_value::<FieldConfig>(raw).ok()),
            is_required: self.is_required,
            is_visible_to_user: self.is_visible_to_user,
            is_editable_by_user: self.is_editable_by_user,
            default_value: self.default_value.clone(),
            display_order: self.display_order,
            category: self.category.clone(),
            department_id: self.department_id,
            branch_id: self.branch_id,
            is_active: self.is_active,
        }
    }
}

/// DTO for creating a new field definition.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomField {
    pub name: String,
    pub label: String,
    pub label_en: Option<String>,
    pub field_type: FieldType,
    pub config: Option<FieldConfig>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default = "default_true")]
    pub is_visible_to_user: bool,
    #[serde(default = "default_true")]
    pub is_editable_by_user: bool,
    pub default_value: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    pub category: Option<String>,
    pub department_id: Option<DbId>,
    pub branch_id: Option<DbId>,
}

fn default_true() -> bool {
    true
}

/// DTO for updating an existing definition. All fields are optional;
/// `name` and `field_type` are write-once and intentionally absent.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCustomField {
    pub label: Option<String>,
    pub label_en: Option<String>,
    pub config: Option<FieldConfig>,
    pub is_required: Option<bool>,
    pub is_visible_to_user: Option<bool>,
    pub is_editable_by_user: Option<bool>,
    pub default_value: Option<String>,
    pub display_order: Option<i32>,
    pub category: Option<String>,
    pub department_id: Option<DbId>,
    pub branch_id: Option<DbId>,
    pub is_active: Option<bool>,
}
