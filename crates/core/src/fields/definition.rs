//! Custom field definitions and the validation applied before one is
//! created or updated.
//!
//! A definition's `name` and `field_type` are write-once: `name` keys
//! stored values, and changing `field_type` would invalidate the codec
//! contract for values already on disk. The update path in the repository
//! layer never touches either column.

use serde::{Deserialize, Serialize};

use super::registry::{FieldConfig, FieldType};
use crate::error::CoreError;
use crate::types::DbId;

/// Metadata describing one custom ticket field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub id: DbId,
    /// Internal key, unique, immutable after creation.
    pub name: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_en: Option<String>,
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<FieldConfig>,
    pub is_required: bool,
    pub is_visible_to_user: bool,
    pub is_editable_by_user: bool,
    /// Pre-encoded in the same format the codec produces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    pub display_order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<DbId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<DbId>,
    pub is_active: bool,
}

impl FieldDefinition {
    /// The options list from config, or an empty slice.
    pub fn options(&self) -> &[super::registry::FieldOption] {
        self.config
            .as_ref()
            .map(|c| c.options_slice())
            .unwrap_or(&[])
    }
}

/// Validate the metadata of a definition about to be created.
///
/// These are the checks surfaced synchronously, before any storage call:
/// mandatory `name` and `label`, and at least one option for choice types.
/// Option values must not contain commas, since the multiselect storage
/// encoding joins on commas with no escaping.
pub fn validate_definition(
    name: &str,
    label: &str,
    field_type: FieldType,
    config: Option<&FieldConfig>,
) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Field name is required".into()));
    }
    if label.trim().is_empty() {
        return Err(CoreError::Validation("Field label is required".into()));
    }

    if field_type.has_options() {
        let options = config.map(|c| c.options_slice()).unwrap_or(&[]);
        if options.is_empty() {
            return Err(CoreError::Validation(format!(
                "Field type '{field_type}' requires at least one option"
            )));
        }
        if let Some(bad) = options.iter().find(|o| o.value.contains(',')) {
            return Err(CoreError::Validation(format!(
                "Option value '{}' must not contain a comma",
                bad.value
            )));
        }
    }

    Ok(())
}

/// Normalize a config for storage given the field's type.
///
/// Choice types keep their options list; number fields keep only the
/// `min`/`max`/`step` entries that are present, with the whole config
/// collapsing to `None` when all three are blank; every other type stores
/// no config at all.
pub fn normalized_config(field_type: FieldType, config: Option<FieldConfig>) -> Option<FieldConfig> {
    match field_type {
        FieldType::Select | FieldType::MultiSelect => {
            let options = config.and_then(|c| c.options)?;
            Some(FieldConfig {
                options: Some(options),
                ..FieldConfig::default()
            })
        }
        FieldType::Number => {
            let config = config?;
            normalize_number_config(config.min, config.max, config.step)
        }
        _ => None,
    }
}

/// Build a number config from its three optional entries, omitting blanks
/// individually and returning `None` when all three are blank.
pub fn normalize_number_config(
    min: Option<f64>,
    max: Option<f64>,
    step: Option<f64>,
) -> Option<FieldConfig> {
    if min.is_none() && max.is_none() && step.is_none() {
        return None;
    }
    Some(FieldConfig {
        options: None,
        min,
        max,
        step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::registry::FieldOption;
    use assert_matches::assert_matches;

    fn option(value: &str) -> FieldOption {
        FieldOption {
            value: value.into(),
            label: value.to_uppercase(),
        }
    }

    fn options_config(values: &[&str]) -> FieldConfig {
        FieldConfig {
            options: Some(values.iter().map(|v| option(v)).collect()),
            ..FieldConfig::default()
        }
    }

    #[test]
    fn name_and_label_are_mandatory() {
        assert_matches!(
            validate_definition("", "Priority", FieldType::Text, None),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_definition("priority", "  ", FieldType::Text, None),
            Err(CoreError::Validation(_))
        );
        assert!(validate_definition("priority", "Priority", FieldType::Text, None).is_ok());
    }

    #[test]
    fn choice_types_require_an_option() {
        assert_matches!(
            validate_definition("env", "Environment", FieldType::Select, None),
            Err(CoreError::Validation(_))
        );
        let empty = options_config(&[]);
        assert_matches!(
            validate_definition("env", "Environment", FieldType::MultiSelect, Some(&empty)),
            Err(CoreError::Validation(_))
        );
        let config = options_config(&["prod", "staging"]);
        assert!(
            validate_definition("env", "Environment", FieldType::Select, Some(&config)).is_ok()
        );
    }

    #[test]
    fn option_values_with_commas_are_rejected() {
        let config = options_config(&["a,b"]);
        assert_matches!(
            validate_definition("tags", "Tags", FieldType::MultiSelect, Some(&config)),
            Err(CoreError::Validation(msg)) if msg.contains("comma")
        );
    }

    #[test]
    fn number_config_omits_blank_entries() {
        let config = normalize_number_config(Some(1.0), None, Some(0.5)).unwrap();
        assert_eq!(config.min, Some(1.0));
        assert_eq!(config.max, None);
        assert_eq!(config.step, Some(0.5));

        assert_eq!(normalize_number_config(None, None, None), None);
    }

    #[test]
    fn normalized_config_drops_config_for_plain_types() {
        let config = options_config(&["x"]);
        assert_eq!(normalized_config(FieldType::Text, Some(config)), None);
        assert_eq!(normalized_config(FieldType::Date, None), None);
    }

    #[test]
    fn normalized_config_keeps_options_only_for_choice_types() {
        let mut config = options_config(&["x", "y"]);
        config.min = Some(3.0); // stray entry, dropped
        let normalized = normalized_config(FieldType::Select, Some(config)).unwrap();
        assert_eq!(normalized.options_slice().len(), 2);
        assert_eq!(normalized.min, None);
    }

    #[test]
    fn normalized_config_for_number_uses_entry_normalization() {
        let config = FieldConfig {
            min: Some(0.0),
            ..FieldConfig::default()
        };
        let normalized = normalized_config(FieldType::Number, Some(config)).unwrap();
        assert_eq!(normalized.min, Some(0.0));

        let blank = FieldConfig::default();
        assert_eq!(normalized_config(FieldType::Number, Some(blank)), None);
    }
}
