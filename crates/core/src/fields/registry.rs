//! Field type registry: the closed set of supported field types and, for
//! each, the widget class, config shape, and default config.
//!
//! Unknown type tags from the backend deserialize to [`FieldType::Text`] so
//! forward-compatible data never crashes a client. The fallback is a
//! deliberate arm in [`FieldType::parse`], not an accidental omission.

use serde::{Deserialize, Serialize};

/// The data type of a custom ticket field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Textarea,
    Number,
    Date,
    #[serde(rename = "datetime")]
    DateTime,
    Boolean,
    Select,
    #[serde(rename = "multiselect")]
    MultiSelect,
    Url,
    Email,
    Phone,
}

impl FieldType {
    /// Parse a raw type tag, falling back to `Text` for anything unknown.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "text" => Self::Text,
            "textarea" => Self::Textarea,
            "number" => Self::Number,
            "date" => Self::Date,
            "datetime" => Self::DateTime,
            "boolean" => Self::Boolean,
            "select" => Self::Select,
            "multiselect" => Self::MultiSelect,
            "url" => Self::Url,
            "email" => Self::Email,
            "phone" => Self::Phone,
            _ => Self::Text,
        }
    }

    /// The storage tag for this type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Number => "number",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Boolean => "boolean",
            Self::Select => "select",
            Self::MultiSelect => "multiselect",
            Self::Url => "url",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }

    /// Whether this type carries an options list in its config.
    pub fn has_options(self) -> bool {
        matches!(self, Self::Select | Self::MultiSelect)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Deserialization goes through `parse` so unknown tags degrade to text
// instead of rejecting the whole payload.
impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(FieldType::parse(&raw))
    }
}

/// One selectable option for `select` / `multiselect` fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

/// Type-specific configuration attached to a field definition.
///
/// Only the entries relevant to the field type are populated: `options` for
/// choice types, `min`/`max`/`step` for numbers. Everything else leaves the
/// whole config null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

impl FieldConfig {
    /// The options list, or an empty slice when absent.
    pub fn options_slice(&self) -> &[FieldOption] {
        self.options.as_deref().unwrap_or(&[])
    }
}

/// The widget class an edit-mode input dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    SingleLine,
    MultiLine,
    Number,
    DatePicker,
    DateTimePicker,
    Checkbox,
    Dropdown,
    MultiDropdown,
    UrlInput,
    EmailInput,
    PhoneInput,
}

/// The shape of config a field type expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigShape {
    None,
    Options,
    NumberRange,
}

/// Everything the renderer and the definition editor need to know about a
/// field type.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    pub input_kind: InputKind,
    pub config_shape: ConfigShape,
    pub default_config: Option<FieldConfig>,
}

/// Describe a field type. Total over the enum; pure lookup.
pub fn describe(field_type: FieldType) -> TypeDescriptor {
    match field_type {
        FieldType::Text => descriptor(InputKind::SingleLine, ConfigShape::None),
        FieldType::Textarea => descriptor(InputKind::MultiLine, ConfigShape::None),
        FieldType::Number => TypeDescriptor {
            input_kind: InputKind::Number,
            config_shape: ConfigShape::NumberRange,
            default_config: None,
        },
        FieldType::Date => descriptor(InputKind::DatePicker, ConfigShape::None),
        FieldType::DateTime => descriptor(InputKind::DateTimePicker, ConfigShape::None),
        FieldType::Boolean => descriptor(InputKind::Checkbox, ConfigShape::None),
        FieldType::Select => TypeDescriptor {
            input_kind: InputKind::Dropdown,
            config_shape: ConfigShape::Options,
            default_config: Some(FieldConfig {
                options: Some(Vec::new()),
                ..FieldConfig::default()
            }),
        },
        FieldType::MultiSelect => TypeDescriptor {
            input_kind: InputKind::MultiDropdown,
            config_shape: ConfigShape::Options,
            default_config: Some(FieldConfig {
                options: Some(Vec::new()),
                ..FieldConfig::default()
            }),
        },
        FieldType::Url => descriptor(InputKind::UrlInput, ConfigShape::None),
        FieldType::Email => descriptor(InputKind::EmailInput, ConfigShape::None),
        FieldType::Phone => descriptor(InputKind::PhoneInput, ConfigShape::None),
    }
}

fn descriptor(input_kind: InputKind, config_shape: ConfigShape) -> TypeDescriptor {
    TypeDescriptor {
        input_kind,
        config_shape,
        default_config: None,
    }
}
