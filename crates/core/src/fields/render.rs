//! Field renderer: dispatches a definition plus its current encoded value
//! to an editable control or a read-only presentation.
//!
//! The output is a serializable description of what the admin UI should
//! draw, not markup. Visibility is a hard gate checked before any type
//! dispatch: an invisible field renders nothing in either mode.

use serde::Serialize;

use super::codec::{self, FieldValue};
use super::definition::FieldDefinition;
use super::registry::{describe, FieldOption, FieldType, InputKind};

/// Placeholder shown for read-only fields with no value.
pub const EMPTY_PLACEHOLDER: &str = "\u{2014}";

/// Which presentation a field is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Edit,
    ReadOnly,
}

/// A rendered field in either mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RenderedField {
    Edit(EditControl),
    ReadOnly(ReadOnlyField),
}

/// An editable input, ready for the form layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditControl {
    pub name: String,
    pub label: String,
    pub input: InputKind,
    /// Effective encoded value: current value, else default, else empty.
    pub value: String,
    /// Marks native submission-required on the input.
    pub required: bool,
    /// A non-editable field stays visible and populated, only interaction
    /// is blocked.
    pub disabled: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

/// A read-only field presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadOnlyField {
    pub name: String,
    pub label: String,
    pub display: DisplayValue,
}

/// The display-only formatting of a stored value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayValue {
    /// Plain text, including resolved select labels and formatted dates.
    Text { text: String },
    /// Boolean yes/no glyph.
    YesNo { value: bool },
    /// Resolved multiselect labels, in stored order.
    Labels { labels: Vec<String> },
    /// A link affordance for url/email/phone values.
    Link { link: LinkKind, value: String },
    /// No value: rendered as [`EMPTY_PLACEHOLDER`].
    Placeholder,
}

/// The affordance a link-type value renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    Url,
    Email,
    Phone,
}

/// Render a field definition with its current encoded value.
///
/// Returns `None` when the definition is not visible to the user,
/// regardless of mode.
pub fn render(
    definition: &FieldDefinition,
    encoded: Option<&str>,
    mode: RenderMode,
) -> Option<RenderedField> {
    if !definition.is_visible_to_user {
        return None;
    }

    Some(match mode {
        RenderMode::Edit => RenderedField::Edit(render_edit(definition, encoded)),
        RenderMode::ReadOnly => RenderedField::ReadOnly(render_read_only(definition, encoded)),
    })
}

fn render_edit(definition: &FieldDefinition, encoded: Option<&str>) -> EditControl {
    let value = encoded
        .or(definition.default_value.as_deref())
        .unwrap_or("")
        .to_string();

    let config = definition.config.as_ref();

    EditControl {
        name: definition.name.clone(),
        label: definition.label.clone(),
        input: describe(definition.field_type).input_kind,
        value,
        required: definition.is_required,
        disabled: !definition.is_editable_by_user,
        options: definition.options().to_vec(),
        min: config.and_then(|c| c.min),
        max: config.and_then(|c| c.max),
        step: config.and_then(|c| c.step),
    }
}

fn render_read_only(definition: &FieldDefinition, encoded: Option<&str>) -> ReadOnlyField {
    let effective = encoded.or(definition.default_value.as_deref());

    let display = match effective {
        None | Some("") => DisplayValue::Placeholder,
        Some(raw) => format_value(definition, raw),
    };

    ReadOnlyField {
        name: definition.name.clone(),
        label: definition.label.clone(),
        display,
    }
}

fn format_value(definition: &FieldDefinition, raw: &str) -> DisplayValue {
    match definition.field_type {
        FieldType::Boolean => DisplayValue::YesNo {
            value: codec::decode_bool(Some(raw)),
        },
        FieldType::Select => DisplayValue::Text {
            text: resolve_label(definition.options(), raw),
        },
        FieldType::MultiSelect => {
            let labels = raw
                .split(',')
                .map(|value| resolve_label(definition.options(), value))
                .collect();
            DisplayValue::Labels { labels }
        }
        FieldType::Date => DisplayValue::Text {
            text: match codec::decode(FieldType::Date, Some(raw)) {
                Some(FieldValue::Date(d)) => d.format("%b %-d, %Y").to_string(),
                _ => raw.to_string(),
            },
        },
        FieldType::DateTime => DisplayValue::Text {
            text: match codec::decode(FieldType::DateTime, Some(raw)) {
                Some(FieldValue::DateTime(dt)) => dt.format("%b %-d, %Y %H:%M").to_string(),
                _ => raw.to_string(),
            },
        },
        FieldType::Url => DisplayValue::Link {
            link: LinkKind::Url,
            value: raw.to_string(),
        },
        FieldType::Email => DisplayValue::Link {
            link: LinkKind::Email,
            value: raw.to_string(),
        },
        FieldType::Phone => DisplayValue::Link {
            link: LinkKind::Phone,
            value: raw.to_string(),
        },
        FieldType::Text | FieldType::Textarea | FieldType::Number => DisplayValue::Text {
            text: raw.to_string(),
        },
    }
}

/// Resolve a stored option value to its label, falling back to the raw
/// value when the option has since been removed from the definition.
fn resolve_label(options: &[FieldOption], value: &str) -> String {
    options
        .iter()
        .find(|o| o.value == value)
        .map(|o| o.label.clone())
        .unwrap_or_else(|| value.to_string())
}

/// Toggle one option in an encoded multiselect value.
///
/// Adds the option when absent, removes it when present, and keeps the
/// remaining selections in first-selected-first-kept order. Returns the
/// re-encoded value (`None` when nothing remains selected).
pub fn toggle_option(encoded: Option<&str>, option_value: &str) -> Option<String> {
    let mut selected = match codec::decode(FieldType::MultiSelect, encoded) {
        Some(FieldValue::Selections(values)) => values,
        _ => Vec::new(),
    };

    if let Some(pos) = selected.iter().position(|v| v == option_value) {
        selected.remove(pos);
    } else {
        selected.push(option_value.to_string());
    }

    codec::encode(FieldType::MultiSelect, &FieldValue::Selections(selected))
}
