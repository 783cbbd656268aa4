//! Custom field set management: which definitions apply to a ticket, in
//! what order, hydrated with which values, and what goes back to storage
//! on save.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::definition::FieldDefinition;
use crate::types::DbId;

/// The applicability scope of a ticket: its category, department, and
/// branch. A `None` axis on a definition means "applies everywhere along
/// that axis"; a `None` axis on the scope matches only null-scoped
/// definitions for that axis.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scope {
    pub category: Option<String>,
    pub department_id: Option<DbId>,
    pub branch_id: Option<DbId>,
}

impl Scope {
    /// A scope with no axes set; only globally-applicable definitions match.
    pub fn unscoped() -> Self {
        Self::default()
    }
}

/// Whether a definition applies to a scope. All three axes are
/// AND-combined; a null axis on the definition always matches.
pub fn applies_to(definition: &FieldDefinition, scope: &Scope) -> bool {
    axis_matches(definition.category.as_deref(), scope.category.as_deref())
        && axis_matches(definition.department_id, scope.department_id)
        && axis_matches(definition.branch_id, scope.branch_id)
}

fn axis_matches<T: PartialEq>(definition_axis: Option<T>, scope_axis: Option<T>) -> bool {
    match definition_axis {
        None => true,
        Some(required) => scope_axis.map(|s| s == required).unwrap_or(false),
    }
}

/// Filter to the active definitions applicable to `scope` and sort them by
/// `display_order`, ties broken by original collection order (stable sort).
pub fn applicable_fields(definitions: Vec<FieldDefinition>, scope: &Scope) -> Vec<FieldDefinition> {
    let mut applicable: Vec<FieldDefinition> = definitions
        .into_iter()
        .filter(|d| d.is_active && applies_to(d, scope))
        .collect();
    applicable.sort_by_key(|d| d.display_order);
    applicable
}

/// A stored value for one (ticket, field) pair.
#[derive(Debug, Clone)]
pub struct StoredValue {
    pub value_id: DbId,
    pub value: Option<String>,
}

/// A definition paired with its current encoded value for one ticket.
#[derive(Debug, Clone, Serialize)]
pub struct HydratedField {
    #[serde(flatten)]
    pub definition: FieldDefinition,
    /// Current encoded value, falling back to the definition's default.
    pub value: Option<String>,
    /// Id of the stored value row, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_id: Option<DbId>,
}

/// Pair each definition with its stored value (keyed by definition id),
/// falling back to the definition's `default_value` when absent.
pub fn hydrate(
    definitions: Vec<FieldDefinition>,
    values: &HashMap<DbId, StoredValue>,
) -> Vec<HydratedField> {
    definitions
        .into_iter()
        .map(|definition| {
            let stored = values.get(&definition.id);
            let value = stored
                .and_then(|s| s.value.clone())
                .or_else(|| definition.default_value.clone());
            HydratedField {
                value,
                value_id: stored.map(|s| s.value_id),
                definition,
            }
        })
        .collect()
}

/// One entry in a save batch: a full overwrite for this field id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValueWrite {
    pub custom_field_id: DbId,
    pub value: String,
}

/// Build the save batch from the in-memory value set.
///
/// Only fields whose current value is non-null and non-empty are included;
/// a field cleared back to empty is omitted from the batch rather than
/// explicitly sent as null, so the backend leaves its previous value
/// untouched. This mirrors the historical save contract and is pinned by
/// tests.
pub fn build_save_batch(entries: &[(DbId, Option<String>)]) -> Vec<FieldValueWrite> {
    entries
        .iter()
        .filter_map(|(custom_field_id, value)| {
            let value = value.as_deref()?;
            if value.is_empty() {
                return None;
            }
            Some(FieldValueWrite {
                custom_field_id: *custom_field_id,
                value: value.to_string(),
            })
        })
        .collect()
}
