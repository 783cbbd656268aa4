//! Automation rule data model and the per-rule-type key tables.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// The rule's discriminant: determines the legal keyset of `actions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    AutoAssign,
    AutoClose,
    AutoNotify,
}

impl RuleType {
    /// The storage tag for this rule type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AutoAssign => "auto_assign",
            Self::AutoClose => "auto_close",
            Self::AutoNotify => "auto_notify",
        }
    }
}

impl std::fmt::Display for RuleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sparse condition map: key -> scalar. Insertion-ordered.
pub type ConditionMap = IndexMap<String, serde_json::Value>;

/// Sparse action map, keyed per [`RuleType`]. Insertion-ordered.
pub type ActionMap = IndexMap<String, serde_json::Value>;

// Action keys.
pub const ACTION_ASSIGN_TO_USER_ID: &str = "assign_to_user_id";
pub const ACTION_ASSIGN_TO_DEPARTMENT_ID: &str = "assign_to_department_id";
pub const ACTION_ASSIGN_TO_ROLE: &str = "assign_to_role";
pub const ACTION_ROUND_ROBIN: &str = "round_robin";
pub const ACTION_CLOSE_AFTER_HOURS: &str = "close_after_hours";
pub const ACTION_ONLY_IF_RESOLVED: &str = "only_if_resolved";
pub const ACTION_NOTIFY_USERS: &str = "notify_users";
pub const ACTION_NOTIFY_ROLES: &str = "notify_roles";
pub const ACTION_MESSAGE: &str = "message";

/// The three assignment-target keys form a mutual-exclusion group.
pub const ASSIGNMENT_TARGET_KEYS: &[&str] = &[
    ACTION_ASSIGN_TO_USER_ID,
    ACTION_ASSIGN_TO_DEPARTMENT_ID,
    ACTION_ASSIGN_TO_ROLE,
];

/// The legal action keys for a rule type.
pub fn legal_action_keys(rule_type: RuleType) -> &'static [&'static str] {
    match rule_type {
        RuleType::AutoAssign => &[
            ACTION_ASSIGN_TO_USER_ID,
            ACTION_ASSIGN_TO_DEPARTMENT_ID,
            ACTION_ASSIGN_TO_ROLE,
            ACTION_ROUND_ROBIN,
        ],
        RuleType::AutoClose => &[ACTION_CLOSE_AFTER_HOURS, ACTION_ONLY_IF_RESOLVED],
        RuleType::AutoNotify => &[ACTION_NOTIFY_USERS, ACTION_NOTIFY_ROLES, ACTION_MESSAGE],
    }
}

/// The mutual-exclusion groups for a rule type. Setting one member of a
/// group clears the others. New keys that join no group leave this table
/// untouched.
pub fn exclusion_groups(rule_type: RuleType) -> &'static [&'static [&'static str]] {
    match rule_type {
        RuleType::AutoAssign => &[ASSIGNMENT_TARGET_KEYS],
        RuleType::AutoClose | RuleType::AutoNotify => &[],
    }
}

/// One automation definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationRule {
    pub id: DbId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Lower number = evaluated first.
    pub priority: i32,
    pub is_active: bool,
    pub rule_type: RuleType,
    /// `None` and an empty map both mean "no constraints".
    #[serde(default)]
    pub conditions: Option<ConditionMap>,
    #[serde(default)]
    pub actions: ActionMap,
}

impl AutomationRule {
    /// Whether the conditions constrain anything. `None` and `{}` are
    /// equivalent.
    pub fn is_unconstrained(&self) -> bool {
        self.conditions.as_ref().map(|c| c.is_empty()).unwrap_or(true)
    }
}

/// Whether an action value counts as unset: null, blank string, or an
/// empty list.
pub fn value_is_empty(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::String(s) => s.trim().is_empty(),
        serde_json::Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
