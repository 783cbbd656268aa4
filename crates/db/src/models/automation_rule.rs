//! Automation rule models and DTOs.

use helpdesk_core::rules::{ActionMap, ConditionMap, RuleType};
use helpdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `automation_rules` table.
///
/// `rule_type`, `conditions`, and `actions` are stored raw; conversion to
/// the typed domain rule happens in the API layer before validation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AutomationRule {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub priority: i32,
    pub is_active: bool,
    pub rule_type: String,
    pub conditions: Option<serde_json::Value>,
    pub actions: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new rule. The typed maps deserialize straight from
/// the request body so rule validation can run before any insert.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAutomationRule {
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_priority")]
    pub priority: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub rule_type: RuleType,
    #[serde(default)]
    pub conditions: Option<ConditionMap>,
    #[serde(default)]
    pub actions: ActionMap,
}

/// DTO for a full-body rule update (PUT).
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAutomationRule {
    pub name: String,
    pub description: Option<String>,
    pub priority: i32,
    pub is_active: bool,
    pub rule_type: RuleType,
    #[serde(default)]
    pub conditions: Option<ConditionMap>,
    #[serde(default)]
    pub actions: ActionMap,
}

/// PATCH body for the pause/resume toggle, kept separate from the full
/// form submit.
#[derive(Debug, Clone, Deserialize)]
pub struct SetRuleActive {
    pub is_active: bool,
}

fn default_priority() -> i32 {
    100
}

fn default_true() -> bool {
    true
}
