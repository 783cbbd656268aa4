//! Repository for the `automation_rules` table.

use helpdesk_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use helpdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::automation_rule::{AutomationRule, CreateAutomationRule, UpdateAutomationRule};

const COLUMNS: &str = "id, name, description, priority, is_active, rule_type, \
     conditions, actions, created_at, updated_at";

/// Provides CRUD operations for automation rules.
pub struct AutomationRuleRepo;

impl AutomationRuleRepo {
    /// Insert a new rule, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAutomationRule,
    ) -> Result<AutomationRule, sqlx::Error> {
        let query = format!(
            "INSERT INTO automation_rules \
                (name, description, priority, is_active, rule_type, conditions, actions) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AutomationRule>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.priority)
            .bind(input.is_active)
            .bind(input.rule_type.as_str())
            .bind(conditions_value(input.conditions.as_ref()))
            .bind(actions_value(&input.actions))
            .fetch_one(pool)
            .await
    }

    /// Find a rule by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AutomationRule>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM automation_rules WHERE id = $1");
        sqlx::query_as::<_, AutomationRule>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List rules in evaluation order (priority ascending, then id).
    pub async fn list(
        pool: &PgPool,
        include_inactive: bool,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<AutomationRule>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
        let offset = clamp_offset(offset);

        let query = format!(
            "SELECT {COLUMNS} FROM automation_rules \
             WHERE (is_active OR $1) \
             ORDER BY priority ASC, id ASC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, AutomationRule>(&query)
            .bind(include_inactive)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Replace a rule with a full body (PUT semantics).
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAutomationRule,
    ) -> Result<Option<AutomationRule>, sqlx::Error> {
        let query = format!(
            "UPDATE automation_rules SET \
                name = $2, \
                description = $3, \
                priority = $4, \
                is_active = $5, \
                rule_type = $6, \
                conditions = $7, \
                actions = $8, \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AutomationRule>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.priority)
            .bind(input.is_active)
            .bind(input.rule_type.as_str())
            .bind(conditions_value(input.conditions.as_ref()))
            .bind(actions_value(&input.actions))
            .fetch_optional(pool)
            .await
    }

    /// Partial pause/resume toggle, distinct from the full-form update.
    pub async fn set_active(
        pool: &PgPool,
        id: DbId,
        is_active: bool,
    ) -> Result<Option<AutomationRule>, sqlx::Error> {
        let query = format!(
            "UPDATE automation_rules SET is_active = $2, updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AutomationRule>(&query)
            .bind(id)
            .bind(is_active)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a rule by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM automation_rules WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Serialize a condition map for storage. An empty map stores as NULL so
/// "no constraints" has a single canonical form on disk.
fn conditions_value(
    conditions: Option<&helpdesk_core::rules::ConditionMap>,
) -> Option<serde_json::Value> {
    conditions
        .filter(|c| !c.is_empty())
        .and_then(|c| serde_json::to_value(c).ok())
}

fn actions_value(actions: &helpdesk_core::rules::ActionMap) -> serde_json::Value {
    serde_json::to_value(actions).unwrap_or_else(|_| serde_json::json!({}))
}
