//! Stateful rule editor: mutates a draft [`AutomationRule`] while keeping
//! the rule-type/action contract intact.
//!
//! Invariants maintained across every edit:
//! - `actions` only ever holds keys legal for the current `rule_type`.
//! - At most one member of a mutual-exclusion group is populated.
//! - An empty condition map collapses to `None`, never `{}`.

use serde_json::Value;

use super::model::{
    exclusion_groups, legal_action_keys, value_is_empty, ActionMap, AutomationRule, ConditionMap,
    RuleType, ACTION_CLOSE_AFTER_HOURS, ACTION_NOTIFY_ROLES, ACTION_NOTIFY_USERS,
    ACTION_ONLY_IF_RESOLVED, ASSIGNMENT_TARGET_KEYS,
};
use crate::error::CoreError;
use crate::types::DbId;

/// Editor over one draft rule. One open editor owns the draft; nothing
/// else mutates it concurrently.
#[derive(Debug, Clone)]
pub struct RuleEditor {
    rule: AutomationRule,
}

impl RuleEditor {
    /// Start editing an existing rule.
    pub fn new(rule: AutomationRule) -> Self {
        Self { rule }
    }

    /// Start a blank draft of the given type.
    pub fn blank(rule_type: RuleType) -> Self {
        Self {
            rule: AutomationRule {
                id: 0,
                name: String::new(),
                description: None,
                priority: 100,
                is_active: true,
                rule_type,
                conditions: None,
                actions: Default::default(),
            },
        }
    }

    pub fn rule(&self) -> &AutomationRule {
        &self.rule
    }

    pub fn into_rule(self) -> AutomationRule {
        self.rule
    }

    pub fn set_name(&mut self, name: &str) {
        self.rule.name = name.to_string();
    }

    /// Switch the rule type. Actions are reset to empty since their legal
    /// keyset changes; conditions are type-agnostic and survive the switch.
    pub fn set_rule_type(&mut self, rule_type: RuleType) {
        if self.rule.rule_type == rule_type {
            return;
        }
        self.rule.rule_type = rule_type;
        self.rule.actions.clear();
    }

    /// Set one action. An empty value removes the key; a non-empty value
    /// on a mutual-exclusion group member clears the rest of the group in
    /// the same update.
    pub fn set_action(&mut self, key: &str, value: Value) -> Result<(), CoreError> {
        let legal = legal_action_keys(self.rule.rule_type);
        if !legal.contains(&key) {
            return Err(CoreError::Validation(format!(
                "Action '{}' is not valid for rule type '{}'",
                key, self.rule.rule_type
            )));
        }

        if value_is_empty(&value) {
            self.rule.actions.shift_remove(key);
            return Ok(());
        }

        for group in exclusion_groups(self.rule.rule_type) {
            if group.contains(&key) {
                for other in group.iter().filter(|k| **k != key) {
                    self.rule.actions.shift_remove(*other);
                }
            }
        }

        self.rule.actions.insert(key.to_string(), value);
        Ok(())
    }

    /// Remove one action key.
    pub fn remove_action(&mut self, key: &str) {
        self.rule.actions.shift_remove(key);
    }

    /// Add a condition key with an empty value.
    pub fn add_condition(&mut self, key: &str) {
        self.rule
            .conditions
            .get_or_insert_with(ConditionMap::new)
            .insert(key.to_string(), Value::String(String::new()));
    }

    /// Set a condition to a concrete scalar.
    pub fn set_condition(&mut self, key: &str, value: Value) {
        self.rule
            .conditions
            .get_or_insert_with(ConditionMap::new)
            .insert(key.to_string(), value);
    }

    /// Remove a condition key. An emptied map is replaced with `None`
    /// rather than `{}`; callers treat both as "no constraints".
    pub fn remove_condition(&mut self, key: &str) {
        if let Some(conditions) = self.rule.conditions.as_mut() {
            conditions.shift_remove(key);
            if conditions.is_empty() {
                self.rule.conditions = None;
            }
        }
    }

    /// Validate the draft for submission.
    pub fn validate_for_submit(&self) -> Result<(), CoreError> {
        validate_rule(&self.rule)
    }
}

/// Rule-type-specific submission validation, shared by the editor and the
/// API layer (which receives full rule bodies wholesale).
pub fn validate_rule(rule: &AutomationRule) -> Result<(), CoreError> {
    if rule.name.trim().is_empty() {
        return Err(CoreError::Validation("Rule name is required".into()));
    }

    let legal = legal_action_keys(rule.rule_type);
    for key in rule.actions.keys() {
        if !legal.contains(&key.as_str()) {
            return Err(CoreError::Validation(format!(
                "Action '{}' is not valid for rule type '{}'",
                key, rule.rule_type
            )));
        }
    }

    for group in exclusion_groups(rule.rule_type) {
        let populated = group
            .iter()
            .filter(|key| {
                rule.actions
                    .get(**key)
                    .map(|v| !value_is_empty(v))
                    .unwrap_or(false)
            })
            .count();
        if populated > 1 {
            return Err(CoreError::Validation(format!(
                "Actions {} are mutually exclusive",
                group.join(", ")
            )));
        }
    }

    match rule.rule_type {
        RuleType::AutoAssign => {
            let has_target = ASSIGNMENT_TARGET_KEYS.iter().any(|key| {
                rule.actions
                    .get(*key)
                    .map(|v| !value_is_empty(v))
                    .unwrap_or(false)
            });
            if !has_target {
                return Err(CoreError::Validation(
                    "An auto_assign rule requires an assignment target".into(),
                ));
            }
        }
        RuleType::AutoClose => {
            if let Some(hours) = rule.actions.get(ACTION_CLOSE_AFTER_HOURS) {
                let positive = hours.as_i64().map(|h| h > 0).unwrap_or(false);
                if !positive {
                    return Err(CoreError::Validation(
                        "close_after_hours must be a positive integer".into(),
                    ));
                }
            }
            if let Some(flag) = rule.actions.get(ACTION_ONLY_IF_RESOLVED) {
                if !flag.is_boolean() {
                    return Err(CoreError::Validation(
                        "only_if_resolved must be a boolean".into(),
                    ));
                }
            }
        }
        RuleType::AutoNotify => {}
    }

    Ok(())
}

/// Normalize list-valued notify actions submitted as comma-separated text
/// into proper arrays. Tokens that fail to parse as the expected type are
/// silently discarded, not reported.
pub fn normalize_list_actions(rule_type: RuleType, actions: &mut ActionMap) {
    if rule_type != RuleType::AutoNotify {
        return;
    }

    if let Some(Value::String(raw)) = actions.get(ACTION_NOTIFY_USERS).cloned() {
        actions.insert(
            ACTION_NOTIFY_USERS.to_string(),
            Value::from(parse_id_list(&raw)),
        );
    }
    if let Some(Value::String(raw)) = actions.get(ACTION_NOTIFY_ROLES).cloned() {
        actions.insert(
            ACTION_NOTIFY_ROLES.to_string(),
            Value::from(parse_tag_list(&raw)),
        );
    }
}

/// Parse a comma-separated id list, silently dropping tokens that fail to
/// parse as integers.
pub fn parse_id_list(input: &str) -> Vec<DbId> {
    input
        .split(',')
        .filter_map(|token| token.trim().parse::<DbId>().ok())
        .collect()
}

/// Parse a comma-separated tag list, dropping empty tokens.
pub fn parse_tag_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::model::{
        ACTION_ASSIGN_TO_DEPARTMENT_ID, ACTION_ASSIGN_TO_ROLE, ACTION_ASSIGN_TO_USER_ID,
        ACTION_MESSAGE, ACTION_NOTIFY_USERS, ACTION_ROUND_ROBIN,
    };
    use assert_matches::assert_matches;
    use serde_json::json;

    fn assignment_targets_populated(editor: &RuleEditor) -> usize {
        ASSIGNMENT_TARGET_KEYS
            .iter()
            .filter(|key| editor.rule().actions.contains_key(**key))
            .count()
    }

    #[test]
    fn setting_a_target_clears_the_rest_of_the_group() {
        let mut editor = RuleEditor::blank(RuleType::AutoAssign);

        editor.set_action(ACTION_ASSIGN_TO_USER_ID, json!(7)).unwrap();
        editor.set_action(ACTION_ASSIGN_TO_ROLE, json!("admin")).unwrap();
        assert_eq!(assignment_targets_populated(&editor), 1);
        assert_eq!(editor.rule().actions.get(ACTION_ASSIGN_TO_ROLE), Some(&json!("admin")));

        editor
            .set_action(ACTION_ASSIGN_TO_DEPARTMENT_ID, json!(3))
            .unwrap();
        assert_eq!(assignment_targets_populated(&editor), 1);
        assert_eq!(
            editor.rule().actions.get(ACTION_ASSIGN_TO_DEPARTMENT_ID),
            Some(&json!(3))
        );
    }

    // For any sequence of edits, at most one target is populated after
    // each step.
    #[test]
    fn mutual_exclusion_holds_across_edit_sequences() {
        let mut editor = RuleEditor::blank(RuleType::AutoAssign);
        let edits = [
            (ACTION_ASSIGN_TO_USER_ID, json!(1)),
            (ACTION_ROUND_ROBIN, json!(true)),
            (ACTION_ASSIGN_TO_ROLE, json!("tier2")),
            (ACTION_ASSIGN_TO_USER_ID, json!("")),
            (ACTION_ASSIGN_TO_DEPARTMENT_ID, json!(5)),
            (ACTION_ASSIGN_TO_ROLE, json!("tier1")),
        ];

        for (key, value) in edits {
            editor.set_action(key, value).unwrap();
            assert!(
                assignment_targets_populated(&editor) <= 1,
                "more than one assignment target after setting {key}"
            );
        }
        // round_robin is not part of the group and survives throughout.
        assert_eq!(editor.rule().actions.get(ACTION_ROUND_ROBIN), Some(&json!(true)));
    }

    #[test]
    fn empty_value_removes_the_key() {
        let mut editor = RuleEditor::blank(RuleType::AutoAssign);
        editor.set_action(ACTION_ASSIGN_TO_ROLE, json!("admin")).unwrap();
        editor.set_action(ACTION_ASSIGN_TO_ROLE, json!("")).unwrap();
        assert!(editor.rule().actions.is_empty());
    }

    #[test]
    fn illegal_action_key_is_rejected() {
        let mut editor = RuleEditor::blank(RuleType::AutoClose);
        assert_matches!(
            editor.set_action(ACTION_ASSIGN_TO_USER_ID, json!(1)),
            Err(CoreError::Validation(_))
        );
        assert!(editor.rule().actions.is_empty());
    }

    #[test]
    fn switching_rule_type_resets_actions_and_keeps_conditions() {
        let mut editor = RuleEditor::blank(RuleType::AutoAssign);
        editor.set_action(ACTION_ASSIGN_TO_ROLE, json!("admin")).unwrap();
        editor.set_condition("priority", json!("high"));

        editor.set_rule_type(RuleType::AutoClose);

        assert!(editor.rule().actions.is_empty());
        assert_eq!(
            editor.rule().conditions.as_ref().unwrap().get("priority"),
            Some(&json!("high"))
        );

        // Switching to the current type is a no-op.
        editor.set_action(ACTION_CLOSE_AFTER_HOURS, json!(48)).unwrap();
        editor.set_rule_type(RuleType::AutoClose);
        assert!(!editor.rule().actions.is_empty());
    }

    #[test]
    fn adding_a_condition_inserts_an_empty_value() {
        let mut editor = RuleEditor::blank(RuleType::AutoNotify);
        editor.add_condition("status");
        assert_eq!(
            editor.rule().conditions.as_ref().unwrap().get("status"),
            Some(&json!(""))
        );
    }

    #[test]
    fn removing_the_last_condition_collapses_to_none() {
        let mut editor = RuleEditor::blank(RuleType::AutoNotify);
        editor.set_condition("priority", json!("high"));
        editor.remove_condition("priority");
        assert!(editor.rule().conditions.is_none());

        // Removing from an already-None map stays None.
        editor.remove_condition("priority");
        assert!(editor.rule().conditions.is_none());
    }

    #[test]
    fn auto_assign_requires_a_target_on_submit() {
        let mut editor = RuleEditor::blank(RuleType::AutoAssign);
        editor.set_name("assign critical");
        assert_matches!(editor.validate_for_submit(), Err(CoreError::Validation(_)));

        editor.set_action(ACTION_ASSIGN_TO_USER_ID, json!(12)).unwrap();
        assert!(editor.validate_for_submit().is_ok());
    }

    #[test]
    fn rule_name_is_required_on_submit() {
        let editor = RuleEditor::blank(RuleType::AutoNotify);
        assert_matches!(editor.validate_for_submit(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn close_after_hours_must_be_positive() {
        let mut editor = RuleEditor::blank(RuleType::AutoClose);
        editor.set_name("close stale");
        editor.set_action(ACTION_CLOSE_AFTER_HOURS, json!(0)).unwrap();
        assert_matches!(editor.validate_for_submit(), Err(CoreError::Validation(_)));

        editor.set_action(ACTION_CLOSE_AFTER_HOURS, json!(72)).unwrap();
        assert!(editor.validate_for_submit().is_ok());

        // No hard requirement beyond shape for auto_close.
        editor.remove_action(ACTION_CLOSE_AFTER_HOURS);
        assert!(editor.validate_for_submit().is_ok());
    }

    #[test]
    fn wholesale_bodies_with_two_targets_are_rejected() {
        let mut rule = RuleEditor::blank(RuleType::AutoAssign).into_rule();
        rule.name = "bad".into();
        rule.actions.insert(ACTION_ASSIGN_TO_USER_ID.into(), json!(1));
        rule.actions.insert(ACTION_ASSIGN_TO_ROLE.into(), json!("admin"));
        assert_matches!(validate_rule(&rule), Err(CoreError::Validation(_)));
    }

    #[test]
    fn notify_lists_parse_with_invalid_tokens_dropped() {
        assert_eq!(parse_id_list("1, 2, x, 3,"), vec![1, 2, 3]);
        assert_eq!(parse_id_list(""), Vec::<DbId>::new());
        assert_eq!(
            parse_tag_list(" admin, , supervisor "),
            vec!["admin".to_string(), "supervisor".to_string()]
        );

        let mut editor = RuleEditor::blank(RuleType::AutoNotify);
        editor
            .set_action(ACTION_NOTIFY_USERS, json!(parse_id_list("4,oops,9")))
            .unwrap();
        editor.set_action(ACTION_MESSAGE, json!("heads up")).unwrap();
        assert_eq!(
            editor.rule().actions.get(ACTION_NOTIFY_USERS),
            Some(&json!([4, 9]))
        );
    }

    #[test]
    fn comma_separated_text_normalizes_to_arrays() {
        let mut actions = ActionMap::new();
        actions.insert(ACTION_NOTIFY_USERS.into(), json!("3, 7, bogus, 11"));
        actions.insert(ACTION_NOTIFY_ROLES.into(), json!("admin, ,tier1"));
        actions.insert(ACTION_MESSAGE.into(), json!("escalated"));

        normalize_list_actions(RuleType::AutoNotify, &mut actions);

        assert_eq!(actions.get(ACTION_NOTIFY_USERS), Some(&json!([3, 7, 11])));
        assert_eq!(actions.get(ACTION_NOTIFY_ROLES), Some(&json!(["admin", "tier1"])));
        assert_eq!(actions.get(ACTION_MESSAGE), Some(&json!("escalated")));

        // Already-typed arrays pass through untouched, and other rule
        // types are never rewritten.
        let mut actions = ActionMap::new();
        actions.insert(ACTION_NOTIFY_USERS.into(), json!([1, 2]));
        normalize_list_actions(RuleType::AutoNotify, &mut actions);
        assert_eq!(actions.get(ACTION_NOTIFY_USERS), Some(&json!([1, 2])));

        let mut actions = ActionMap::new();
        actions.insert(ACTION_ASSIGN_TO_ROLE.into(), json!("admin"));
        normalize_list_actions(RuleType::AutoAssign, &mut actions);
        assert_eq!(actions.get(ACTION_ASSIGN_TO_ROLE), Some(&json!("admin")));
    }
}
