//! Automation rules: typed data plus the editor that keeps a draft rule
//! consistent while it is being edited.
//!
//! A rule is a `rule_type` tag, a sparse condition map (absent key =
//! unconstrained), and an action map whose legal keys derive from the tag.
//! The shapes here are independent of the field engine but share its
//! "sparse typed map with add/remove" pattern.

pub mod editor;
pub mod model;

pub use editor::{normalize_list_actions, parse_id_list, parse_tag_list, validate_rule, RuleEditor};
pub use model::{ActionMap, AutomationRule, ConditionMap, RuleType};
