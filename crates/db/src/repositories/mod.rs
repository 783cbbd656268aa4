//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod automation_rule_repo;
pub mod custom_field_repo;
pub mod custom_field_value_repo;

pub use automation_rule_repo::AutomationRuleRepo;
pub use custom_field_repo::CustomFieldRepo;
pub use custom_field_value_repo::CustomFieldValueRepo;
