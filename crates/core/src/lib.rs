//! Helpdesk core domain logic.
//!
//! Pure, database-free building blocks for the custom ticket field engine
//! and the automation rule editor. The API and repository layers depend on
//! this crate; it depends on nothing internal.

pub mod error;
pub mod fields;
pub mod pagination;
pub mod rules;
pub mod types;
