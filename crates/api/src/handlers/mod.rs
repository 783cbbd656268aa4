//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers validate through `helpdesk_core` before any database call,
//! delegate persistence to the repositories in `helpdesk_db`, and map
//! errors via [`crate::error::AppError`].

pub mod automation_rules;
pub mod custom_fields;
pub mod field_values;
