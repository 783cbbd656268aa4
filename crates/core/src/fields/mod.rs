//! The custom ticket field engine.
//!
//! Field definitions are data, not code: a [`registry::FieldType`] tag plus
//! per-type config drives the input widget, the read-only presentation, and
//! the string codec every stored value passes through. The modules here are
//! purely in-memory; the repository layer hands them rows and takes back
//! encoded strings.

pub mod codec;
pub mod definition;
pub mod registry;
pub mod render;
pub mod set;

pub use codec::{decode, encode, FieldValue};
pub use definition::FieldDefinition;
pub use registry::{describe, FieldConfig, FieldOption, FieldType, InputKind};
