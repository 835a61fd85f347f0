//! Schema metadata models
//!
//! Defines the strongly-typed field descriptor the reflection layer queries,
//! replacing duck-typed access to live schema records: every optional
//! attribute is an explicit `Option`, not an attribute-presence check.

pub mod enums;
pub mod field;

pub use enums::{FieldType, SelectionOption};
pub use field::FieldDescriptor;
