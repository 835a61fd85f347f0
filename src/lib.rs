//! Schema Reflect - Schema reflection over relational model metadata
//!
//! Provides structured answers to schema questions against a read-only store
//! of field descriptors:
//! - Required / relational field listings per model
//! - Inverse-relation inference (declared, reverse-scanned, or join-table
//!   derived)
//! - Dotted field-path resolution across models
//! - Reverse reference indexing ("which fields target this model")
//! - Model name validation with ranked typo suggestions

pub mod error;
pub mod models;
pub mod reflection;
pub mod store;

// Re-export commonly used types
pub use error::{ModelSuggestion, ReflectionError, SchemaError};
pub use models::{FieldDescriptor, FieldType, SelectionOption};
pub use reflection::{
    FieldInfo, InverseResult, ModelRegistry, PathHop, ReferencingField, ResolvedPath,
    SchemaReflector, comodel_for, inverse, resolve_path,
};
pub use store::{FieldQuery, FieldStore, InMemoryFieldStore, StrMatch};
