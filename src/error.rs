//! Error types for schema reflection queries

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A ranked suggestion surfaced when a model name fails to resolve
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelSuggestion {
    /// Known model name this candidate was close to
    pub model: String,
    /// Similarity score (0.0-1.0, higher is closer)
    pub score: f64,
}

/// Errors that can occur while answering a reflection query
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReflectionError {
    /// The model name is not in the known-model set. Suggestions are
    /// advisory only; the lookup has still failed.
    #[error("model not found: '{model}'")]
    ModelNotFound {
        model: String,
        suggestions: Vec<ModelSuggestion>,
    },

    /// No field descriptor exists for `(model, field)`
    #[error("field not found: '{field}' on model '{model}'")]
    FieldNotFound { model: String, field: String },

    /// A non-terminal path segment named a non-relational field
    #[error("cannot traverse '{field}' on model '{model}': not a relational field")]
    NotTraversable { model: String, field: String },

    /// Malformed metadata upstream
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Malformed field metadata detected during snapshot load or at the point
/// a query touches the offending descriptor
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SchemaError {
    /// A relational-typed field has no relation target set
    #[error("relational field '{model}.{field}' has no relation target")]
    MissingRelation { model: String, field: String },

    /// A many2many field is missing its join-table identity, or a
    /// non-many2many field carries one
    #[error("invalid join-table metadata on field '{model}.{field}'")]
    InvalidRelationTable { model: String, field: String },

    /// A non-relational field carries a relation target
    #[error("non-relational field '{model}.{field}' has a relation target")]
    UnexpectedRelation { model: String, field: String },

    /// A declared inverse points at a field that does not exist
    #[error(
        "field '{model}.{field}' declares inverse '{target}.{inverse}', which does not exist"
    )]
    StaleInverse {
        model: String,
        field: String,
        target: String,
        inverse: String,
    },

    /// Two descriptors share the same `(model, name)` identity
    #[error("duplicate field descriptor: '{field}' on model '{model}'")]
    DuplicateField { model: String, field: String },

    /// A metadata snapshot could not be parsed
    #[error("snapshot parse error: {0}")]
    Snapshot(String),
}

impl From<serde_json::Error> for SchemaError {
    fn from(e: serde_json::Error) -> Self {
        SchemaError::Snapshot(e.to_string())
    }
}
