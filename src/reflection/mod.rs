//! Schema reflection core
//!
//! Relation-inference and path-resolution logic over a field metadata store:
//!
//! - **Model name resolution** - validate a model identifier, rank
//!   close matches on a typo
//! - **Inverse inference** - derive the other side of a relational field
//!   from a flat descriptor table with no guaranteed bidirectional links
//! - **Path resolution** - walk a dotted chain of field names across models
//! - **Reverse reference index** - list every field targeting a given model
//!
//! All operations are pure, synchronous reads returning structured data;
//! rendering to human-readable text is the caller's concern.

pub mod inverse;
pub mod path;
pub mod registry;
pub mod reflector;
pub mod reverse;
pub mod types;

pub use inverse::inverse;
pub use path::resolve_path;
pub use registry::ModelRegistry;
pub use reflector::SchemaReflector;
pub use reverse::comodel_for;
pub use types::{FieldInfo, InverseResult, PathHop, ReferencingField, ResolvedPath};

use crate::error::ReflectionError;
use crate::models::FieldDescriptor;
use crate::store::{FieldQuery, FieldStore, StrMatch};

/// Look up the descriptor for `(model, name)`, failing with `FieldNotFound`
pub(crate) fn lookup_field<S: FieldStore + ?Sized>(
    store: &S,
    model: &str,
    name: &str,
) -> Result<FieldDescriptor, ReflectionError> {
    let query = FieldQuery::new()
        .model(StrMatch::Eq(model.to_string()))
        .name(StrMatch::Eq(name.to_string()));
    store
        .find_fields(&query)
        .into_iter()
        .next()
        .ok_or_else(|| ReflectionError::FieldNotFound {
            model: model.to_string(),
            field: name.to_string(),
        })
}
