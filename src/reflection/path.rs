//! Dotted field-path resolution
//!
//! Walks a dot-separated chain of field names across models, one relation per
//! non-final segment, terminating at the final segment's full descriptor. The
//! traversal is an explicit loop over the segments with a current-model
//! cursor; it is bounded by the path length, so termination is structural.

use tracing::debug;

use crate::error::{ReflectionError, SchemaError};
use crate::reflection::lookup_field;
use crate::reflection::types::{PathHop, ResolvedPath};
use crate::store::FieldStore;

/// Resolve a dotted field path starting from `model`
///
/// Each non-final segment must name a relational field on the current model;
/// the cursor then advances to that field's relation target. The final
/// segment may be of any ttype and is returned in full.
pub fn resolve_path<S: FieldStore + ?Sized>(
    store: &S,
    model: &str,
    path: &str,
) -> Result<ResolvedPath, ReflectionError> {
    debug!("resolving path '{}' starting from model '{}'", path, model);

    // split('.') yields at least one segment, even for an empty path.
    let segments: Vec<&str> = path.split('.').collect();
    let (last, intermediate) = segments.split_last().unwrap_or((&"", &[]));

    let mut current = model.to_string();
    let mut hops = Vec::new();

    for (index, segment) in intermediate.iter().enumerate() {
        let field = lookup_field(store, &current, segment)?;
        if !field.is_relational() {
            return Err(ReflectionError::NotTraversable {
                model: current,
                field: field.name,
            });
        }
        let Some(relation) = field.relation.clone() else {
            return Err(SchemaError::MissingRelation {
                model: field.model,
                field: field.name,
            }
            .into());
        };
        hops.push(PathHop { index, field });
        current = relation;
    }

    let target = lookup_field(store, &current, last)?;
    Ok(ResolvedPath { hops, target })
}
