//! Inverse-relation inference
//!
//! Derives the inverse side of a relational field from the flat descriptor
//! table, which carries no guaranteed bidirectional links. many2many inverses
//! are discovered structurally through the join table; many2one/one2many
//! inverses come from the declared `relation_field` when present, otherwise
//! from a reverse scan over the other side's declarations.

use tracing::{debug, warn};

use crate::error::{ReflectionError, SchemaError};
use crate::models::{FieldDescriptor, FieldType};
use crate::reflection::types::InverseResult;
use crate::store::{FieldQuery, FieldStore, StrMatch};

/// Compute the inverse field(s) of a descriptor
///
/// Non-relational fields short-circuit to an empty result without searching.
/// A relational field with no relation target is malformed metadata and fails
/// with [`SchemaError::MissingRelation`].
pub fn inverse<S: FieldStore + ?Sized>(
    store: &S,
    field: &FieldDescriptor,
) -> Result<InverseResult, ReflectionError> {
    if !field.is_relational() {
        return Ok(InverseResult::empty());
    }
    let Some(target) = field.relation.as_deref() else {
        return Err(SchemaError::MissingRelation {
            model: field.model.clone(),
            field: field.name.clone(),
        }
        .into());
    };

    if field.ttype == FieldType::Many2many {
        return Ok(many2many_inverse(store, field));
    }

    if let Some(relation_field) = &field.relation_field {
        return declared_inverse(store, field, target, relation_field).map(InverseResult::single);
    }

    Ok(reverse_scan(store, field))
}

/// A many2many relation is defined by a symmetric join table with exactly two
/// participating fields; the other one is the inverse by construction,
/// regardless of which model declared it first.
fn many2many_inverse<S: FieldStore + ?Sized>(
    store: &S,
    field: &FieldDescriptor,
) -> InverseResult {
    let Some(table) = &field.relation_table else {
        // No join table recorded, so the other side cannot be derived.
        return InverseResult::empty();
    };
    let query = FieldQuery::new()
        .relation_table(StrMatch::Eq(table.clone()))
        .name(StrMatch::NotEq(field.name.clone()));
    InverseResult::from_fields(store.find_fields(&query))
}

/// The declared inverse takes precedence and is trusted without further
/// search. A declaration naming a field that does not exist on the target
/// model is stale metadata, surfaced at this point of use.
fn declared_inverse<S: FieldStore + ?Sized>(
    store: &S,
    field: &FieldDescriptor,
    target: &str,
    relation_field: &str,
) -> Result<FieldDescriptor, ReflectionError> {
    let query = FieldQuery::new()
        .model(StrMatch::Eq(target.to_string()))
        .name(StrMatch::Eq(relation_field.to_string()));
    store
        .find_fields(&query)
        .into_iter()
        .next()
        .ok_or_else(|| {
            SchemaError::StaleInverse {
                model: field.model.clone(),
                field: field.name.clone(),
                target: target.to_string(),
                inverse: relation_field.to_string(),
            }
            .into()
        })
}

/// Relational pairs are symmetric: if the other side declares "my inverse is
/// this field", it is the inverse even though this side carries no pointer.
/// Several fields may legitimately claim the same inverse; all are returned.
fn reverse_scan<S: FieldStore + ?Sized>(store: &S, field: &FieldDescriptor) -> InverseResult {
    let query = FieldQuery::new()
        .relation(StrMatch::Eq(field.model.clone()))
        .relation_field(StrMatch::Eq(field.name.clone()));
    let result = InverseResult::from_fields(store.find_fields(&query));
    if result.is_ambiguous() {
        warn!(
            "field '{}.{}' has {} candidate inverse fields",
            field.model,
            field.name,
            result.fields.len()
        );
    } else {
        debug!(
            "reverse scan for '{}.{}' found {} inverse field(s)",
            field.model,
            field.name,
            result.fields.len()
        );
    }
    result
}
