//! Reverse reference index
//!
//! Answers "what points at me": every field, in any model, whose relation
//! target is a given model. The structural dual of inverse inference, which
//! answers "what do I point at".

use tracing::debug;

use crate::error::ReflectionError;
use crate::reflection::inverse::inverse;
use crate::reflection::types::ReferencingField;
use crate::store::{FieldQuery, FieldStore, StrMatch};

/// Find every field whose relation target is `model`
///
/// Results are ordered by the referencing field's owning model name, ties
/// broken by field name, and each entry is annotated with its computed
/// inverse. An external collaborator can use the returned field identities to
/// search for live referencing records; this layer performs schema queries
/// only.
pub fn comodel_for<S: FieldStore + ?Sized>(
    store: &S,
    model: &str,
) -> Result<Vec<ReferencingField>, ReflectionError> {
    let query = FieldQuery::new().relation(StrMatch::Eq(model.to_string()));
    let referencing = store.find_fields(&query);
    debug!(
        "{} field(s) reference model '{}' as their target",
        referencing.len(),
        model
    );

    let mut entries = Vec::with_capacity(referencing.len());
    for field in referencing {
        let inverse = inverse(store, &field)?;
        entries.push(ReferencingField { field, inverse });
    }
    Ok(entries)
}
