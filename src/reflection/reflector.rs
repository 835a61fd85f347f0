//! High-level reflection facade

use tracing::debug;

use crate::error::ReflectionError;
use crate::models::{FieldDescriptor, FieldType};
use crate::reflection::inverse::inverse;
use crate::reflection::path::resolve_path;
use crate::reflection::registry::ModelRegistry;
use crate::reflection::reverse::comodel_for;
use crate::reflection::types::{FieldInfo, InverseResult, ReferencingField, ResolvedPath};
use crate::reflection::lookup_field;
use crate::store::{FieldQuery, FieldStore, StrMatch};

/// Schema reflection entry point
///
/// Ties a field metadata store to a model-name registry snapshot. Every
/// operation gates its model argument through the registry first, so a typo
/// fails early with a `ModelNotFound` carrying ranked suggestions instead of
/// silently returning an empty result.
///
/// # Example
///
/// ```rust,ignore
/// use schema_reflect::{InMemoryFieldStore, SchemaReflector};
///
/// let store = InMemoryFieldStore::from_json(&snapshot)?;
/// let reflector = SchemaReflector::new(store);
///
/// for entry in reflector.comodel_for("res.partner")? {
///     println!("{}.{}", entry.field.model, entry.field.name);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SchemaReflector<S: FieldStore> {
    store: S,
    registry: ModelRegistry,
}

impl<S: FieldStore> SchemaReflector<S> {
    /// Create a reflector over a store, snapshotting its known-model set
    pub fn new(store: S) -> Self {
        let registry = ModelRegistry::from_store(&store);
        Self { store, registry }
    }

    /// Re-snapshot the known-model set from the store
    pub fn refresh(&mut self) {
        self.registry.refresh(&self.store);
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The current model-name registry snapshot
    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Resolve a model name to its canonical spelling
    pub fn resolve_model(&self, model: &str) -> Result<String, ReflectionError> {
        self.registry.resolve(model)
    }

    /// Compute the inverse field(s) of `(model, field)`
    pub fn inverse_of(&self, model: &str, field: &str) -> Result<InverseResult, ReflectionError> {
        let model = self.registry.resolve(model)?;
        let descriptor = lookup_field(&self.store, &model, field)?;
        inverse(&self.store, &descriptor)
    }

    /// Resolve a dotted field path starting from `model`
    pub fn resolve_path(&self, model: &str, path: &str) -> Result<ResolvedPath, ReflectionError> {
        let model = self.registry.resolve(model)?;
        resolve_path(&self.store, &model, path)
    }

    /// Find every field anywhere in the schema whose relation target is `model`
    pub fn comodel_for(&self, model: &str) -> Result<Vec<ReferencingField>, ReflectionError> {
        let model = self.registry.resolve(model)?;
        comodel_for(&self.store, &model)
    }

    /// The required fields of a model, ordered by field name
    pub fn required_fields(&self, model: &str) -> Result<Vec<FieldDescriptor>, ReflectionError> {
        let model = self.registry.resolve(model)?;
        let query = FieldQuery::new()
            .model(StrMatch::Eq(model))
            .required(true);
        Ok(self.store.find_fields(&query))
    }

    /// The relational fields of a model, ordered by field name
    pub fn relational_fields(
        &self,
        model: &str,
    ) -> Result<Vec<FieldDescriptor>, ReflectionError> {
        let model = self.registry.resolve(model)?;
        let query = FieldQuery::new().model(StrMatch::Eq(model)).ttype_in([
            FieldType::Many2one,
            FieldType::One2many,
            FieldType::Many2many,
        ]);
        Ok(self.store.find_fields(&query))
    }

    /// Full structured information for a field, addressed by plain name or
    /// dotted path
    ///
    /// Dotted paths are routed through path resolution, so the answer carries
    /// the traversed relation hops. For a relational terminal the computed
    /// inverse rides along.
    pub fn field_info(&self, model: &str, path: &str) -> Result<FieldInfo, ReflectionError> {
        let model = self.registry.resolve(model)?;
        debug!("field info query for '{}' on model '{}'", path, model);

        let ResolvedPath { hops, target } = resolve_path(&self.store, &model, path)?;
        let inverse = if target.is_relational() {
            Some(inverse(&self.store, &target)?)
        } else {
            None
        };
        Ok(FieldInfo {
            hops,
            field: target,
            inverse,
        })
    }
}
