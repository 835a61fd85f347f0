//! Field metadata store abstraction
//!
//! Defines the `FieldStore` trait the reflection layer queries, the
//! `FieldQuery` predicate type, and `InMemoryFieldStore`, a snapshot-backed
//! implementation. All string matching is case-insensitive, mirroring the
//! `=ilike` semantics of the metadata store this crate was built against.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::SchemaError;
use crate::models::{FieldDescriptor, FieldType};

/// A single string-matching condition inside a `FieldQuery`
///
/// Every variant matches case-insensitively. Matching against an attribute
/// that is unset fails the positive variants (`Eq`, `In`, `Like`) and
/// satisfies the negated ones (`NotEq`, `NotLike`).
#[derive(Debug, Clone, PartialEq)]
pub enum StrMatch {
    /// Exact match
    Eq(String),
    /// Set membership
    In(Vec<String>),
    /// Substring match
    Like(String),
    /// Exact mismatch
    NotEq(String),
    /// Substring mismatch
    NotLike(String),
}

impl StrMatch {
    fn matches(&self, value: Option<&str>) -> bool {
        let Some(value) = value else {
            return matches!(self, StrMatch::NotEq(_) | StrMatch::NotLike(_));
        };
        let value = value.to_lowercase();
        match self {
            StrMatch::Eq(want) => value == want.to_lowercase(),
            StrMatch::In(set) => set.iter().any(|w| value == w.to_lowercase()),
            StrMatch::Like(want) => value.contains(&want.to_lowercase()),
            StrMatch::NotEq(want) => value != want.to_lowercase(),
            StrMatch::NotLike(want) => !value.contains(&want.to_lowercase()),
        }
    }
}

/// Conjunctive predicate over the queryable descriptor attributes
///
/// # Example
///
/// ```rust
/// use schema_reflect::store::{FieldQuery, StrMatch};
/// use schema_reflect::models::FieldType;
///
/// let query = FieldQuery::new()
///     .model(StrMatch::Eq("res.partner".into()))
///     .ttype_in([FieldType::Many2one, FieldType::One2many, FieldType::Many2many]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldQuery {
    model: Option<StrMatch>,
    name: Option<StrMatch>,
    ttype: Option<Vec<FieldType>>,
    relation: Option<StrMatch>,
    relation_field: Option<StrMatch>,
    relation_table: Option<StrMatch>,
    required: Option<bool>,
}

impl FieldQuery {
    /// Create an empty query matching every descriptor
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrain the owning model name
    pub fn model(mut self, m: StrMatch) -> Self {
        self.model = Some(m);
        self
    }

    /// Constrain the field name
    pub fn name(mut self, m: StrMatch) -> Self {
        self.name = Some(m);
        self
    }

    /// Constrain the ttype to exactly one kind
    pub fn ttype(self, ttype: FieldType) -> Self {
        self.ttype_in([ttype])
    }

    /// Constrain the ttype to a set of kinds
    pub fn ttype_in(mut self, ttypes: impl IntoIterator<Item = FieldType>) -> Self {
        self.ttype = Some(ttypes.into_iter().collect());
        self
    }

    /// Constrain the relation target
    pub fn relation(mut self, m: StrMatch) -> Self {
        self.relation = Some(m);
        self
    }

    /// Constrain the declared inverse field name
    pub fn relation_field(mut self, m: StrMatch) -> Self {
        self.relation_field = Some(m);
        self
    }

    /// Constrain the many2many join-table name
    pub fn relation_table(mut self, m: StrMatch) -> Self {
        self.relation_table = Some(m);
        self
    }

    /// Constrain the required flag
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Whether a descriptor satisfies every condition of this query
    #[must_use]
    pub fn matches(&self, field: &FieldDescriptor) -> bool {
        if let Some(m) = &self.model
            && !m.matches(Some(&field.model))
        {
            return false;
        }
        if let Some(m) = &self.name
            && !m.matches(Some(&field.name))
        {
            return false;
        }
        if let Some(ttypes) = &self.ttype
            && !ttypes.contains(&field.ttype)
        {
            return false;
        }
        if let Some(m) = &self.relation
            && !m.matches(field.relation.as_deref())
        {
            return false;
        }
        if let Some(m) = &self.relation_field
            && !m.matches(field.relation_field.as_deref())
        {
            return false;
        }
        if let Some(m) = &self.relation_table
            && !m.matches(field.relation_table.as_deref())
        {
            return false;
        }
        if let Some(required) = self.required
            && field.required != required
        {
            return false;
        }
        true
    }
}

/// Trait for field metadata stores
///
/// The reflection layer issues several sequential reads per operation (the
/// path resolver in particular), so an implementation must present a
/// consistent schema for the duration of a call. All operations are
/// synchronous, read-only schema queries; no record data is touched.
pub trait FieldStore: Send + Sync {
    /// Return every descriptor satisfying the query, ordered by owning model
    /// name, then field name
    fn find_fields(&self, query: &FieldQuery) -> Vec<FieldDescriptor>;

    /// Return the set of model names appearing in the store
    fn known_models(&self) -> BTreeSet<String>;
}

/// Snapshot-backed field metadata store
///
/// Holds an ordered, validated set of descriptors in memory. Snapshots are
/// immutable once built; take a new snapshot to observe schema changes.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFieldStore {
    fields: Vec<FieldDescriptor>,
}

impl InMemoryFieldStore {
    /// Build a store from a descriptor collection
    ///
    /// Rejects descriptors that violate their structural invariants and
    /// duplicate `(model, name)` identities. Ordering is normalized to
    /// (model, name) so query results are deterministic.
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = FieldDescriptor>,
    ) -> Result<Self, SchemaError> {
        let mut fields: Vec<FieldDescriptor> = descriptors.into_iter().collect();
        let mut seen = BTreeSet::new();
        for field in &fields {
            field.validate()?;
            let key = (field.model.to_lowercase(), field.name.to_lowercase());
            if !seen.insert(key) {
                return Err(SchemaError::DuplicateField {
                    model: field.model.clone(),
                    field: field.name.clone(),
                });
            }
        }
        fields.sort_by(|a, b| (&a.model, &a.name).cmp(&(&b.model, &b.name)));
        debug!("loaded field metadata snapshot with {} descriptors", fields.len());
        Ok(Self { fields })
    }

    /// Build a store from a JSON array of descriptors
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let descriptors: Vec<FieldDescriptor> = serde_json::from_str(json)?;
        Self::from_descriptors(descriptors)
    }

    /// Number of descriptors in the snapshot
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the snapshot is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FieldStore for InMemoryFieldStore {
    fn find_fields(&self, query: &FieldQuery) -> Vec<FieldDescriptor> {
        self.fields
            .iter()
            .filter(|f| query.matches(f))
            .cloned()
            .collect()
    }

    fn known_models(&self) -> BTreeSet<String> {
        self.fields.iter().map(|f| f.model.clone()).collect()
    }
}
