//! Result types for reflection queries

use serde::{Deserialize, Serialize};

use crate::models::FieldDescriptor;

/// Inverse field(s) computed for a relational field
///
/// Zero, one, or many descriptors on the target model that point back at the
/// origin field. Ambiguity is a valid, representable outcome: several
/// specialized one2many fields may legitimately claim the same many2one as
/// their inverse. Kept as a typed ordered collection rather than a pre-joined
/// display string; rendering belongs to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct InverseResult {
    /// Candidate inverse descriptors, ordered by owning model then field name
    pub fields: Vec<FieldDescriptor>,
}

impl InverseResult {
    /// No inverse known (a valid outcome, not an error)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Exactly one inverse
    pub fn single(field: FieldDescriptor) -> Self {
        Self {
            fields: vec![field],
        }
    }

    /// Build from an already-ordered candidate list
    pub fn from_fields(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    /// Whether no inverse is known
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether more than one field claims the inverse
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        self.fields.len() > 1
    }

    /// The unique inverse, if there is exactly one
    #[must_use]
    pub fn unique(&self) -> Option<&FieldDescriptor> {
        match self.fields.as_slice() {
            [field] => Some(field),
            _ => None,
        }
    }
}

/// One relation traversed while resolving a dotted path
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PathHop {
    /// Zero-based position of the segment within the path
    pub index: usize,
    /// The relational field this segment named
    pub field: FieldDescriptor,
}

/// Result of resolving a dotted field path
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedPath {
    /// Relations traversed, one per non-final segment, in path order
    pub hops: Vec<PathHop>,
    /// Full descriptor of the final segment (any ttype)
    pub target: FieldDescriptor,
}

/// One entry of the reverse reference index
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReferencingField {
    /// A field whose relation target is the queried model
    pub field: FieldDescriptor,
    /// That field's computed inverse
    pub inverse: InverseResult,
}

/// Structured answer for a single-field (or dotted-path) info query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldInfo {
    /// Relations traversed to reach the field (empty for a plain field name)
    pub hops: Vec<PathHop>,
    /// Full descriptor of the field itself
    pub field: FieldDescriptor,
    /// Computed inverse; present only for relational fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inverse: Option<InverseResult>,
}
