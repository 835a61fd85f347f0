//! Field descriptor model

use serde::{Deserialize, Serialize};

use super::enums::{FieldType, SelectionOption};
use crate::error::SchemaError;

/// One row of relational schema metadata
///
/// A field descriptor describes one field of one model: its name, declared
/// kind, relation target, and ancillary metadata. It is a read-only snapshot
/// of the schema, not the field's runtime value, and `(model, name)` uniquely
/// identifies it within a store.
///
/// # Example
///
/// ```rust
/// use schema_reflect::models::{FieldDescriptor, FieldType};
///
/// let field = FieldDescriptor::new("sale.order", "partner_id", FieldType::Many2one)
///     .with_relation("res.partner");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDescriptor {
    /// Owning model name
    pub model: String,
    /// Field name, unique within `model`
    pub name: String,
    /// Declared kind of the field
    pub ttype: FieldType,
    /// Target model (comodel); set iff `ttype` is relational
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
    /// Name of the declared inverse field on the target model, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation_field: Option<String>,
    /// Join-table name; set iff `ttype` is many2many
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation_table: Option<String>,
    /// Join-table column for this side; set iff `ttype` is many2many
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column1: Option<String>,
    /// Join-table column for the other side; set iff `ttype` is many2many
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column2: Option<String>,
    /// Whether a value is mandatory (default: false)
    #[serde(default)]
    pub required: bool,
    /// Whether the field is persisted (default: true)
    #[serde(default = "default_true")]
    pub store: bool,
    /// Computation expression, if the field is computed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compute: Option<String>,
    /// Field names the computation reads
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends: Vec<String>,
    /// Dotted path this field mirrors, if it is a related field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related: Option<String>,
    /// Human-readable label
    #[serde(default)]
    pub field_description: String,
    /// Ordered value set; populated only for `selection` fields
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selection: Vec<SelectionOption>,
}

fn default_true() -> bool {
    true
}

impl FieldDescriptor {
    /// Create a new field descriptor with default ancillary metadata
    pub fn new(model: impl Into<String>, name: impl Into<String>, ttype: FieldType) -> Self {
        Self {
            model: model.into(),
            name: name.into(),
            ttype,
            relation: None,
            relation_field: None,
            relation_table: None,
            column1: None,
            column2: None,
            required: false,
            store: true,
            compute: None,
            depends: Vec::new(),
            related: None,
            field_description: String::new(),
            selection: Vec::new(),
        }
    }

    /// Set the relation target (comodel)
    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        self.relation = Some(relation.into());
        self
    }

    /// Set the declared inverse field name
    pub fn with_relation_field(mut self, relation_field: impl Into<String>) -> Self {
        self.relation_field = Some(relation_field.into());
        self
    }

    /// Set the many2many join-table identity
    pub fn with_relation_table(
        mut self,
        table: impl Into<String>,
        column1: impl Into<String>,
        column2: impl Into<String>,
    ) -> Self {
        self.relation_table = Some(table.into());
        self.column1 = Some(column1.into());
        self.column2 = Some(column2.into());
        self
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the computation expression and its dependencies
    pub fn with_compute(
        mut self,
        compute: impl Into<String>,
        depends: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.compute = Some(compute.into());
        self.depends = depends.into_iter().map(Into::into).collect();
        self
    }

    /// Set the human-readable label
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.field_description = description.into();
        self
    }

    /// Set the selection value set
    pub fn with_selection(mut self, options: impl IntoIterator<Item = SelectionOption>) -> Self {
        self.selection = options.into_iter().collect();
        self
    }

    /// Whether this field references another model
    #[must_use]
    pub fn is_relational(&self) -> bool {
        self.ttype.is_relational()
    }

    /// Check the descriptor's structural invariants
    ///
    /// `relation` must be set iff the ttype is relational, and the join-table
    /// attributes must be set iff the ttype is many2many.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.is_relational() && self.relation.is_none() {
            return Err(SchemaError::MissingRelation {
                model: self.model.clone(),
                field: self.name.clone(),
            });
        }
        if !self.is_relational() && self.relation.is_some() {
            return Err(SchemaError::UnexpectedRelation {
                model: self.model.clone(),
                field: self.name.clone(),
            });
        }
        let has_table =
            self.relation_table.is_some() || self.column1.is_some() || self.column2.is_some();
        if has_table && self.ttype != FieldType::Many2many {
            return Err(SchemaError::InvalidRelationTable {
                model: self.model.clone(),
                field: self.name.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_relational_requires_relation() {
        let field = FieldDescriptor::new("sale.order", "partner_id", FieldType::Many2one);
        assert!(matches!(
            field.validate(),
            Err(SchemaError::MissingRelation { .. })
        ));

        let field = field.with_relation("res.partner");
        assert!(field.validate().is_ok());
    }

    #[test]
    fn test_validate_scalar_rejects_relation() {
        let field =
            FieldDescriptor::new("sale.order", "state", FieldType::Selection).with_relation("x");
        assert!(matches!(
            field.validate(),
            Err(SchemaError::UnexpectedRelation { .. })
        ));
    }

    #[test]
    fn test_validate_join_table_only_on_many2many() {
        let field = FieldDescriptor::new("res.partner", "company_id", FieldType::Many2one)
            .with_relation("res.company")
            .with_relation_table("rel", "a", "b");
        assert!(matches!(
            field.validate(),
            Err(SchemaError::InvalidRelationTable { .. })
        ));
    }

    #[test]
    fn test_json_round_trip_defaults() {
        let json = r#"{"model": "res.partner", "name": "name", "ttype": "char"}"#;
        let field: FieldDescriptor = serde_json::from_str(json).unwrap();
        assert!(field.store);
        assert!(!field.required);
        assert!(field.relation.is_none());
        assert_eq!(field.ttype, FieldType::Char);
    }
}
