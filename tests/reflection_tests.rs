//! Reflection query tests over a representative schema snapshot

use schema_reflect::models::SelectionOption;
use schema_reflect::{
    FieldDescriptor, FieldType, InMemoryFieldStore, ReflectionError, SchemaError, SchemaReflector,
    inverse,
};

/// Build a small sales-ish schema exercising every relation kind
fn fixture_store() -> InMemoryFieldStore {
    InMemoryFieldStore::from_descriptors([
        // res.partner
        FieldDescriptor::new("res.partner", "name", FieldType::Char)
            .required()
            .with_description("Name"),
        FieldDescriptor::new("res.partner", "active", FieldType::Boolean),
        FieldDescriptor::new("res.partner", "category_ids", FieldType::Many2many)
            .with_relation("res.partner.category")
            .with_relation_table("res_partner_category_rel", "partner_id", "category_id"),
        FieldDescriptor::new("res.partner", "orders", FieldType::One2many)
            .with_relation("sale.order")
            .with_relation_field("partner_id"),
        FieldDescriptor::new("res.partner", "draft_orders", FieldType::One2many)
            .with_relation("sale.order")
            .with_relation_field("partner_id"),
        // res.partner.category
        FieldDescriptor::new("res.partner.category", "name", FieldType::Char).required(),
        FieldDescriptor::new("res.partner.category", "partner_ids", FieldType::Many2many)
            .with_relation("res.partner")
            .with_relation_table("res_partner_category_rel", "category_id", "partner_id"),
        // sale.order
        FieldDescriptor::new("sale.order", "partner_id", FieldType::Many2one)
            .with_relation("res.partner")
            .required(),
        FieldDescriptor::new("sale.order", "state", FieldType::Selection).with_selection([
            SelectionOption::new("draft", "Draft"),
            SelectionOption::new("done", "Done"),
        ]),
        FieldDescriptor::new("sale.order", "note", FieldType::Text),
        FieldDescriptor::new("sale.order", "line_ids", FieldType::One2many)
            .with_relation("sale.order.line")
            .with_relation_field("order_id"),
        FieldDescriptor::new("sale.order", "tag_ids", FieldType::Many2many)
            .with_relation("crm.tag"),
        // sale.order.line
        FieldDescriptor::new("sale.order.line", "order_id", FieldType::Many2one)
            .with_relation("sale.order")
            .required(),
        FieldDescriptor::new("sale.order.line", "product_id", FieldType::Many2one)
            .with_relation("product.product"),
        FieldDescriptor::new("sale.order.line", "qty", FieldType::Float),
        // product.product
        FieldDescriptor::new("product.product", "name", FieldType::Char).required(),
        // crm.tag
        FieldDescriptor::new("crm.tag", "name", FieldType::Char).required(),
    ])
    .unwrap()
}

fn reflector() -> SchemaReflector<InMemoryFieldStore> {
    SchemaReflector::new(fixture_store())
}

mod inverse_tests {
    use super::*;

    #[test]
    fn test_declared_inverse_takes_precedence() {
        let result = reflector().inverse_of("res.partner", "orders").unwrap();
        let field = result.unique().expect("declared inverse is unambiguous");
        assert_eq!(field.model, "sale.order");
        assert_eq!(field.name, "partner_id");
    }

    #[test]
    fn test_reverse_scan_returns_all_claimants() {
        // Both one2many fields on res.partner declare partner_id as their
        // inverse, so the scan must surface both, ordered by field name.
        let result = reflector().inverse_of("sale.order", "partner_id").unwrap();
        assert!(result.is_ambiguous());
        let names: Vec<&str> = result.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["draft_orders", "orders"]);
    }

    #[test]
    fn test_reverse_scan_unique_match() {
        let result = reflector()
            .inverse_of("sale.order.line", "order_id")
            .unwrap();
        let field = result.unique().unwrap();
        assert_eq!(field.model, "sale.order");
        assert_eq!(field.name, "line_ids");
    }

    #[test]
    fn test_reverse_scan_no_match_is_empty() {
        let result = reflector()
            .inverse_of("sale.order.line", "product_id")
            .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_many2many_join_table_symmetry() {
        let reflector = reflector();

        let forward = reflector.inverse_of("res.partner", "category_ids").unwrap();
        let other = forward.unique().unwrap();
        assert_eq!(other.model, "res.partner.category");
        assert_eq!(other.name, "partner_ids");

        // inverse(inverse(A)) must include A
        let back = inverse(reflector.store(), other).unwrap();
        assert!(
            back.fields
                .iter()
                .any(|f| f.model == "res.partner" && f.name == "category_ids")
        );
    }

    #[test]
    fn test_many2many_without_join_table_is_empty() {
        let result = reflector().inverse_of("sale.order", "tag_ids").unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_non_relational_field_has_no_inverse() {
        let result = reflector().inverse_of("sale.order", "state").unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_missing_relation_is_schema_error() {
        // Build the malformed descriptor directly; a store would reject it.
        let field = FieldDescriptor::new("sale.order", "broken", FieldType::Many2one);
        let result = inverse(&fixture_store(), &field);
        assert!(matches!(
            result,
            Err(ReflectionError::Schema(SchemaError::MissingRelation { .. }))
        ));
    }

    #[test]
    fn test_stale_declared_inverse_is_schema_error() {
        let store = InMemoryFieldStore::from_descriptors([
            FieldDescriptor::new("res.partner", "name", FieldType::Char),
            FieldDescriptor::new("sale.order", "partner_id", FieldType::Many2one)
                .with_relation("res.partner")
                .with_relation_field("gone"),
        ])
        .unwrap();

        let result = SchemaReflector::new(store).inverse_of("sale.order", "partner_id");
        assert!(matches!(
            result,
            Err(ReflectionError::Schema(SchemaError::StaleInverse { .. }))
        ));
    }
}

mod path_tests {
    use super::*;

    #[test]
    fn test_resolve_multi_hop_path() {
        let resolved = reflector()
            .resolve_path("sale.order.line", "order_id.partner_id.name")
            .unwrap();

        assert_eq!(resolved.hops.len(), 2);
        assert_eq!(resolved.hops[0].index, 0);
        assert_eq!(resolved.hops[0].field.name, "order_id");
        assert_eq!(resolved.hops[1].index, 1);
        assert_eq!(resolved.hops[1].field.name, "partner_id");
        assert_eq!(resolved.target.model, "res.partner");
        assert_eq!(resolved.target.name, "name");
        assert_eq!(resolved.target.ttype, FieldType::Char);
    }

    #[test]
    fn test_plain_field_has_no_hops() {
        let resolved = reflector().resolve_path("sale.order", "state").unwrap();
        assert!(resolved.hops.is_empty());
        assert_eq!(resolved.target.selection.len(), 2);
    }

    #[test]
    fn test_non_relational_segment_is_not_traversable() {
        let result = reflector().resolve_path("sale.order", "note.partner_id");
        assert!(matches!(
            result,
            Err(ReflectionError::NotTraversable { model, field })
                if model == "sale.order" && field == "note"
        ));
    }

    #[test]
    fn test_unknown_intermediate_segment() {
        let result = reflector().resolve_path("sale.order", "missing.name");
        assert!(matches!(
            result,
            Err(ReflectionError::FieldNotFound { model, field })
                if model == "sale.order" && field == "missing"
        ));
    }

    #[test]
    fn test_unknown_terminal_segment() {
        let result = reflector().resolve_path("sale.order", "partner_id.nope");
        assert!(matches!(
            result,
            Err(ReflectionError::FieldNotFound { model, field })
                if model == "res.partner" && field == "nope"
        ));
    }

    #[test]
    fn test_empty_path_is_field_not_found() {
        let result = reflector().resolve_path("sale.order", "");
        assert!(matches!(
            result,
            Err(ReflectionError::FieldNotFound { field, .. }) if field.is_empty()
        ));
    }
}

mod comodel_tests {
    use super::*;

    #[test]
    fn test_reverse_index_is_ordered_and_complete() {
        let entries = reflector().comodel_for("res.partner").unwrap();
        let keys: Vec<(&str, &str)> = entries
            .iter()
            .map(|e| (e.field.model.as_str(), e.field.name.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("res.partner.category", "partner_ids"),
                ("sale.order", "partner_id"),
            ]
        );
    }

    #[test]
    fn test_reverse_index_annotations_match_inverse() {
        let reflector = reflector();
        for entry in reflector.comodel_for("sale.order").unwrap() {
            let independent = inverse(reflector.store(), &entry.field).unwrap();
            assert_eq!(entry.inverse, independent);
        }
    }

    #[test]
    fn test_referrer_without_join_table_has_empty_inverse() {
        let entries = reflector().comodel_for("crm.tag").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].field.name, "tag_ids");
        assert!(entries[0].inverse.is_empty());
    }
}

mod registry_tests {
    use super::*;

    #[test]
    fn test_resolve_exact_and_case_insensitive() {
        let reflector = reflector();
        assert_eq!(
            reflector.resolve_model("res.partner").unwrap(),
            "res.partner"
        );
        assert_eq!(
            reflector.resolve_model("RES.Partner").unwrap(),
            "res.partner"
        );
    }

    #[test]
    fn test_typo_fails_with_ranked_suggestions() {
        let result = reflector().resolve_model("res.partnr");
        let Err(ReflectionError::ModelNotFound { model, suggestions }) = result else {
            panic!("expected ModelNotFound");
        };
        assert_eq!(model, "res.partnr");
        assert!(suggestions.len() <= 4);
        assert_eq!(suggestions[0].model, "res.partner");
        // Scores are sorted descending
        for pair in suggestions.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_registry_gates_every_entry_point() {
        let reflector = reflector();
        assert!(matches!(
            reflector.inverse_of("sale.ordr", "partner_id"),
            Err(ReflectionError::ModelNotFound { .. })
        ));
        assert!(matches!(
            reflector.resolve_path("sale.ordr", "partner_id"),
            Err(ReflectionError::ModelNotFound { .. })
        ));
        assert!(matches!(
            reflector.comodel_for("sale.ordr"),
            Err(ReflectionError::ModelNotFound { .. })
        ));
        assert!(matches!(
            reflector.required_fields("sale.ordr"),
            Err(ReflectionError::ModelNotFound { .. })
        ));
    }
}

mod reflector_tests {
    use super::*;

    #[test]
    fn test_required_fields_listing() {
        let fields = reflector().required_fields("sale.order").unwrap();
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["partner_id"]);
    }

    #[test]
    fn test_relational_fields_listing() {
        let fields = reflector().relational_fields("sale.order").unwrap();
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["line_ids", "partner_id", "tag_ids"]);
        assert!(fields.iter().all(|f| f.is_relational()));
    }

    #[test]
    fn test_field_info_for_relational_terminal() {
        let info = reflector().field_info("sale.order", "partner_id").unwrap();
        assert!(info.hops.is_empty());
        assert_eq!(info.field.relation.as_deref(), Some("res.partner"));
        let inverse = info.inverse.expect("relational terminal carries inverse");
        assert!(inverse.is_ambiguous());
    }

    #[test]
    fn test_field_info_for_dotted_path() {
        let info = reflector()
            .field_info("sale.order.line", "order_id.partner_id.name")
            .unwrap();
        assert_eq!(info.hops.len(), 2);
        assert_eq!(info.field.name, "name");
        assert!(info.inverse.is_none());
    }

    #[test]
    fn test_field_info_selection_values() {
        let info = reflector().field_info("sale.order", "state").unwrap();
        assert_eq!(info.field.ttype, FieldType::Selection);
        let values: Vec<&str> = info
            .field
            .selection
            .iter()
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(values, vec!["draft", "done"]);
        assert!(info.inverse.is_none());
    }

    #[test]
    fn test_snapshot_refresh_is_explicit() {
        // The registry is a snapshot; swapping store contents requires a new
        // reflector (or refresh), never hidden re-reads.
        let reflector = SchemaReflector::new(
            InMemoryFieldStore::from_descriptors([FieldDescriptor::new(
                "res.partner",
                "name",
                FieldType::Char,
            )])
            .unwrap(),
        );
        assert!(reflector.resolve_model("sale.order").is_err());
    }
}

mod snapshot_tests {
    use super::*;

    #[test]
    fn test_store_from_json_snapshot() {
        let json = r#"[
            {"model": "order", "name": "customer", "ttype": "many2one",
             "relation": "partner", "required": true},
            {"model": "partner", "name": "orders", "ttype": "one2many",
             "relation": "order", "relation_field": "customer"}
        ]"#;
        let reflector = SchemaReflector::new(InMemoryFieldStore::from_json(json).unwrap());

        let result = reflector.inverse_of("order", "customer").unwrap();
        let field = result.unique().unwrap();
        assert_eq!(field.model, "partner");
        assert_eq!(field.name, "orders");
    }

    #[test]
    fn test_invalid_snapshot_is_schema_error() {
        assert!(matches!(
            InMemoryFieldStore::from_json("not json"),
            Err(SchemaError::Snapshot(_))
        ));

        let missing_relation = r#"[
            {"model": "order", "name": "customer", "ttype": "many2one"}
        ]"#;
        assert!(matches!(
            InMemoryFieldStore::from_json(missing_relation),
            Err(SchemaError::MissingRelation { .. })
        ));
    }
}
