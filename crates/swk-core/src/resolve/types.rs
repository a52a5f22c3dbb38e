use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::model::{Collector, FieldDecl, Primitive, TypeDeclaration, TypeExpr};
use crate::parse::reference::{SchemaRef, SchemaTable};
use crate::parse::schema::{PropertySchema, SchemaType};

/// Resolve `reference` and everything it transitively references into
/// `collector`.
///
/// Deduplication is by derived name: a second ref deriving a name that is
/// already collected is a no-op, which is also what stops cycles. Every
/// declaration lands after the declarations it references.
pub fn resolve_type(
    reference: &str,
    schemas: SchemaTable<'_>,
    collector: &mut Collector,
    mark_required: bool,
    diagnostics: &mut Diagnostics,
) {
    if reference.is_empty() {
        return;
    }
    let schema_ref = SchemaRef::new(reference);
    let Some(name) = schema_ref.name() else {
        diagnostics.report(
            DiagnosticKind::InvalidReference,
            reference,
            "reference does not name a schema",
        );
        return;
    };
    if collector.contains(name) {
        return;
    }
    let Some(schema) = schemas.get(schema_ref) else {
        diagnostics.report(
            DiagnosticKind::MissingSchema,
            reference,
            "schema not found in document",
        );
        return;
    };
    if schema.properties.is_empty() {
        diagnostics.report(DiagnosticKind::EmptySchema, reference, "schema has no properties");
        return;
    }

    log::debug!("resolving {name} from {reference}");

    let mut fields = Vec::with_capacity(schema.properties.len());
    let mut dependencies = Vec::new();
    for (property_name, property) in &schema.properties {
        let Some(type_expression) = type_for_property(property, schemas, diagnostics) else {
            diagnostics.report(
                DiagnosticKind::IgnoredProperty,
                format!("{name}.{property_name}"),
                "property has no usable type or reference",
            );
            continue;
        };
        if type_expression.named().is_some() {
            dependencies.extend(element_ref(property));
        }
        fields.push(FieldDecl {
            name: property_name.clone(),
            type_expression,
            required: mark_required && schema.is_required(property_name),
            description: property.description.clone(),
            format: property.format.clone(),
        });
    }

    collector.push_front(TypeDeclaration {
        name: name.to_string(),
        fields,
    });
    for dependency in dependencies {
        resolve_type(dependency, schemas, collector, mark_required, diagnostics);
    }
    collector.settle(name);
}

/// Map a property-shaped schema onto a type expression, or `None` when it
/// carries neither a reference nor a usable type.
pub fn type_for_property(
    property: &PropertySchema,
    schemas: SchemaTable<'_>,
    diagnostics: &mut Diagnostics,
) -> Option<TypeExpr> {
    if let Some(reference) = property.target_ref() {
        return type_for_ref(reference, schemas, diagnostics);
    }
    match property.primary_type()? {
        SchemaType::Array => {
            let items = property.items.as_deref()?;
            type_for_property(items, schemas, diagnostics).map(TypeExpr::array_of)
        }
        other => primitive_for(other).map(TypeExpr::Primitive),
    }
}

/// The `$ref` a property points at, directly or as an array element.
pub fn element_ref(property: &PropertySchema) -> Option<&str> {
    if let Some(reference) = property.target_ref() {
        return Some(reference);
    }
    if property.is_array() {
        return property.items.as_deref().and_then(element_ref);
    }
    None
}

pub fn primitive_for(schema_type: SchemaType) -> Option<Primitive> {
    match schema_type {
        SchemaType::String => Some(Primitive::String),
        SchemaType::Number | SchemaType::Integer => Some(Primitive::Number),
        SchemaType::Boolean => Some(Primitive::Boolean),
        SchemaType::Object => Some(Primitive::Object),
        SchemaType::Array | SchemaType::Null | SchemaType::Unknown => None,
    }
}

fn type_for_ref(
    reference: &str,
    schemas: SchemaTable<'_>,
    diagnostics: &mut Diagnostics,
) -> Option<TypeExpr> {
    let schema_ref = SchemaRef::new(reference);
    let Some(name) = schema_ref.name() else {
        diagnostics.report(
            DiagnosticKind::InvalidReference,
            reference,
            "reference does not name a schema",
        );
        return None;
    };
    let Some(schema) = schemas.get(schema_ref) else {
        diagnostics.report(
            DiagnosticKind::MissingSchema,
            reference,
            "schema not found in document",
        );
        return Some(TypeExpr::Unknown);
    };
    if schema.properties.is_empty() {
        // Enum and alias schemas have nothing to declare.
        let primitive = schema
            .primary_type()
            .and_then(primitive_for)
            .unwrap_or(Primitive::Object);
        return Some(TypeExpr::Primitive(primitive));
    }
    Some(TypeExpr::Named(name.to_string()))
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::*;
    use crate::parse::schema::NamedSchema;

    fn table(json: &str) -> IndexMap<String, NamedSchema> {
        serde_json::from_str(json).unwrap()
    }

    fn resolve(schemas: &IndexMap<String, NamedSchema>, reference: &str) -> (Collector, Diagnostics) {
        let mut collector = Collector::new();
        let mut diagnostics = Diagnostics::new();
        resolve_type(
            reference,
            SchemaTable::new(Some(schemas)),
            &mut collector,
            true,
            &mut diagnostics,
        );
        (collector, diagnostics)
    }

    #[test]
    fn maps_primitives_and_arrays() {
        let schemas = table(
            r##"{
                "Pet": {
                    "required": ["id"],
                    "properties": {
                        "id": {"type": "integer", "format": "int64"},
                        "name": {"type": "string", "description": "pet name"},
                        "tags": {"type": "array", "items": {"type": "string"}},
                        "extra": {"type": "object"},
                        "alive": {"type": "boolean"}
                    }
                }
            }"##,
        );
        let (collector, diagnostics) = resolve(&schemas, "#/definitions/Pet");
        assert!(diagnostics.is_empty());
        let pet = collector.get("Pet").unwrap();
        let rendered: Vec<String> = pet
            .fields
            .iter()
            .map(|f| format!("{}{}: {}", f.name, if f.required { "" } else { "?" }, f.type_expression))
            .collect();
        assert_eq!(
            rendered,
            vec![
                "id: number",
                "name?: string",
                "tags?: string[]",
                "extra?: object",
                "alive?: boolean"
            ]
        );
    }

    #[test]
    fn diamond_graph_keeps_dependencies_first() {
        let schemas = table(
            r##"{
                "A": {"properties": {"b": {"$ref": "#/definitions/B"}, "c": {"$ref": "#/definitions/C"}}},
                "B": {"properties": {"d": {"$ref": "#/definitions/D"}}},
                "C": {"properties": {"d": {"type": "array", "items": {"$ref": "#/definitions/D"}}}},
                "D": {"properties": {"id": {"type": "integer"}}}
            }"##,
        );
        let (collector, _) = resolve(&schemas, "#/definitions/A");
        assert_eq!(collector.names(), vec!["D", "B", "C", "A"]);
        let c = collector.get("C").unwrap();
        assert_eq!(c.fields[0].type_expression.to_string(), "D[]");
    }

    #[test]
    fn self_reference_terminates() {
        let schemas = table(
            r##"{
                "Node": {"properties": {
                    "value": {"type": "string"},
                    "children": {"type": "array", "items": {"$ref": "#/definitions/Node"}}
                }}
            }"##,
        );
        let (collector, _) = resolve(&schemas, "#/definitions/Node");
        assert_eq!(collector.names(), vec!["Node"]);
    }

    #[test]
    fn mutual_reference_terminates() {
        let schemas = table(
            r##"{
                "Parent": {"properties": {"child": {"$ref": "#/definitions/Child"}}},
                "Child": {"properties": {"parent": {"$ref": "#/definitions/Parent"}}}
            }"##,
        );
        let (collector, _) = resolve(&schemas, "#/definitions/Parent");
        assert_eq!(collector.len(), 2);
        assert_eq!(collector.last_name(), Some("Parent"));
    }

    #[test]
    fn resolving_twice_is_idempotent() {
        let schemas = table(
            r##"{
                "Order": {"properties": {"item": {"$ref": "#/definitions/Item"}}},
                "Item": {"properties": {"sku": {"type": "string"}}}
            }"##,
        );
        let mut collector = Collector::new();
        let mut diagnostics = Diagnostics::new();
        let table = SchemaTable::new(Some(&schemas));
        resolve_type("#/definitions/Order", table, &mut collector, false, &mut diagnostics);
        let first = collector.clone();
        resolve_type("#/definitions/Order", table, &mut collector, false, &mut diagnostics);
        assert_eq!(collector, first);
    }

    #[test]
    fn unusable_property_is_dropped() {
        let schemas = table(
            r##"{"Upload": {"properties": {"file": {"type": "file"}, "note": {}, "name": {"type": "string"}}}}"##,
        );
        let (collector, diagnostics) = resolve(&schemas, "#/definitions/Upload");
        let upload = collector.get("Upload").unwrap();
        assert_eq!(upload.fields.len(), 1);
        assert_eq!(diagnostics.of_kind(DiagnosticKind::IgnoredProperty).count(), 2);
    }

    #[test]
    fn missing_and_alias_refs() {
        let schemas = table(
            r##"{
                "Order": {"properties": {
                    "status": {"$ref": "#/definitions/Status"},
                    "ghost": {"$ref": "#/definitions/Ghost"}
                }},
                "Status": {"type": "string", "enum": ["NEW", "PAID"]}
            }"##,
        );
        let (collector, diagnostics) = resolve(&schemas, "#/definitions/Order");
        let order = collector.get("Order").unwrap();
        assert_eq!(order.fields[0].type_expression, TypeExpr::Primitive(Primitive::String));
        assert_eq!(order.fields[1].type_expression, TypeExpr::Unknown);
        assert_eq!(collector.len(), 1);
        assert_eq!(diagnostics.of_kind(DiagnosticKind::MissingSchema).count(), 1);
    }

    #[test]
    fn dedup_is_by_derived_name() {
        let schemas = table(
            r##"{
                "Result«Item»": {"properties": {"data": {"$ref": "#/definitions/Result«Page»"}}},
                "Result«Page»": {"properties": {"total": {"type": "integer"}}}
            }"##,
        );
        let (collector, _) = resolve(&schemas, "#/definitions/Result«Item»");
        assert_eq!(collector.names(), vec!["Result"]);
    }

    #[test]
    fn empty_or_missing_root_is_silent() {
        let schemas = table(r##"{"Empty": {"type": "object"}}"##);
        let (collector, diagnostics) = resolve(&schemas, "#/definitions/Empty");
        assert!(collector.is_empty());
        assert_eq!(diagnostics.of_kind(DiagnosticKind::EmptySchema).count(), 1);

        let (collector, _) = resolve(&schemas, "");
        assert!(collector.is_empty());
    }
}
