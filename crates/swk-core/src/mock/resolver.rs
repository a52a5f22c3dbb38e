use serde_json::Value;

use super::placeholder::{DefaultPlaceholders, PlaceholderPolicy};
use super::{MockField, MockNode};
use crate::parse::document::Document;
use crate::parse::operation::HttpMethod;
use crate::parse::reference::{SchemaRef, SchemaTable};
use crate::parse::schema::PropertySchema;

/// Default repeat count for array members.
pub const DEFAULT_LIST_COUNT: usize = 6;

/// Knobs for mock derivation.
pub struct MockOptions {
    pub list_count: usize,
    pub policy: Box<dyn PlaceholderPolicy + Send + Sync>,
}

impl Default for MockOptions {
    fn default() -> Self {
        Self {
            list_count: DEFAULT_LIST_COUNT,
            policy: Box::new(DefaultPlaceholders::default()),
        }
    }
}

impl MockOptions {
    pub fn new(list_count: usize, policy: impl PlaceholderPolicy + Send + Sync + 'static) -> Self {
        Self {
            list_count,
            policy: Box::new(policy),
        }
    }
}

/// Mock template for the 200 response of `(path, method)`.
///
/// `None` when the operation is missing, its 200 response has no `$ref`
/// schema, or the reference resolves to nothing.
pub fn mock_template(
    doc: &Document,
    path: &str,
    method: HttpMethod,
    options: &MockOptions,
) -> Option<MockNode> {
    let operation = doc.operation(path, method)?;
    let reference = operation.ok_response()?.body_schema()?.target_ref()?;
    resolve_mock(reference, doc.schemas(), &mut Vec::new(), options)
}

/// Build the mock template for `reference`.
///
/// `active` holds the references on the current path from the root; a
/// reference that is already active yields no value, which is what stops
/// cycles. Siblings may still expand the same schema.
pub fn resolve_mock(
    reference: &str,
    schemas: SchemaTable<'_>,
    active: &mut Vec<String>,
    options: &MockOptions,
) -> Option<MockNode> {
    if reference.is_empty() || active.iter().any(|r| r == reference) {
        return None;
    }
    let schema = schemas.get(SchemaRef::new(reference))?;

    active.push(reference.to_string());
    let depth = active.len();

    let node = if schema.properties.is_empty() && schema.primary_type().is_some() {
        // Alias and enum schemas mock like a property of the same shape.
        let property = PropertySchema {
            schema_type: schema.schema_type.clone(),
            description: schema.description.clone(),
            enum_values: schema.enum_values.clone(),
            ..PropertySchema::default()
        };
        options.policy.placeholder(reference, &property, depth)
    } else {
        let fields = schema
            .properties
            .iter()
            .filter_map(|(name, property)| mock_field(name, property, depth, schemas, active, options))
            .collect();
        Some(MockNode::Object(fields))
    };

    active.pop();
    node
}

fn mock_field(
    name: &str,
    property: &PropertySchema,
    depth: usize,
    schemas: SchemaTable<'_>,
    active: &mut Vec<String>,
    options: &MockOptions,
) -> Option<MockField> {
    if depth == 1 && name == "code" {
        return Some(MockField {
            name: name.to_string(),
            repeat: None,
            value: MockNode::Literal(Value::from(0)),
        });
    }
    let value = mock_value(name, property, depth, schemas, active, options)?;
    Some(MockField {
        name: name.to_string(),
        repeat: property.is_array().then_some(options.list_count),
        value,
    })
}

fn mock_value(
    name: &str,
    property: &PropertySchema,
    depth: usize,
    schemas: SchemaTable<'_>,
    active: &mut Vec<String>,
    options: &MockOptions,
) -> Option<MockNode> {
    if property.is_array() {
        let element = property
            .items
            .as_deref()
            .and_then(|items| mock_value(name, items, depth, schemas, active, options));
        return Some(MockNode::Array(element.map(Box::new)));
    }
    if let Some(reference) = property.target_ref() {
        return resolve_mock(reference, schemas, active, options);
    }
    options.policy.placeholder(name, property, depth)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::parse;

    const DOC: &str = r##"{
        "swagger": "2.0",
        "paths": {
            "/items": {"get": {"responses": {"200": {"schema": {"$ref": "#/definitions/Result«Page»"}}}}},
            "/raw": {"get": {"responses": {"200": {"schema": {"type": "string"}}}}}
        },
        "definitions": {
            "Result«Page»": {"properties": {
                "code": {"type": "integer"},
                "message": {"type": "string"},
                "data": {"$ref": "#/definitions/Page"}
            }},
            "Page": {"properties": {
                "code": {"type": "integer"},
                "count": {"type": "integer"},
                "rows": {"type": "array", "items": {"$ref": "#/definitions/Item"}},
                "labels": {"type": "array", "items": {"type": "string"}}
            }},
            "Item": {"properties": {
                "status": {"type": "string", "enum": ["A", "B"]},
                "createdAt": {"type": "string", "format": "date-time"},
                "parent": {"$ref": "#/definitions/Item"},
                "children": {"type": "array", "items": {"$ref": "#/definitions/Item"}},
                "kind": {"$ref": "#/definitions/Kind"}
            }},
            "Kind": {"type": "integer", "enum": [1, 2]}
        }
    }"##;

    #[test]
    fn full_template() {
        let doc = parse::from_json(DOC).unwrap();
        let node = mock_template(&doc, "/items", HttpMethod::Get, &MockOptions::default()).unwrap();
        assert_eq!(
            node.to_json(),
            json!({
                "code": 0,
                "message": "@ctitle(2, 8)",
                "data": {
                    "code": "@integer(0, 1000)",
                    "count": "@integer(0, 1000)",
                    "rows|6": [{
                        "status": "@pick([\"A\", \"B\"])",
                        "createdAt": "@now(yyyy-MM-dd) @date(HH:mm:ss)",
                        "children|6": [],
                        "kind": "@pick([1, 2])"
                    }],
                    "labels|6": ["@ctitle(2, 8)"]
                }
            })
        );
    }

    #[test]
    fn list_count_is_configurable() {
        let doc = parse::from_json(DOC).unwrap();
        let options = MockOptions::new(3, DefaultPlaceholders::default());
        let node = mock_template(&doc, "/items", HttpMethod::Get, &options).unwrap();
        let data = node.field("data").unwrap();
        assert_eq!(data.value.field("rows").and_then(|f| f.repeat), Some(3));
    }

    #[test]
    fn siblings_may_reuse_a_schema() {
        let doc = parse::from_json(
            r##"{
                "swagger": "2.0",
                "definitions": {
                    "Pair": {"properties": {"left": {"$ref": "#/definitions/Leaf"}, "right": {"$ref": "#/definitions/Leaf"}}},
                    "Leaf": {"properties": {"v": {"type": "boolean"}}}
                }
            }"##,
        )
        .unwrap();
        let mut active = Vec::new();
        let node = resolve_mock(
            "#/definitions/Pair",
            doc.schemas(),
            &mut active,
            &MockOptions::default(),
        )
        .unwrap();
        assert_eq!(
            node.to_json(),
            json!({"left": {"v": "@boolean()"}, "right": {"v": "@boolean()"}})
        );
        assert!(active.is_empty());
    }

    #[test]
    fn no_value_cases() {
        let doc = parse::from_json(DOC).unwrap();
        let options = MockOptions::default();
        assert!(mock_template(&doc, "/raw", HttpMethod::Get, &options).is_none());
        assert!(mock_template(&doc, "/items", HttpMethod::Post, &options).is_none());
        assert!(resolve_mock("#/definitions/Missing", doc.schemas(), &mut Vec::new(), &options).is_none());
        assert!(resolve_mock("", doc.schemas(), &mut Vec::new(), &options).is_none());
    }
}
