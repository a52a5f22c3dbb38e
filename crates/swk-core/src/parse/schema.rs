use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A JSON Schema type keyword value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
    /// Any word we do not model (`file`, vendor types, ...).
    #[serde(other)]
    Unknown,
}

/// The `type` field can be a single type or an array of types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(SchemaType),
    Multiple(Vec<SchemaType>),
}

impl TypeSet {
    /// The type that drives resolution: the single type, or the first non-null
    /// entry of a type list.
    pub fn primary(&self) -> Option<SchemaType> {
        match self {
            TypeSet::Single(t) => Some(*t),
            TypeSet::Multiple(types) => types.iter().copied().find(|t| *t != SchemaType::Null),
        }
    }
}

/// One field of a named schema, also used for `items` and parameter schemas.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<TypeSet>,

    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<PropertySchema>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<serde_json::Value>,

    #[serde(rename = "allOf", default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<PropertySchema>,
}

impl PropertySchema {
    pub fn primary_type(&self) -> Option<SchemaType> {
        self.schema_type.as_ref().and_then(TypeSet::primary)
    }

    /// The `$ref` this schema points at, looking through a single-entry `allOf`
    /// wrapper (`allOf: [{$ref: ...}]` is how v3 documents attach a description
    /// to a reference).
    pub fn target_ref(&self) -> Option<&str> {
        if let Some(ref r) = self.reference {
            return Some(r.as_str());
        }
        match self.all_of.as_slice() {
            [only] => only.reference.as_deref(),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        self.primary_type() == Some(SchemaType::Array)
    }
}

/// A named entry of `definitions` / `components.schemas`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NamedSchema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<TypeSet>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, PropertySchema>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<serde_json::Value>,
}

impl NamedSchema {
    pub fn primary_type(&self) -> Option<SchemaType> {
        self.schema_type.as_ref().and_then(TypeSet::primary)
    }

    pub fn is_required(&self, property: &str) -> bool {
        self.required.iter().any(|r| r == property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_type_word_does_not_fail() {
        let prop: PropertySchema = serde_json::from_str(r#"{"type": "file"}"#).unwrap();
        assert_eq!(prop.primary_type(), Some(SchemaType::Unknown));
    }

    #[test]
    fn type_list_uses_first_non_null() {
        let prop: PropertySchema =
            serde_json::from_str(r#"{"type": ["null", "integer"]}"#).unwrap();
        assert_eq!(prop.primary_type(), Some(SchemaType::Integer));
    }

    #[test]
    fn all_of_wrapper_exposes_ref() {
        let prop: PropertySchema = serde_json::from_str(
            r##"{"description": "owner", "allOf": [{"$ref": "#/components/schemas/User"}]}"##,
        )
        .unwrap();
        assert_eq!(prop.target_ref(), Some("#/components/schemas/User"));
    }
}
