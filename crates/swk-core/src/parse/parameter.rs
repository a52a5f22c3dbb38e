use serde::{Deserialize, Serialize};

use super::schema::{PropertySchema, SchemaType, TypeSet};

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    Query,
    Path,
    Body,
    Header,
    Cookie,
    FormData,
    #[serde(other)]
    Other,
}

/// An API parameter, in either the v2 shape (`type`/`items` inline) or the v3
/// shape (`schema`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub param_type: Option<TypeSet>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<PropertySchema>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<PropertySchema>,
}

/// A parameter list entry: inline, or a `$ref` into a shared parameter table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterEntry {
    Inline(Parameter),
    Reference {
        #[serde(rename = "$ref")]
        reference: String,
    },
}

impl ParameterEntry {
    pub fn inline(&self) -> Option<&Parameter> {
        match self {
            ParameterEntry::Inline(p) => Some(p),
            ParameterEntry::Reference { .. } => None,
        }
    }
}

impl Parameter {
    /// The `$ref` carried by the parameter schema, if any.
    pub fn schema_ref(&self) -> Option<&str> {
        self.schema.as_ref().and_then(PropertySchema::target_ref)
    }

    /// The primitive type, taken from `type` or else from `schema.type`.
    pub fn primary_type(&self) -> Option<SchemaType> {
        self.param_type
            .as_ref()
            .and_then(TypeSet::primary)
            .or_else(|| self.schema.as_ref().and_then(PropertySchema::primary_type))
    }

    /// Array element schema, from `items` or else from `schema.items`.
    pub fn items(&self) -> Option<&PropertySchema> {
        self.items
            .as_deref()
            .or_else(|| self.schema.as_ref().and_then(|s| s.items.as_deref()))
    }

    /// Whether the schema (not the inline v2 `type`) declares an array.
    pub fn has_array_schema(&self) -> bool {
        self.schema.as_ref().is_some_and(PropertySchema::is_array)
    }

    /// Flatten into a property-shaped schema so the shared type mapping applies.
    pub fn as_property(&self) -> PropertySchema {
        PropertySchema {
            schema_type: self.primary_type().map(TypeSet::Single),
            reference: self.schema_ref().map(String::from),
            items: self.items().cloned().map(Box::new),
            description: self.description.clone(),
            format: self
                .format
                .clone()
                .or_else(|| self.schema.as_ref().and_then(|s| s.format.clone())),
            enum_values: self
                .schema
                .as_ref()
                .map(|s| s.enum_values.clone())
                .unwrap_or_default(),
            all_of: Vec::new(),
        }
    }
}
