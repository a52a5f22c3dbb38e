use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::operation::{HttpMethod, Operation, PathItem};
use super::reference::SchemaTable;
use super::schema::NamedSchema;

/// Info object describing the API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub version: String,
}

/// Tag definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// v3 components; only the schema table is consumed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub schemas: IndexMap<String, NamedSchema>,
}

/// Which of the two supported document shapes was loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentShape {
    /// Swagger 2.0: schemas under `definitions`.
    V2,
    /// OpenAPI 3.x: schemas under `components.schemas`.
    V3,
}

/// A Swagger 2.0 or OpenAPI 3.x document, reduced to what code and mock
/// derivation consume. Treated as immutable once loaded.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swagger: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub openapi: Option<String>,

    #[serde(default)]
    pub info: Info,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(rename = "basePath", skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub paths: IndexMap<String, PathItem>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub definitions: Option<IndexMap<String, NamedSchema>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl Document {
    /// The shape is decided by which schema table is present, `definitions`
    /// winning over `components`; with neither, the version field decides.
    pub fn shape(&self) -> DocumentShape {
        if self.definitions.is_some() {
            DocumentShape::V2
        } else if self.components.is_some() || self.openapi.is_some() {
            DocumentShape::V3
        } else {
            DocumentShape::V2
        }
    }

    /// The named schema table for the document's shape.
    pub fn schemas(&self) -> SchemaTable<'_> {
        match self.shape() {
            DocumentShape::V2 => SchemaTable::new(self.definitions.as_ref()),
            DocumentShape::V3 => {
                SchemaTable::new(self.components.as_ref().map(|c| &c.schemas))
            }
        }
    }

    pub fn operation(&self, path: &str, method: HttpMethod) -> Option<&Operation> {
        self.paths.get(path).and_then(|item| item.operation(method))
    }

    /// Every `(path, method, operation)` triple in document order.
    pub fn operations(&self) -> impl Iterator<Item = (&str, HttpMethod, &Operation)> {
        self.paths.iter().flat_map(|(path, item)| {
            item.operations()
                .map(move |(method, op)| (path.as_str(), method, op))
        })
    }
}
