use indexmap::IndexMap;

use super::schema::NamedSchema;

const V2_PREFIX: &str = "#/definitions/";
const V3_PREFIX: &str = "#/components/schemas/";

/// A `$ref` string pointing at a named schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaRef<'a>(&'a str);

impl<'a> SchemaRef<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// The table key: everything after the `definitions` / `components.schemas`
    /// prefix. Refs with any other prefix have no key.
    pub fn key(&self) -> Option<&'a str> {
        self.0
            .strip_prefix(V2_PREFIX)
            .or_else(|| self.0.strip_prefix(V3_PREFIX))
    }

    /// The declaration name: the leading `[A-Za-z0-9_]` run of the key.
    ///
    /// Generic Java names collapse: `Result«Page«Item»»` and `Result«Item»`
    /// both derive `Result`.
    pub fn name(&self) -> Option<&'a str> {
        let key = self.key()?;
        let end = key
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(key.len());
        let name = &key[..end];
        (!name.is_empty()).then_some(name)
    }
}

/// Read-only lookup over a document's named schemas.
#[derive(Debug, Clone, Copy)]
pub struct SchemaTable<'a> {
    schemas: Option<&'a IndexMap<String, NamedSchema>>,
}

impl<'a> SchemaTable<'a> {
    pub fn new(schemas: Option<&'a IndexMap<String, NamedSchema>>) -> Self {
        Self { schemas }
    }

    pub fn get(&self, reference: SchemaRef<'_>) -> Option<&'a NamedSchema> {
        let key = reference.key()?;
        self.schemas.and_then(|s| s.get(key))
    }

    pub fn len(&self) -> usize {
        self.schemas.map_or(0, IndexMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
