use std::fmt;

use serde::{Serialize, Serializer};

/// Primitive target types. `integer` and `number` both map to `Number`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    Number,
    Boolean,
    Object,
}

impl Primitive {
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
            Primitive::Object => "object",
        }
    }
}

/// The type of a declared field or of a request/response body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    Primitive(Primitive),
    /// Reference to a declaration by its derived name.
    Named(String),
    Array(Box<TypeExpr>),
    /// Target of a `$ref` that could not be found.
    Unknown,
}

impl TypeExpr {
    pub fn array_of(inner: TypeExpr) -> Self {
        TypeExpr::Array(Box::new(inner))
    }

    /// The declaration this type points at, directly or through arrays.
    pub fn named(&self) -> Option<&str> {
        match self {
            TypeExpr::Named(name) => Some(name),
            TypeExpr::Array(inner) => inner.named(),
            _ => None,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Primitive(p) => f.write_str(p.as_str()),
            TypeExpr::Named(name) => f.write_str(name),
            TypeExpr::Array(inner) => write!(f, "{inner}[]"),
            TypeExpr::Unknown => f.write_str("unknown"),
        }
    }
}

impl Serialize for TypeExpr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One field of a synthesized declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDecl {
    pub name: String,
    pub type_expression: TypeExpr,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl FieldDecl {
    /// Field comment text: the description followed by the format, when a
    /// description exists.
    pub fn comment(&self) -> Option<String> {
        let description = self.description.as_deref()?.trim();
        if description.is_empty() {
            return None;
        }
        Some(match self.format.as_deref() {
            Some(format) => format!("{description} {format}"),
            None => description.to_string(),
        })
    }
}

/// A named record type derived from a schema or from an operation's
/// parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDeclaration {
    pub name: String,
    pub fields: Vec<FieldDecl>,
}

/// Ordered, name-deduplicated list of declarations.
///
/// Declarations are inserted at the front while their dependencies resolve
/// and settled at the back once those are in place, so every declaration
/// ends up after the ones it references (for acyclic graphs).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Collector {
    declarations: Vec<TypeDeclaration>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.declarations.iter().any(|d| d.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&TypeDeclaration> {
        self.declarations.iter().find(|d| d.name == name)
    }

    pub fn push_front(&mut self, declaration: TypeDeclaration) {
        self.declarations.insert(0, declaration);
    }

    pub fn push_back(&mut self, declaration: TypeDeclaration) {
        self.declarations.push(declaration);
    }

    /// Move a declaration to the back of the list.
    pub fn settle(&mut self, name: &str) {
        if let Some(pos) = self.declarations.iter().position(|d| d.name == name) {
            let declaration = self.declarations.remove(pos);
            self.declarations.push(declaration);
        }
    }

    pub fn last_name(&self) -> Option<&str> {
        self.declarations.last().map(|d| d.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeDeclaration> {
        self.declarations.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.declarations.iter().map(|d| d.name.as_str()).collect()
    }

    pub fn into_vec(self) -> Vec<TypeDeclaration> {
        self.declarations
    }
}

impl IntoIterator for Collector {
    type Item = TypeDeclaration;
    type IntoIter = std::vec::IntoIter<TypeDeclaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.declarations.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(name: &str) -> TypeDeclaration {
        TypeDeclaration {
            name: name.to_string(),
            fields: Vec::new(),
        }
    }

    #[test]
    fn type_expr_display() {
        assert_eq!(TypeExpr::Primitive(Primitive::Number).to_string(), "number");
        assert_eq!(
            TypeExpr::array_of(TypeExpr::Named("Pet".into())).to_string(),
            "Pet[]"
        );
        assert_eq!(
            TypeExpr::array_of(TypeExpr::array_of(TypeExpr::Primitive(Primitive::String)))
                .to_string(),
            "string[][]"
        );
        assert_eq!(TypeExpr::Unknown.to_string(), "unknown");
    }

    #[test]
    fn named_looks_through_arrays() {
        let t = TypeExpr::array_of(TypeExpr::Named("Tag".into()));
        assert_eq!(t.named(), Some("Tag"));
        assert_eq!(TypeExpr::Primitive(Primitive::Object).named(), None);
    }

    #[test]
    fn settle_moves_to_back() {
        let mut c = Collector::new();
        c.push_front(decl("A"));
        c.push_front(decl("B"));
        assert_eq!(c.names(), vec!["B", "A"]);
        c.settle("B");
        assert_eq!(c.names(), vec!["A", "B"]);
        assert_eq!(c.last_name(), Some("B"));
    }

    #[test]
    fn field_comment_appends_format() {
        let field = FieldDecl {
            name: "createdAt".into(),
            type_expression: TypeExpr::Primitive(Primitive::String),
            required: false,
            description: Some("creation time".into()),
            format: Some("date-time".into()),
        };
        assert_eq!(field.comment().as_deref(), Some("creation time date-time"));

        let bare = FieldDecl {
            description: None,
            ..field
        };
        assert_eq!(bare.comment(), None);
    }
}
