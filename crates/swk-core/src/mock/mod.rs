//! Synthetic response payloads derived from the same schema graph as the
//! client types.
//!
//! A [`MockNode`] tree is a template for a Mock.js-style generator: leaves are
//! placeholder tokens (`@integer(0, 1000)`), array keys carry a repeat count
//! (`items|6`). It renders either as a JSON value or as a small generator
//! script.

pub mod placeholder;
pub mod resolver;
pub mod script;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

pub use placeholder::{DefaultPlaceholders, PlaceholderPolicy};
pub use resolver::{MockOptions, mock_template, resolve_mock};
pub use script::mock_script;

/// One node of a mock template.
#[derive(Debug, Clone, PartialEq)]
pub enum MockNode {
    /// A generator token such as `@ctitle(2, 8)`.
    Placeholder(String),
    /// A fixed value.
    Literal(Value),
    Object(Vec<MockField>),
    /// An array holding one element template; `None` when the element
    /// resolved to no value.
    Array(Option<Box<MockNode>>),
}

/// A keyed member of a [`MockNode::Object`].
#[derive(Debug, Clone, PartialEq)]
pub struct MockField {
    pub name: String,
    /// How many elements the generator should produce, for array members.
    pub repeat: Option<usize>,
    pub value: MockNode,
}

impl MockField {
    /// The rendered key: `name`, or `name|count` for repeated members.
    pub fn key(&self) -> String {
        match self.repeat {
            Some(count) => format!("{}|{count}", self.name),
            None => self.name.clone(),
        }
    }
}

impl MockNode {
    pub fn empty_object() -> Self {
        MockNode::Object(Vec::new())
    }

    pub fn field(&self, name: &str) -> Option<&MockField> {
        match self {
            MockNode::Object(fields) => fields.iter().find(|f| f.name == name),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            MockNode::Placeholder(token) => Value::String(token.clone()),
            MockNode::Literal(value) => value.clone(),
            MockNode::Object(fields) => {
                let map: Map<String, Value> =
                    fields.iter().map(|f| (f.key(), f.value.to_json())).collect();
                Value::Object(map)
            }
            MockNode::Array(element) => {
                Value::Array(element.iter().map(|e| e.to_json()).collect())
            }
        }
    }
}

impl Serialize for MockNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
