use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::MockNode;
use crate::parse::schema::{PropertySchema, SchemaType};

/// `1-enabled 2-disabled` style value listings in descriptions.
static NUMBERED_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)-\S+").expect("invalid regex"));

/// Chooses the mock value for a non-array, non-reference property.
pub trait PlaceholderPolicy {
    /// `depth` is 1 for properties of the response root schema. `None` means
    /// the property gets no value and is left out of its object.
    fn placeholder(&self, name: &str, property: &PropertySchema, depth: usize) -> Option<MockNode>;
}

/// Mock.js tokens, overridable per token from `mock.placeholders` in the
/// project config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DefaultPlaceholders {
    pub string: String,
    pub date_time: String,
    pub integer: String,
    pub boolean: String,
}

impl Default for DefaultPlaceholders {
    fn default() -> Self {
        Self {
            string: "@ctitle(2, 8)".to_string(),
            date_time: "@now(yyyy-MM-dd) @date(HH:mm:ss)".to_string(),
            integer: "@integer(0, 1000)".to_string(),
            boolean: "@boolean()".to_string(),
        }
    }
}

impl PlaceholderPolicy for DefaultPlaceholders {
    fn placeholder(&self, _name: &str, property: &PropertySchema, _depth: usize) -> Option<MockNode> {
        if !property.enum_values.is_empty() {
            let literals: Vec<String> = property.enum_values.iter().map(|v| v.to_string()).collect();
            return Some(pick(&literals));
        }

        let schema_type = property.primary_type();
        if schema_type != Some(SchemaType::Boolean) {
            let prefixes = property
                .description
                .as_deref()
                .map(numbered_prefixes)
                .unwrap_or_default();
            if !prefixes.is_empty() {
                return Some(pick(&prefixes));
            }
        }

        let token = match schema_type? {
            SchemaType::String if property.format.as_deref() == Some("date-time") => &self.date_time,
            SchemaType::String => &self.string,
            SchemaType::Number | SchemaType::Integer => &self.integer,
            SchemaType::Boolean => &self.boolean,
            SchemaType::Object => return Some(MockNode::empty_object()),
            SchemaType::Array | SchemaType::Null | SchemaType::Unknown => return None,
        };
        Some(MockNode::Placeholder(token.clone()))
    }
}

fn pick(values: &[String]) -> MockNode {
    MockNode::Placeholder(format!("@pick([{}])", values.join(", ")))
}

/// Numeric prefixes of every `<n>-label` token, in order.
pub fn numbered_prefixes(description: &str) -> Vec<String> {
    NUMBERED_LABEL
        .captures_iter(description)
        .map(|c| c[1].to_string())
        .collect()
}
