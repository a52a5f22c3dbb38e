use serde_json::{Map, Value};

use super::MockNode;

/// Generator module source: a default export that receives the Mock.js handle
/// and returns the materialized template. No template renders as `{}`.
pub fn mock_script(template: Option<&MockNode>) -> String {
    let value = template
        .map(MockNode::to_json)
        .unwrap_or_else(|| Value::Object(Map::new()));
    let pretty = format!("{value:#}").replace('\n', "\n  ");
    format!("export default ({{ Mockjs }}) => {{\n  return Mockjs.mock({pretty})\n}}\n")
}
