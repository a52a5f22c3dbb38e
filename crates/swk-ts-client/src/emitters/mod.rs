pub mod api;

use minijinja::Environment;

/// Escape `*/` sequences that would prematurely close JSDoc comment blocks.
fn escape_jsdoc(value: String) -> String {
    value.replace("*/", "*\\/")
}

/// Collapse line breaks and runs of whitespace so text fits a `//` comment.
fn one_line(value: String) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Property key: bare when it is an identifier, quoted otherwise.
fn prop_key(value: String) -> String {
    if swk_core::naming::is_identifier(&value) {
        value
    } else {
        serde_json::Value::String(value).to_string()
    }
}

/// Name the client module template is registered under.
pub const API_TEMPLATE: &str = "api.ts.j2";

/// Template environment shared by every emitter. A project template, when
/// given, is registered as [`API_TEMPLATE`] instead of the built-in one.
pub fn environment(
    api_template: Option<&str>,
) -> Result<Environment<'_>, minijinja::Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env.add_filter("escape_jsdoc", escape_jsdoc);
    env.add_filter("one_line", one_line);
    env.add_filter("prop_key", prop_key);
    let source = api_template.unwrap_or(include_str!("../../templates/api.ts.j2"));
    env.add_template(API_TEMPLATE, source)?;
    Ok(env)
}
