use heck::{ToLowerCamelCase, ToPascalCase};

use crate::parse::operation::HttpMethod;

/// Canonical function name for an operation.
///
/// Springfox-style ids carry a `Using<METHOD>` tail (`listItemsUsingGET`),
/// which is cut at the first `Using`. Without an `operationId` the name is
/// derived from the route.
pub fn operation_name(operation_id: Option<&str>, method: HttpMethod, path: &str) -> String {
    let raw = match operation_id.map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => truncate_using(id).to_string(),
        None => route_to_name(method, path),
    };
    if is_identifier(&raw) {
        raw
    } else {
        camel_identifier(&raw)
    }
}

/// Cut an operation id at its first `Using`, unless that leaves nothing.
pub fn truncate_using(operation_id: &str) -> &str {
    match operation_id.find("Using") {
        Some(0) | None => operation_id,
        Some(index) => &operation_id[..index],
    }
}

/// Upper-case the first character, leaving the rest untouched
/// (`listItems` → `ListItems`).
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whether `name` can be used as a bare JavaScript identifier / dot-access key.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// `{name}` tokens of a path template, in order of appearance.
pub fn path_variables(path: &str) -> Vec<String> {
    let mut vars = Vec::new();
    let mut rest = path;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            break;
        };
        if close > 0 {
            vars.push(after[..close].to_string());
        }
        rest = &after[close + 1..];
    }
    vars
}

/// Fallback name for an operation without an `operationId`: a verb for the
/// method followed by the literal path segments (`GET /users/{userId}` →
/// `getUser`). A trailing path variable addresses one item, so the last
/// segment is made singular.
pub fn route_to_name(method: HttpMethod, path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let one_item = segments.last().is_some_and(|s| is_variable_segment(s));
    let verb = match method {
        HttpMethod::Get if one_item => "get",
        HttpMethod::Get => "list",
        HttpMethod::Post => "create",
        HttpMethod::Put => "update",
        other => other.as_key(),
    };

    let literals: Vec<&str> = segments
        .into_iter()
        .filter(|s| !is_variable_segment(s))
        .collect();
    let mut name = verb.to_string();
    for (i, segment) in literals.iter().enumerate() {
        let word = if one_item && i + 1 == literals.len() {
            singular(segment)
        } else {
            segment.to_string()
        };
        name.push_str(&words(&word).to_pascal_case());
    }
    name
}

/// Output module stem for an operation: the mounted path template without
/// its leading slash, with `-<method>` appended when the path declares more
/// than one method (`/shop/{itemId}/order` → `shop/{itemId}/order-get`).
pub fn module_stem(
    base_path: Option<&str>,
    path: &str,
    method: HttpMethod,
    shared_path: bool,
) -> String {
    let mounted = crate::locate::mount(base_path, path);
    let mut stem = mounted.trim_matches('/').to_string();
    if stem.is_empty() {
        stem.push_str("index");
    }
    if shared_path {
        stem.push('-');
        stem.push_str(method.as_key());
    }
    stem
}

fn is_variable_segment(segment: &str) -> bool {
    segment.starts_with('{') && segment.ends_with('}')
}

const PLURAL_ENDINGS: [(&str, &str); 4] = [("ies", "y"), ("ses", "s"), ("xes", "x"), ("zes", "z")];

fn singular(word: &str) -> String {
    for (plural, one) in PLURAL_ENDINGS {
        if let Some(stem) = word.strip_suffix(plural).filter(|stem| !stem.is_empty()) {
            return format!("{stem}{one}");
        }
    }
    match word.strip_suffix('s') {
        Some(stem) if !stem.is_empty() && !stem.ends_with('s') => stem.to_string(),
        _ => word.to_string(),
    }
}

/// Alphanumeric runs joined with `_`, ready for heck's case conversions.
fn words(raw: &str) -> String {
    raw.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// camelCase identifier from arbitrary text; digits cannot lead.
fn camel_identifier(raw: &str) -> String {
    let name = words(raw).to_lower_camel_case();
    match name.chars().next() {
        None => "unnamed".to_string(),
        Some(c) if c.is_ascii_digit() => format!("_{name}"),
        Some(_) => name,
    }
}
