//! Map concrete request paths back onto document path templates.

use std::collections::HashMap;

use regex::Regex;

use crate::parse::document::Document;
use crate::parse::operation::HttpMethod;

/// A matched operation: the document's own path template plus the method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located<'a> {
    pub template: &'a str,
    pub method: HttpMethod,
}

/// Lookup from `/shop/42/order` to `/shop/{itemId}/order`.
///
/// Literal paths are matched exactly before templated ones, which are tried
/// in document order. Both are mounted under an optional prefix.
#[derive(Debug)]
pub struct PathLocator<'a> {
    doc: &'a Document,
    literal: HashMap<String, &'a str>,
    templated: Vec<(Regex, &'a str)>,
}

impl<'a> PathLocator<'a> {
    pub fn new(doc: &'a Document, prefix: Option<&str>) -> Self {
        let mut literal = HashMap::new();
        let mut templated = Vec::new();

        for template in doc.paths.keys() {
            let mounted = mount(prefix, template);
            if template.contains('{') {
                match Regex::new(&template_pattern(&mounted)) {
                    Ok(re) => templated.push((re, template.as_str())),
                    Err(e) => log::warn!("skipping path template {template}: {e}"),
                }
            } else {
                literal.insert(mounted, template.as_str());
            }
        }

        Self {
            doc,
            literal,
            templated,
        }
    }

    pub fn locate(&self, request_path: &str, method: HttpMethod) -> Option<Located<'a>> {
        let declares = |template: &str| self.doc.operation(template, method).is_some();

        if let Some(&template) = self.literal.get(request_path) {
            if declares(template) {
                return Some(Located { template, method });
            }
        }
        self.templated
            .iter()
            .find(|(re, template)| re.is_match(request_path) && declares(template))
            .map(|&(_, template)| Located { template, method })
    }
}

/// Join prefix and template, collapsing repeated slashes.
pub fn mount(prefix: Option<&str>, template: &str) -> String {
    let joined = match prefix {
        Some(prefix) => format!("{prefix}/{template}"),
        None => template.to_string(),
    };
    collapse_slashes(&joined)
}

pub fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for ch in path.chars() {
        if ch == '/' && out.ends_with('/') {
            continue;
        }
        out.push(ch);
    }
    out
}

/// Anchored regex where each `{name}` matches one path segment.
fn template_pattern(template: &str) -> String {
    let mut pattern = String::from("^");
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        pattern.push_str(&regex::escape(&rest[..open]));
        pattern.push_str("[^/]+");
        rest = &rest[open + close + 1..];
    }
    pattern.push_str(&regex::escape(rest));
    pattern.push('$');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn doc() -> Document {
        parse::from_yaml(
            r#"
swagger: "2.0"
paths:
  /shop/{itemId}/order:
    get: {}
  /shop/latest/order:
    post: {}
  /shop/items:
    get: {}
"#,
        )
        .unwrap()
    }

    #[test]
    fn literal_then_template() {
        let doc = doc();
        let locator = PathLocator::new(&doc, None);
        assert_eq!(
            locator.locate("/shop/items", HttpMethod::Get).map(|l| l.template),
            Some("/shop/items")
        );
        assert_eq!(
            locator.locate("/shop/42/order", HttpMethod::Get).map(|l| l.template),
            Some("/shop/{itemId}/order")
        );
        // The literal path exists but only for POST; the template serves GET.
        assert_eq!(
            locator.locate("/shop/latest/order", HttpMethod::Get).map(|l| l.template),
            Some("/shop/{itemId}/order")
        );
        assert!(locator.locate("/shop/42/order/extra", HttpMethod::Get).is_none());
        assert!(locator.locate("/shop/42/order", HttpMethod::Delete).is_none());
    }

    #[test]
    fn prefix_mounts_every_path() {
        let doc = doc();
        let locator = PathLocator::new(&doc, Some("/api/"));
        assert_eq!(
            locator.locate("/api/shop/7/order", HttpMethod::Get).map(|l| l.template),
            Some("/shop/{itemId}/order")
        );
        assert!(locator.locate("/shop/7/order", HttpMethod::Get).is_none());
    }

    #[test]
    fn slashes_collapse() {
        assert_eq!(mount(Some("/api/"), "/v1//items"), "/api/v1/items");
        assert_eq!(template_pattern("/a.b/{id}"), r"^/a\.b/[^/]+$");
    }
}
