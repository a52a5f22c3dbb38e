pub mod document;
pub mod operation;
pub mod parameter;
pub mod reference;
pub mod schema;

use crate::error::ParseError;
use document::Document;

/// Parse a Swagger/OpenAPI document from YAML.
pub fn from_yaml(input: &str) -> Result<Document, ParseError> {
    let doc: Document = serde_yaml_ng::from_str(input)?;
    validate_version(&doc)?;
    Ok(doc)
}

/// Parse a Swagger/OpenAPI document from JSON.
pub fn from_json(input: &str) -> Result<Document, ParseError> {
    let doc: Document = serde_json::from_str(input)?;
    validate_version(&doc)?;
    Ok(doc)
}

/// Parse JSON or YAML, sniffing the first non-blank character.
pub fn from_str(input: &str) -> Result<Document, ParseError> {
    if input.trim_start().starts_with('{') {
        from_json(input)
    } else {
        from_yaml(input)
    }
}

fn validate_version(doc: &Document) -> Result<(), ParseError> {
    match (&doc.swagger, &doc.openapi) {
        (Some(v), _) if !v.starts_with("2.") => Err(ParseError::UnsupportedVersion(v.clone())),
        (_, Some(v)) if !v.starts_with("3.") => Err(ParseError::UnsupportedVersion(v.clone())),
        (None, None) => Err(ParseError::UnknownShape),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_json_and_yaml() {
        assert!(from_str(r#"  {"swagger": "2.0", "paths": {}}"#).is_ok());
        assert!(from_str("openapi: 3.0.0\npaths: {}\n").is_ok());
    }

    #[test]
    fn rejects_foreign_versions() {
        assert!(matches!(
            from_json(r#"{"swagger": "1.2"}"#),
            Err(ParseError::UnsupportedVersion(_))
        ));
        assert!(matches!(from_json("{}"), Err(ParseError::UnknownShape)));
    }
}
