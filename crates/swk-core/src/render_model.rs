//! The data handed to a templating backend for one operation.
//!
//! A single [`RenderModel`] serves both output flavours; the backend is told
//! which one to produce with a [`Variant`].

use serde::Serialize;
use serde_json::Value;

use crate::locate::collapse_slashes;
use crate::model::{Collector, FieldDecl, OperationPlan, TypeDeclaration};
use crate::naming::is_identifier;
use crate::parse::document::Document;

/// Which client flavour to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Declarations, typed parameters and a response type assertion.
    Typed,
    /// Bare parameters, no declarations.
    Untyped,
}

impl Variant {
    pub fn is_typed(&self) -> bool {
        matches!(self, Variant::Typed)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Prefix joined onto every request path.
    pub base_path: Option<String>,
}

impl RenderOptions {
    /// Use `configured` when given, else the document's own `basePath`.
    pub fn for_document(doc: &Document, configured: Option<&str>) -> Self {
        Self {
            base_path: configured
                .map(String::from)
                .or_else(|| doc.base_path.clone())
                .filter(|p| !p.trim().is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldModel {
    pub name: String,
    pub type_expression: String,
    pub required: bool,
    /// Trailing comment text: description, then format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceModel {
    pub name: String,
    pub fields: Vec<FieldModel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderModel {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    pub path_interfaces: Vec<InterfaceModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_variable_type_name: Option<String>,

    pub query_interfaces: Vec<InterfaceModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_type_name: Option<String>,

    pub body_interfaces: Vec<InterfaceModel>,
    /// A declaration name or an array type such as `Order[]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_type_name: Option<String>,

    pub response_interfaces: Vec<InterfaceModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_type_name: Option<String>,

    /// A quoted string, or a template literal substituting path variables.
    pub url_expression: String,
    /// The quoted lower-case HTTP method.
    pub method_literal: String,
}

impl RenderModel {
    pub fn from_plan(plan: &OperationPlan, options: &RenderOptions) -> Self {
        Self {
            name: plan.name.clone(),
            comment: plan.comment(),
            path_interfaces: interfaces(&plan.path_declarations),
            path_variable_type_name: plan.path_type_name.clone(),
            query_interfaces: interfaces(&plan.query_declarations),
            query_type_name: plan.query_type_name.clone(),
            body_interfaces: interfaces(&plan.body_declarations),
            body_type_name: plan.body_type.as_ref().map(ToString::to_string),
            response_interfaces: interfaces(&plan.response_declarations),
            response_type_name: plan.response_type.as_ref().map(ToString::to_string),
            url_expression: url_expression(
                options.base_path.as_deref(),
                &plan.path,
                !plan.path_variables.is_empty(),
            ),
            method_literal: Value::String(plan.method.as_key().to_string()).to_string(),
        }
    }

    /// Every interface in path, query, body, response order, one per name.
    ///
    /// A schema used in more than one role is declared once; a field is
    /// required only if every copy requires it, so response fields stay
    /// optional.
    pub fn declarations(&self) -> Vec<InterfaceModel> {
        let mut merged: Vec<InterfaceModel> = Vec::new();
        for interface in self
            .path_interfaces
            .iter()
            .chain(&self.query_interfaces)
            .chain(&self.body_interfaces)
            .chain(&self.response_interfaces)
        {
            match merged.iter_mut().find(|m| m.name == interface.name) {
                Some(existing) => existing.relax_required(interface),
                None => merged.push(interface.clone()),
            }
        }
        merged
    }
}

impl InterfaceModel {
    fn relax_required(&mut self, other: &InterfaceModel) {
        for field in &mut self.fields {
            if let Some(copy) = other.fields.iter().find(|f| f.name == field.name) {
                field.required &= copy.required;
            }
        }
    }
}

fn interfaces(collector: &Collector) -> Vec<InterfaceModel> {
    collector.iter().map(interface).collect()
}

fn interface(declaration: &TypeDeclaration) -> InterfaceModel {
    InterfaceModel {
        name: declaration.name.clone(),
        fields: declaration.fields.iter().map(field).collect(),
    }
}

fn field(decl: &FieldDecl) -> FieldModel {
    FieldModel {
        name: decl.name.clone(),
        type_expression: decl.type_expression.to_string(),
        required: decl.required,
        description: decl.comment(),
    }
}

/// The request URL as a JavaScript expression.
///
/// Without substitution this is a plain string literal. Otherwise every
/// `{name}` becomes `${pathVariables.name}`, or `${pathVariables["name"]}` for
/// names that are not identifiers.
pub fn url_expression(base_path: Option<&str>, path: &str, substitute: bool) -> String {
    let full = match base_path {
        Some(base) => collapse_slashes(&format!("{base}/{path}")),
        None => collapse_slashes(path),
    };
    if !substitute {
        return Value::String(full).to_string();
    }

    let mut out = String::from("`");
    let mut rest = full.as_str();
    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        push_template_text(&mut out, &rest[..open]);
        let variable = &rest[open + 1..open + close];
        if is_identifier(variable) {
            out.push_str(&format!("${{pathVariables.{variable}}}"));
        } else {
            let key = Value::String(variable.to_string());
            out.push_str(&format!("${{pathVariables[{key}]}}"));
        }
        rest = &rest[open + close + 1..];
    }
    push_template_text(&mut out, rest);
    out.push('`');
    out
}

fn push_template_text(out: &mut String, text: &str) {
    for ch in text.chars() {
        if matches!(ch, '`' | '\\' | '$') {
            out.push('\\');
        }
        out.push(ch);
    }
}
