use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::model::{Collector, FieldDecl, OperationPlan, Primitive, TypeDeclaration, TypeExpr};
use crate::naming;
use crate::parse::document::Document;
use crate::parse::operation::{HttpMethod, Operation, PathItem};
use crate::parse::parameter::{Parameter, ParameterEntry, ParameterLocation};
use crate::parse::reference::SchemaTable;
use crate::parse::schema::PropertySchema;

use super::types::{element_ref, resolve_type, type_for_property};

/// Analyze one `(path, method)`. `None` when the document has no such
/// operation.
pub fn analyze(doc: &Document, path: &str, method: HttpMethod) -> Option<OperationPlan> {
    let item = doc.paths.get(path)?;
    let operation = item.operation(method)?;
    Some(analyze_operation(doc, path, method, item, operation))
}

/// Analyze every operation of the document, in document order.
pub fn analyze_all(doc: &Document) -> Vec<OperationPlan> {
    doc.paths
        .iter()
        .flat_map(|(path, item)| {
            item.operations()
                .map(move |(method, op)| analyze_operation(doc, path, method, item, op))
        })
        .collect()
}

fn analyze_operation(
    doc: &Document,
    path: &str,
    method: HttpMethod,
    item: &PathItem,
    operation: &Operation,
) -> OperationPlan {
    let schemas = doc.schemas();
    let mut diagnostics = Diagnostics::new();

    let name = naming::operation_name(operation.operation_id.as_deref(), method, path);
    let path_variables = naming::path_variables(path);
    let parameters = merged_parameters(item, operation, &mut diagnostics);

    let (path_declarations, path_type_name) = path_interface(
        &name,
        &path_variables,
        &parameters,
        schemas,
        &mut diagnostics,
    );
    let (query_declarations, query_type_name) = query_interface(
        &name,
        &path_variables,
        &parameters,
        schemas,
        &mut diagnostics,
    );
    let (body_declarations, body_type) = request_body(&parameters, schemas, &mut diagnostics);
    let (response_declarations, response_type) =
        response_body(operation, schemas, &mut diagnostics);

    log::debug!(
        "analyzed {} {path} as {name} ({} diagnostics)",
        method,
        diagnostics.len()
    );

    OperationPlan {
        name,
        path: path.to_string(),
        method,
        summary: operation.summary.clone(),
        description: operation.description.clone(),
        path_variables,
        path_declarations,
        path_type_name,
        query_declarations,
        query_type_name,
        body_declarations,
        body_type,
        response_declarations,
        response_type,
        diagnostics,
    }
}

/// Path-item parameters overlaid with operation parameters (operation wins
/// on equal name and location), followed by a synthetic `body` parameter for a
/// v3 `requestBody`.
fn merged_parameters(
    item: &PathItem,
    operation: &Operation,
    diagnostics: &mut Diagnostics,
) -> Vec<Parameter> {
    let mut merged: Vec<Parameter> = Vec::new();
    for entry in item.parameters.iter().chain(&operation.parameters) {
        let parameter = match entry {
            ParameterEntry::Inline(p) => p,
            ParameterEntry::Reference { reference } => {
                diagnostics.report(
                    DiagnosticKind::IgnoredParameter,
                    reference.as_str(),
                    "shared parameter references are not followed",
                );
                continue;
            }
        };
        match merged
            .iter_mut()
            .find(|p| p.name == parameter.name && p.location == parameter.location)
        {
            Some(existing) => *existing = parameter.clone(),
            None => merged.push(parameter.clone()),
        }
    }

    let has_body = merged.iter().any(|p| p.location == ParameterLocation::Body);
    if let Some(request_body) = operation.request_body.as_ref().filter(|_| !has_body) {
        let schema = request_body
            .content
            .values()
            .next()
            .and_then(|media| media.schema.clone());
        if schema.is_some() {
            merged.push(Parameter {
                name: "body".to_string(),
                location: ParameterLocation::Body,
                description: request_body.description.clone(),
                required: request_body.required,
                param_type: None,
                format: None,
                items: None,
                schema,
            });
        }
    }
    merged
}

/// Query and path fields take primitives (and arrays of them); referenced
/// schemas travel in the body.
fn is_field_candidate(parameter: &Parameter) -> bool {
    parameter.schema_ref().is_none()
        && !(parameter.has_array_schema() && parameter.location != ParameterLocation::Query)
}

fn query_interface(
    name: &str,
    path_variables: &[String],
    parameters: &[Parameter],
    schemas: SchemaTable<'_>,
    diagnostics: &mut Diagnostics,
) -> (Collector, Option<String>) {
    let type_name = format!("{}Query", naming::capitalize(name));
    let mut collector = Collector::new();
    let fields: Vec<FieldDecl> = parameters
        .iter()
        .filter(|p| p.location == ParameterLocation::Query)
        .filter(|p| !path_variables.contains(&p.name))
        .filter(|p| is_field_candidate(p))
        .filter_map(|p| parameter_field(p, &type_name, schemas, &mut collector, diagnostics))
        .collect();
    finish_interface(collector, type_name, fields)
}

fn path_interface(
    name: &str,
    path_variables: &[String],
    parameters: &[Parameter],
    schemas: SchemaTable<'_>,
    diagnostics: &mut Diagnostics,
) -> (Collector, Option<String>) {
    let type_name = format!("{}PathVariables", naming::capitalize(name));
    let mut collector = Collector::new();
    let mut fields: Vec<FieldDecl> = Vec::new();

    for variable in path_variables {
        if fields.iter().any(|f| &f.name == variable) {
            continue;
        }
        let declared = parameters.iter().find(|p| {
            &p.name == variable
                && matches!(p.location, ParameterLocation::Path | ParameterLocation::Query)
        });
        let field = match declared {
            Some(parameter) if is_field_candidate(parameter) => {
                parameter_field(parameter, &type_name, schemas, &mut collector, diagnostics)
            }
            Some(_) => {
                diagnostics.report(
                    DiagnosticKind::IgnoredParameter,
                    format!("{type_name}.{variable}"),
                    "path variable declared with a non-primitive schema",
                );
                None
            }
            None => {
                diagnostics.report(
                    DiagnosticKind::UndeclaredPathVariable,
                    format!("{type_name}.{variable}"),
                    "no parameter declares this path variable",
                );
                None
            }
        };
        // Every path variable is substituted into the URL, so it always gets
        // a field.
        fields.push(field.unwrap_or_else(|| FieldDecl {
            name: variable.clone(),
            type_expression: TypeExpr::Primitive(Primitive::String),
            required: true,
            description: None,
            format: None,
        }));
    }
    finish_interface(collector, type_name, fields)
}

fn parameter_field(
    parameter: &Parameter,
    type_name: &str,
    schemas: SchemaTable<'_>,
    collector: &mut Collector,
    diagnostics: &mut Diagnostics,
) -> Option<FieldDecl> {
    let property = parameter.as_property();
    let Some(type_expression) = resolve_schema(&property, schemas, collector, true, diagnostics)
    else {
        diagnostics.report(
            DiagnosticKind::IgnoredParameter,
            format!("{type_name}.{}", parameter.name),
            "parameter has no usable type",
        );
        return None;
    };
    Some(FieldDecl {
        name: parameter.name.clone(),
        type_expression,
        required: parameter.required,
        description: property.description,
        format: property.format,
    })
}

fn finish_interface(
    mut collector: Collector,
    type_name: String,
    fields: Vec<FieldDecl>,
) -> (Collector, Option<String>) {
    if fields.is_empty() {
        return (Collector::new(), None);
    }
    collector.push_back(TypeDeclaration {
        name: type_name.clone(),
        fields,
    });
    (collector, Some(type_name))
}

fn request_body(
    parameters: &[Parameter],
    schemas: SchemaTable<'_>,
    diagnostics: &mut Diagnostics,
) -> (Collector, Option<TypeExpr>) {
    let mut collector = Collector::new();
    let body = parameters.iter().find(|p| {
        p.location == ParameterLocation::Body && (p.schema_ref().is_some() || p.has_array_schema())
    });
    let body_type = body
        .and_then(|p| p.schema.as_ref())
        .and_then(|schema| resolve_schema(schema, schemas, &mut collector, true, diagnostics));
    (collector, body_type)
}

fn response_body(
    operation: &Operation,
    schemas: SchemaTable<'_>,
    diagnostics: &mut Diagnostics,
) -> (Collector, Option<TypeExpr>) {
    let mut collector = Collector::new();
    let response_type = operation
        .ok_response()
        .and_then(|response| response.body_schema())
        .filter(|schema| element_ref(schema).is_some())
        .and_then(|schema| resolve_schema(schema, schemas, &mut collector, false, diagnostics));
    (collector, response_type)
}

/// Type a schema and resolve the declaration it names (if any) into
/// `collector`.
fn resolve_schema(
    schema: &PropertySchema,
    schemas: SchemaTable<'_>,
    collector: &mut Collector,
    mark_required: bool,
    diagnostics: &mut Diagnostics,
) -> Option<TypeExpr> {
    let type_expression = type_for_property(schema, schemas, diagnostics)?;
    if type_expression.named().is_some() {
        if let Some(reference) = element_ref(schema) {
            resolve_type(reference, schemas, collector, mark_required, diagnostics);
        }
    }
    Some(type_expression)
}
