use minijinja::context;
use serde::Serialize;
use swk_core::render_model::{InterfaceModel, RenderModel, Variant};

use super::{API_TEMPLATE, environment};
use crate::error::RenderError;
use crate::generator::TsClientConfig;

#[derive(Serialize)]
struct FieldContext<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    type_expression: &'a str,
    required: bool,
    comment: Option<&'a str>,
}

#[derive(Serialize)]
struct InterfaceContext<'a> {
    name: &'a str,
    fields: Vec<FieldContext<'a>>,
}

impl<'a> From<&'a InterfaceModel> for InterfaceContext<'a> {
    fn from(interface: &'a InterfaceModel) -> Self {
        Self {
            name: &interface.name,
            fields: interface
                .fields
                .iter()
                .map(|f| FieldContext {
                    name: &f.name,
                    type_expression: &f.type_expression,
                    required: f.required,
                    comment: f.description.as_deref(),
                })
                .collect(),
        }
    }
}

/// Emit one client module: declarations (typed only), the request function
/// and its default export.
pub fn emit_api(
    model: &RenderModel,
    variant: Variant,
    config: &TsClientConfig,
) -> Result<String, RenderError> {
    let env = environment(config.template.as_deref())?;
    let tmpl = env.get_template(API_TEMPLATE)?;
    let typed = variant.is_typed();

    let merged = if typed {
        model.declarations()
    } else {
        Vec::new()
    };
    let declarations: Vec<InterfaceContext<'_>> =
        merged.iter().map(InterfaceContext::from).collect();

    let rendered = tmpl.render(context! {
        request_import => &config.request_import,
        typed => typed,
        declarations => declarations,
        comment => &model.comment,
        no_jsdoc => config.no_jsdoc,
        name => &model.name,
        params => parameters(model, typed),
        url => &model.url_expression,
        method => &model.method_literal,
        has_query => model.query_type_name.is_some(),
        has_body => model.body_type_name.is_some(),
        path_type => &model.path_variable_type_name,
        query_type => &model.query_type_name,
        body_type => &model.body_type_name,
        response_type => if typed { model.response_type_name.as_deref() } else { None },
    })?;
    Ok(rendered)
}

/// `pathVariables`, `query`, `data` in that order, annotated when typed.
fn parameters(model: &RenderModel, typed: bool) -> Vec<String> {
    [
        ("pathVariables", model.path_variable_type_name.as_deref()),
        ("query", model.query_type_name.as_deref()),
        ("data", model.body_type_name.as_deref()),
    ]
    .into_iter()
    .filter_map(|(param, type_name)| {
        let type_name = type_name?;
        Some(if typed {
            format!("{param}: {type_name}")
        } else {
            param.to_string()
        })
    })
    .collect()
}
