//! Parameter projection onto requests

use crate::collection::{Body, BodyMode, Description, FormParameter, KeyValue, Request};
use crate::context::ConversionContext;
use crate::environment::{variable_token, EnvironmentBuilder};
use crate::error::ConvertResult;
use indexmap::IndexMap;
use swagger_parser::{Parameter, ParameterLocation};

pub(crate) const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
pub(crate) const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// Merge path-item parameters with operation parameters keyed by name.
///
/// Operation entries replace inherited ones with the same name; order is
/// inherited first, then parameters only the operation declares.
pub fn merge_parameters<'p>(
    inherited: &'p [Parameter],
    own: &'p [Parameter],
) -> IndexMap<&'p str, &'p Parameter> {
    let mut merged = IndexMap::new();
    for param in inherited.iter().chain(own) {
        merged.insert(param.name.as_str(), param);
    }
    merged
}

/// Project one parameter onto the request according to its location
pub fn apply_parameter(
    ctx: &ConversionContext<'_>,
    param: &Parameter,
    consumes: &[String],
    request: &mut Request,
    env: &mut EnvironmentBuilder,
) -> ConvertResult<()> {
    match param.location {
        ParameterLocation::Query => {
            if ctx.options.exclude_query_params
                || (!param.required && ctx.options.exclude_optional_query_params)
            {
                return Ok(());
            }
            request.url.query.push(placeholder(param));
            env.add(&param.name);
        }
        ParameterLocation::Header => {
            request.header.push(placeholder(param));
            env.add(&param.name);
        }
        ParameterLocation::Path => {
            request.url.variable.push(placeholder(param));
            env.add(&param.name);
        }
        ParameterLocation::Body => apply_body(ctx, param, consumes, request, env)?,
        ParameterLocation::FormData => {
            apply_form_field(param, consumes, request);
            env.add(&param.name);
        }
    }

    Ok(())
}

fn placeholder(param: &Parameter) -> KeyValue {
    KeyValue::new(param.name.clone(), variable_token(&param.name))
        .with_description(param.description.clone())
}

fn apply_body(
    ctx: &ConversionContext<'_>,
    param: &Parameter,
    consumes: &[String],
    request: &mut Request,
    env: &mut EnvironmentBuilder,
) -> ConvertResult<()> {
    let json_type = consumes.iter().find(|ct| ct.contains("json"));

    let mut rendered = None;
    if let (false, Some(schema), Some(content_type)) =
        (ctx.options.exclude_body_template, &param.schema, json_type)
    {
        request
            .header
            .push(KeyValue::new("Content-Type", content_type.clone()));
        rendered = ctx.template.render_text(schema)?;
    }

    let raw = match rendered.filter(|raw| !raw.is_empty()) {
        Some(raw) => raw,
        None => param.description.clone().unwrap_or_default(),
    };
    // examples and descriptions may carry placeholders of their own
    env.add_referenced(&raw);

    let body = request.body.get_or_insert_with(|| Body::raw(""));
    body.mode = BodyMode::Raw;
    body.raw = Some(raw);

    Ok(())
}

fn apply_form_field(param: &Parameter, consumes: &[String], request: &mut Request) {
    let field = FormParameter {
        key: param.name.clone(),
        value: variable_token(&param.name),
        enabled: true,
        description: Description::markdown(param.description.clone().unwrap_or_default()),
    };

    if consumes.iter().any(|ct| ct == FORM_URLENCODED) {
        let body = request.body.get_or_insert_with(Body::urlencoded);
        body.mode = BodyMode::Urlencoded;
        body.urlencoded.get_or_insert_with(Vec::new).push(field);
        request
            .header
            .push(KeyValue::new("Content-Type", FORM_URLENCODED));
    } else {
        // multipart is assumed even when the content type is absent
        let body = request.body.get_or_insert_with(Body::formdata);
        body.mode = BodyMode::Formdata;
        body.formdata.get_or_insert_with(Vec::new).push(field);
    }
}
