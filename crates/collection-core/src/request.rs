//! Request composition for a single operation

use crate::collection::{Body, KeyValue, Request};
use crate::context::ConversionContext;
use crate::environment::EnvironmentBuilder;
use crate::error::ConvertResult;
use crate::parameters::{apply_parameter, merge_parameters, FORM_URLENCODED, MULTIPART_FORM_DATA};
use crate::security::{apply_auth_override, apply_security, select_requirement};
use std::collections::HashSet;
use swagger_parser::{HttpMethod, Operation, Parameter};

/// Build the full request for one operation.
///
/// `endpoint` must already use colon-style placeholders (`/pets/:petId`).
pub fn build_request(
    ctx: &ConversionContext<'_>,
    endpoint: &str,
    method: HttpMethod,
    operation: &Operation,
    inherited: &[Parameter],
    env: &mut EnvironmentBuilder,
) -> ConvertResult<Request> {
    let mut request = Request::new(ctx.base_url.url_for(endpoint), method.as_str());
    request.description = operation
        .description
        .clone()
        .or_else(|| operation.summary.clone());

    let parameters = merge_parameters(inherited, &operation.parameters);
    let consumes = operation.consumes.as_deref().unwrap_or(ctx.consumes);
    let produces = operation.produces.as_deref().unwrap_or(ctx.produces);
    let security = operation.security.as_deref().unwrap_or(ctx.security);

    if let Some(accept) = accept_type(produces, ctx.options.default_produces_type.as_deref()) {
        request.header.push(KeyValue::new("Accept", accept));
    }

    let overridden = operation
        .meta
        .as_ref()
        .and_then(|meta| meta.auth.as_ref())
        .is_some_and(|auth| apply_auth_override(ctx, auth, &mut request, env));

    if !overridden {
        if let Some(requirement) =
            select_requirement(security, ctx.options.default_security.as_deref())
        {
            apply_security(ctx, requirement, &mut request, env);
        }
    }

    for (name, param) in &parameters {
        ctx.log().debug(&format!("Processing param: {}", name));
        apply_parameter(ctx, param, consumes, &mut request, env)?;
    }

    dedupe_headers(&mut request.header);
    apply_default_body_mode(consumes, &mut request);

    Ok(request)
}

/// The preferred produces type when listed, else the first one
fn accept_type<'p>(produces: &'p [String], preferred: Option<&str>) -> Option<&'p str> {
    preferred
        .and_then(|wanted| produces.iter().find(|pt| pt.as_str() == wanted))
        .or_else(|| produces.first())
        .map(String::as_str)
}

/// Keep the first header for every key
fn dedupe_headers(headers: &mut Vec<KeyValue>) {
    let mut seen = HashSet::new();
    headers.retain(|header| seen.insert(header.key.clone()));
}

/// Give the request a body matching its consumes list when no parameter set one
fn apply_default_body_mode(consumes: &[String], request: &mut Request) {
    if request.body.is_some() {
        return;
    }

    let body = if consumes.iter().any(|ct| ct == FORM_URLENCODED) {
        Body::urlencoded()
    } else if consumes.iter().any(|ct| ct == MULTIPART_FORM_DATA) {
        Body::formdata()
    } else {
        Body::raw("")
    };
    request.body = Some(body);
}
