//! Security requirement projection

use crate::collection::{Auth, BasicParams, KeyValue, OAuth2Params, Request, StandardAuth};
use crate::context::ConversionContext;
use crate::environment::{variable_token, EnvironmentBuilder};
use serde_json::Value;
use swagger_parser::{ApiKeyLocation, SecurityDefinition, SecurityRequirement};

/// Auth types a vendor override may carry
const AUTH_TYPES: [&str; 9] = [
    "awsv4", "basic", "bearer", "digest", "hawk", "noauth", "oauth1", "oauth2", "ntlm",
];

/// Pick the single requirement to apply: the preferred scheme if listed, else the first
pub fn select_requirement<'r>(
    requirements: &'r [SecurityRequirement],
    preferred: Option<&str>,
) -> Option<&'r SecurityRequirement> {
    preferred
        .and_then(|name| requirements.iter().find(|req| req.contains_key(name)))
        .or_else(|| requirements.first())
}

/// Project every scheme of one requirement onto the request
pub fn apply_security(
    ctx: &ConversionContext<'_>,
    requirement: &SecurityRequirement,
    request: &mut Request,
    env: &mut EnvironmentBuilder,
) {
    for (scheme_name, scopes) in requirement {
        let Some(definition) = ctx.security_definitions.get(scheme_name) else {
            ctx.log()
                .warn(&format!("Unknown security requirement: {}", scheme_name));
            continue;
        };

        ctx.log().debug(&format!(
            "Adding security details to request of type: {}",
            definition.kind()
        ));

        match definition {
            SecurityDefinition::OAuth2 { description, .. } => {
                if !scopes.is_empty() {
                    request.auth = Some(Auth::Standard(StandardAuth::OAuth2 {
                        oauth2: OAuth2Params {
                            scope: scopes.join(" "),
                        },
                    }));
                }

                let variable = format!("{}_access_token", scheme_name);
                request.header.push(
                    KeyValue::new(
                        "Authorization",
                        format!("Bearer {}", variable_token(&variable)),
                    )
                    .with_description(description.clone()),
                );
                env.add(&variable);
            }
            SecurityDefinition::Basic { .. } => {
                let username = format!("{}_username", scheme_name);
                let password = format!("{}_password", scheme_name);
                request.auth = Some(Auth::Standard(StandardAuth::Basic {
                    basic: BasicParams {
                        username: variable_token(&username),
                        password: variable_token(&password),
                    },
                }));
                env.add(&username);
                env.add(&password);
            }
            SecurityDefinition::ApiKey {
                name,
                location,
                description,
            } => {
                let variable = format!("{}_apikey", scheme_name);
                let entry = KeyValue::new(name.clone(), variable_token(&variable))
                    .with_description(description.clone());
                match location {
                    ApiKeyLocation::Header => request.header.push(entry),
                    ApiKeyLocation::Query => request.url.query.push(entry),
                }
                env.add(&variable);
            }
        }
    }
}

/// Copy a vendor auth override onto the request.
///
/// Returns `false` when the override is not a recognised auth block, in which
/// case the request is left untouched.
pub fn apply_auth_override(
    ctx: &ConversionContext<'_>,
    auth: &Value,
    request: &mut Request,
    env: &mut EnvironmentBuilder,
) -> bool {
    let auth_type = auth.get("type").and_then(Value::as_str);
    let recognised = auth_type
        .is_some_and(|t| AUTH_TYPES.contains(&t) && auth.get(t).is_some());

    if !recognised {
        ctx.log().warn(&format!(
            "Ignoring auth override with unsupported type: {}",
            auth_type.unwrap_or("<none>")
        ));
        return false;
    }

    env.add_referenced_in(auth);
    request.auth = Some(Auth::Custom(auth.clone()));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::testing::RecordingLog;
    use crate::options::ConvertOptions;
    use serde_json::json;
    use swagger_parser::{ApiDocument, SwaggerParser};

    const SECURED_SPEC: &str = r#"
swagger: "2.0"
info:
  title: Secured
paths: {}
securityDefinitions:
  petstore_auth:
    type: oauth2
    flow: implicit
    authorizationUrl: http://petstore.swagger.io/oauth/dialog
    scopes:
      write:pets: modify pets
      read:pets: read pets
    description: OAuth login
  basic_auth:
    type: basic
  header_key:
    type: apiKey
    name: X-API-Key
    in: header
  query_key:
    type: apiKey
    name: api_key
    in: query
"#;

    fn document() -> ApiDocument {
        SwaggerParser::parse_yaml(SECURED_SPEC).unwrap()
    }

    fn env_options() -> ConvertOptions {
        ConvertOptions {
            environment_target: Some("env.json".to_string()),
            ..Default::default()
        }
    }

    fn requirement(name: &str, scopes: &[&str]) -> SecurityRequirement {
        let mut req = SecurityRequirement::new();
        req.insert(name.to_string(), scopes.iter().map(|s| s.to_string()).collect());
        req
    }

    fn apply(name: &str, scopes: &[&str]) -> (Request, EnvironmentBuilder) {
        let doc = document();
        let options = env_options();
        let log = RecordingLog::default();
        let ctx = ConversionContext::new(&doc, &options, &log);
        let mut env = EnvironmentBuilder::new(&options);
        let mut request = Request::new(ctx.base_url.url_for("/pets"), "GET");
        apply_security(&ctx, &requirement(name, scopes), &mut request, &mut env);
        (request, env)
    }

    #[test]
    fn test_oauth2_with_scopes() {
        let (request, env) = apply("petstore_auth", &["write:pets", "read:pets"]);

        assert_eq!(
            request.auth,
            Some(Auth::Standard(StandardAuth::OAuth2 {
                oauth2: OAuth2Params {
                    scope: "write:pets read:pets".to_string()
                }
            }))
        );
        assert_eq!(
            request.header_value("Authorization"),
            Some("Bearer {{petstore_auth_access_token}}")
        );
        assert_eq!(request.header[0].description.as_deref(), Some("OAuth login"));
        assert!(env.contains("petstore_auth_access_token"));
    }

    #[test]
    fn test_oauth2_without_scopes_only_adds_header() {
        let (request, _) = apply("petstore_auth", &[]);
        assert!(request.auth.is_none());
        assert_eq!(request.header.len(), 1);
    }

    #[test]
    fn test_basic() {
        let (request, env) = apply("basic_auth", &[]);
        match request.auth {
            Some(Auth::Standard(StandardAuth::Basic { basic })) => {
                assert_eq!(basic.username, "{{basic_auth_username}}");
                assert_eq!(basic.password, "{{basic_auth_password}}");
            }
            other => panic!("Expected basic auth, got {:?}", other),
        }
        assert!(env.contains("basic_auth_username"));
        assert!(env.contains("basic_auth_password"));
    }

    #[test]
    fn test_api_key_placements() {
        let (request, _) = apply("header_key", &[]);
        assert_eq!(request.header_value("X-API-Key"), Some("{{header_key_apikey}}"));
        assert!(request.url.query.is_empty());

        let (request, env) = apply("query_key", &[]);
        assert!(request.header.is_empty());
        assert_eq!(request.url.query[0].key, "api_key");
        assert_eq!(request.url.query[0].value, "{{query_key_apikey}}");
        assert!(env.contains("query_key_apikey"));
    }

    #[test]
    fn test_unknown_scheme_is_skipped_with_warning() {
        let doc = document();
        let options = ConvertOptions::default();
        let log = RecordingLog::default();
        let ctx = ConversionContext::new(&doc, &options, &log);
        let mut env = EnvironmentBuilder::disabled();
        let mut request = Request::new(ctx.base_url.url_for("/pets"), "GET");

        let mut req = requirement("missing", &[]);
        req.insert("basic_auth".to_string(), vec![]);
        apply_security(&ctx, &req, &mut request, &mut env);

        assert_eq!(log.warnings(), vec!["Unknown security requirement: missing"]);
        assert!(request.auth.is_some());
    }

    #[test]
    fn test_select_requirement() {
        let requirements = vec![requirement("a", &[]), requirement("b", &[])];

        let chosen = select_requirement(&requirements, None).unwrap();
        assert!(chosen.contains_key("a"));

        let chosen = select_requirement(&requirements, Some("b")).unwrap();
        assert!(chosen.contains_key("b"));

        let chosen = select_requirement(&requirements, Some("c")).unwrap();
        assert!(chosen.contains_key("a"));

        assert!(select_requirement(&[], Some("b")).is_none());
    }

    #[test]
    fn test_auth_override() {
        let doc = document();
        let options = env_options();
        let log = RecordingLog::default();
        let ctx = ConversionContext::new(&doc, &options, &log);
        let mut env = EnvironmentBuilder::new(&options);
        let mut request = Request::new(ctx.base_url.url_for("/pets"), "GET");

        let auth = json!({
            "type": "awsv4",
            "awsv4": {"accessKey": "{{aws_access_key}}", "secretKey": "{{aws_secret}}", "region": "eu-west-1"}
        });
        assert!(apply_auth_override(&ctx, &auth, &mut request, &mut env));
        assert_eq!(request.auth, Some(Auth::Custom(auth)));
        assert!(env.contains("aws_access_key"));
        assert!(env.contains("aws_secret"));

        let bogus = json!({"type": "kerberos"});
        let mut other = Request::new(ctx.base_url.url_for("/pets"), "GET");
        assert!(!apply_auth_override(&ctx, &bogus, &mut other, &mut env));
        assert!(other.auth.is_none());
        assert_eq!(log.warnings().len(), 1);
    }
}
