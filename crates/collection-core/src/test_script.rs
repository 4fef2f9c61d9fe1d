//! Test script synthesis from response definitions

use crate::collection::to_json_pretty;
use crate::error::ConvertResult;
use indexmap::IndexMap;
use swagger_parser::Response;

const SCHEMA_TEST: &str = "Response Body respects JSON schema documentation";

/// Build assertion statements for an operation's responses.
///
/// The first statement checks the status code against every numeric status
/// declared; each 2xx response with a schema adds a schema validation block.
pub fn generate_tests(
    responses: &IndexMap<String, Response>,
    produces: &[String],
) -> ConvertResult<Vec<String>> {
    let status_codes: Vec<(u16, &Response)> = responses
        .iter()
        .filter_map(|(status, response)| status.parse::<u16>().ok().map(|code| (code, response)))
        .collect();

    let codes = status_codes
        .iter()
        .map(|(code, _)| code.to_string())
        .collect::<Vec<_>>()
        .join(",");

    let mut tests = vec![format!(
        "tests[\"Status code is expected\"] = [{}].indexOf(responseCode.code) > -1;",
        codes
    )];

    let parse = body_parser(produces);
    let successes = status_codes
        .iter()
        .filter(|(code, _)| (200..300).contains(code));
    for (code, response) in successes {
        let Some(schema) = response.schema.as_ref() else {
            continue;
        };

        tests.push(String::new());
        tests.push(format!("if (responseCode.code === {}) {{", code));
        tests.push(format!("\tvar data = {};", parse));
        tests.push(format!("\tvar schema = {};", to_json_pretty(schema)?));
        tests.push(format!(
            "\ttests[\"{}\"] = tv4.validate(data, schema);",
            SCHEMA_TEST
        ));
        tests.push(format!("\tif (tests[\"{}\"] === false) {{", SCHEMA_TEST));
        tests.push("\t\tconsole.log(tv4.error);".to_string());
        tests.push("\t}".to_string());
        tests.push("}".to_string());
    }

    Ok(tests)
}

/// Expression turning the response body into data, per the produced content type
fn body_parser(produces: &[String]) -> &'static str {
    let has_json = produces.iter().any(|ct| ct.contains("json"));
    let has_xml = produces.iter().any(|ct| ct.contains("xml"));

    if has_xml && !has_json {
        "xml2Json(responseBody)"
    } else {
        "JSON.parse(responseBody)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn responses(value: serde_json::Value) -> IndexMap<String, Response> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_status_code_assertion() {
        let responses = responses(json!({
            "200": {"description": "ok"},
            "404": {"description": "missing"}
        }));
        let tests = generate_tests(&responses, &[]).unwrap();

        assert_eq!(
            tests[0],
            "tests[\"Status code is expected\"] = [200,404].indexOf(responseCode.code) > -1;"
        );
        assert_eq!(tests.len(), 1);
    }

    #[test]
    fn test_schema_validation_for_success_responses() {
        let responses = responses(json!({
            "200": {"description": "ok", "schema": {"type": "object", "properties": {"id": {"type": "integer"}}}},
            "400": {"description": "bad", "schema": {"type": "string"}},
            "default": {"description": "error"}
        }));
        let tests = generate_tests(&responses, &["application/json".to_string()]).unwrap();

        assert!(tests[0].contains("[200,400]"));
        assert_eq!(tests[1], "");
        assert_eq!(tests[2], "if (responseCode.code === 200) {");
        assert_eq!(tests[3], "\tvar data = JSON.parse(responseBody);");
        assert!(tests[4].starts_with("\tvar schema = {\n    \"type\": \"object\""));
        assert!(tests[5].contains("tv4.validate(data, schema)"));
        assert!(tests[6].contains("=== false"));
        assert_eq!(tests.last().map(String::as_str), Some("}"));
        assert_eq!(tests.iter().filter(|t| t.starts_with("if (")).count(), 1);
    }

    #[test]
    fn test_xml_only_responses_use_xml_parser() {
        let responses = responses(json!({"201": {"schema": {"type": "object"}}}));
        let tests = generate_tests(&responses, &["application/xml".to_string()]).unwrap();
        assert_eq!(tests[3], "\tvar data = xml2Json(responseBody);");
    }
}
