//! Item assembly for path items

use crate::collection::{Event, Item};
use crate::context::ConversionContext;
use crate::environment::EnvironmentBuilder;
use crate::error::ConvertResult;
use crate::request::build_request;
use crate::test_script::generate_tests;
use swagger_parser::{HttpMethod, Operation, Parameter, PathItem};

/// Rewrite `{name}` path templates as `:name`
pub fn colon_path(endpoint: &str) -> String {
    endpoint.replace('{', ":").replace('}', "")
}

/// Build one item per retained operation of a path item, in verb order
pub fn build_item_list(
    ctx: &ConversionContext<'_>,
    endpoint: &str,
    path_item: &PathItem,
    env: &mut EnvironmentBuilder,
) -> ConvertResult<Vec<Item>> {
    let local_path = colon_path(endpoint);
    let mut items = Vec::new();

    for (method, operation) in path_item.operations() {
        ctx.log()
            .debug(&format!("Processing operation {} {}", method, endpoint));
        if let Some(item) =
            build_item(ctx, &local_path, method, operation, &path_item.parameters, env)?
        {
            items.push(item);
        }
    }

    Ok(items)
}

/// Build the item for one operation, or `None` when the tag filter drops it
pub fn build_item(
    ctx: &ConversionContext<'_>,
    endpoint: &str,
    method: HttpMethod,
    operation: &Operation,
    inherited: &[Parameter],
    env: &mut EnvironmentBuilder,
) -> ConvertResult<Option<Item>> {
    if !passes_tag_filter(ctx, operation) {
        ctx.log().debug(&format!(
            "Excluding {} {} due to tagFilter: {}",
            method,
            endpoint,
            ctx.options.tag_filter.as_deref().unwrap_or_default()
        ));
        return Ok(None);
    }

    let request = build_request(ctx, endpoint, method, operation, inherited, env)?;

    let mut events = Vec::new();
    if !ctx.options.exclude_tests {
        ctx.log().debug(&format!("Adding test for: {}", endpoint));
        let exec = match operation.meta.as_ref().and_then(|meta| meta.tests.clone()) {
            Some(script) => script.into_lines(),
            None => {
                let produces = operation.produces.as_deref().unwrap_or(ctx.produces);
                generate_tests(&operation.responses, produces)?
            }
        };
        events.push(Event::test(exec));
    }

    Ok(Some(Item {
        name: operation.summary.clone(),
        request,
        response: Vec::new(),
        events,
    }))
}

/// Tagged operations need the filter tag; untagged ones survive only when
/// no operation in the document carries it
fn passes_tag_filter(ctx: &ConversionContext<'_>, operation: &Operation) -> bool {
    match ctx.options.tag_filter.as_deref() {
        None => true,
        Some(_) if operation.tags.is_empty() => !ctx.tag_filter_matched,
        Some(tag) => operation.tags.iter().any(|t| t == tag),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::testing::RecordingLog;
    use crate::options::ConvertOptions;
    use swagger_parser::{ApiDocument, SwaggerParser};

    const SPEC: &str = r#"
swagger: "2.0"
info:
  title: Items
paths:
  /pets/{petId}:
    get:
      summary: Untagged
      responses:
        '200':
          description: ok
    put:
      summary: Tagged
      tags: [X]
      responses:
        '200':
          description: ok
    delete:
      summary: Scripted
      tags: [X]
      x-postman-meta:
        tests:
          - "var data = JSON.parse(responseBody);"
          - "postman.setEnvironmentVariable('username', data.name);"
      responses:
        '204':
          description: gone
"#;

    fn items_with(options: &ConvertOptions) -> Vec<Item> {
        let doc: ApiDocument = SwaggerParser::parse_yaml(SPEC).unwrap();
        let log = RecordingLog::default();
        let ctx = ConversionContext::new(&doc, options, &log);
        let mut env = EnvironmentBuilder::disabled();
        build_item_list(&ctx, "/pets/{petId}", &doc.paths["/pets/{petId}"], &mut env).unwrap()
    }

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().filter_map(|i| i.name.as_deref()).collect()
    }

    #[test]
    fn test_colon_path() {
        assert_eq!(colon_path("/owners/{ownerId}/pets/{petId}"), "/owners/:ownerId/pets/:petId");
        assert_eq!(colon_path("/"), "/");
    }

    #[test]
    fn test_items_in_verb_order_with_colon_urls() {
        let items = items_with(&ConvertOptions::default());
        assert_eq!(names(&items), vec!["Untagged", "Tagged", "Scripted"]);
        assert!(items[0].request.url.path.contains(&":petId".to_string()));
    }

    #[test]
    fn test_tag_filter_found() {
        let options = ConvertOptions {
            tag_filter: Some("X".to_string()),
            ..Default::default()
        };
        assert_eq!(names(&items_with(&options)), vec!["Tagged", "Scripted"]);
    }

    #[test]
    fn test_tag_filter_not_found_keeps_untagged() {
        let options = ConvertOptions {
            tag_filter: Some("Y".to_string()),
            ..Default::default()
        };
        assert_eq!(names(&items_with(&options)), vec!["Untagged"]);
    }

    #[test]
    fn test_tests_are_generated_or_overridden() {
        let items = items_with(&ConvertOptions::default());

        assert_eq!(items[0].events.len(), 1);
        assert_eq!(items[0].events[0].listen, "test");
        assert!(items[0].events[0].script.exec[0].contains("[200]"));
        assert!(items[2].events[0]
            .script
            .exec
            .contains(&"postman.setEnvironmentVariable('username', data.name);".to_string()));
    }

    #[test]
    fn test_exclude_tests() {
        let options = ConvertOptions {
            exclude_tests: true,
            ..Default::default()
        };
        assert!(items_with(&options).iter().all(|item| item.events.is_empty()));
    }
}
