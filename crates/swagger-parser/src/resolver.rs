//! Local `$ref` resolver for Swagger documents

use serde_json::{Map, Value};
use tracing::warn;

/// Inlines local JSON pointer references (`#/definitions/Pet`, `#/parameters/id`, ...)
pub struct RefResolver<'a> {
    /// The document references are resolved against
    root: &'a Value,
    /// Maximum nesting of inlined references
    max_depth: usize,
}

impl<'a> RefResolver<'a> {
    /// Create a new resolver for the given document root
    pub fn new(root: &'a Value) -> Self {
        Self {
            root,
            max_depth: 32,
        }
    }

    /// Resolve every reference reachable from `value`.
    ///
    /// A reference that points back to one already being inlined is left
    /// in place, so the result is always a finite tree.
    pub fn resolve(&self, value: &Value) -> Value {
        let mut stack = Vec::new();
        self.resolve_with_stack(value, &mut stack)
    }

    fn resolve_with_stack(&self, value: &Value, stack: &mut Vec<String>) -> Value {
        match value {
            Value::Object(obj) => {
                if let Some(ref_str) = obj.get("$ref").and_then(Value::as_str) {
                    return self.resolve_ref(ref_str, value, stack);
                }

                let mut result = Map::with_capacity(obj.len());
                for (key, child) in obj {
                    result.insert(key.clone(), self.resolve_with_stack(child, stack));
                }
                Value::Object(result)
            }
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.resolve_with_stack(item, stack))
                    .collect(),
            ),
            _ => value.clone(),
        }
    }

    fn resolve_ref(&self, ref_str: &str, original: &Value, stack: &mut Vec<String>) -> Value {
        let Some(pointer) = ref_str.strip_prefix('#') else {
            warn!("Skipping non-local reference: {}", ref_str);
            return original.clone();
        };

        if stack.iter().any(|seen| seen == ref_str) {
            warn!("Circular reference left unresolved: {}", ref_str);
            return original.clone();
        }

        if stack.len() >= self.max_depth {
            warn!("Reference nesting too deep, leaving unresolved: {}", ref_str);
            return original.clone();
        }

        match self.root.pointer(pointer) {
            Some(target) => {
                stack.push(ref_str.to_string());
                let resolved = self.resolve_with_stack(target, stack);
                stack.pop();
                resolved
            }
            None => {
                warn!("Unknown reference: {}", ref_str);
                original.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_definition_ref() {
        let doc = json!({
            "definitions": {
                "Pet": {
                    "type": "object",
                    "properties": {"name": {"type": "string"}}
                }
            },
            "schema": {"$ref": "#/definitions/Pet"}
        });

        let resolver = RefResolver::new(&doc);
        let resolved = resolver.resolve(&doc["schema"]);

        assert_eq!(resolved["type"], "object");
        assert_eq!(resolved["properties"]["name"]["type"], "string");
    }

    #[test]
    fn test_resolve_nested_refs_in_arrays() {
        let doc = json!({
            "definitions": {
                "Tag": {"type": "object", "properties": {"id": {"type": "integer"}}},
                "Pet": {
                    "type": "object",
                    "properties": {
                        "tags": {"type": "array", "items": {"$ref": "#/definitions/Tag"}}
                    }
                }
            },
            "parameters": {
                "petBody": {"name": "body", "in": "body", "schema": {"$ref": "#/definitions/Pet"}}
            },
            "list": [{"$ref": "#/parameters/petBody"}]
        });

        let resolver = RefResolver::new(&doc);
        let resolved = resolver.resolve(&doc["list"]);

        assert_eq!(resolved[0]["name"], "body");
        assert_eq!(
            resolved[0]["schema"]["properties"]["tags"]["items"]["properties"]["id"]["type"],
            "integer"
        );
    }

    #[test]
    fn test_circular_ref_is_left_in_place() {
        let doc = json!({
            "definitions": {
                "Node": {
                    "type": "object",
                    "properties": {"next": {"$ref": "#/definitions/Node"}}
                }
            }
        });

        let resolver = RefResolver::new(&doc);
        let resolved = resolver.resolve(&json!({"$ref": "#/definitions/Node"}));

        assert_eq!(resolved["type"], "object");
        assert_eq!(resolved["properties"]["next"]["$ref"], "#/definitions/Node");
    }

    #[test]
    fn test_unknown_ref_is_kept() {
        let doc = json!({});
        let resolver = RefResolver::new(&doc);
        let value = json!({"$ref": "#/definitions/Missing"});

        assert_eq!(resolver.resolve(&value), value);
    }
}
