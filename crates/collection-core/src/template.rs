//! Example body rendering from JSON Schema fragments

use crate::collection::to_json_pretty;
use crate::error::{ConvertError, ConvertResult};
use serde_json::{Map, Value};

/// Renders a schema fragment into a representative example value
#[derive(Debug, Clone, Copy)]
pub struct SchemaTemplate {
    /// Nesting level at which rendering gives up
    max_depth: usize,
}

impl SchemaTemplate {
    pub const DEFAULT_MAX_DEPTH: usize = 64;

    pub fn new() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Render a schema into an example value.
    ///
    /// Explicit `example`s win; objects render every writable property in
    /// declaration order; arrays render their `items` once; primitives get a
    /// canonical default. Fails instead of recursing past the depth limit or
    /// into a `$ref` left behind by the resolver.
    pub fn render(&self, schema: &Value) -> ConvertResult<Value> {
        self.render_at(schema, 0)
    }

    /// Render a schema as indented JSON text, `None` when nothing useful results
    pub fn render_text(&self, schema: &Value) -> ConvertResult<Option<String>> {
        match self.render(schema)? {
            Value::Null => Ok(None),
            value => Ok(Some(to_json_pretty(&value)?)),
        }
    }

    fn render_at(&self, schema: &Value, depth: usize) -> ConvertResult<Value> {
        if depth > self.max_depth {
            return Err(ConvertError::TemplateDepthExceeded {
                depth: self.max_depth,
            });
        }

        // the resolver leaves circular and unknown refs in place
        if let Some(reference) = schema.get("$ref").and_then(Value::as_str) {
            return Err(ConvertError::UnresolvedReference {
                reference: reference.to_string(),
            });
        }

        if let Some(example) = schema.get("example").filter(|e| !e.is_null()) {
            return Ok(example.clone());
        }

        let schema_type = schema.get("type").and_then(Value::as_str);
        let properties = schema.get("properties").and_then(Value::as_object);

        if schema_type == Some("object") || properties.is_some() {
            let mut object = Map::new();
            for (name, property) in properties.into_iter().flatten() {
                if is_read_only(property) {
                    continue;
                }
                object.insert(name.clone(), self.render_at(property, depth + 1)?);
            }
            return Ok(Value::Object(object));
        }

        if schema_type == Some("array") {
            return match schema.get("items") {
                Some(items) => Ok(Value::Array(vec![self.render_at(items, depth + 1)?])),
                None => Ok(Value::Array(Vec::new())),
            };
        }

        Ok(default_value(schema_type))
    }
}

impl Default for SchemaTemplate {
    fn default() -> Self {
        Self::new()
    }
}

fn is_read_only(schema: &Value) -> bool {
    schema
        .get("readOnly")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Canonical example for a primitive type
fn default_value(schema_type: Option<&str>) -> Value {
    match schema_type {
        Some("integer") => Value::from(0),
        Some("number") => Value::from(0.0),
        Some("boolean") => Value::Bool(true),
        Some("string") => Value::String(String::new()),
        _ => Value::Null,
    }
}
