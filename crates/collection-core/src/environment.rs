//! Environment accumulation

use crate::collection::{Environment, EnvironmentValue};
use crate::options::ConvertOptions;
use chrono::Utc;
use indexmap::IndexSet;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use uuid::Uuid;

/// Placeholder referencing an environment variable, e.g. `{{petId}}`
pub fn variable_token(name: &str) -> String {
    format!("{{{{{}}}}}", name)
}

/// Every `{{name}}` placeholder appearing in `text`
pub(crate) fn referenced_variables(text: &str) -> Vec<String> {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    let token = TOKEN.get_or_init(|| {
        Regex::new(r"\{\{([^{}]+)\}\}").expect("placeholder pattern is valid")
    });

    token.captures_iter(text).map(|c| c[1].to_string()).collect()
}

/// Collects every variable name referenced by the generated requests
#[derive(Debug, Clone)]
pub struct EnvironmentBuilder {
    /// Metadata, present only when an environment target was configured
    environment: Option<Environment>,
    keys: IndexSet<String>,
}

impl EnvironmentBuilder {
    /// Start a builder; metadata is stamped now, before traversal begins
    pub fn new(options: &ConvertOptions) -> Self {
        let environment = options.environment_name().map(|name| Environment {
            id: Uuid::new_v4(),
            name,
            timestamp: Utc::now().timestamp_millis(),
            scope: "environment".to_string(),
            values: Vec::new(),
        });

        Self {
            environment,
            keys: IndexSet::new(),
        }
    }

    /// A builder that records nothing
    pub fn disabled() -> Self {
        Self {
            environment: None,
            keys: IndexSet::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.environment.is_some()
    }

    /// Register a variable name; repeated names are ignored
    pub fn add(&mut self, key: &str) {
        if self.is_enabled() && !self.keys.contains(key) {
            self.keys.insert(key.to_string());
        }
    }

    /// Register every placeholder found in `text`
    pub fn add_referenced(&mut self, text: &str) {
        for variable in referenced_variables(text) {
            self.add(&variable);
        }
    }

    /// Register every placeholder found in the string values of `value`
    pub fn add_referenced_in(&mut self, value: &Value) {
        let mut pending = vec![value];
        while let Some(current) = pending.pop() {
            match current {
                Value::String(text) => self.add_referenced(text),
                Value::Array(items) => pending.extend(items.iter().rev()),
                Value::Object(map) => pending.extend(map.values().rev()),
                _ => {}
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Finish the environment once the whole document has been traversed
    pub fn finish(self) -> Option<Environment> {
        let keys = self.keys;
        self.environment.map(|mut environment| {
            environment.values = keys
                .into_iter()
                .map(|key| EnvironmentValue {
                    key,
                    value: String::new(),
                    value_type: "text".to_string(),
                    enabled: true,
                })
                .collect();
            environment
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled_builder() -> EnvironmentBuilder {
        EnvironmentBuilder::new(&ConvertOptions {
            environment_target: Some("/tmp/petstore-env.json".to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_disabled_builder_produces_nothing() {
        let mut builder = EnvironmentBuilder::new(&ConvertOptions::default());
        builder.add("petId");
        assert!(!builder.contains("petId"));
        assert!(builder.finish().is_none());
    }

    #[test]
    fn test_keys_are_deduplicated_in_first_seen_order() {
        let mut builder = enabled_builder();
        builder.add("petId");
        builder.add("api_key");
        builder.add("petId");

        let environment = builder.finish().unwrap();
        let keys: Vec<&str> = environment.values.iter().map(|v| v.key.as_str()).collect();
        assert_eq!(keys, vec!["petId", "api_key"]);
        assert!(environment.values.iter().all(|v| v.enabled && v.value.is_empty()));
        assert_eq!(environment.values[0].value_type, "text");
    }

    #[test]
    fn test_variable_token() {
        assert_eq!(variable_token("petId"), "{{petId}}");
    }

    #[test]
    fn test_referenced_variables() {
        assert_eq!(
            referenced_variables("Bearer {{token}} for {{user_id}} {not} {{}}"),
            vec!["token", "user_id"]
        );
    }

    #[test]
    fn test_placeholders_in_nested_values() {
        let mut builder = enabled_builder();
        builder.add_referenced_in(&serde_json::json!({
            "type": "awsv4",
            "awsv4": {"accessKey": "{{aws_access_key}}", "regions": ["{{region}}", "eu-west-1"]},
            "count": 3
        }));

        let environment = builder.finish().unwrap();
        let keys: Vec<&str> = environment.values.iter().map(|v| v.key.as_str()).collect();
        assert_eq!(keys, vec!["aws_access_key", "region"]);
    }

    #[test]
    fn test_metadata() {
        let environment = enabled_builder().finish().unwrap();
        assert_eq!(environment.name, "petstore-env");
        assert_eq!(environment.scope, "environment");
        assert!(environment.timestamp > 0);
    }
}
