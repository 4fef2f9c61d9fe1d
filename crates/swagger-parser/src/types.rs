//! Type definitions for resolved Swagger 2.0 documents

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP methods a path item may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    /// Order in which the verbs of a path item are visited
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Head,
        HttpMethod::Options,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A security requirement: scheme name to required scopes, in declaration order
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// A fully resolved Swagger 2.0 document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDocument {
    /// Swagger version (always "2.0" after validation)
    pub swagger: String,
    pub info: Info,
    pub host: Option<String>,
    pub base_path: Option<String>,
    #[serde(default)]
    pub schemes: Vec<String>,
    #[serde(default)]
    pub consumes: Vec<String>,
    #[serde(default)]
    pub produces: Vec<String>,
    #[serde(default)]
    pub security: Vec<SecurityRequirement>,
    #[serde(default)]
    pub security_definitions: IndexMap<String, SecurityDefinition>,
    /// Endpoint templates in declaration order
    pub paths: IndexMap<String, PathItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    pub title: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

/// All operations available on one endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
    pub get: Option<Operation>,
    pub put: Option<Operation>,
    pub post: Option<Operation>,
    pub patch: Option<Operation>,
    pub delete: Option<Operation>,
    pub head: Option<Operation>,
    pub options: Option<Operation>,
    /// Parameters shared by every operation of this path item
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl PathItem {
    /// Get the operation declared for a verb
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
        }
    }

    /// Iterate declared operations in traversal order
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> {
        HttpMethod::ALL
            .into_iter()
            .filter_map(move |method| self.operation(method).map(|op| (method, op)))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Overrides the document-level list when present
    pub consumes: Option<Vec<String>>,
    /// Overrides the document-level list when present
    pub produces: Option<Vec<String>>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub responses: IndexMap<String, Response>,
    /// Overrides the document-level requirements when present
    pub security: Option<Vec<SecurityRequirement>>,
    /// Manual overrides for the generated request
    #[serde(rename = "x-postman-meta")]
    pub meta: Option<PostmanMeta>,
}

/// Parameter location in the HTTP request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterLocation {
    #[serde(rename = "query")]
    Query,
    #[serde(rename = "header")]
    Header,
    #[serde(rename = "path")]
    Path,
    #[serde(rename = "body")]
    Body,
    #[serde(rename = "formData")]
    FormData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    #[serde(default)]
    pub required: bool,
    pub description: Option<String>,
    /// Primitive type for non-body parameters
    #[serde(rename = "type")]
    pub param_type: Option<String>,
    /// JSON Schema for body parameters
    pub schema: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Response {
    pub description: Option<String>,
    pub schema: Option<Value>,
}

/// Security scheme definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SecurityDefinition {
    #[serde(rename = "oauth2")]
    OAuth2 {
        description: Option<String>,
        flow: Option<String>,
        #[serde(default)]
        scopes: IndexMap<String, String>,
    },
    #[serde(rename = "basic")]
    Basic { description: Option<String> },
    #[serde(rename = "apiKey")]
    ApiKey {
        name: String,
        #[serde(rename = "in")]
        location: ApiKeyLocation,
        description: Option<String>,
    },
}

impl SecurityDefinition {
    pub fn description(&self) -> Option<&str> {
        match self {
            SecurityDefinition::OAuth2 { description, .. }
            | SecurityDefinition::Basic { description }
            | SecurityDefinition::ApiKey { description, .. } => description.as_deref(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SecurityDefinition::OAuth2 { .. } => "oauth2",
            SecurityDefinition::Basic { .. } => "basic",
            SecurityDefinition::ApiKey { .. } => "apiKey",
        }
    }
}

/// API key location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    Header,
    Query,
}

/// Contents of the `x-postman-meta` vendor extension
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostmanMeta {
    /// Auth block copied onto the request as-is
    pub auth: Option<Value>,
    /// Test script replacing the generated assertions
    pub tests: Option<ScriptSource>,
}

/// A script given either as one string or as a list of lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptSource {
    Lines(Vec<String>),
    Text(String),
}

impl ScriptSource {
    pub fn into_lines(self) -> Vec<String> {
        match self {
            ScriptSource::Lines(lines) => lines,
            ScriptSource::Text(text) => text.lines().map(str::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_security_definition_variants() {
        let defs: IndexMap<String, SecurityDefinition> = serde_json::from_value(json!({
            "petstore_auth": {"type": "oauth2", "flow": "implicit", "scopes": {"write:pets": "modify"}},
            "basic_auth": {"type": "basic"},
            "api_key": {"type": "apiKey", "name": "X-API-Key", "in": "header"}
        }))
        .unwrap();

        assert_eq!(defs["petstore_auth"].kind(), "oauth2");
        assert_eq!(defs["basic_auth"], SecurityDefinition::Basic { description: None });
        match &defs["api_key"] {
            SecurityDefinition::ApiKey { name, location, .. } => {
                assert_eq!(name, "X-API-Key");
                assert_eq!(*location, ApiKeyLocation::Header);
            }
            other => panic!("Expected apiKey, got {:?}", other),
        }
    }

    #[test]
    fn test_path_item_operation_order() {
        let item: PathItem = serde_json::from_value(json!({
            "post": {"summary": "create"},
            "get": {"summary": "list"},
            "delete": {"summary": "remove"}
        }))
        .unwrap();

        let methods: Vec<HttpMethod> = item.operations().map(|(m, _)| m).collect();
        assert_eq!(methods, vec![HttpMethod::Get, HttpMethod::Post, HttpMethod::Delete]);
    }

    #[test]
    fn test_postman_meta_tests_as_text() {
        let op: Operation = serde_json::from_value(json!({
            "x-postman-meta": {"tests": "var a = 1;\nvar b = 2;"}
        }))
        .unwrap();

        let lines = op.meta.unwrap().tests.unwrap().into_lines();
        assert_eq!(lines, vec!["var a = 1;", "var b = 2;"]);
    }
}
