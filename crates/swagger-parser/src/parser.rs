//! Main Swagger parser

use crate::error::{ParseError, ParseResult};
use crate::loader::{DocumentFormat, RawDocument};
use crate::resolver::RefResolver;
use crate::types::*;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

const PARAMETER_LOCATIONS: [&str; 5] = ["query", "header", "path", "body", "formData"];
const OPERATION_KEYS: [&str; 7] = ["get", "put", "post", "patch", "delete", "head", "options"];

/// Swagger 2.0 parser
pub struct SwaggerParser;

impl SwaggerParser {
    /// Parse a Swagger document from a string (auto-detects JSON/YAML)
    pub fn parse(content: &str) -> ParseResult<ApiDocument> {
        if content.trim_start().starts_with('{') {
            Self::parse_json(content)
        } else {
            Self::parse_yaml(content)
        }
    }

    /// Parse a Swagger document from JSON
    pub fn parse_json(content: &str) -> ParseResult<ApiDocument> {
        let raw: Value = serde_json::from_str(content)?;
        Self::convert_spec(raw)
    }

    /// Parse a Swagger document from YAML
    pub fn parse_yaml(content: &str) -> ParseResult<ApiDocument> {
        let raw: Value = serde_yaml::from_str(content)?;
        Self::convert_spec(raw)
    }

    /// Read and parse a Swagger document from disk
    pub async fn load_file(path: &Path) -> ParseResult<ApiDocument> {
        Self::read_file(path).await?.parse()
    }

    /// Read a Swagger document from disk without validating it
    pub async fn read_file(path: &Path) -> ParseResult<RawDocument> {
        info!("Reading API spec from: {}", path.display());
        let content = tokio::fs::read_to_string(path).await?;

        let format = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => DocumentFormat::Yaml,
            Some("json") => DocumentFormat::Json,
            _ => DocumentFormat::Detect,
        };
        Ok(RawDocument::new(content, format))
    }

    /// Fetch and parse a Swagger document from a URL
    pub async fn fetch_and_parse(url: &str) -> ParseResult<ApiDocument> {
        Self::fetch(url).await?.parse()
    }

    /// Fetch a Swagger document from a URL without validating it
    pub async fn fetch(url: &str) -> ParseResult<RawDocument> {
        info!("Fetching API spec from: {}", url);

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| ParseError::HttpError(e.to_string()))?;

        let response = client
            .get(url)
            .header("Accept", "application/json, application/yaml, text/yaml")
            .send()
            .await
            .map_err(|e| ParseError::FetchError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ParseError::FetchError(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .unwrap_or_default();

        let content = response
            .text()
            .await
            .map_err(|e| ParseError::FetchError(e.to_string()))?;

        let format = if content_type.contains("yaml") || url.ends_with(".yaml") || url.ends_with(".yml") {
            DocumentFormat::Yaml
        } else {
            DocumentFormat::Detect
        };
        Ok(RawDocument::new(content, format))
    }

    /// Validate, dereference and type a raw document
    fn convert_spec(raw: Value) -> ParseResult<ApiDocument> {
        Self::validate_header(&raw)?;

        let resolved = RefResolver::new(&raw).resolve(&raw);
        Self::validate_paths(&resolved)?;

        let document: ApiDocument = serde_json::from_value(resolved)?;
        debug!(
            "Parsed Swagger {} spec: {} ({} paths)",
            document.swagger,
            document.info.title,
            document.paths.len()
        );

        Ok(document)
    }

    /// Check the version, info block and presence of paths
    fn validate_header(raw: &Value) -> ParseResult<()> {
        let root = raw
            .as_object()
            .ok_or_else(|| ParseError::InvalidFormat("document root must be an object".into()))?;

        match root.get("swagger") {
            None => return Err(ParseError::MissingField("swagger".into())),
            Some(Value::String(version)) if version == "2.0" => {}
            Some(other) => {
                let version = other.as_str().map(str::to_string).unwrap_or_else(|| other.to_string());
                return Err(ParseError::UnsupportedVersion(version));
            }
        }

        if root
            .get("info")
            .and_then(|info| info.get("title"))
            .and_then(Value::as_str)
            .is_none()
        {
            return Err(ParseError::MissingField("info.title".into()));
        }

        if !root.get("paths").is_some_and(Value::is_object) {
            return Err(ParseError::MissingField("paths".into()));
        }

        Ok(())
    }

    /// Check endpoint templates and every parameter declaration
    fn validate_paths(resolved: &Value) -> ParseResult<()> {
        let Some(paths) = resolved.get("paths").and_then(Value::as_object) else {
            return Err(ParseError::MissingField("paths".into()));
        };

        for (endpoint, path_item) in paths {
            if !endpoint.starts_with('/') {
                return Err(ParseError::Validation(format!(
                    "path '{}' must begin with '/'",
                    endpoint
                )));
            }

            Self::validate_parameters(endpoint, path_item.get("parameters"))?;
            for key in OPERATION_KEYS {
                if let Some(operation) = path_item.get(key) {
                    Self::validate_parameters(endpoint, operation.get("parameters"))?;
                }
            }
        }

        Ok(())
    }

    fn validate_parameters(endpoint: &str, parameters: Option<&Value>) -> ParseResult<()> {
        let Some(parameters) = parameters.and_then(Value::as_array) else {
            return Ok(());
        };

        for param in parameters {
            let name = param.get("name").and_then(Value::as_str).ok_or_else(|| {
                ParseError::Validation(format!("parameter without a name in '{}'", endpoint))
            })?;

            let location = param.get("in").and_then(Value::as_str).unwrap_or_default();
            if !PARAMETER_LOCATIONS.contains(&location) {
                return Err(ParseError::Validation(format!(
                    "parameter '{}' in '{}' has invalid location '{}'",
                    name, endpoint, location
                )));
            }

            if location == "body" && param.get("schema").is_none() {
                return Err(ParseError::Validation(format!(
                    "body parameter '{}' in '{}' has no schema",
                    name, endpoint
                )));
            }
        }

        Ok(())
    }
}
