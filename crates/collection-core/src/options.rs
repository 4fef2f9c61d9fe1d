//! Conversion options

use crate::error::ConvertResult;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Options controlling how a document is converted.
///
/// Every flag defaults to `false` and every string to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConvertOptions {
    /// Drop every query parameter
    pub exclude_query_params: bool,
    /// Drop query parameters that are not required
    pub exclude_optional_query_params: bool,
    /// Do not render body templates from schemas
    pub exclude_body_template: bool,
    /// Do not attach test scripts to items
    pub exclude_tests: bool,
    /// Only keep operations carrying this tag
    pub tag_filter: Option<String>,
    /// Overrides the document host
    pub host: Option<String>,
    /// Preferred security scheme name
    pub default_security: Option<String>,
    /// Preferred `Accept` media type
    pub default_produces_type: Option<String>,
    /// Environment file target; enables environment output
    #[serde(alias = "envfile")]
    pub environment_target: Option<String>,
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a JSON file
    pub fn from_file(path: &Path) -> ConvertResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let options: ConvertOptions = serde_json::from_str(&contents)?;
        debug!("Loaded conversion options from {:?}", path);
        Ok(options)
    }

    /// Environment display name: the target's file name without `.json`
    pub fn environment_name(&self) -> Option<String> {
        let target = self.environment_target.as_deref()?;
        let file_name = Path::new(target)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(target);
        Some(
            file_name
                .strip_suffix(".json")
                .unwrap_or(file_name)
                .to_string(),
        )
    }
}
