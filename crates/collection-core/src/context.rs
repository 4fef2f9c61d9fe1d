//! Per-conversion context

use crate::collection::Url;
use crate::logging::ConversionLog;
use crate::options::ConvertOptions;
use crate::template::SchemaTemplate;
use indexmap::IndexMap;
use swagger_parser::{ApiDocument, SecurityDefinition, SecurityRequirement};

/// Protocol, host and base path shared by every request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl {
    pub protocol: String,
    pub host: String,
    pub path: Vec<String>,
}

impl BaseUrl {
    /// Derive the base url; the host option wins over the document host
    pub fn from_document(document: &ApiDocument, host_override: Option<&str>) -> Self {
        let host = host_override
            .or(document.host.as_deref())
            .unwrap_or("localhost")
            .to_string();

        let protocol = if document.schemes.iter().any(|s| s == "https") {
            "https"
        } else {
            "http"
        };

        let path = document
            .base_path
            .as_deref()
            .map(|base| {
                base.split('/')
                    .filter(|segment| !segment.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            protocol: protocol.to_string(),
            host,
            path,
        }
    }

    /// Build the url of an endpoint, e.g. `/pets/:id`
    pub fn url_for(&self, endpoint: &str) -> Url {
        let relative = endpoint.strip_prefix('/').unwrap_or(endpoint);
        let mut path = self.path.clone();
        path.extend(relative.split('/').map(str::to_string));

        Url {
            protocol: self.protocol.clone(),
            host: self.host.clone(),
            path,
            variable: Vec::new(),
            query: Vec::new(),
        }
    }
}

/// Everything a conversion reads while traversing a document.
///
/// Built once per conversion and never mutated afterwards.
pub struct ConversionContext<'a> {
    pub options: &'a ConvertOptions,
    pub base_url: BaseUrl,
    pub consumes: &'a [String],
    pub produces: &'a [String],
    pub security: &'a [SecurityRequirement],
    pub security_definitions: &'a IndexMap<String, SecurityDefinition>,
    /// Whether any operation carries the configured filter tag
    pub tag_filter_matched: bool,
    pub template: SchemaTemplate,
    log: &'a dyn ConversionLog,
}

impl<'a> ConversionContext<'a> {
    pub fn new(
        document: &'a ApiDocument,
        options: &'a ConvertOptions,
        log: &'a dyn ConversionLog,
    ) -> Self {
        let tag_filter_matched = options.tag_filter.as_deref().is_some_and(|tag| {
            document
                .paths
                .values()
                .flat_map(|item| item.operations())
                .any(|(_, op)| op.tags.iter().any(|t| t == tag))
        });

        Self {
            options,
            base_url: BaseUrl::from_document(document, options.host.as_deref()),
            consumes: &document.consumes,
            produces: &document.produces,
            security: &document.security,
            security_definitions: &document.security_definitions,
            tag_filter_matched,
            template: SchemaTemplate::new(),
            log,
        }
    }

    pub fn log(&self) -> &dyn ConversionLog {
        self.log
    }
}
