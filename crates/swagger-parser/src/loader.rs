//! Document loading seam

use crate::error::{ParseError, ParseResult};
use crate::parser::SwaggerParser;
use crate::types::ApiDocument;
use async_trait::async_trait;
use std::path::PathBuf;
use url::Url;

/// Where a Swagger document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecSource {
    File(PathBuf),
    Url(Url),
    /// Document text already in memory
    Inline(String),
}

impl SpecSource {
    /// Treat `http(s)://` locations as URLs and anything else as a file path
    pub fn detect(location: &str) -> ParseResult<Self> {
        if location.starts_with("http://") || location.starts_with("https://") {
            let url = Url::parse(location).map_err(|e| ParseError::InvalidUrl(e.to_string()))?;
            Ok(SpecSource::Url(url))
        } else {
            Ok(SpecSource::File(PathBuf::from(location)))
        }
    }
}

impl std::fmt::Display for SpecSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpecSource::File(path) => write!(f, "{}", path.display()),
            SpecSource::Url(url) => write!(f, "{}", url),
            SpecSource::Inline(_) => write!(f, "<inline>"),
        }
    }
}

/// Syntax of a raw document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    /// JSON when the text opens with `{`, YAML otherwise
    Detect,
}

/// Document text as read, before any validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub content: String,
    pub format: DocumentFormat,
}

impl RawDocument {
    pub fn new(content: impl Into<String>, format: DocumentFormat) -> Self {
        Self {
            content: content.into(),
            format,
        }
    }

    /// Validate, dereference and type the document
    pub fn parse(&self) -> ParseResult<ApiDocument> {
        match self.format {
            DocumentFormat::Json => SwaggerParser::parse_json(&self.content),
            DocumentFormat::Yaml => SwaggerParser::parse_yaml(&self.content),
            DocumentFormat::Detect => SwaggerParser::parse(&self.content),
        }
    }
}

/// Produces a validated, reference-free document in two steps
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    /// Read the document at `source`; may touch the filesystem or network
    async fn read(&self, source: &SpecSource) -> ParseResult<RawDocument>;

    /// Validate and dereference a document returned by [`read`](Self::read)
    fn validate(&self, raw: &RawDocument) -> ParseResult<ApiDocument>;

    async fn load(&self, source: &SpecSource) -> ParseResult<ApiDocument> {
        let raw = self.read(source).await?;
        self.validate(&raw)
    }
}

/// Default loader backed by [`SwaggerParser`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SwaggerLoader;

#[async_trait]
impl DocumentLoader for SwaggerLoader {
    async fn read(&self, source: &SpecSource) -> ParseResult<RawDocument> {
        match source {
            SpecSource::File(path) => SwaggerParser::read_file(path).await,
            SpecSource::Url(url) => SwaggerParser::fetch(url.as_str()).await,
            SpecSource::Inline(content) => Ok(RawDocument::new(content.clone(), DocumentFormat::Detect)),
        }
    }

    fn validate(&self, raw: &RawDocument) -> ParseResult<ApiDocument> {
        raw.parse()
    }
}
