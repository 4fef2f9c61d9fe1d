//! Error types for the Swagger loader

use thiserror::Error;

/// Result type alias for loader operations
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Loader error types
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to fetch API spec: {0}")]
    FetchError(String),

    #[error("Invalid API spec format: {0}")]
    InvalidFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("API spec failed validation: {0}")]
    Validation(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unsupported Swagger version: {0}")]
    UnsupportedVersion(String),
}
