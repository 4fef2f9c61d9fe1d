//! Error types for collection conversion

use swagger_parser::ParseError;
use thiserror::Error;

/// Result type alias for conversion operations
pub type ConvertResult<T> = std::result::Result<T, ConvertError>;

/// Conversion error types
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Failed to load API spec: {0}")]
    Load(#[from] ParseError),

    #[error("Schema nesting exceeds {depth} levels while rendering body template")]
    TemplateDepthExceeded { depth: usize },

    #[error("Schema reference {reference} is circular or unresolvable")]
    UnresolvedReference { reference: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
