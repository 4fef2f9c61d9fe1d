//! # swagger-parser
//!
//! Swagger 2.0 loader for the collection converter.
//! Reads a document, validates its shape and inlines every local `$ref`
//! so downstream consumers only ever see a reference-free [`ApiDocument`].

mod types;
mod parser;
mod resolver;
mod loader;
mod error;

pub use types::*;
pub use parser::SwaggerParser;
pub use resolver::RefResolver;
pub use loader::{DocumentFormat, DocumentLoader, RawDocument, SpecSource, SwaggerLoader};
pub use error::{ParseError, ParseResult};
