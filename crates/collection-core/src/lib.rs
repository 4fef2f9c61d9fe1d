//! # collection-core
//!
//! Conversion engine turning a resolved Swagger 2.0 document into a
//! request collection (folders of executable requests with inline test
//! scripts) and an optional variable environment.

mod collection;
mod context;
mod convert;
mod environment;
mod error;
mod folders;
mod items;
mod logging;
mod options;
mod parameters;
mod request;
mod security;
mod template;
mod test_script;

pub use collection::*;
pub use context::{BaseUrl, ConversionContext};
pub use convert::{ConversionOutput, ConversionStage, Converter};
pub use environment::EnvironmentBuilder;
pub use error::{ConvertError, ConvertResult};
pub use logging::{ConversionLog, TracingLog};
pub use options::ConvertOptions;
pub use template::SchemaTemplate;
pub use test_script::generate_tests;
