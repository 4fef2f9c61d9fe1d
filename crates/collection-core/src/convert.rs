//! Conversion entry point

use crate::collection::{Collection, CollectionInfo, Description, Environment, COLLECTION_SCHEMA};
use crate::context::ConversionContext;
use crate::environment::EnvironmentBuilder;
use crate::error::ConvertResult;
use crate::folders::{folder_name, FolderAssembler};
use crate::items::build_item_list;
use crate::logging::{ConversionLog, TracingLog};
use crate::options::ConvertOptions;
use std::sync::Arc;
use swagger_parser::{ApiDocument, DocumentLoader, Info, SpecSource, SwaggerLoader};
use uuid::Uuid;

/// Stages a conversion moves through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStage {
    /// Nothing started yet
    Idle,
    /// Read the document through a [`DocumentLoader`]
    Loading,
    /// Validate and dereference it through the same loader
    Validating,
    /// Capture document-level defaults and start the environment
    Extracting,
    /// Build items and folders for every path
    Assembling,
    Done,
    Failed,
}

impl std::fmt::Display for ConversionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConversionStage::Idle => "idle",
            ConversionStage::Loading => "loading",
            ConversionStage::Validating => "validating",
            ConversionStage::Extracting => "extracting",
            ConversionStage::Assembling => "assembling",
            ConversionStage::Done => "done",
            ConversionStage::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// Result of a successful conversion
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    pub collection: Collection,
    /// Present only when an environment target was configured
    pub environment: Option<Environment>,
}

/// Converts Swagger documents into collections.
///
/// Holds only configuration; every call builds its own context, so one
/// converter can serve overlapping conversions.
#[derive(Clone)]
pub struct Converter {
    options: ConvertOptions,
    log: Arc<dyn ConversionLog>,
}

impl Converter {
    /// Create a converter logging through `tracing`
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            options,
            log: Arc::new(TracingLog),
        }
    }

    /// Replace the log receiving conversion diagnostics
    pub fn with_log(mut self, log: Arc<dyn ConversionLog>) -> Self {
        self.log = log;
        self
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Load a document from a file path or URL and convert it
    pub async fn convert_location(&self, location: &str) -> ConvertResult<ConversionOutput> {
        let source = SpecSource::detect(location)?;
        self.convert(&SwaggerLoader, &source).await
    }

    /// Load, validate and convert the document at `source`.
    ///
    /// A load or validation failure fails the whole conversion.
    pub async fn convert<L>(&self, loader: &L, source: &SpecSource) -> ConvertResult<ConversionOutput>
    where
        L: DocumentLoader + ?Sized,
    {
        self.enter(ConversionStage::Loading);
        self.log.debug(&format!("Reading API spec from: {}", source));

        let document = match loader.read(source).await.and_then(|raw| {
            self.enter(ConversionStage::Validating);
            loader.validate(&raw)
        }) {
            Ok(document) => document,
            Err(err) => {
                self.log.warn(&format!("Failed to load API spec: {}", err));
                self.enter(ConversionStage::Failed);
                return Err(err.into());
            }
        };

        self.convert_document(&document)
    }

    /// Convert an already loaded, reference-free document
    pub fn convert_document(&self, document: &ApiDocument) -> ConvertResult<ConversionOutput> {
        self.enter(ConversionStage::Extracting);
        let ctx = ConversionContext::new(document, &self.options, self.log.as_ref());
        let mut env = EnvironmentBuilder::new(&self.options);
        let info = collection_info(&document.info);

        self.enter(ConversionStage::Assembling);
        let mut folders = FolderAssembler::new();
        for (endpoint, path_item) in &document.paths {
            let items = match build_item_list(&ctx, endpoint, path_item, &mut env) {
                Ok(items) => items,
                Err(err) => {
                    self.enter(ConversionStage::Failed);
                    return Err(err);
                }
            };
            match folder_name(endpoint) {
                Some(name) => self.log.debug(&format!("Adding path item to folder: {}", name)),
                None => self.log.debug("Adding path item"),
            }
            folders.add(endpoint, items);
        }

        let collection = Collection {
            info,
            item: folders.finish(),
        };
        // placeholders copied from the document (descriptions, examples, scripts)
        if env.is_enabled() {
            env.add_referenced_in(&serde_json::to_value(&collection)?);
        }
        let environment = env.finish();

        self.enter(ConversionStage::Done);
        Ok(ConversionOutput {
            collection,
            environment,
        })
    }

    fn enter(&self, stage: ConversionStage) {
        self.log.debug(&format!("conversion stage: {}", stage));
    }
}

fn collection_info(info: &Info) -> CollectionInfo {
    CollectionInfo {
        name: info.title.clone(),
        postman_id: Uuid::new_v4(),
        description: info.description.as_deref().map(Description::markdown),
        schema: COLLECTION_SCHEMA.to_string(),
    }
}
