//! swagger2collection - convert a Swagger 2.0 document into a request collection
//!
//! Reads a local file or URL, writes the collection as JSON to `--output` (or
//! stdout) and, when `--env` is given, an environment listing every variable
//! the collection references. Logs go to stderr.

use clap::Parser;
use collection_core::{ConvertOptions, Converter};
use std::path::PathBuf;
use tracing::info;

/// Convert Swagger 2.0 API documents into request collections
#[derive(Parser, Debug)]
#[command(name = "swagger2collection")]
#[command(author = "Symbia Labs")]
#[command(version = "0.1.0")]
#[command(about = "Convert Swagger 2.0 documents into request collections")]
struct Args {
    /// Swagger document to convert (file path or http(s) URL)
    #[arg(short, long)]
    input: String,

    /// Write the collection here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write an environment file to this path
    #[arg(long)]
    env: Option<PathBuf>,

    /// JSON file with conversion options; flags take precedence
    #[arg(long, env = "SWAGGER2COLLECTION_CONFIG")]
    config: Option<PathBuf>,

    /// Drop every query parameter
    #[arg(long)]
    exclude_query_params: bool,

    /// Drop query parameters that are not required
    #[arg(long)]
    exclude_optional_query_params: bool,

    /// Do not generate body templates from schemas
    #[arg(long)]
    exclude_body_template: bool,

    /// Do not generate test scripts
    #[arg(long)]
    exclude_tests: bool,

    /// Only convert operations carrying this tag
    #[arg(long)]
    tag_filter: Option<String>,

    /// Host to use instead of the document's
    #[arg(long, env = "SWAGGER2COLLECTION_HOST")]
    host: Option<String>,

    /// Preferred security scheme
    #[arg(long, env = "SWAGGER2COLLECTION_DEFAULT_SECURITY")]
    default_security: Option<String>,

    /// Preferred Accept media type
    #[arg(long)]
    default_produces_type: Option<String>,
}

impl Args {
    /// Options from `--config` (if any) with command-line flags layered on top
    fn build_options(&self) -> Result<ConvertOptions, Box<dyn std::error::Error>> {
        let mut options = match &self.config {
            Some(path) => ConvertOptions::from_file(path)
                .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?,
            None => ConvertOptions::new(),
        };

        options.exclude_query_params |= self.exclude_query_params;
        options.exclude_optional_query_params |= self.exclude_optional_query_params;
        options.exclude_body_template |= self.exclude_body_template;
        options.exclude_tests |= self.exclude_tests;

        if let Some(tag) = &self.tag_filter {
            options.tag_filter = Some(tag.clone());
        }
        if let Some(host) = &self.host {
            options.host = Some(host.clone());
        }
        if let Some(scheme) = &self.default_security {
            options.default_security = Some(scheme.clone());
        }
        if let Some(media_type) = &self.default_produces_type {
            options.default_produces_type = Some(media_type.clone());
        }
        if let Some(env) = &self.env {
            options.environment_target = Some(env.display().to_string());
        }

        Ok(options)
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let options = args.build_options()?;
    let environment_path = options.environment_target.clone().map(PathBuf::from);

    info!("Converting {}", args.input);
    let output = Converter::new(options)
        .convert_location(&args.input)
        .await
        .map_err(|e| format!("Failed to convert {}: {}", args.input, e))?;

    let collection = output.collection.to_json_pretty()?;
    match &args.output {
        Some(path) => {
            tokio::fs::write(path, collection).await?;
            info!("Collection written to {}", path.display());
        }
        None => println!("{}", collection),
    }

    if let (Some(environment), Some(path)) = (output.environment, environment_path) {
        tokio::fs::write(&path, environment.to_json_pretty()?).await?;
        info!(
            "Environment with {} variables written to {}",
            environment.values.len(),
            path.display()
        );
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // stdout carries the collection, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    run(args).await
}
