use clap::{Parser, Subcommand};
use log::{info, warn};
use schemaform::descriptor::{self, ComposedDescriptor};
use schemaform::{FormResult, GeneratorConfig, UdfManifest, UserFunction};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the generator configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Format key-derived field titles as headings
    #[arg(long)]
    pretty_headings: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the composed descriptor as JSON
    Describe {
        /// OpenAPI document of the served endpoint (JSON)
        openapi: PathBuf,
        /// Manifest of user-defined functions (TOML or JSON)
        #[arg(long)]
        udfs: Option<PathBuf>,
    },
    /// Print the flattened input form fields as JSON
    Fields {
        /// OpenAPI document of the served endpoint (JSON)
        openapi: PathBuf,
    },
    /// Bind user-defined functions and report which were rejected
    CheckUdfs {
        /// OpenAPI document of the served endpoint (JSON)
        openapi: PathBuf,
        /// Manifest of user-defined functions (TOML or JSON)
        udfs: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::from_file(path)?,
        None => GeneratorConfig::default(),
    };
    if cli.pretty_headings {
        config.pretty_headings = true;
    }
    schemaform::logging::init(&config.logging)?;

    match cli.command {
        Commands::Describe { openapi, udfs } => {
            let functions = load_functions(udfs.as_deref())?;
            let descriptor = build(&openapi, &functions, &config)?;
            print_json(&descriptor)?;
        }
        Commands::Fields { openapi } => {
            let descriptor = build(&openapi, &[], &config)?;
            print_json(&descriptor.input_fields())?;
        }
        Commands::CheckUdfs { openapi, udfs } => {
            let functions = load_functions(Some(&udfs))?;
            let descriptor = build(&openapi, &functions, &config)?;
            for binding in descriptor.bindings() {
                println!("✅ {} ({})", binding.name(), binding.backend());
                for parameter in binding.parameter_bindings() {
                    println!(
                        "    {} <- {}:{}",
                        parameter.parameter, parameter.direction, parameter.path
                    );
                }
            }
            for rejection in descriptor.rejected() {
                println!("❌ {}: {}", rejection.name, rejection.reason);
            }
        }
    }

    Ok(())
}

fn load_functions(path: Option<&Path>) -> FormResult<Vec<Arc<dyn UserFunction>>> {
    match path {
        Some(path) => Ok(UdfManifest::from_file(path)?.into_functions()),
        None => Ok(Vec::new()),
    }
}

fn build(
    openapi: &Path,
    functions: &[Arc<dyn UserFunction>],
    config: &GeneratorConfig,
) -> FormResult<ComposedDescriptor> {
    info!("📁 Reading OpenAPI document from {}", openapi.display());
    let contents = fs::read_to_string(openapi)?;
    let document: Value = serde_json::from_str(&contents)?;
    let descriptor = descriptor::generate(&document, functions, config)?;
    if !descriptor.rejected().is_empty() {
        warn!(
            "⚠️ {} user functions were not bound",
            descriptor.rejected().len()
        );
    }
    Ok(descriptor)
}

fn print_json<T: Serialize>(value: &T) -> FormResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
