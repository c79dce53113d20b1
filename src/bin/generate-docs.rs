//! Emits the documentation model of the reference configuration.
use std::{error::Error, fs, io::Write, path::PathBuf};

use clap::{Parser, Subcommand};
use confdoc::{
    ConfdocError,
    config::{DocsConfig, GeneralSettings},
    docs::{Extractor, classify, reifiable_types, try_reify},
    reference::{self, ServiceConfig},
    tracing_config,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "generate-docs")]
#[command(about = "Extract the configuration reference model")]
struct Cli {
    /// Tool configuration file (defaults to $XDG_CONFIG_HOME/confdoc/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the JSON documentation model
    Extract {
        /// Destination file, overriding the configured one
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit compact JSON
        #[arg(long)]
        compact: bool,
    },
    /// List the root blocks of the reference configuration
    Roots,
    /// Show the value type behind a semantic type name
    Type {
        /// Semantic type name; lists the known names when omitted
        name: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // Log settings live in the config, so loading logs through default ones.
    let config = tracing_config::scoped(&GeneralSettings::default(), || match &cli.config {
        Some(path) => DocsConfig::load_with_imports(path),
        None => DocsConfig::load_default(),
    })?;
    tracing_config::init(&config.general)?;

    match cli.command {
        Commands::Extract { output, compact } => extract(&config, output, compact)?,
        Commands::Roots => {
            println!("Root blocks:");
            for block in reference::root_blocks().iter() {
                println!("  - {}: {}", block.name(), block.type_info().short_name());
            }
        }
        Commands::Type { name: None } => {
            println!("Semantic types:");
            for name in reifiable_types() {
                println!("  - {name}");
            }
        }
        Commands::Type { name: Some(name) } => {
            let ty = try_reify(&name).ok_or_else(|| format!("unknown semantic type '{name}'"))?;
            let semantic_type = classify(&ty)?;
            println!("{name}: {} ({})", ty.name(), ty.shape().kind());
            if semantic_type != name {
                println!("  classified back as: {semantic_type}");
            }
        }
    }

    Ok(())
}

fn extract(config: &DocsConfig, output: Option<PathBuf>, compact: bool) -> Result<(), ConfdocError> {
    let mut categories = reference::category_overrides();
    categories.extend(config.categories.clone());

    let blocks = Extractor::new(reference::root_blocks())
        .with_category_overrides(&categories)
        .extract_config::<ServiceConfig>()?;

    let json = if compact || !config.output.pretty {
        serde_json::to_string(&blocks)?
    } else {
        serde_json::to_string_pretty(&blocks)?
    };

    match output.or_else(|| config.output.path.clone()) {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| ConfdocError::io(e, parent))?;
            }
            fs::write(&path, json + "\n").map_err(|e| ConfdocError::io(e, &path))?;
            info!(path = %path.display(), blocks = blocks.len(), "Wrote documentation model");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }

    Ok(())
}
