//! wwdc-agent - command-line host for session lookups
//!
//! `search` lists candidate sessions for a video file, best first.
//! `update` prints the metadata a chosen session identity resolves to.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wwdc_agent::config::resolve_agent_config;
use wwdc_agent::models::{sort_best_first, MovieMetadata, RawCatalog};
use wwdc_agent::services::{HttpThumbnailFetcher, ResolutionService, StaticCatalogSource};
use wwdc_agent::DESCRIPTOR;
use wwdc_common::config::TomlConfig;

#[derive(Debug, Parser)]
#[command(name = "wwdc-agent", version, about = "Match conference videos to session metadata")]
struct Cli {
    /// Config file (defaults to ~/.config/wwdc/config.toml)
    #[arg(long, env = "WWDC_CONFIG")]
    config: Option<PathBuf>,

    /// Read the session catalog from a local JSON file instead of the network
    #[arg(long)]
    catalog_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List candidate sessions for a video file
    Search {
        path: String,
        /// Year to assume when the path has none
        #[arg(long)]
        year: Option<u32>,
        /// Title to score candidates against
        #[arg(long)]
        title: Option<String>,
    },
    /// Show metadata for a session identity such as 2019-401
    Update {
        identity: String,
        /// Overwrite fields that already have values
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let toml_config = match &cli.config {
        Some(path) => TomlConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => TomlConfig::load_default()?,
    };

    let default_level = toml_config.log_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!(
        "Starting wwdc-agent {} ({} agent)",
        env!("CARGO_PKG_VERSION"),
        DESCRIPTOR.name
    );

    let config = resolve_agent_config(&toml_config);
    let service = match &cli.catalog_file {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read catalog {}", path.display()))?;
            let catalog: RawCatalog = serde_json::from_str(&content)
                .with_context(|| format!("Invalid catalog {}", path.display()))?;
            info!(path = %path.display(), sessions = catalog.contents.len(), "Using local catalog");
            ResolutionService::new(
                Arc::new(StaticCatalogSource::new(catalog)),
                Arc::new(HttpThumbnailFetcher::new(&config)?),
            )
        }
        None => ResolutionService::from_config(&config)?,
    };

    match cli.command {
        Command::Search { path, year, title } => {
            let mut results = service
                .find_candidates(&path, year, title.as_deref())
                .await?;
            sort_best_first(&mut results);

            if results.is_empty() {
                println!("No candidates for {}", path);
            }
            for result in &results {
                println!(
                    "{:>3}  {:<12} {}",
                    result.score,
                    result.id,
                    result.name.as_deref().unwrap_or("(untitled)")
                );
            }
        }
        Command::Update { identity, force } => {
            let mut metadata = MovieMetadata::new(identity);
            if service.update_metadata(&mut metadata, force).await? {
                println!("{}", serde_json::to_string_pretty(&metadata)?);
            } else {
                println!("No unique session for {}", metadata.id);
            }
        }
    }

    Ok(())
}
