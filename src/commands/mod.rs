//! CLI command definitions and dispatch.

pub mod stage;
pub mod view;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use reporthub_core::config::AppConfig;
use reporthub_core::error::AppError;
use reporthub_service::staging::{Manifest, StagingArea};

/// ReportHub — report draft staging toolkit
#[derive(Debug, Parser)]
#[command(name = "reporthub", version, about, long_about = None)]
pub struct Cli {
    /// Path to the draft manifest (defaults to the configured path)
    #[arg(short, long)]
    pub manifest: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create an empty draft manifest
    Init,
    /// Stage a new file
    Add(stage::AddArgs),
    /// Stage a new folder
    Mkdir(stage::MkdirArgs),
    /// Rename a staged record
    Rename(stage::RenameArgs),
    /// Remove a staged record and its descendants
    Remove(stage::RemoveArgs),
    /// List staged records as a flat table
    List,
    /// Show the reconstructed draft tree
    Tree,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        let manifest_path = self
            .manifest
            .clone()
            .unwrap_or_else(|| config.staging.manifest_path.clone());

        match &self.command {
            Commands::Init => stage::init(&manifest_path).await,
            Commands::Add(args) => stage::add(args, &manifest_path, config).await,
            Commands::Mkdir(args) => stage::mkdir(args, &manifest_path, config).await,
            Commands::Rename(args) => stage::rename(args, &manifest_path, config).await,
            Commands::Remove(args) => stage::remove(args, &manifest_path, config).await,
            Commands::List => view::list(&manifest_path, config, self.format).await,
            Commands::Tree => view::tree(&manifest_path, config, self.format).await,
        }
    }
}

/// Helper: load the staging area from a manifest file
pub async fn load_area(path: &str, config: &AppConfig) -> Result<StagingArea, AppError> {
    let manifest = Manifest::load(path).await?;
    Ok(StagingArea::from_records(
        manifest.records,
        config.staging.clone(),
    ))
}

/// Helper: persist the staging area back to the manifest file
pub async fn save_area(path: &str, area: StagingArea) -> Result<(), AppError> {
    Manifest::from_records(area.into_records()).save(path).await
}
