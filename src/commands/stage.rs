//! Staging mutation commands: init, add, mkdir, rename, remove.

use clap::Args;
use dialoguer::Confirm;

use crate::output;
use reporthub_core::config::AppConfig;
use reporthub_core::error::AppError;
use reporthub_core::types::RecordId;
use reporthub_service::staging::Manifest;

/// Arguments for staging a new file
#[derive(Debug, Args)]
pub struct AddArgs {
    /// File name (including extension)
    pub name: String,

    /// Parent folder record ID (omit for root level)
    #[arg(short, long)]
    pub parent_id: Option<String>,
}

/// Arguments for staging a new folder
#[derive(Debug, Args)]
pub struct MkdirArgs {
    /// Folder name
    pub name: String,

    /// Parent folder record ID (omit for root level)
    #[arg(short, long)]
    pub parent_id: Option<String>,
}

/// Arguments for renaming a staged record
#[derive(Debug, Args)]
pub struct RenameArgs {
    /// Record ID
    pub id: String,

    /// New name
    pub new_name: String,
}

/// Arguments for removing a staged record
#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Record ID
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Create an empty draft manifest
pub async fn init(manifest_path: &str) -> Result<(), AppError> {
    if tokio::fs::try_exists(manifest_path).await? {
        return Err(AppError::conflict(format!(
            "Manifest '{}' already exists",
            manifest_path
        )));
    }

    Manifest::new().save(manifest_path).await?;
    output::print_success(&format!("Created empty draft manifest '{}'", manifest_path));
    Ok(())
}

/// Stage a new file
pub async fn add(args: &AddArgs, manifest_path: &str, config: &AppConfig) -> Result<(), AppError> {
    let mut area = super::load_area(manifest_path, config).await?;
    let parent_id = args.parent_id.as_deref().map(RecordId::from);

    let record = area.add_file(&args.name, parent_id.as_ref())?;
    super::save_area(manifest_path, area).await?;

    output::print_success(&format!(
        "Staged file '{}' (id: {})",
        record.path, record.id
    ));
    Ok(())
}

/// Stage a new folder
pub async fn mkdir(
    args: &MkdirArgs,
    manifest_path: &str,
    config: &AppConfig,
) -> Result<(), AppError> {
    let mut area = super::load_area(manifest_path, config).await?;
    let parent_id = args.parent_id.as_deref().map(RecordId::from);

    let record = area.add_folder(&args.name, parent_id.as_ref())?;
    super::save_area(manifest_path, area).await?;

    output::print_success(&format!(
        "Staged folder '{}' (id: {})",
        record.path, record.id
    ));
    Ok(())
}

/// Rename a staged record
pub async fn rename(
    args: &RenameArgs,
    manifest_path: &str,
    config: &AppConfig,
) -> Result<(), AppError> {
    let mut area = super::load_area(manifest_path, config).await?;
    let id = RecordId::from(args.id.as_str());

    let record = area.rename(&id, &args.new_name)?;
    super::save_area(manifest_path, area).await?;

    output::print_success(&format!("Renamed record {} to '{}'", record.id, record.path));
    Ok(())
}

/// Remove a staged record and its descendants
pub async fn remove(
    args: &RemoveArgs,
    manifest_path: &str,
    config: &AppConfig,
) -> Result<(), AppError> {
    let mut area = super::load_area(manifest_path, config).await?;
    let id = RecordId::from(args.id.as_str());

    let record = area
        .find(&id)
        .ok_or_else(|| AppError::not_found("Record not found"))?
        .clone();
    let descendants = area.descendant_count(&id);

    if descendants > 0 && !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Remove '{}' and {} descendant record(s)?",
                record.path, descendants
            ))
            .default(false)
            .interact()
            .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))?;

        if !confirmed {
            output::print_warning("Aborted");
            return Ok(());
        }
    }

    let removed = area.remove(&id)?;
    super::save_area(manifest_path, area).await?;

    output::print_success(&format!("Removed {} record(s)", removed));
    Ok(())
}
