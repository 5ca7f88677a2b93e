//! Read-only commands: list and tree.

use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use reporthub_core::config::AppConfig;
use reporthub_core::error::AppError;
use reporthub_entity::record::TreeNode;

/// Staged record display row
#[derive(Debug, Serialize, Tabled)]
struct RecordRow {
    /// Record ID
    id: String,
    /// Name
    name: String,
    /// Path
    path: String,
    /// Kind
    kind: String,
    /// Parent record ID
    parent: String,
}

/// List staged records as a flat table
pub async fn list(
    manifest_path: &str,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let area = super::load_area(manifest_path, config).await?;

    let rows: Vec<RecordRow> = area
        .records()
        .iter()
        .map(|r| RecordRow {
            id: r.id.to_string(),
            name: r.name.clone(),
            path: r.path.clone(),
            kind: r.kind.to_string(),
            parent: r
                .parent_id
                .as_ref()
                .map(|p| p.to_string())
                .unwrap_or_default(),
        })
        .collect();

    output::print_list(&rows, format);
    Ok(())
}

/// Show the reconstructed draft tree
pub async fn tree(
    manifest_path: &str,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let area = super::load_area(manifest_path, config).await?;
    let tree = area.tree();

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&tree)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            for root in &tree.roots {
                render_node(root, 0);
            }
            println!("{} record(s) staged", tree.total_records);
        }
    }

    Ok(())
}

/// Print one node with indentation proportional to its depth
fn render_node(node: &TreeNode, depth: usize) {
    let indent = "  ".repeat(depth);
    let suffix = if node.record.is_folder() { "/" } else { "" };
    println!("{}├── {}{}", indent, node.record.name, suffix);

    for child in &node.children {
        render_node(child, depth + 1);
    }
}
