//! JSON manifest persistence for a staged draft.
//!
//! The manifest is the flat record collection written to disk between CLI
//! invocations — the stand-in for the UI layer's component-local state.
//! Packaging and uploading the staged files is a separate concern and does
//! not happen here.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use reporthub_core::error::AppError;
use reporthub_core::result::AppResult;
use reporthub_entity::record::FileRecord;

/// Current manifest schema version.
pub const MANIFEST_VERSION: u32 = 1;

/// A draft manifest: the versioned flat record collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Schema version.
    #[serde(default = "default_version")]
    pub version: u32,
    /// The staged records.
    #[serde(default)]
    pub records: Vec<FileRecord>,
}

impl Manifest {
    /// Creates an empty manifest at the current schema version.
    pub fn new() -> Self {
        Self {
            version: MANIFEST_VERSION,
            records: Vec::new(),
        }
    }

    /// Creates a manifest from an existing record collection.
    pub fn from_records(records: Vec<FileRecord>) -> Self {
        Self {
            version: MANIFEST_VERSION,
            records,
        }
    }

    /// Loads a manifest from a JSON file.
    pub async fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("Manifest '{}' not found", path.display()))
            } else {
                AppError::from(e)
            }
        })?;

        let manifest: Manifest = serde_json::from_slice(&bytes)?;
        if manifest.version != MANIFEST_VERSION {
            return Err(AppError::validation(format!(
                "Unsupported manifest version {} (expected {})",
                manifest.version, MANIFEST_VERSION
            )));
        }

        debug!(path = %path.display(), records = manifest.records.len(), "Manifest loaded");
        Ok(manifest)
    }

    /// Writes the manifest to a JSON file, replacing any existing content.
    pub async fn save(&self, path: impl AsRef<Path>) -> AppResult<()> {
        let path = path.as_ref();
        let json = serde_json::to_vec_pretty(self)?;
        tokio::fs::write(path, json).await?;

        debug!(path = %path.display(), records = self.records.len(), "Manifest saved");
        Ok(())
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new()
    }
}

fn default_version() -> u32 {
    MANIFEST_VERSION
}
