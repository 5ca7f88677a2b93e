//! Staged record entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use reporthub_core::types::RecordId;
use reporthub_core::types::path;

use super::kind::RecordKind;

/// A single staged file or folder in a report draft.
///
/// Records form a flat collection; hierarchy is expressed only through
/// `parent_id` and the materialized `path`, and is reconstructed on demand
/// by the tree builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    /// Unique record identifier.
    pub id: RecordId,
    /// Containing folder record (None for root-level records).
    pub parent_id: Option<RecordId>,
    /// Display name (including extension for files).
    pub name: String,
    /// Full slash-separated path, unique within the draft (e.g. `docs/readme.md`).
    pub path: String,
    /// Folder marker or extension-derived file tag.
    pub kind: RecordKind,
    /// When the record was staged.
    pub created_at: DateTime<Utc>,
    /// When the record was last renamed or moved.
    pub updated_at: DateTime<Utc>,
}

impl FileRecord {
    /// Check if this is a root-level record (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Check if this record is a folder.
    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }

    /// Depth level derived from the path's segment count (root level is 1).
    pub fn level(&self) -> i32 {
        path::segment_count(&self.path)
    }
}
