//! Draft staging configuration.

use serde::{Deserialize, Serialize};

/// Settings governing the draft staging area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagingConfig {
    /// Default path of the draft manifest file.
    #[serde(default = "default_manifest_path")]
    pub manifest_path: String,
    /// Maximum number of records a draft may stage.
    #[serde(default = "default_max_records")]
    pub max_records: usize,
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            manifest_path: default_manifest_path(),
            max_records: default_max_records(),
        }
    }
}

fn default_manifest_path() -> String {
    "draft.json".to_string()
}

fn default_max_records() -> usize {
    1000
}
