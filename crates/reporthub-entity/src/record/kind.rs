//! Record kind classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of a staged record: a folder, or a file tagged by extension.
///
/// Only the folder/non-folder distinction matters to the tree builder; the
/// file tags exist so the display layer can pick an icon or renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// A folder that may contain other records.
    Folder,
    /// A Markdown document.
    Md,
    /// A comma-separated-values table.
    Csv,
    /// A Jupyter notebook.
    Ipynb,
    /// A JSON document.
    Json,
    /// A plain-text file.
    Txt,
    /// A raster or vector image.
    Image,
    /// Any other file.
    File,
}

impl RecordKind {
    /// Check if this kind is a folder.
    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder)
    }

    /// Classify a file by the extension of its name.
    ///
    /// Names without an extension fall back to the generic file kind.
    pub fn from_file_name(name: &str) -> Self {
        let ext = name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != name)
            .map(|ext| ext.to_lowercase());

        match ext.as_deref() {
            Some("md") | Some("markdown") => Self::Md,
            Some("csv") => Self::Csv,
            Some("ipynb") => Self::Ipynb,
            Some("json") => Self::Json,
            Some("txt") => Self::Txt,
            Some("png") | Some("jpg") | Some("jpeg") | Some("gif") | Some("svg") => Self::Image,
            _ => Self::File,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Folder => write!(f, "folder"),
            Self::Md => write!(f, "md"),
            Self::Csv => write!(f, "csv"),
            Self::Ipynb => write!(f, "ipynb"),
            Self::Json => write!(f, "json"),
            Self::Txt => write!(f, "txt"),
            Self::Image => write!(f, "image"),
            Self::File => write!(f, "file"),
        }
    }
}
