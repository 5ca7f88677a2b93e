//! Nested tree structures for hierarchical display.

use serde::{Deserialize, Serialize};

use super::model::FileRecord;

/// A node in the reconstructed draft tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    /// The originating staged record.
    pub record: FileRecord,
    /// Depth level (root level is 1).
    pub level: i32,
    /// Child nodes, in attachment order.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a leaf node for a record, deriving its level from the path.
    pub fn new(record: FileRecord) -> Self {
        let level = record.level();
        Self {
            record,
            level,
            children: Vec::new(),
        }
    }

    /// Count this node plus all of its descendants.
    pub fn subtree_size(&self) -> u64 {
        1 + self.children.iter().map(TreeNode::subtree_size).sum::<u64>()
    }
}

/// A complete reconstructed tree for a report draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileTree {
    /// The root node(s) of the tree.
    pub roots: Vec<TreeNode>,
    /// Total number of records in the tree.
    pub total_records: u64,
}

impl FileTree {
    /// Create an empty tree.
    pub fn empty() -> Self {
        Self {
            roots: Vec::new(),
            total_records: 0,
        }
    }

    /// Check if the tree contains no records.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}
