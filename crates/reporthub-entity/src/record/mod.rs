//! Staged record domain entities.

pub mod kind;
pub mod model;
pub mod tree;

pub use kind::RecordKind;
pub use model::FileRecord;
pub use tree::{FileTree, TreeNode};
