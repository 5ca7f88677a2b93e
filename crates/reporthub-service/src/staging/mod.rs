//! Draft staging: tree reconstruction, collection mutations, persistence.

pub mod manifest;
pub mod service;
pub mod tree;

pub use manifest::Manifest;
pub use service::StagingArea;
pub use tree::TreeBuilder;
