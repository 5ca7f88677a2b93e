//! # reporthub-service
//!
//! Business logic for ReportHub draft staging: the tree builder that turns
//! the flat record collection into a nested display tree, the staging area
//! that owns the collection and its mutations, and the JSON manifest that
//! persists a draft between CLI invocations.

pub mod staging;

pub use staging::{Manifest, StagingArea, TreeBuilder};
