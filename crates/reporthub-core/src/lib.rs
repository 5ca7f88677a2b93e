//! # reporthub-core
//!
//! Core crate for ReportHub. Contains configuration schemas, typed
//! identifiers, slash-path helpers, and the unified error system.
//!
//! This crate has **no** internal dependencies on other ReportHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
