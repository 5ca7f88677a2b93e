//! # reporthub-entity
//!
//! Domain entity models for ReportHub draft staging. Every struct in this
//! crate represents a staged record or a value derived from one. All
//! entities derive `Debug`, `Clone`, `Serialize`, and `Deserialize`.

pub mod record;
