//! Staging mutations over the flat record collection.

use std::collections::HashSet;

use chrono::Utc;
use tracing::info;

use reporthub_core::config::staging::StagingConfig;
use reporthub_core::error::AppError;
use reporthub_core::types::{RecordId, path};
use reporthub_entity::record::{FileRecord, FileTree, RecordKind};

use super::tree::TreeBuilder;

/// Owns the flat record collection of one report draft.
///
/// Every mutation validates against the current collection and keeps the
/// materialized paths consistent (rename cascades to descendants, remove
/// cascades through parent links). The nested tree is re-derived from
/// scratch on each [`StagingArea::tree`] call, never patched in place.
#[derive(Debug, Clone)]
pub struct StagingArea {
    /// The flat staged-record collection.
    records: Vec<FileRecord>,
    /// Tree builder used for rebuilds.
    builder: TreeBuilder,
    /// Staging limits.
    limits: StagingConfig,
}

impl StagingArea {
    /// Creates an empty staging area.
    pub fn new(limits: StagingConfig) -> Self {
        Self {
            records: Vec::new(),
            builder: TreeBuilder::new(),
            limits,
        }
    }

    /// Creates a staging area over an existing record collection.
    pub fn from_records(records: Vec<FileRecord>, limits: StagingConfig) -> Self {
        Self {
            records,
            builder: TreeBuilder::new(),
            limits,
        }
    }

    /// The flat record collection.
    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    /// Consumes the area, returning the record collection.
    pub fn into_records(self) -> Vec<FileRecord> {
        self.records
    }

    /// Number of staged records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by id.
    pub fn find(&self, id: &RecordId) -> Option<&FileRecord> {
        self.records.iter().find(|r| r.id == *id)
    }

    /// Rebuilds the nested display tree from the current collection.
    pub fn tree(&self) -> FileTree {
        self.builder.build(&self.records)
    }

    /// Stages a new file, classifying its kind from the name's extension.
    pub fn add_file(
        &mut self,
        name: &str,
        parent_id: Option<&RecordId>,
    ) -> Result<FileRecord, AppError> {
        self.add_record(name, parent_id, RecordKind::from_file_name(name))
    }

    /// Stages a new folder.
    pub fn add_folder(
        &mut self,
        name: &str,
        parent_id: Option<&RecordId>,
    ) -> Result<FileRecord, AppError> {
        self.add_record(name, parent_id, RecordKind::Folder)
    }

    fn add_record(
        &mut self,
        name: &str,
        parent_id: Option<&RecordId>,
        kind: RecordKind,
    ) -> Result<FileRecord, AppError> {
        validate_name(name)?;

        if self.records.len() >= self.limits.max_records {
            return Err(AppError::validation(format!(
                "Draft record limit reached ({})",
                self.limits.max_records
            )));
        }

        let parent_path = match parent_id {
            Some(pid) => {
                let parent = self
                    .find(pid)
                    .ok_or_else(|| AppError::not_found("Parent folder not found"))?;
                if !parent.is_folder() {
                    return Err(AppError::validation("Parent record is not a folder"));
                }
                parent.path.clone()
            }
            None => String::new(),
        };

        let record_path = path::join(&parent_path, name);
        if self.records.iter().any(|r| r.path == record_path) {
            return Err(AppError::conflict(format!(
                "A record at path '{}' already exists",
                record_path
            )));
        }

        let now = Utc::now();
        let record = FileRecord {
            id: RecordId::generate(),
            parent_id: parent_id.cloned(),
            name: name.to_string(),
            path: record_path,
            kind,
            created_at: now,
            updated_at: now,
        };

        info!(
            record_id = %record.id,
            path = %record.path,
            kind = ?record.kind,
            "Record staged"
        );

        self.records.push(record.clone());
        Ok(record)
    }

    /// Renames a staged record, rewriting descendant paths.
    pub fn rename(&mut self, id: &RecordId, new_name: &str) -> Result<FileRecord, AppError> {
        validate_name(new_name)?;

        let index = self
            .records
            .iter()
            .position(|r| r.id == *id)
            .ok_or_else(|| AppError::not_found("Record not found"))?;

        let old_path = self.records[index].path.clone();
        let new_path = path::rename_last_segment(&old_path, new_name);

        if new_path != old_path
            && self
                .records
                .iter()
                .any(|r| r.id != *id && r.path == new_path)
        {
            return Err(AppError::conflict(format!(
                "A record at path '{}' already exists",
                new_path
            )));
        }

        let now = Utc::now();
        {
            let record = &mut self.records[index];
            record.name = new_name.to_string();
            record.path = new_path.clone();
            record.updated_at = now;
        }

        // Cascade the path rewrite to descendants.
        for record in &mut self.records {
            if let Some(rewritten) = path::replace_prefix(&record.path, &old_path, &new_path) {
                record.path = rewritten;
                record.updated_at = now;
            }
        }

        info!(
            record_id = %id,
            old_path = %old_path,
            new_path = %new_path,
            "Record renamed"
        );

        Ok(self.records[index].clone())
    }

    /// Removes a staged record and, transitively, all of its descendants.
    ///
    /// Returns the number of records removed.
    pub fn remove(&mut self, id: &RecordId) -> Result<usize, AppError> {
        let record = self
            .find(id)
            .ok_or_else(|| AppError::not_found("Record not found"))?;
        let removed_path = record.path.clone();

        let doomed = self.descendant_ids(id);
        let before = self.records.len();
        self.records.retain(|r| !doomed.contains(&r.id));
        let removed = before - self.records.len();

        info!(
            record_id = %id,
            path = %removed_path,
            removed,
            "Record removed"
        );

        Ok(removed)
    }

    /// Number of descendants that a cascade remove of `id` would take along.
    pub fn descendant_count(&self, id: &RecordId) -> usize {
        self.descendant_ids(id).len().saturating_sub(1)
    }

    /// The record plus everything reachable from it through parent links.
    fn descendant_ids(&self, id: &RecordId) -> HashSet<RecordId> {
        let mut doomed: HashSet<RecordId> = HashSet::new();
        doomed.insert(id.clone());

        loop {
            let before = doomed.len();
            for record in &self.records {
                if let Some(parent) = &record.parent_id {
                    if doomed.contains(parent) {
                        doomed.insert(record.id.clone());
                    }
                }
            }
            if doomed.len() == before {
                break;
            }
        }

        doomed
    }
}

fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::validation("Record name cannot be empty"));
    }
    if name.contains('/') {
        return Err(AppError::validation("Record name cannot contain '/'"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use reporthub_core::error::ErrorKind;

    fn area() -> StagingArea {
        StagingArea::new(StagingConfig::default())
    }

    #[test]
    fn test_add_file_at_root() {
        let mut area = area();
        let record = area.add_file("Readme.md", None).expect("add file");

        assert_eq!(record.path, "Readme.md");
        assert_eq!(record.kind, RecordKind::Md);
        assert!(record.is_root());
        assert_eq!(area.len(), 1);
    }

    #[test]
    fn test_add_file_under_folder() {
        let mut area = area();
        let docs = area.add_folder("docs", None).expect("add folder");
        let readme = area.add_file("readme.md", Some(&docs.id)).expect("add file");

        assert_eq!(readme.path, "docs/readme.md");
        assert_eq!(readme.parent_id, Some(docs.id));
    }

    #[test]
    fn test_add_rejects_blank_name() {
        let mut area = area();
        let err = area.add_file("   ", None).expect_err("blank name");
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_add_rejects_slash_in_name() {
        let mut area = area();
        let err = area.add_file("docs/readme.md", None).expect_err("slash");
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_add_rejects_missing_parent() {
        let mut area = area();
        let ghost = RecordId::new("ghost");
        let err = area.add_file("x.md", Some(&ghost)).expect_err("no parent");
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[test]
    fn test_add_rejects_file_parent() {
        let mut area = area();
        let readme = area.add_file("Readme.md", None).expect("add file");
        let err = area
            .add_file("x.md", Some(&readme.id))
            .expect_err("file parent");
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_add_rejects_duplicate_path() {
        let mut area = area();
        area.add_file("Readme.md", None).expect("add file");
        let err = area.add_file("Readme.md", None).expect_err("duplicate");
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[test]
    fn test_record_limit_enforced() {
        let limits = StagingConfig {
            max_records: 2,
            ..StagingConfig::default()
        };
        let mut area = StagingArea::new(limits);
        area.add_file("a.md", None).expect("first");
        area.add_file("b.md", None).expect("second");
        let err = area.add_file("c.md", None).expect_err("over limit");
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_rename_rewrites_descendant_paths() {
        let mut area = area();
        let docs = area.add_folder("docs", None).expect("folder");
        let sub = area.add_folder("sub", Some(&docs.id)).expect("subfolder");
        area.add_file("x.md", Some(&sub.id)).expect("file");

        let renamed = area.rename(&docs.id, "guides").expect("rename");
        assert_eq!(renamed.path, "guides");

        let paths: Vec<&str> = area.records().iter().map(|r| r.path.as_str()).collect();
        assert!(paths.contains(&"guides/sub"));
        assert!(paths.contains(&"guides/sub/x.md"));
    }

    #[test]
    fn test_rename_does_not_touch_siblings_with_shared_prefix() {
        let mut area = area();
        let docs = area.add_folder("docs", None).expect("folder");
        area.add_folder("docs-old", None).expect("sibling");
        area.rename(&docs.id, "guides").expect("rename");

        let paths: Vec<&str> = area.records().iter().map(|r| r.path.as_str()).collect();
        assert!(paths.contains(&"docs-old"));
    }

    #[test]
    fn test_rename_conflict() {
        let mut area = area();
        let a = area.add_file("a.md", None).expect("a");
        area.add_file("b.md", None).expect("b");
        let err = area.rename(&a.id, "b.md").expect_err("conflict");
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[test]
    fn test_rename_to_same_name_is_allowed() {
        let mut area = area();
        let a = area.add_file("a.md", None).expect("a");
        let renamed = area.rename(&a.id, "a.md").expect("noop rename");
        assert_eq!(renamed.path, "a.md");
    }

    #[test]
    fn test_rename_missing_record() {
        let mut area = area();
        let err = area
            .rename(&RecordId::new("ghost"), "x")
            .expect_err("missing");
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[test]
    fn test_remove_cascades_to_descendants() {
        let mut area = area();
        let docs = area.add_folder("docs", None).expect("folder");
        let sub = area.add_folder("sub", Some(&docs.id)).expect("subfolder");
        area.add_file("x.md", Some(&sub.id)).expect("file");
        area.add_file("Readme.md", None).expect("root file");

        assert_eq!(area.descendant_count(&docs.id), 2);
        let removed = area.remove(&docs.id).expect("remove");
        assert_eq!(removed, 3);
        assert_eq!(area.len(), 1);
        assert_eq!(area.records()[0].path, "Readme.md");
    }

    #[test]
    fn test_remove_leaf() {
        let mut area = area();
        let readme = area.add_file("Readme.md", None).expect("file");
        let removed = area.remove(&readme.id).expect("remove");
        assert_eq!(removed, 1);
        assert!(area.is_empty());
    }

    #[test]
    fn test_remove_missing_record() {
        let mut area = area();
        let err = area.remove(&RecordId::new("ghost")).expect_err("missing");
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[test]
    fn test_tree_reflects_mutations() {
        let mut area = area();
        let docs = area.add_folder("docs", None).expect("folder");
        area.add_file("readme.md", Some(&docs.id)).expect("file");

        let tree = area.tree();
        assert_eq!(tree.roots.len(), 1);
        assert_eq!(tree.total_records, 2);

        area.remove(&docs.id).expect("remove");
        assert!(area.tree().is_empty());
    }
}
