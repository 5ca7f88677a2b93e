//! Draft tree reconstruction from the flat record collection.

use std::collections::HashMap;

use tracing::debug;

use reporthub_core::types::RecordId;
use reporthub_entity::record::{FileRecord, FileTree, TreeNode};

/// Rebuilds the nested draft tree from a flat record collection.
///
/// The builder is a pure function of its input: every call produces a fresh,
/// independently owned tree and never mutates the records it is given. It is
/// rerun in full after every staging mutation; there is no incremental mode.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder;

impl TreeBuilder {
    /// Creates a new tree builder.
    pub fn new() -> Self {
        Self
    }

    /// Builds the nested tree for the given flat record collection.
    ///
    /// Re-parenting runs level by level from the deepest path depth up to the
    /// root. A folder's children therefore attach to it before the folder is
    /// itself attached to its own parent. Records whose `parent_id` does not
    /// resolve to a folder in the collection stay at root level; no error is
    /// raised for malformed input.
    pub fn build(&self, records: &[FileRecord]) -> FileTree {
        if records.is_empty() {
            return FileTree::empty();
        }

        // Working set of unattached subtree roots, seeded from folders only.
        // Files enter it during the level passes below.
        let mut working: HashMap<RecordId, TreeNode> = records
            .iter()
            .filter(|r| r.is_folder())
            .map(|r| (r.id.clone(), TreeNode::new(r.clone())))
            .collect();

        // Deepest level across the whole collection. Files with dangling
        // parents can sit deeper than any folder and still must be visited.
        let max_level = records.iter().map(FileRecord::level).max().unwrap_or(0);

        for current_level in (1..=max_level).rev() {
            for record in records.iter().filter(|r| r.level() == current_level) {
                let parent_id = record
                    .parent_id
                    .as_ref()
                    .filter(|p| !p.as_str().is_empty() && **p != record.id);

                match parent_id {
                    Some(pid) if working.contains_key(pid) => {
                        // Prefer the working-set entry over a fresh node: a
                        // folder may already carry children from a deeper pass.
                        let node = working
                            .remove(&record.id)
                            .unwrap_or_else(|| TreeNode::new(record.clone()));
                        if let Some(parent) = working.get_mut(pid) {
                            parent.children.push(node);
                        }
                    }
                    _ => {
                        // Unresolvable parent: the record stays at root level,
                        // unless an entry for its id is already present.
                        if !working.contains_key(&record.id) {
                            working.insert(record.id.clone(), TreeNode::new(record.clone()));
                        }
                    }
                }
            }
        }

        let roots: Vec<TreeNode> = working.into_values().collect();
        let total_records = roots.iter().map(TreeNode::subtree_size).sum();

        debug!(roots = roots.len(), total_records, "Draft tree rebuilt");

        FileTree {
            roots,
            total_records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use reporthub_entity::record::RecordKind;

    fn record(id: &str, path: &str, parent: Option<&str>, kind: RecordKind) -> FileRecord {
        let now = Utc::now();
        FileRecord {
            id: RecordId::new(id),
            parent_id: parent.map(RecordId::new),
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            path: path.to_string(),
            kind,
            created_at: now,
            updated_at: now,
        }
    }

    fn folder(id: &str, path: &str, parent: Option<&str>) -> FileRecord {
        record(id, path, parent, RecordKind::Folder)
    }

    fn file(id: &str, path: &str, parent: Option<&str>) -> FileRecord {
        record(id, path, parent, RecordKind::from_file_name(path))
    }

    fn find<'a>(nodes: &'a [TreeNode], id: &str) -> Option<&'a TreeNode> {
        for node in nodes {
            if node.record.id.as_str() == id {
                return Some(node);
            }
            if let Some(found) = find(&node.children, id) {
                return Some(found);
            }
        }
        None
    }

    fn collect_ids(nodes: &[TreeNode], out: &mut Vec<String>) {
        for node in nodes {
            out.push(node.record.id.as_str().to_string());
            collect_ids(&node.children, out);
        }
    }

    #[test]
    fn test_empty_input() {
        let tree = TreeBuilder::new().build(&[]);
        assert!(tree.is_empty());
        assert_eq!(tree.total_records, 0);
    }

    #[test]
    fn test_single_root_file() {
        let records = vec![file("r", "Readme.md", None)];
        let tree = TreeBuilder::new().build(&records);

        assert_eq!(tree.roots.len(), 1);
        assert_eq!(tree.roots[0].record.id.as_str(), "r");
        assert!(tree.roots[0].children.is_empty());
    }

    #[test]
    fn test_file_nested_under_folder() {
        let records = vec![
            folder("f1", "docs", None),
            file("f2", "docs/readme.md", Some("f1")),
        ];
        let tree = TreeBuilder::new().build(&records);

        assert_eq!(tree.roots.len(), 1);
        let root = &tree.roots[0];
        assert_eq!(root.record.id.as_str(), "f1");
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].record.id.as_str(), "f2");
    }

    #[test]
    fn test_two_level_nesting() {
        let records = vec![
            folder("f1", "docs", None),
            folder("f2", "docs/sub", Some("f1")),
            file("f3", "docs/sub/x.md", Some("f2")),
        ];
        let tree = TreeBuilder::new().build(&records);

        assert_eq!(tree.roots.len(), 1);
        let a = &tree.roots[0];
        assert_eq!(a.record.id.as_str(), "f1");
        assert_eq!(a.children.len(), 1);
        let b = &a.children[0];
        assert_eq!(b.record.id.as_str(), "f2");
        assert_eq!(b.children.len(), 1);
        assert_eq!(b.children[0].record.id.as_str(), "f3");
    }

    #[test]
    fn test_dangling_parent_falls_back_to_root() {
        let records = vec![file("f1", "x.md", Some("missing"))];
        let tree = TreeBuilder::new().build(&records);

        assert_eq!(tree.roots.len(), 1);
        assert_eq!(tree.roots[0].record.id.as_str(), "f1");
    }

    #[test]
    fn test_completeness() {
        let records = vec![
            folder("a", "docs", None),
            folder("b", "docs/sub", Some("a")),
            file("c", "docs/sub/x.md", Some("b")),
            file("d", "docs/notes.txt", Some("a")),
            file("e", "Readme.md", None),
            file("f", "lost/deep/orphan.csv", Some("gone")),
        ];
        let tree = TreeBuilder::new().build(&records);

        let mut ids = Vec::new();
        collect_ids(&tree.roots, &mut ids);
        ids.sort();
        assert_eq!(ids, vec!["a", "b", "c", "d", "e", "f"]);
        assert_eq!(tree.total_records, 6);
    }

    #[test]
    fn test_parent_correctness() {
        let records = vec![
            folder("a", "docs", None),
            folder("b", "docs/sub", Some("a")),
            file("c", "docs/sub/x.md", Some("b")),
            file("d", "docs/notes.txt", Some("a")),
        ];
        let tree = TreeBuilder::new().build(&records);

        for (child, parent) in [("b", "a"), ("c", "b"), ("d", "a")] {
            let parent_node = find(&tree.roots, parent).expect("parent in tree");
            assert!(
                parent_node
                    .children
                    .iter()
                    .any(|n| n.record.id.as_str() == child),
                "{child} not under {parent}"
            );
        }
    }

    #[test]
    fn test_idempotence() {
        let records = vec![
            folder("a", "docs", None),
            folder("b", "docs/sub", Some("a")),
            file("c", "docs/sub/x.md", Some("b")),
            file("d", "orphan.md", Some("zzz")),
        ];
        let builder = TreeBuilder::new();
        let first = builder.build(&records);
        let second = builder.build(&records);

        let edges = |tree: &FileTree| {
            let mut out = Vec::new();
            fn walk(nodes: &[TreeNode], parent: Option<&str>, out: &mut Vec<(String, String)>) {
                for node in nodes {
                    out.push((
                        parent.unwrap_or("<root>").to_string(),
                        node.record.id.as_str().to_string(),
                    ));
                    walk(&node.children, Some(node.record.id.as_str()), out);
                }
            }
            walk(&tree.roots, None, &mut out);
            out.sort();
            out
        };

        assert_eq!(edges(&first), edges(&second));
        assert_eq!(first.total_records, second.total_records);
    }

    #[test]
    fn test_childless_folder_is_valid_leaf() {
        let records = vec![folder("a", "docs", None), folder("b", "data", None)];
        let tree = TreeBuilder::new().build(&records);

        assert_eq!(tree.roots.len(), 2);
        assert!(tree.roots.iter().all(|n| n.children.is_empty()));
    }

    #[test]
    fn test_deep_parentless_file_is_not_dropped() {
        // No folders at all, path deeper than two segments.
        let records = vec![file("x", "a/b/c.md", Some("gone"))];
        let tree = TreeBuilder::new().build(&records);

        assert_eq!(tree.roots.len(), 1);
        assert_eq!(tree.roots[0].record.id.as_str(), "x");
        assert_eq!(tree.roots[0].level, 3);
    }

    #[test]
    fn test_ancestor_folders_nest_instead_of_flattening() {
        let records = vec![
            folder("a", "docs", None),
            folder("b", "docs/sub", Some("a")),
            folder("c", "docs/sub/deep", Some("b")),
        ];
        let tree = TreeBuilder::new().build(&records);

        assert_eq!(tree.roots.len(), 1);
        let deep = find(&tree.roots, "c").expect("deep folder present");
        assert!(deep.children.is_empty());
        assert_eq!(tree.roots[0].children.len(), 1);
        assert_eq!(tree.roots[0].children[0].children.len(), 1);
    }

    #[test]
    fn test_orphan_folder_keeps_accumulated_children() {
        // The folder's own parent is dangling, but its child must still be
        // attached to it before it settles at root level.
        let records = vec![
            folder("b", "x/y", Some("gone")),
            file("c", "x/y/f.md", Some("b")),
        ];
        let tree = TreeBuilder::new().build(&records);

        assert_eq!(tree.roots.len(), 1);
        let root = &tree.roots[0];
        assert_eq!(root.record.id.as_str(), "b");
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].record.id.as_str(), "c");
    }

    #[test]
    fn test_self_referential_parent_degrades_to_root() {
        let records = vec![folder("a", "docs", Some("a"))];
        let tree = TreeBuilder::new().build(&records);

        assert_eq!(tree.roots.len(), 1);
        assert_eq!(tree.roots[0].record.id.as_str(), "a");
    }

    #[test]
    fn test_input_collection_untouched() {
        let records = vec![
            folder("a", "docs", None),
            file("b", "docs/readme.md", Some("a")),
        ];
        let snapshot: Vec<String> = records.iter().map(|r| r.path.clone()).collect();
        let _ = TreeBuilder::new().build(&records);

        let after: Vec<String> = records.iter().map(|r| r.path.clone()).collect();
        assert_eq!(snapshot, after);
    }
}
