//! Slash-separated path helpers.
//!
//! Staged record paths are relative, slash-separated, and unique within a
//! draft (`docs`, `docs/readme.md`). The helpers here are the single
//! definition of path math shared by the staging service and the tree
//! builder: segment counting drives the builder's level passes, and the
//! join/rename/prefix functions keep mutation cascades consistent.

/// Count the non-empty slash-separated segments of `path`.
///
/// Empty segments are ignored, so `docs/sub` and `/docs/sub` both count 2.
pub fn segment_count(path: &str) -> i32 {
    path.split('/').filter(|s| !s.is_empty()).count() as i32
}

/// Join a parent path and a child name.
pub fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// Replace the last segment of `path` with `new_name`.
pub fn rename_last_segment(path: &str, new_name: &str) -> String {
    match path.rfind('/') {
        Some(idx) => format!("{}/{}", &path[..idx], new_name),
        None => new_name.to_string(),
    }
}

/// Rewrite a path inside the `old_prefix` subtree to live under `new_prefix`.
///
/// Returns `None` when `path` is not a strict descendant of `old_prefix`.
pub fn replace_prefix(path: &str, old_prefix: &str, new_prefix: &str) -> Option<String> {
    let rest = path.strip_prefix(old_prefix)?;
    let rest = rest.strip_prefix('/')?;
    Some(format!("{new_prefix}/{rest}"))
}
