//! The set of changed files collected for a scan.

use indexmap::IndexMap;

/// An ordered mapping from relative file path to unified diff text.
///
/// Insertion order reflects discovery order: diffs committed since the
/// divergence point come first, uncommitted working-tree diffs after.
/// The first insert for a path wins — committed entries are never
/// overwritten by a later uncommitted pass for the same file.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    entries: IndexMap<String, String>,
}

impl ChangeSet {
    /// Create an empty change set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a diff for `path` unless one is already recorded.
    ///
    /// Returns `true` if the entry was inserted.
    pub fn insert(&mut self, path: impl Into<String>, diff: impl Into<String>) -> bool {
        let path = path.into();
        if self.entries.contains_key(&path) {
            return false;
        }
        self.entries.insert(path, diff.into());
        true
    }

    /// Returns `true` if a diff is recorded for `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// The diff text recorded for `path`, if any.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    /// Number of files in the set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no files were collected.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// File paths in discovery order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `(path, diff)` pairs in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(p, d)| (p.as_str(), d.as_str()))
    }
}
