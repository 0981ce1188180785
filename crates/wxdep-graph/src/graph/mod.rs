//! Dependency graph storage and the incremental engine.
//!
//! [`DependencyGraph`] maps absolute file paths to their [`FileRecord`]. It is
//! a plain owned value: the engine mutates it under exclusive ownership and
//! hands out shared borrows between update cycles only.

mod liveness;
mod update;

pub use liveness::{LivenessView, compute_liveness};
pub use update::{GraphEngine, UpdateSummary};

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::Serialize;

/// Analysis result for one file.
///
/// Replaced wholesale whenever the file is re-analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    /// Absolute path of the analyzed file
    pub absolute_path: PathBuf,
    /// Absolute paths this file references
    pub dependencies: BTreeSet<PathBuf>,
    /// Specifier used by the fake importer to reach this file
    pub import_path: String,
}

impl FileRecord {
    pub fn new(absolute_path: impl Into<PathBuf>, import_path: impl Into<String>) -> Self {
        Self {
            absolute_path: absolute_path.into(),
            dependencies: BTreeSet::new(),
            import_path: import_path.into(),
        }
    }

    pub fn with_dependency(mut self, dependency: impl Into<PathBuf>) -> Self {
        self.dependencies.insert(dependency.into());
        self
    }
}

/// Mapping from absolute path to file record, anchored at the root manifest.
///
/// Cycles are allowed. Dependencies may point at paths that have no record
/// (not analyzed yet, or deleted from disk).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyGraph {
    root: PathBuf,
    records: FxHashMap<PathBuf, FileRecord>,
}

impl DependencyGraph {
    /// Create an empty graph anchored at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            records: FxHashMap::default(),
        }
    }

    /// The root anchor (the app manifest).
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn get(&self, path: &Path) -> Option<&FileRecord> {
        self.records.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.records.contains_key(path)
    }

    /// Insert or replace the record for its path, returning the old one.
    pub fn insert(&mut self, record: FileRecord) -> Option<FileRecord> {
        self.records.insert(record.absolute_path.clone(), record)
    }

    pub fn remove(&mut self, path: &Path) -> Option<FileRecord> {
        self.records.remove(path)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in arbitrary order.
    pub fn records(&self) -> impl Iterator<Item = &FileRecord> {
        self.records.values()
    }

    /// All record paths in sorted order.
    pub fn paths(&self) -> BTreeSet<PathBuf> {
        self.records.keys().cloned().collect()
    }

    /// Files declared by the root manifest.
    ///
    /// They are retained even without inbound references, since they are
    /// roots of their own subtrees.
    pub fn protected(&self) -> BTreeSet<PathBuf> {
        self.records
            .get(&self.root)
            .map(|record| record.dependencies.clone())
            .unwrap_or_default()
    }
}
