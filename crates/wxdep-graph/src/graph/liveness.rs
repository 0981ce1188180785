//! Reference-count liveness.
//!
//! Recomputed from scratch every cycle. A path is live when some record lists
//! it as a dependency, or when it is the root anchor or a protected file
//! (both floored at one).

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use super::DependencyGraph;

/// Reference counts over one graph snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LivenessView {
    counts: BTreeMap<PathBuf, usize>,
}

impl LivenessView {
    /// Reference count of `path`, zero when it was never counted.
    pub fn count(&self, path: &Path) -> usize {
        self.counts.get(path).copied().unwrap_or(0)
    }

    pub fn is_live(&self, path: &Path) -> bool {
        self.count(path) > 0
    }

    /// Every counted path with its count.
    pub fn counts(&self) -> &BTreeMap<PathBuf, usize> {
        &self.counts
    }

    /// Paths with a positive count.
    pub fn live(&self) -> BTreeSet<PathBuf> {
        self.counts
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(path, _)| path.clone())
            .collect()
    }

    /// Counted paths with a zero count.
    pub fn dead(&self) -> BTreeSet<PathBuf> {
        self.counts
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(path, _)| path.clone())
            .collect()
    }
}

/// Count inbound references for every path in `graph`.
///
/// Every record key starts at zero, except the root anchor and the protected
/// files, which start at one. Each dependency listed by any record adds one,
/// including dependencies that have no record of their own.
pub fn compute_liveness(graph: &DependencyGraph) -> LivenessView {
    let mut counts: BTreeMap<PathBuf, usize> = BTreeMap::new();

    for record in graph.records() {
        counts.entry(record.absolute_path.clone()).or_insert(0);
    }

    counts.insert(graph.root().to_path_buf(), 1);
    for path in graph.protected() {
        counts.insert(path, 1);
    }

    for record in graph.records() {
        for dependency in &record.dependencies {
            *counts.entry(dependency.clone()).or_insert(0) += 1;
        }
    }

    LivenessView { counts }
}
