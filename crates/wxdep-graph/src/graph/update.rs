//! Incremental graph update.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use path_clean::PathClean;
use rustc_hash::FxHashSet;

use super::DependencyGraph;
use crate::analysis::{AnalysisContext, AnalyzerTable, ExtensionMap, FileType};
use crate::error::Result;
use crate::options::{PluginOptions, SystemInfo};
use crate::runtime::Runtime;

/// What one [`GraphEngine::update`] call did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    /// Files (re-)analyzed, in processing order
    pub analyzed: Vec<PathBuf>,
    /// Records removed because the file no longer exists
    pub removed: Vec<PathBuf>,
    /// Known, unchanged files whose analysis was reused
    pub reused: usize,
}

/// Owns the dependency graph and keeps it current across update calls.
#[derive(Debug)]
pub struct GraphEngine {
    graph: DependencyGraph,
    analyzers: AnalyzerTable,
    extensions: ExtensionMap,
    system: SystemInfo,
    options: PluginOptions,
    runtime: Arc<dyn Runtime>,
}

impl GraphEngine {
    /// Create an engine with an empty graph anchored at the app manifest.
    ///
    /// A relative source root or cache directory is resolved against the
    /// runtime's working directory, so import paths are always computed
    /// between absolute paths.
    ///
    /// # Errors
    ///
    /// Fails when the working directory cannot be read.
    pub fn new(
        mut system: SystemInfo,
        mut options: PluginOptions,
        runtime: Arc<dyn Runtime>,
    ) -> Result<Self> {
        if system.src_dir.is_relative() || options.settings.cache_dir.is_relative() {
            let cwd = runtime.get_cwd()?;
            system.src_dir = cwd.join(&system.src_dir).clean();
            options.settings.cache_dir = cwd.join(&options.settings.cache_dir).clean();
        }

        let root = system.src_dir.join(&options.settings.app_manifest).clean();
        let extensions = ExtensionMap::new(&options.additional_wxss_suffixes);

        Ok(Self {
            graph: DependencyGraph::new(root),
            analyzers: AnalyzerTable::new(),
            extensions,
            system,
            options,
            runtime,
        })
    }

    pub fn root(&self) -> &Path {
        self.graph.root()
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Exclusive access for the synthesizer's orphan sweep.
    pub fn graph_mut(&mut self) -> &mut DependencyGraph {
        &mut self.graph
    }

    pub fn extensions(&self) -> &ExtensionMap {
        &self.extensions
    }

    pub fn system(&self) -> &SystemInfo {
        &self.system
    }

    /// Re-analyze `changed` and everything newly reachable from it.
    ///
    /// Works on a copy of the graph; the copy replaces the current graph only
    /// when the whole call succeeds.
    ///
    /// # Errors
    ///
    /// Any analyzer error aborts the call: an incomplete page or component,
    /// an unresolvable script reference, an invalid manifest or an I/O
    /// failure.
    pub fn update<I, P>(&mut self, changed: I) -> Result<UpdateSummary>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let changed: BTreeSet<PathBuf> = changed
            .into_iter()
            .map(|path| path.as_ref().clean())
            .collect();

        let mut next = self.graph.clone();
        let mut summary = UpdateSummary::default();
        let mut processed: FxHashSet<PathBuf> = FxHashSet::default();
        let mut work_list: Vec<PathBuf> = changed.iter().cloned().collect();

        let ctx = AnalysisContext {
            system: &self.system,
            options: &self.options,
            extensions: &self.extensions,
            runtime: self.runtime.as_ref(),
        };

        while let Some(path) = work_list.pop() {
            if !self.runtime.is_file(&path) {
                if next.remove(&path).is_some() {
                    tracing::debug!(path = %path.display(), "file gone, record removed");
                    summary.removed.push(path);
                }
                continue;
            }

            if next.contains(&path) && !changed.contains(&path) {
                summary.reused += 1;
                continue;
            }

            if !processed.insert(path.clone()) {
                continue;
            }

            let additional = if path == next.root() {
                Some(self.root_dependencies())
            } else {
                None
            };

            let record = self.analyzers.analyze(&path, &ctx, additional.as_ref())?;
            work_list.extend(record.dependencies.iter().cloned());
            next.insert(record);
            summary.analyzed.push(path);
        }

        self.graph = next;

        tracing::info!(
            changed = changed.len(),
            analyzed = summary.analyzed.len(),
            removed = summary.removed.len(),
            records = self.graph.len(),
            "dependency graph updated"
        );
        Ok(summary)
    }

    /// Implicit dependencies of the root manifest: the app script and
    /// stylesheet plus the app-level files that exist.
    fn root_dependencies(&self) -> BTreeSet<PathBuf> {
        let runtime = self.runtime.as_ref();
        let settings = &self.options.settings;
        let prefix = settings.app_prefix(&self.system.src_dir);

        let mut dependencies: BTreeSet<PathBuf> = [FileType::Script, FileType::Stylesheet]
            .into_iter()
            .filter_map(|file_type| self.extensions.find_co_file(&prefix, file_type, runtime))
            .collect();

        for name in &settings.app_level_files {
            let file = self.system.src_dir.join(name).clean();
            if runtime.is_file(&file) {
                dependencies.insert(file);
            }
        }

        dependencies
    }
}
