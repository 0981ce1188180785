//! Fake-entry synthesis.
//!
//! The host bundler emits only what its entry reaches, while the target
//! platform needs every page and component file emitted on its own. The
//! synthesizer writes a single script that force-imports every live file,
//! and touches files that just became live so the host re-emits them even
//! when its cache says they are unchanged.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::graph::{DependencyGraph, compute_liveness};
use crate::runtime::Runtime;

/// Result of one synthesis pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Synthesis {
    /// Full content written to the fake importer
    pub content: String,
    /// Live files with a record, in import order
    pub imported: BTreeSet<PathBuf>,
    /// Newly live files that were rewritten in place
    pub refreshed: Vec<PathBuf>,
    /// Records deleted by the orphan sweep
    pub dropped: Vec<PathBuf>,
}

/// Writes the fake importer and remembers what it imported last time.
#[derive(Debug)]
pub struct FakeEntrySynthesizer {
    importer_path: PathBuf,
    previous: BTreeSet<PathBuf>,
}

impl FakeEntrySynthesizer {
    pub fn new(importer_path: impl Into<PathBuf>) -> Self {
        Self {
            importer_path: importer_path.into(),
            previous: BTreeSet::new(),
        }
    }

    pub fn importer_path(&self) -> &Path {
        &self.importer_path
    }

    /// Files imported by the last successful pass.
    pub fn previous(&self) -> &BTreeSet<PathBuf> {
        &self.previous
    }

    /// Sweep orphans from `graph`, rewrite the fake importer and refresh
    /// newly live files.
    ///
    /// The graph and the remembered import set change only when every write
    /// succeeded.
    pub fn synthesize(
        &mut self,
        graph: &mut DependencyGraph,
        runtime: &dyn Runtime,
    ) -> Result<Synthesis> {
        let mut swept = graph.clone();
        let dropped = sweep_orphans(&mut swept);

        let live = compute_liveness(&swept).live();
        let imported: BTreeSet<PathBuf> = live
            .into_iter()
            .filter(|path| swept.contains(path))
            .collect();

        let content = render(&swept, &imported);
        runtime.write_file(&self.importer_path, content.as_bytes())?;

        let mut refreshed = Vec::new();
        for path in imported.difference(&self.previous) {
            refresh(path, runtime)?;
            refreshed.push(path.clone());
        }

        tracing::info!(
            imported = imported.len(),
            refreshed = refreshed.len(),
            dropped = dropped.len(),
            "fake importer written"
        );

        *graph = swept;
        self.previous = imported.clone();

        Ok(Synthesis {
            content,
            imported,
            refreshed,
            dropped,
        })
    }
}

/// Delete dead records until none remain, so orphans of orphans go in the
/// same pass.
pub fn sweep_orphans(graph: &mut DependencyGraph) -> Vec<PathBuf> {
    let mut dropped = Vec::new();

    loop {
        let dead: Vec<PathBuf> = compute_liveness(graph)
            .dead()
            .into_iter()
            .filter(|path| graph.contains(path))
            .collect();
        if dead.is_empty() {
            break;
        }

        for path in dead {
            tracing::debug!(path = %path.display(), "dropping unreferenced file");
            graph.remove(&path);
            dropped.push(path);
        }
    }

    dropped
}

/// Render the fake importer: a binding and a no-op call per imported file.
///
/// The reassign-and-call keeps each binding observably used so the host
/// cannot tree-shake the import away.
pub fn render(graph: &DependencyGraph, imported: &BTreeSet<PathBuf>) -> String {
    imported
        .iter()
        .filter_map(|path| graph.get(path))
        .enumerate()
        .map(|(index, record)| {
            format!(
                "const file_{index} = require('{}');\n\
                 let fake_{index} = file_{index};fake_{index}=()=>{{}};fake_{index}();\n",
                record.import_path
            )
        })
        .collect()
}

/// Rewrite a file with its own bytes so watchers see it as modified.
fn refresh(path: &Path, runtime: &dyn Runtime) -> Result<()> {
    let bytes = runtime.read_file(path)?;
    runtime.write_file(path, &bytes)?;
    tracing::debug!(path = %path.display(), "refreshed newly live file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::FileRecord;
    use crate::runtime::test_utils::MemoryRuntime;

    const IMPORTER: &str = "/project/.wxdep/fake_importer.js";

    fn sample_graph() -> DependencyGraph {
        let mut graph = DependencyGraph::new("/src/app.json");
        graph.insert(FileRecord::new("/src/app.json", "../src/app.json").with_dependency("/src/app.js"));
        graph.insert(FileRecord::new("/src/app.js", "../src/app"));
        graph
    }

    #[test]
    fn render_emits_binding_and_no_op_call() {
        let graph = sample_graph();
        let imported = graph.paths();

        assert_eq!(
            render(&graph, &imported),
            "const file_0 = require('../src/app');\n\
             let fake_0 = file_0;fake_0=()=>{};fake_0();\n\
             const file_1 = require('../src/app.json');\n\
             let fake_1 = file_1;fake_1=()=>{};fake_1();\n"
        );
    }

    #[test]
    fn render_skips_paths_without_record() {
        let graph = sample_graph();
        let imported = BTreeSet::from([PathBuf::from("/src/gone.js")]);

        assert_eq!(render(&graph, &imported), "");
    }

    #[test]
    fn first_pass_refreshes_everything_once() {
        let runtime = MemoryRuntime::new("/project")
            .with_file("/src/app.json", "{}")
            .with_file("/src/app.js", "App({})");
        let mut graph = sample_graph();
        let mut synthesizer = FakeEntrySynthesizer::new(IMPORTER);

        let first = synthesizer.synthesize(&mut graph, &runtime).unwrap();
        assert_eq!(first.refreshed.len(), 2);
        assert_eq!(runtime.content(Path::new("/src/app.js")).unwrap(), b"App({})");

        let second = synthesizer.synthesize(&mut graph, &runtime).unwrap();
        assert!(second.refreshed.is_empty());
        assert_eq!(first.content, second.content);
        assert_eq!(runtime.write_count(Path::new("/src/app.js")), 1);
        assert_eq!(runtime.write_count(Path::new(IMPORTER)), 2);
    }

    #[test]
    fn sweep_collects_orphan_chains() {
        let mut graph = sample_graph();
        graph.insert(FileRecord::new("/src/a.js", "a").with_dependency("/src/b.js"));
        graph.insert(FileRecord::new("/src/b.js", "b").with_dependency("/src/c.js"));
        graph.insert(FileRecord::new("/src/c.js", "c"));

        let dropped = sweep_orphans(&mut graph);

        assert_eq!(
            dropped,
            vec![
                PathBuf::from("/src/a.js"),
                PathBuf::from("/src/b.js"),
                PathBuf::from("/src/c.js"),
            ]
        );
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn dangling_live_path_is_not_imported() {
        let runtime = MemoryRuntime::new("/project").with_file("/src/app.json", "{}");
        let mut graph = DependencyGraph::new("/src/app.json");
        graph.insert(FileRecord::new("/src/app.json", "../src/app.json").with_dependency("/src/gone.js"));
        let mut synthesizer = FakeEntrySynthesizer::new(IMPORTER);

        let synthesis = synthesizer.synthesize(&mut graph, &runtime).unwrap();

        let imported: Vec<_> = synthesis.imported.into_iter().collect();
        assert_eq!(imported, vec![PathBuf::from("/src/app.json")]);
    }

    #[test]
    fn failed_refresh_keeps_graph_and_previous_set() {
        // app.js has a record but no file, so the refresh read fails.
        let runtime = MemoryRuntime::new("/project").with_file("/src/app.json", "{}");
        let mut graph = sample_graph();
        graph.insert(FileRecord::new("/src/orphan.js", "orphan"));
        let mut synthesizer = FakeEntrySynthesizer::new(IMPORTER);

        assert!(synthesizer.synthesize(&mut graph, &runtime).is_err());
        assert!(graph.contains(Path::new("/src/orphan.js")));
        assert!(synthesizer.previous().is_empty());
    }
}
