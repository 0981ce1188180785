//! Bundler adapter.
//!
//! [`BuildPlugin`] is the lifecycle a host build tool drives: one
//! `build_start`, then a `watch_run` per batch of file changes, with `emit`
//! after each cycle. [`MiniProgramPlugin`] wires those hooks to the graph
//! engine and the fake-entry synthesizer.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use path_clean::PathClean;
use serde::Serialize;

use crate::analysis::{ExtensionMap, FileType};
use crate::error::{ConfigurationError, Result};
use crate::fake_entry::{FakeEntrySynthesizer, Synthesis};
use crate::graph::{DependencyGraph, GraphEngine, UpdateSummary};
use crate::options::{BuildContext, PluginOptions, SystemInfo};
use crate::paths::{relative_path, to_slash};
use crate::runtime::Runtime;

/// Entry the host must build: the fake importer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryPoint {
    /// Chunk name, relative to the output directory
    pub name: String,
    /// Absolute path of the fake importer
    pub path: PathBuf,
}

/// Output settings the host must use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputSettings {
    pub filename: String,
    pub path: PathBuf,
}

/// A raw file the host must write to its output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedAsset {
    /// Output key, forward-slash path relative to the source root
    pub key: String,
    pub content: Vec<u8>,
    pub size: usize,
}

/// Outcome of one update-and-synthesize cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub update: UpdateSummary,
    pub synthesis: Synthesis,
    pub duration: Duration,
}

/// Lifecycle hooks consumed from the host build tool.
pub trait BuildPlugin {
    fn name(&self) -> &'static str;

    /// Initial cycle, starting from the root manifest.
    fn build_start(&mut self, context: &BuildContext) -> Result<CycleReport>;

    /// Cycle for a batch of changed files. `None` when nothing relevant
    /// changed.
    fn watch_run(&mut self, changed: &[PathBuf]) -> Result<Option<CycleReport>>;

    /// Assets to register after a cycle.
    fn emit(&self) -> Result<Vec<EmittedAsset>>;
}

#[derive(Debug)]
struct Session {
    engine: GraphEngine,
    synthesizer: FakeEntrySynthesizer,
    /// Changed paths of failed cycles, retried with the next batch
    pending: BTreeSet<PathBuf>,
}

/// Mini-program plugin: keeps every page and component file emitted.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use wxdep_graph::{BuildContext, BuildPlugin, MiniProgramPlugin, NativeRuntime, PluginOptions};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let options = PluginOptions::new("/project/dist");
/// let mut plugin = MiniProgramPlugin::new(options, Arc::new(NativeRuntime::new()))?;
///
/// let report = plugin.build_start(&BuildContext::new("/project/src"))?;
/// println!("{} files imported", report.synthesis.imported.len());
///
/// for asset in plugin.emit()? {
///     println!("{} ({} bytes)", asset.key, asset.size);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MiniProgramPlugin {
    options: PluginOptions,
    output_dir: PathBuf,
    runtime: Arc<dyn Runtime>,
    session: Option<Session>,
}

impl MiniProgramPlugin {
    pub const NAME: &'static str = "wxdep-mini-program";

    /// Validate options and prepare the cache directory.
    ///
    /// Relative output and cache directories are resolved against the
    /// runtime's working directory. The fake importer is created empty.
    ///
    /// # Errors
    ///
    /// `ConfigurationError::MissingOutputDir` when no output directory is set.
    pub fn new(mut options: PluginOptions, runtime: Arc<dyn Runtime>) -> Result<Self> {
        let cwd = runtime.get_cwd()?;
        let output_dir = cwd.join(options.require_output_dir()?).clean();
        options.output_dir = Some(output_dir.clone());
        options.settings.cache_dir = cwd.join(&options.settings.cache_dir).clean();

        let cache_dir = &options.settings.cache_dir;
        if !runtime.exists(cache_dir) {
            runtime.create_dir(cache_dir, true)?;
        }
        runtime.write_file(&options.settings.fake_importer_path(), b"")?;

        tracing::debug!(
            output_dir = %output_dir.display(),
            cache_dir = %cache_dir.display(),
            "plugin environment prepared"
        );

        Ok(Self {
            options,
            output_dir,
            runtime,
            session: None,
        })
    }

    pub fn options(&self) -> &PluginOptions {
        &self.options
    }

    /// Entry map for the host: chunk name to fake importer path.
    pub fn entry(&self) -> EntryPoint {
        let path = self.options.settings.fake_importer_path();
        let name = to_slash(&relative_path(&self.output_dir, &path.with_extension("")));
        EntryPoint { name, path }
    }

    pub fn output(&self) -> OutputSettings {
        OutputSettings {
            filename: "[name].js".to_string(),
            path: self.output_dir.clone(),
        }
    }

    /// Name of the extracted bundler runtime chunk.
    pub fn runtime_chunk_name(&self) -> String {
        let runtime_chunk = self.options.settings.runtime_chunk_path();
        to_slash(&relative_path(&self.output_dir, &runtime_chunk))
    }

    /// Output name for a copied source file, `[path][name].<ext>` relative to
    /// the source root.
    pub fn relative_output_name(&self, file: &Path, ext: &str) -> Result<String> {
        let src_dir = &self.session()?.engine.system().src_dir;
        Ok(relative_output_name(src_dir, file, ext))
    }

    /// Current graph, once the build has started.
    pub fn graph(&self) -> Option<&DependencyGraph> {
        self.session.as_ref().map(|session| session.engine.graph())
    }

    /// Files imported by the last successful cycle.
    pub fn live_files(&self) -> BTreeSet<PathBuf> {
        self.session
            .as_ref()
            .map(|session| session.synthesizer.previous().clone())
            .unwrap_or_default()
    }

    fn session(&self) -> Result<&Session> {
        self.session
            .as_ref()
            .ok_or_else(|| ConfigurationError::MissingSourceRoot.into())
    }

    fn run_cycle(session: &mut Session, runtime: &dyn Runtime, changed: &[PathBuf]) -> Result<CycleReport> {
        let started = Instant::now();
        let snapshot = session.engine.graph().clone();

        let update = session.engine.update(changed)?;
        let synthesis = match session
            .synthesizer
            .synthesize(session.engine.graph_mut(), runtime)
        {
            Ok(synthesis) => synthesis,
            Err(err) => {
                *session.engine.graph_mut() = snapshot;
                return Err(err);
            }
        };

        Ok(CycleReport {
            update,
            synthesis,
            duration: started.elapsed(),
        })
    }
}

impl BuildPlugin for MiniProgramPlugin {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn build_start(&mut self, context: &BuildContext) -> Result<CycleReport> {
        let system = SystemInfo::from_context(context)?;
        let engine = GraphEngine::new(system, self.options.clone(), self.runtime.clone())?;
        let synthesizer = FakeEntrySynthesizer::new(self.options.settings.fake_importer_path());
        let mut session = Session {
            engine,
            synthesizer,
            pending: BTreeSet::new(),
        };

        let root = session.engine.root().to_path_buf();
        let report = Self::run_cycle(&mut session, self.runtime.as_ref(), &[root])?;
        self.session = Some(session);
        Ok(report)
    }

    fn watch_run(&mut self, changed: &[PathBuf]) -> Result<Option<CycleReport>> {
        let importer = self.options.settings.fake_importer_path();
        let session = self
            .session
            .as_mut()
            .ok_or(ConfigurationError::MissingSourceRoot)?;

        let mut batch = std::mem::take(&mut session.pending);
        batch.extend(
            changed
                .iter()
                .filter(|path| path.as_path() != importer)
                .cloned(),
        );
        if batch.is_empty() {
            return Ok(None);
        }

        let paths: Vec<PathBuf> = batch.iter().cloned().collect();
        match Self::run_cycle(session, self.runtime.as_ref(), &paths) {
            Ok(report) => Ok(Some(report)),
            Err(err) => {
                tracing::debug!(pending = batch.len(), "cycle failed, keeping changed paths");
                session.pending = batch;
                Err(err)
            }
        }
    }

    fn emit(&self) -> Result<Vec<EmittedAsset>> {
        let Some(session) = &self.session else {
            return Ok(Vec::new());
        };
        let src_dir = &session.engine.system().src_dir;
        let extensions: &ExtensionMap = session.engine.extensions();

        let mut assets = Vec::new();
        for path in session.synthesizer.previous() {
            if extensions.belong_file_type(path) != Some(FileType::Manifest) {
                continue;
            }
            let content = self.runtime.read_file(path)?;
            assets.push(EmittedAsset {
                key: to_slash(&relative_path(src_dir, path)),
                size: content.len(),
                content,
            });
        }
        Ok(assets)
    }
}

/// `[path][name].<ext>` of `file` relative to `src_dir`.
pub fn relative_output_name(src_dir: &Path, file: &Path, ext: &str) -> String {
    let relative = relative_path(src_dir, file);
    let stem = relative
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    match relative.parent().map(to_slash).filter(|dir| !dir.is_empty()) {
        Some(dir) => format!("{dir}/{stem}.{ext}"),
        None => format!("{stem}.{ext}"),
    }
}
