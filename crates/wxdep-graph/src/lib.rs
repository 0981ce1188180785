//! # wxdep-graph
//!
//! Incremental dependency tracking for mini-program source trees.
//!
//! A mini-program is a tree of pages and components, each made of four
//! co-located files (manifest, script, stylesheet, markup). The platform wants
//! every one of those files emitted on its own, while a bundler only emits
//! what its entry reaches. This crate bridges the two: it discovers references
//! between files with lightweight regex scanning, keeps a dependency graph
//! current across rebuilds, and writes a fake entry that force-imports every
//! live file.
//!
//! ## Architecture
//!
//! ```text
//! changed paths ──▶ GraphEngine::update ──▶ DependencyGraph
//!                        │                        │
//!                        ▼                        ▼
//!                  AnalyzerTable          compute_liveness
//!          (script/manifest/markup/          │
//!                stylesheet)                 ▼
//!                                  FakeEntrySynthesizer ──▶ fake_importer.js
//! ```
//!
//! - [`GraphEngine`] owns the graph and re-analyzes only what changed, plus
//!   files it has never seen.
//! - [`compute_liveness`] counts inbound references; the root manifest and
//!   the files it declares are floored at one.
//! - [`FakeEntrySynthesizer`] sweeps orphans, rewrites the fake importer and
//!   touches files that just became live.
//! - [`MiniProgramPlugin`] drives both from host lifecycle hooks.
//!
//! All file-system access goes through the [`Runtime`] trait.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wxdep_graph::{GraphEngine, NativeRuntime, PluginOptions, SystemInfo};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let system = SystemInfo::new("/project/src", Vec::new());
//! let options = PluginOptions::new("/project/dist");
//! let mut engine = GraphEngine::new(system, options, Arc::new(NativeRuntime::new()))?;
//!
//! let root = engine.root().to_path_buf();
//! let summary = engine.update([root])?;
//! println!("analyzed {} files", summary.analyzed.len());
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod error;
pub mod fake_entry;
pub mod graph;
pub mod options;
pub mod paths;
pub mod plugin;
pub mod runtime;
pub mod settings;

#[cfg(test)]
mod tests;

pub use analysis::{AnalysisContext, AnalyzerTable, ExtensionMap, FileAnalyzer, FileType};
pub use error::{ConfigurationError, Error, MissingFileError, Result};
pub use fake_entry::{FakeEntrySynthesizer, Synthesis};
pub use graph::{
    DependencyGraph, FileRecord, GraphEngine, LivenessView, UpdateSummary, compute_liveness,
};
pub use options::{AliasInfo, BuildContext, PluginOptions, SystemInfo};
pub use plugin::{
    BuildPlugin, CycleReport, EmittedAsset, EntryPoint, MiniProgramPlugin, OutputSettings,
};
pub use runtime::{NativeRuntime, Runtime, RuntimeError, RuntimeResult};
pub use settings::Settings;

#[cfg(any(test, feature = "test-utils"))]
pub use runtime::test_utils::MemoryRuntime;
