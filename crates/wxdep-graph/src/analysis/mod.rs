//! File analyzers.
//!
//! Each analyzer extracts raw reference strings from one file type with
//! lightweight regex scanning (no parsing) and resolves them to absolute paths.
//! The engine talks to them through one contract, [`FileAnalyzer`], and picks
//! the analyzer from a closed [`AnalyzerTable`] keyed by [`FileType`].
//!
//! | Type        | Extensions               | References                          |
//! |-------------|--------------------------|-------------------------------------|
//! | Script      | `js`, `ts`               | `import … from`, `import '…'`, `require()` |
//! | Manifest    | `json`                   | `pages`, `subPackages`, `usingComponents` |
//! | Markup      | `wxml`                   | `<import>`, `<include>`, `<wxs>`    |
//! | Stylesheet  | `wxss` + extra suffixes  | `@import` (native `wxss` only)      |

pub mod extensions;
mod manifest;
mod markup;
pub mod resolver;
mod script;
mod stylesheet;

pub use extensions::{ExtensionMap, PAGE_SEARCH_ORDER};
pub use manifest::{ManifestAnalyzer, ManifestFile, SubPackage};
pub use markup::MarkupAnalyzer;
pub use script::ScriptAnalyzer;
pub use stylesheet::StylesheetAnalyzer;

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::Result;
use crate::graph::FileRecord;
use crate::options::{PluginOptions, SystemInfo};
use crate::paths::{relative_path, to_import_specifier};
use crate::runtime::Runtime;

/// The four file types of a mini-program source tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileType {
    Script,
    Stylesheet,
    Markup,
    Manifest,
}

impl FileType {
    /// All file types, in extension-lookup order.
    pub const ALL: [FileType; 4] = [
        FileType::Script,
        FileType::Manifest,
        FileType::Markup,
        FileType::Stylesheet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Script => "script",
            FileType::Stylesheet => "stylesheet",
            FileType::Markup => "markup",
            FileType::Manifest => "manifest",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything an analyzer may consult while scanning one file.
#[derive(Clone, Copy)]
pub struct AnalysisContext<'a> {
    pub system: &'a SystemInfo,
    pub options: &'a PluginOptions,
    pub extensions: &'a ExtensionMap,
    pub runtime: &'a dyn Runtime,
}

impl<'a> AnalysisContext<'a> {
    /// Import specifier of `path` as seen from the fake importer's directory.
    ///
    /// Scripts drop their extension (`preserve_ext = false`) so the host
    /// resolves `.js`/`.ts` itself; every other type keeps it.
    pub fn import_path(&self, path: &Path, preserve_ext: bool) -> String {
        let target = if preserve_ext {
            path.to_path_buf()
        } else {
            path.with_extension("")
        };
        let relative = relative_path(&self.options.settings.cache_dir, &target);
        to_import_specifier(&relative)
    }

    /// Start a record for `path`, seeded with `additional` dependencies.
    pub fn new_record(
        &self,
        path: &Path,
        preserve_ext: bool,
        additional: Option<&BTreeSet<PathBuf>>,
    ) -> FileRecord {
        FileRecord {
            absolute_path: path.to_path_buf(),
            dependencies: additional.cloned().unwrap_or_default(),
            import_path: self.import_path(path, preserve_ext),
        }
    }
}

/// Analyzer contract shared by all file types.
pub trait FileAnalyzer: Send + Sync {
    /// File type this analyzer handles.
    fn file_type(&self) -> FileType;

    /// Analyze one file and return its fresh dependency record.
    ///
    /// `additional` dependencies are unioned into the result; the engine uses
    /// them for the root manifest's implicit app-level files.
    fn analyze(
        &self,
        path: &Path,
        ctx: &AnalysisContext<'_>,
        additional: Option<&BTreeSet<PathBuf>>,
    ) -> Result<FileRecord>;
}

/// Closed dispatch table, built once per plugin instance.
#[derive(Debug)]
pub struct AnalyzerTable {
    script: ScriptAnalyzer,
    stylesheet: StylesheetAnalyzer,
    markup: MarkupAnalyzer,
    manifest: ManifestAnalyzer,
}

impl AnalyzerTable {
    pub fn new() -> Self {
        Self {
            script: ScriptAnalyzer::new(),
            stylesheet: StylesheetAnalyzer::new(),
            markup: MarkupAnalyzer::new(),
            manifest: ManifestAnalyzer::new(),
        }
    }

    pub fn get(&self, file_type: FileType) -> &dyn FileAnalyzer {
        match file_type {
            FileType::Script => &self.script,
            FileType::Stylesheet => &self.stylesheet,
            FileType::Markup => &self.markup,
            FileType::Manifest => &self.manifest,
        }
    }

    /// Analyze `path` with the analyzer matching its extension.
    ///
    /// Files of unknown type (images, `.wxs` modules, ...) become leaves: no
    /// dependencies, import path with extension.
    pub fn analyze(
        &self,
        path: &Path,
        ctx: &AnalysisContext<'_>,
        additional: Option<&BTreeSet<PathBuf>>,
    ) -> Result<FileRecord> {
        match ctx.extensions.belong_file_type(path) {
            Some(file_type) => self.get(file_type).analyze(path, ctx, additional),
            None => {
                tracing::debug!(path = %path.display(), "unknown file type, recording as leaf");
                Ok(ctx.new_record(path, true, additional))
            }
        }
    }
}

impl Default for AnalyzerTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Compile a regex that is a literal in this crate.
///
/// Panics on an invalid pattern.
pub(crate) fn static_regex(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(err) => panic!("invalid built-in pattern {pattern:?}: {err}"),
    }
}

/// First capture group of every match of `regex` in `text`.
pub(crate) fn captures<'t>(regex: &Regex, text: &'t str) -> Vec<&'t str> {
    regex
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .filter(|s| !s.is_empty())
        .collect()
}
