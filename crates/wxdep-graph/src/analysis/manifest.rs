//! Manifest analyzer (`.json`).
//!
//! App and component manifests declare pages, sub-package pages and
//! `usingComponents`. Each declared prefix expands to its four co-files, all
//! of which must exist.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;

use super::resolver::resolve_root_or_relative;
use super::{AnalysisContext, FileAnalyzer, FileType};
use crate::error::{Error, Result};
use crate::graph::FileRecord;

/// Component values with this scheme refer to platform plugins, not files.
const PLUGIN_SCHEME: &str = "plugin://";

/// The parts of a manifest that reference other files.
///
/// Unknown fields are ignored, so project and sitemap files parse to an empty
/// manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ManifestFile {
    #[serde(default)]
    pub pages: Vec<String>,

    #[serde(default, rename = "usingComponents")]
    pub using_components: IndexMap<String, String>,

    #[serde(default, rename = "subPackages", alias = "subpackages")]
    pub sub_packages: Vec<SubPackage>,
}

/// A sub-package declared by the app manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SubPackage {
    pub root: String,
    #[serde(default)]
    pub pages: Vec<String>,
}

impl ManifestFile {
    /// Parse manifest text. JSON that is not an object (data files) yields an
    /// empty manifest.
    pub fn parse(text: &str) -> serde_json::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        if value.is_object() {
            serde_json::from_value(value)
        } else {
            Ok(Self::default())
        }
    }

    /// Declared page and component prefixes, deduplicated in declaration order.
    ///
    /// Pages come first, then sub-package pages (`root/page`), then components.
    /// Plugin components are skipped.
    pub fn prefixes(&self) -> Vec<String> {
        let mut prefixes: IndexSet<String> = self.pages.iter().cloned().collect();

        for package in &self.sub_packages {
            let root = package.root.trim_end_matches('/');
            for page in &package.pages {
                prefixes.insert(format!("{}/{}", root, page.trim_start_matches('/')));
            }
        }

        for component in self.using_components.values() {
            if !component.starts_with(PLUGIN_SCHEME) {
                prefixes.insert(component.clone());
            }
        }

        prefixes.into_iter().collect()
    }
}

#[derive(Debug, Default)]
pub struct ManifestAnalyzer;

impl ManifestAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl FileAnalyzer for ManifestAnalyzer {
    fn file_type(&self) -> FileType {
        FileType::Manifest
    }

    fn analyze(
        &self,
        path: &Path,
        ctx: &AnalysisContext<'_>,
        additional: Option<&BTreeSet<PathBuf>>,
    ) -> Result<FileRecord> {
        let text = ctx.runtime.read_to_string(path)?;
        let manifest = ManifestFile::parse(&text).map_err(|source| Error::InvalidManifest {
            path: path.to_path_buf(),
            source,
        })?;

        let mut record = ctx.new_record(path, true, additional);

        for prefix in manifest.prefixes() {
            let absolute = resolve_root_or_relative(path, &prefix, &ctx.system.src_dir);
            let files = ctx.extensions.page_files(&absolute, ctx.runtime)?;
            record.dependencies.extend(files);
        }

        tracing::debug!(
            path = %path.display(),
            dependencies = record.dependencies.len(),
            "analyzed manifest"
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::error::MissingFileError;
    use crate::runtime::test_utils::MemoryRuntime;

    fn page(runtime: MemoryRuntime, prefix: &str) -> MemoryRuntime {
        runtime
            .with_file(format!("{prefix}.json"), "{}")
            .with_file(format!("{prefix}.js"), "")
            .with_file(format!("{prefix}.wxss"), "")
            .with_file(format!("{prefix}.wxml"), "")
    }

    #[test]
    fn prefixes_cover_pages_sub_packages_and_components() {
        let manifest = ManifestFile::parse(
            r#"{
                "pages": ["pages/index/index", "pages/logs/logs"],
                "subpackages": [{ "root": "pkgA/", "pages": ["pages/cat"] }],
                "usingComponents": {
                    "nav": "/components/nav/nav",
                    "map": "plugin://maps/map",
                    "again": "pages/index/index"
                },
                "window": { "navigationBarTitleText": "Demo" }
            }"#,
        )
        .unwrap();

        assert_eq!(
            manifest.prefixes(),
            vec![
                "pages/index/index",
                "pages/logs/logs",
                "pkgA/pages/cat",
                "/components/nav/nav",
            ]
        );
    }

    #[test]
    fn non_object_json_is_empty() {
        assert_eq!(ManifestFile::parse("[1, 2, 3]").unwrap(), ManifestFile::default());
    }

    #[test]
    fn pages_expand_to_four_co_files() {
        let runtime = page(
            MemoryRuntime::new("/project").with_file(
                "/project/src/app.json",
                r#"{ "pages": ["pages/index/index"] }"#,
            ),
            "/project/src/pages/index/index",
        );
        let options = options();

        let record = with_context(&runtime, &options, |ctx| {
            ManifestAnalyzer::new().analyze(Path::new("/project/src/app.json"), ctx, None)
        })
        .unwrap();

        assert_eq!(record.dependencies.len(), 4);
        for ext in ["json", "js", "wxss", "wxml"] {
            let file = PathBuf::from(format!("/project/src/pages/index/index.{ext}"));
            assert!(record.dependencies.contains(&file), "missing {ext}");
        }
        assert_eq!(record.import_path, "../src/app.json");
    }

    #[test]
    fn component_paths_resolve_against_manifest_or_root() {
        let runtime = MemoryRuntime::new("/project").with_file(
            "/project/src/pages/index/index.json",
            r#"{ "usingComponents": { "a": "../../components/a/a", "b": "/components/b/b" } }"#,
        );
        let runtime = page(runtime, "/project/src/components/a/a");
        let runtime = page(runtime, "/project/src/components/b/b");
        let options = options();

        let record = with_context(&runtime, &options, |ctx| {
            ManifestAnalyzer::new().analyze(Path::new("/project/src/pages/index/index.json"), ctx, None)
        })
        .unwrap();

        assert_eq!(record.dependencies.len(), 8);
        assert!(
            record
                .dependencies
                .contains(Path::new("/project/src/components/a/a.wxml"))
        );
        assert!(
            record
                .dependencies
                .contains(Path::new("/project/src/components/b/b.json"))
        );
    }

    #[test]
    fn incomplete_page_is_fatal() {
        let runtime = MemoryRuntime::new("/project")
            .with_file("/project/src/app.json", r#"{ "pages": ["pages/index/index"] }"#)
            .with_file("/project/src/pages/index/index.js", "")
            .with_file("/project/src/pages/index/index.json", "{}")
            .with_file("/project/src/pages/index/index.wxml", "");
        let options = options();

        let err = with_context(&runtime, &options, |ctx| {
            ManifestAnalyzer::new().analyze(Path::new("/project/src/app.json"), ctx, None)
        })
        .unwrap_err();

        assert!(matches!(
            err,
            Error::MissingFile(MissingFileError::IncompletePageFiles { .. })
        ));
    }

    #[test]
    fn invalid_json_is_reported_with_path() {
        let runtime =
            MemoryRuntime::new("/project").with_file("/project/src/app.json", "{ pages: ");
        let options = options();

        let err = with_context(&runtime, &options, |ctx| {
            ManifestAnalyzer::new().analyze(Path::new("/project/src/app.json"), ctx, None)
        })
        .unwrap_err();

        match err {
            Error::InvalidManifest { path, .. } => {
                assert_eq!(path, PathBuf::from("/project/src/app.json"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
