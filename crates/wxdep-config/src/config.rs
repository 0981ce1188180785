//! Configuration structure for wxdep.
//!
//! Every field has a default, so an empty `wxdep.toml` (or none at all) is a
//! valid configuration. Relative paths are resolved against the project root
//! with [`WxdepConfig::resolve_paths`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default source directory, relative to the project root.
pub const DEFAULT_SRC_DIR: &str = "src";
/// Default output directory, relative to the project root.
pub const DEFAULT_OUTPUT_DIR: &str = "dist";
/// Default cache directory, relative to the project root.
pub const DEFAULT_CACHE_DIR: &str = ".wxdep";
/// Default app manifest, relative to the source directory.
pub const DEFAULT_APP_MANIFEST: &str = "app.json";

/// One path alias, in configuration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    pub symbol: String,
    pub path: PathBuf,
}

impl AliasEntry {
    pub fn new(symbol: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            symbol: symbol.into(),
            path: path.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WxdepConfig {
    /// Mini-program root directory
    #[serde(default = "default_src_dir")]
    pub src_dir: PathBuf,

    /// Bundler output directory
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Directory for the fake importer and runtime chunk
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Root manifest, relative to `src_dir`
    #[serde(default = "default_app_manifest")]
    pub app_manifest: String,

    /// Extra stylesheet suffixes (without leading dot)
    #[serde(default)]
    pub additional_wxss_suffixes: Vec<String>,

    /// App-level files tracked next to the root manifest when present
    #[serde(default = "default_app_level_files")]
    pub app_level_files: Vec<String>,

    /// Path aliases; the first whose symbol occurs in a specifier wins
    #[serde(default)]
    pub alias: Vec<AliasEntry>,
}

fn default_src_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SRC_DIR)
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_DIR)
}

fn default_app_manifest() -> String {
    DEFAULT_APP_MANIFEST.to_string()
}

fn default_app_level_files() -> Vec<String> {
    vec!["project.config.json".to_string(), "sitemap.json".to_string()]
}

impl Default for WxdepConfig {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            output_dir: default_output_dir(),
            cache_dir: default_cache_dir(),
            app_manifest: default_app_manifest(),
            additional_wxss_suffixes: Vec::new(),
            app_level_files: default_app_level_files(),
            alias: Vec::new(),
        }
    }
}

impl WxdepConfig {
    /// Make every directory and alias target absolute against `root`.
    ///
    /// Absolute paths are kept as they are.
    pub fn resolve_paths(mut self, root: &Path) -> Self {
        self.src_dir = root.join(&self.src_dir);
        self.output_dir = root.join(&self.output_dir);
        self.cache_dir = root.join(&self.cache_dir);
        for alias in &mut self.alias {
            alias.path = root.join(&alias.path);
        }
        self
    }

    /// Absolute path of the root manifest, once paths are resolved.
    pub fn app_manifest_path(&self) -> PathBuf {
        self.src_dir.join(&self.app_manifest)
    }
}

/// Values given on the command line; `None` leaves lower layers in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src_dir: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        self.src_dir.is_none() && self.output_dir.is_none()
    }
}
