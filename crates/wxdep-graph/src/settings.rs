//! Fixed locations and names used by the plugin.

use std::path::{Path, PathBuf};

/// Default cache directory name, relative to the working directory.
pub const DEFAULT_CACHE_DIR: &str = ".wxdep";

/// File name of the generated fake importer inside the cache directory.
pub const FAKE_IMPORTER_FILE: &str = "fake_importer.js";

/// Chunk name stem of the extracted bundler runtime inside the cache directory.
pub const RUNTIME_CHUNK_FILE: &str = "runtime";

/// Default root manifest, relative to the source root.
pub const DEFAULT_APP_MANIFEST: &str = "app.json";

/// App-level JSON files picked up next to the root manifest when present.
pub const DEFAULT_APP_LEVEL_FILES: [&str; 2] = ["project.config.json", "sitemap.json"];

/// Locations the plugin owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory holding generated artifacts (fake importer, runtime chunk)
    pub cache_dir: PathBuf,
    /// Root manifest file name, relative to the source root
    pub app_manifest: String,
    /// Extra app-level files, relative to the source root
    pub app_level_files: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            app_manifest: DEFAULT_APP_MANIFEST.to_string(),
            app_level_files: DEFAULT_APP_LEVEL_FILES
                .iter()
                .map(|f| f.to_string())
                .collect(),
        }
    }
}

impl Settings {
    /// Absolute path of the fake importer.
    pub fn fake_importer_path(&self) -> PathBuf {
        self.cache_dir.join(FAKE_IMPORTER_FILE)
    }

    /// Absolute path stem of the runtime chunk.
    pub fn runtime_chunk_path(&self) -> PathBuf {
        self.cache_dir.join(RUNTIME_CHUNK_FILE)
    }

    /// Stem of the app-level co-files (`app.js`, `app.wxss`), derived from the
    /// manifest name.
    pub fn app_prefix(&self, src_dir: &Path) -> PathBuf {
        let manifest = src_dir.join(&self.app_manifest);
        manifest.with_extension("")
    }
}
