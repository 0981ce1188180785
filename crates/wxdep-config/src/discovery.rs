//! File-based config discovery and layered loading.
//!
//! Layers, lowest priority first: built-in defaults, the config file
//! (`wxdep.toml` or `wxdep.json`), `WXDEP_*` environment variables, then
//! command-line overrides.

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized, Toml},
};

use crate::config::{ConfigOverrides, WxdepConfig};
use crate::error::{ConfigError, Result};

/// Config file names, in lookup order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["wxdep.toml", "wxdep.json"];

/// Prefix of environment variables that override config values
/// (`WXDEP_OUTPUT_DIR`, `WXDEP_SRC_DIR`, ...).
pub const ENV_PREFIX: &str = "WXDEP_";

/// Finds and loads the wxdep configuration of a project.
///
/// # Example
///
/// ```no_run
/// use wxdep_config::{ConfigDiscovery, ConfigOverrides};
///
/// let config = ConfigDiscovery::new(".").load(&ConfigOverrides::default()).unwrap();
/// println!("source root: {}", config.src_dir.display());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigDiscovery {
    root: PathBuf,
    explicit: Option<PathBuf>,
}

impl ConfigDiscovery {
    /// Discover configuration in `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            explicit: None,
        }
    }

    /// Use this config file instead of searching. Relative paths are taken
    /// from the root.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.explicit = Some(self.root.join(path));
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The config file to load, if any.
    ///
    /// # Errors
    ///
    /// `ConfigError::NotFound` when an explicit file does not exist.
    pub fn find(&self) -> Result<Option<PathBuf>> {
        if let Some(path) = &self.explicit {
            return if path.is_file() {
                Ok(Some(path.clone()))
            } else {
                Err(ConfigError::NotFound(path.clone()))
            };
        }

        Ok(CONFIG_FILE_NAMES
            .iter()
            .map(|name| self.root.join(name))
            .find(|path| path.is_file()))
    }

    /// Build the layered figment without extracting it.
    pub fn figment(&self, overrides: &ConfigOverrides) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(WxdepConfig::default()));

        if let Some(path) = self.find()? {
            tracing::debug!(path = %path.display(), "loading config file");
            figment = match path.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => figment.merge(Toml::file(&path)),
                Some("json") => figment.merge(Json::file(&path)),
                other => {
                    return Err(ConfigError::UnsupportedFormat(
                        other.unwrap_or_default().to_string(),
                    ));
                }
            };
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        if !overrides.is_empty() {
            figment = figment.merge(Serialized::defaults(overrides));
        }

        Ok(figment)
    }

    /// Load the configuration and resolve its paths.
    ///
    /// Relative paths are resolved against the config file's directory, or
    /// the root when no file was found.
    pub fn load(&self, overrides: &ConfigOverrides) -> Result<WxdepConfig> {
        let base = match self.find()? {
            Some(path) => path.parent().map(Path::to_path_buf).unwrap_or_else(|| self.root.clone()),
            None => self.root.clone(),
        };

        let config: WxdepConfig = self
            .figment(overrides)?
            .extract()
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        Ok(config.resolve_paths(&base))
    }
}

/// Discover and load config from `root` (convenience function).
pub fn discover(root: impl AsRef<Path>, overrides: &ConfigOverrides) -> Result<WxdepConfig> {
    ConfigDiscovery::new(root).load(overrides)
}
