//! Pluggable config validation strategies
//!
//! Schema validation checks values only; filesystem validation also checks
//! that the source tree is where the config says it is.

use std::path::{Path, PathBuf};

use crate::config::WxdepConfig;
use crate::error::{ConfigError, Result};

/// Extensions owned by the other file types; a stylesheet suffix must not
/// reuse them.
const RESERVED_EXTENSIONS: [&str; 4] = ["js", "ts", "json", "wxml"];

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    fn validate(&self, config: &WxdepConfig) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use wxdep_config::{ConfigValidator, SchemaValidator, WxdepConfig};
///
/// SchemaValidator.validate(&WxdepConfig::default()).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &WxdepConfig) -> Result<()> {
        if config.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::SchemaValidation {
                message: "output_dir cannot be empty".to_string(),
                hint: Some("Set output_dir in wxdep.toml or pass --out-dir".to_string()),
            });
        }

        if !config.app_manifest.ends_with(".json") {
            return Err(ConfigError::SchemaValidation {
                message: format!("app_manifest '{}' is not a .json file", config.app_manifest),
                hint: None,
            });
        }

        for alias in &config.alias {
            if alias.symbol.is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: "alias symbol cannot be empty".to_string(),
                    hint: Some(format!(
                        "Give the alias for '{}' a symbol such as \"@\"",
                        alias.path.display()
                    )),
                });
            }
        }

        for suffix in &config.additional_wxss_suffixes {
            if suffix.is_empty() || suffix.starts_with('.') {
                return Err(ConfigError::SchemaValidation {
                    message: format!("invalid stylesheet suffix '{suffix}'"),
                    hint: Some("Write suffixes without a leading dot, e.g. \"scss\"".to_string()),
                });
            }
            if RESERVED_EXTENSIONS.contains(&suffix.as_str()) {
                return Err(ConfigError::SchemaValidation {
                    message: format!("stylesheet suffix '{suffix}' belongs to another file type"),
                    hint: None,
                });
            }
        }

        Ok(())
    }
}

/// Filesystem validator (for CLI use)
///
/// Runs schema validation, then checks that the source directory and the app
/// manifest exist. Expects resolved (absolute) paths; relative ones are
/// joined to `root`.
pub struct FsValidator {
    root: PathBuf,
}

impl FsValidator {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, config: &WxdepConfig) -> Result<()> {
        SchemaValidator.validate(config)?;

        let src_dir = self.root.join(&config.src_dir);
        if !src_dir.is_dir() {
            return Err(ConfigError::SrcDirNotFound(src_dir));
        }

        let manifest = src_dir.join(&config.app_manifest);
        if !manifest.is_file() {
            return Err(ConfigError::ManifestNotFound(manifest));
        }

        Ok(())
    }
}

/// Validate without filesystem access (convenience function).
pub fn validate_schema(config: &WxdepConfig) -> Result<()> {
    SchemaValidator.validate(config)
}

/// Validate against the filesystem under `root` (convenience function).
pub fn validate_fs(config: &WxdepConfig, root: impl AsRef<Path>) -> Result<()> {
    FsValidator::new(root).validate(config)
}
