//! Error types for configuration loading and validation.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Discovery and loading errors
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    // Schema validation errors (no filesystem checks)
    #[error("{message}")]
    SchemaValidation {
        message: String,
        hint: Option<String>,
    },

    // Filesystem validation errors
    #[error("source directory not found: {}", .0.display())]
    SrcDirNotFound(PathBuf),

    #[error("app manifest not found: {}", .0.display())]
    ManifestNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Suggested fix, when one is known.
    pub fn hint(&self) -> Option<&str> {
        match self {
            ConfigError::SchemaValidation { hint, .. } => hint.as_deref(),
            ConfigError::SrcDirNotFound(_) => {
                Some("Set src_dir in wxdep.toml or pass --src to point at the mini-program root")
            }
            ConfigError::ManifestNotFound(_) => {
                Some("The source directory must contain the app manifest (app.json)")
            }
            _ => None,
        }
    }
}
