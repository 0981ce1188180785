//! Error types for the dependency graph core.
//!
//! Every error here is fatal to the current update cycle: the engine never
//! retries and never commits a partially updated graph. The host decides
//! whether to halt the build or report and keep watching.

use std::path::PathBuf;

use crate::runtime::RuntimeError;

/// Result type for graph operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error for the graph core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A file the graph requires is not on disk
    #[error(transparent)]
    MissingFile(#[from] MissingFileError),

    /// The plugin was constructed or started without required settings
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A manifest file is not valid JSON
    #[error("Invalid manifest '{}': {source}", path.display())]
    InvalidManifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Underlying file-system failure
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Required files that could not be found.
#[derive(Debug, thiserror::Error)]
pub enum MissingFileError {
    /// A page or component prefix is missing one of its co-files
    #[error(
        "Page or component '{}' is incomplete: missing {} file(s)",
        prefix.display(),
        missing.join(", ")
    )]
    IncompletePageFiles {
        /// Absolute path stem declared by the manifest
        prefix: PathBuf,
        /// Human-readable names of the missing file types
        missing: Vec<String>,
    },

    /// A script reference without extension matched no candidate file
    #[error(
        "Cannot resolve '{specifier}' from '{}': none of {} exist",
        importer.display(),
        candidates.join(", ")
    )]
    UnresolvedScript {
        specifier: String,
        importer: PathBuf,
        candidates: Vec<String>,
    },
}

/// Missing or invalid plugin configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Output directory is not set")]
    MissingOutputDir,

    #[error("Build context has no source root; set it to the mini-program root directory")]
    MissingSourceRoot,
}

impl Error {
    /// Whether the error was caused by a missing source file.
    pub fn is_missing_file(&self) -> bool {
        matches!(self, Error::MissingFile(_))
    }
}
