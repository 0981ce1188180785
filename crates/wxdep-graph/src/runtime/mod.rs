//! Platform runtime abstraction for wxdep
//!
//! This module defines the `Runtime` trait that abstracts file-system access
//! for the graph core. The dependency engine never touches `std::fs` directly:
//! every existence check, read and rewrite goes through a `Runtime`, which keeps
//! the engine testable against an in-memory tree.
//!
//! All methods are synchronous. The engine runs one update cycle at a time and
//! local-disk reads are assumed to be fast.

pub mod native;

// Test utilities (available in test builds)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use std::path::{Path, PathBuf};

pub use native::NativeRuntime;

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur during runtime operations
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),

    /// Other runtime error
    #[error("Runtime error: {0}")]
    Other(String),
}

/// Platform runtime trait
///
/// Implementations provide the handful of file operations the graph core
/// needs. `NativeRuntime` wraps `std::fs`; `MemoryRuntime` (test-utils) keeps
/// files in a map and records every write.
///
/// # Example
///
/// ```rust,ignore
/// use wxdep_graph::runtime::{Runtime, RuntimeResult};
///
/// #[derive(Debug)]
/// struct MyRuntime;
///
/// impl Runtime for MyRuntime {
///     fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
///         std::fs::read(path).map_err(|e| RuntimeError::Io(e.to_string()))
///     }
///
///     // ... implement other methods
/// }
/// ```
pub trait Runtime: Send + Sync + std::fmt::Debug {
    /// Read a file from the filesystem
    fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>>;

    /// Write a file to the filesystem, replacing any previous content
    fn write_file(&self, path: &Path, content: &[u8]) -> RuntimeResult<()>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path exists and is a regular file
    fn is_file(&self, path: &Path) -> bool;

    /// Create a directory
    fn create_dir(&self, path: &Path, recursive: bool) -> RuntimeResult<()>;

    /// Get the current working directory
    fn get_cwd(&self) -> RuntimeResult<PathBuf>;

    /// Read a file as UTF-8 text.
    ///
    /// Invalid sequences are replaced rather than rejected; the analyzers only
    /// scan for ASCII reference syntax.
    fn read_to_string(&self, path: &Path) -> RuntimeResult<String> {
        let bytes = self.read_file(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
