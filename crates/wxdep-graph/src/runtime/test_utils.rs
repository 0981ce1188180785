//! In-memory runtime for tests.
//!
//! `MemoryRuntime` keeps the source tree in a map and records every write, so
//! tests can observe the fake importer content and the newly-live refresh
//! without touching the disk.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use super::{Runtime, RuntimeError, RuntimeResult};

/// A `Runtime` backed by an in-memory file map.
///
/// # Example
///
/// ```rust,ignore
/// use wxdep_graph::runtime::Runtime;
/// use wxdep_graph::runtime::test_utils::MemoryRuntime;
/// use std::path::Path;
///
/// let runtime = MemoryRuntime::new("/project")
///     .with_file("/project/src/app.json", r#"{"pages":[]}"#);
///
/// assert!(runtime.is_file(Path::new("/project/src/app.json")));
/// assert!(runtime.exists(Path::new("/project/src")));
/// ```
#[derive(Debug)]
pub struct MemoryRuntime {
    cwd: PathBuf,
    files: RwLock<BTreeMap<PathBuf, Vec<u8>>>,
    dirs: RwLock<BTreeSet<PathBuf>>,
    writes: RwLock<Vec<PathBuf>>,
}

impl MemoryRuntime {
    /// Create an empty runtime whose working directory is `cwd`.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            files: RwLock::new(BTreeMap::new()),
            dirs: RwLock::new(BTreeSet::new()),
            writes: RwLock::new(Vec::new()),
        }
    }

    /// Builder-style variant of [`MemoryRuntime::add_file`].
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl AsRef<[u8]>) -> Self {
        self.add_file(path, content);
        self
    }

    /// Insert or replace a file without recording it as a write.
    pub fn add_file(&self, path: impl Into<PathBuf>, content: impl AsRef<[u8]>) {
        self.files
            .write()
            .insert(path.into(), content.as_ref().to_vec());
    }

    /// Delete a file, returning whether it existed.
    pub fn remove_file(&self, path: &Path) -> bool {
        self.files.write().remove(path).is_some()
    }

    /// Current content of a file.
    pub fn content(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.read().get(path).cloned()
    }

    /// Every path written through [`Runtime::write_file`], in order.
    pub fn writes(&self) -> Vec<PathBuf> {
        self.writes.read().clone()
    }

    /// How many times `path` was written.
    pub fn write_count(&self, path: &Path) -> usize {
        self.writes.read().iter().filter(|p| p.as_path() == path).count()
    }

    /// Forget recorded writes.
    pub fn clear_writes(&self) {
        self.writes.write().clear();
    }
}

impl Runtime for MemoryRuntime {
    fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        self.files
            .read()
            .get(path)
            .cloned()
            .ok_or_else(|| RuntimeError::FileNotFound(path.to_path_buf()))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> RuntimeResult<()> {
        self.files.write().insert(path.to_path_buf(), content.to_vec());
        self.writes.write().push(path.to_path_buf());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        if self.dirs.read().contains(path) {
            return true;
        }
        self.files.read().keys().any(|file| file.starts_with(path))
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.read().contains_key(path)
    }

    fn create_dir(&self, path: &Path, _recursive: bool) -> RuntimeResult<()> {
        self.dirs.write().insert(path.to_path_buf());
        Ok(())
    }

    fn get_cwd(&self) -> RuntimeResult<PathBuf> {
        Ok(self.cwd.clone())
    }
}
