//! Extension resolution.
//!
//! Maps each [`FileType`] to its candidate extensions and resolves
//! extension-less paths to real files.

use std::path::{Path, PathBuf};

use crate::error::{MissingFileError, Result};
use crate::paths::{append_extension, extension_of};
use crate::runtime::Runtime;

use super::FileType;

/// Order in which a page/component prefix is expanded into co-files.
pub const PAGE_SEARCH_ORDER: [FileType; 4] = [
    FileType::Manifest,
    FileType::Script,
    FileType::Stylesheet,
    FileType::Markup,
];

/// Candidate extensions per file type, in preference order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionMap {
    script: Vec<String>,
    stylesheet: Vec<String>,
    markup: Vec<String>,
    manifest: Vec<String>,
}

impl ExtensionMap {
    /// Build the map. `additional_wxss_suffixes` are tried after `wxss`.
    pub fn new(additional_wxss_suffixes: &[String]) -> Self {
        let mut stylesheet = vec!["wxss".to_string()];
        for suffix in additional_wxss_suffixes {
            let suffix = suffix.trim_start_matches('.');
            if !suffix.is_empty() && !stylesheet.iter().any(|s| s == suffix) {
                stylesheet.push(suffix.to_string());
            }
        }

        Self {
            script: vec!["js".to_string(), "ts".to_string()],
            stylesheet,
            markup: vec!["wxml".to_string()],
            manifest: vec!["json".to_string()],
        }
    }

    /// Candidate extensions for a file type.
    pub fn candidates(&self, file_type: FileType) -> &[String] {
        match file_type {
            FileType::Script => &self.script,
            FileType::Stylesheet => &self.stylesheet,
            FileType::Markup => &self.markup,
            FileType::Manifest => &self.manifest,
        }
    }

    /// The file type a path belongs to, judged by its extension.
    ///
    /// Returns `None` for extensions outside the known set (images, `.wxs`, ...).
    pub fn belong_file_type(&self, path: &Path) -> Option<FileType> {
        let ext = extension_of(path)?;
        FileType::ALL
            .into_iter()
            .find(|ty| self.candidates(*ty).iter().any(|c| c == ext))
    }

    /// Resolve a script-like reference to a file.
    ///
    /// A path that already carries an extension is returned as-is. Otherwise each
    /// candidate extension of `file_type` is tried in order and the first
    /// existing file wins.
    pub fn resolve_with_extension(
        &self,
        path: &Path,
        file_type: FileType,
        runtime: &dyn Runtime,
    ) -> Option<PathBuf> {
        if extension_of(path).is_some() {
            return Some(path.to_path_buf());
        }
        self.find_co_file(path, file_type, runtime)
    }

    /// First existing `<prefix>.<ext>` for the candidates of `file_type`.
    pub fn find_co_file(
        &self,
        prefix: &Path,
        file_type: FileType,
        runtime: &dyn Runtime,
    ) -> Option<PathBuf> {
        self.candidates(file_type)
            .iter()
            .map(|ext| append_extension(prefix, ext))
            .find(|candidate| runtime.is_file(candidate))
    }

    /// Expand a page/component prefix into its four co-files.
    ///
    /// # Errors
    ///
    /// `MissingFileError::IncompletePageFiles` when any file type has no
    /// existing candidate.
    pub fn page_files(&self, prefix: &Path, runtime: &dyn Runtime) -> Result<Vec<PathBuf>> {
        let mut files = Vec::with_capacity(PAGE_SEARCH_ORDER.len());
        let mut missing = Vec::new();

        for file_type in PAGE_SEARCH_ORDER {
            match self.find_co_file(prefix, file_type, runtime) {
                Some(file) => files.push(file),
                None => missing.push(self.candidates(file_type).join("|")),
            }
        }

        if !missing.is_empty() {
            return Err(MissingFileError::IncompletePageFiles {
                prefix: prefix.to_path_buf(),
                missing,
            }
            .into());
        }

        Ok(files)
    }
}

impl Default for ExtensionMap {
    fn default() -> Self {
        Self::new(&[])
    }
}
