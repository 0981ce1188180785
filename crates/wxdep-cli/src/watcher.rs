//! Source watcher for `wxdep watch`.
//!
//! Watches the source directory, plus alias targets that live outside it,
//! recursively and forwards relevant changes through a channel. [`next_batch`] groups events that arrive close together
//! so that one save touching several files triggers one update cycle.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::error::{CliError, Result};

/// File change event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    Modified(PathBuf),
    Created(PathBuf),
    Removed(PathBuf),
}

impl FileChange {
    /// Get the path affected by this change.
    pub fn path(&self) -> &Path {
        match self {
            FileChange::Modified(p) | FileChange::Created(p) | FileChange::Removed(p) => p,
        }
    }

    fn from_event(kind: &EventKind, path: &Path) -> Option<Self> {
        match kind {
            EventKind::Create(_) => Some(FileChange::Created(path.to_path_buf())),
            EventKind::Modify(_) => Some(FileChange::Modified(path.to_path_buf())),
            EventKind::Remove(_) => Some(FileChange::Removed(path.to_path_buf())),
            _ => None,
        }
    }
}

/// Recursive watcher over a set of directories.
///
/// Dropping it stops the notifications.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    roots: Vec<PathBuf>,
}

impl FileWatcher {
    /// Start watching every directory in `roots`.
    ///
    /// Roots nested inside another root are watched through their parent.
    /// Changes outside all roots, under any of `ignored` (typically the cache
    /// directory holding the fake importer) and in hidden files are dropped.
    ///
    /// # Errors
    ///
    /// Returns error if a root doesn't exist or the watcher cannot be
    /// created.
    pub fn new(
        roots: Vec<PathBuf>,
        ignored: Vec<PathBuf>,
    ) -> Result<(Self, mpsc::Receiver<FileChange>)> {
        if let Some(missing) = roots.iter().find(|root| !root.exists()) {
            return Err(CliError::FileNotFound(missing.clone()));
        }
        let roots = outermost(roots);

        let (tx, rx) = mpsc::channel(256);
        let filter_roots = roots.clone();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(err) => {
                    tracing::warn!(error = %err, "watch error");
                    return;
                }
            };

            for path in &event.paths {
                if Self::should_ignore(path, &filter_roots, &ignored) {
                    continue;
                }
                if let Some(change) = FileChange::from_event(&event.kind, path) {
                    // Receiver gone means the command is shutting down
                    let _ = tx.blocking_send(change);
                }
            }
        })?;

        for root in &roots {
            watcher.watch(root, RecursiveMode::Recursive)?;
            tracing::debug!(root = %root.display(), "watching");
        }

        Ok((
            Self {
                _watcher: watcher,
                roots,
            },
            rx,
        ))
    }

    fn should_ignore(path: &Path, roots: &[PathBuf], ignored: &[PathBuf]) -> bool {
        let Some(rel_path) = roots.iter().find_map(|root| path.strip_prefix(root).ok()) else {
            return true;
        };

        if ignored.iter().any(|dir| path.starts_with(dir)) {
            return true;
        }

        rel_path.components().any(|component| {
            component
                .as_os_str()
                .to_str()
                .is_some_and(|name| name.starts_with('.') && name != "." && name != "..")
        })
    }

    /// Directories being watched.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

/// Drop duplicate roots and roots nested inside another root.
fn outermost(roots: Vec<PathBuf>) -> Vec<PathBuf> {
    let unique: BTreeSet<PathBuf> = roots.into_iter().collect();
    let mut kept: Vec<PathBuf> = Vec::new();
    // Sorted order puts every ancestor before its descendants
    for root in unique {
        if !kept.iter().any(|outer| root.starts_with(outer)) {
            kept.push(root);
        }
    }
    kept
}

/// Wait for the next batch of changed paths.
///
/// Blocks until one change arrives, then keeps collecting until no further
/// change arrives for `quiet`. Paths are deduplicated and sorted. `None` once
/// the watcher has been dropped.
pub async fn next_batch(
    rx: &mut mpsc::Receiver<FileChange>,
    quiet: Duration,
) -> Option<Vec<PathBuf>> {
    let first = rx.recv().await?;
    let mut paths = BTreeSet::from([first.path().to_path_buf()]);

    while let Ok(Some(change)) = tokio::time::timeout(quiet, rx.recv()).await {
        paths.insert(change.path().to_path_buf());
    }

    Some(paths.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_ignore_cache_dir() {
        let roots = vec![PathBuf::from("/project")];
        let ignored = vec![PathBuf::from("/project/.wxdep"), PathBuf::from("/project/dist")];

        assert!(FileWatcher::should_ignore(
            Path::new("/project/dist/app.json"),
            &roots,
            &ignored
        ));
        assert!(!FileWatcher::should_ignore(
            Path::new("/project/src/app.json"),
            &roots,
            &ignored
        ));
    }

    #[test]
    fn test_should_ignore_hidden_files() {
        let roots = vec![PathBuf::from("/project/src")];

        assert!(FileWatcher::should_ignore(Path::new("/project/src/.git/config"), &roots, &[]));
        assert!(FileWatcher::should_ignore(
            Path::new("/project/src/pages/.index.wxml.swp"),
            &roots,
            &[]
        ));
    }

    #[test]
    fn test_should_ignore_outside_roots() {
        let roots = vec![PathBuf::from("/project/src")];
        assert!(FileWatcher::should_ignore(Path::new("/other/app.js"), &roots, &[]));
    }

    #[test]
    fn test_alias_root_outside_src_is_kept() {
        let roots = vec![PathBuf::from("/project/src"), PathBuf::from("/project/shared")];

        assert!(!FileWatcher::should_ignore(
            Path::new("/project/shared/utils/util.js"),
            &roots,
            &[]
        ));
        assert!(FileWatcher::should_ignore(
            Path::new("/project/shared/.cache/util.js"),
            &roots,
            &[]
        ));
    }

    #[test]
    fn test_outermost_drops_nested_roots() {
        let roots = outermost(vec![
            PathBuf::from("/project/src"),
            PathBuf::from("/project/src/utils"),
            PathBuf::from("/project/shared"),
            PathBuf::from("/project/src"),
        ]);
        assert_eq!(
            roots,
            vec![PathBuf::from("/project/shared"), PathBuf::from("/project/src")]
        );
    }

    #[test]
    fn test_new_rejects_missing_root() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("shared");

        let err = FileWatcher::new(vec![dir.path().to_path_buf(), missing.clone()], Vec::new())
            .err()
            .unwrap();
        assert!(matches!(err, CliError::FileNotFound(path) if path == missing));
    }

    #[test]
    fn test_file_change_from_event() {
        let path = Path::new("/project/src/app.js");
        let kind = EventKind::Remove(notify::event::RemoveKind::File);
        assert_eq!(
            FileChange::from_event(&kind, path),
            Some(FileChange::Removed(path.to_path_buf()))
        );

        let kind = EventKind::Access(notify::event::AccessKind::Any);
        assert_eq!(FileChange::from_event(&kind, path), None);
    }

    #[tokio::test]
    async fn test_next_batch_deduplicates() {
        let (tx, mut rx) = mpsc::channel(8);
        tx.send(FileChange::Modified(PathBuf::from("/src/b.js"))).await.unwrap();
        tx.send(FileChange::Modified(PathBuf::from("/src/a.js"))).await.unwrap();
        tx.send(FileChange::Created(PathBuf::from("/src/b.js"))).await.unwrap();
        drop(tx);

        let batch = next_batch(&mut rx, Duration::from_millis(10)).await.unwrap();
        assert_eq!(batch, vec![PathBuf::from("/src/a.js"), PathBuf::from("/src/b.js")]);
        assert!(next_batch(&mut rx, Duration::from_millis(10)).await.is_none());
    }
}
