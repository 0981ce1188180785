//! Watch command implementation.
//!
//! Builds once, then watches the source directory and alias targets. Each batch of changes
//! runs one incremental cycle through the plugin's `watch_run` hook; a failed
//! cycle is reported and the previous graph stays in place until the next
//! change.

use std::path::PathBuf;
use std::time::Duration;

use wxdep_config::WxdepConfig;
use wxdep_graph::BuildPlugin;

use crate::cli::WatchArgs;
use crate::commands::utils::{self, Project};
use crate::error::Result;
use crate::ui;
use crate::watcher::{self, FileWatcher};

/// Execute the watch command. Returns on Ctrl-C.
pub async fn execute(args: WatchArgs) -> Result<()> {
    ui::info("Loading configuration...");
    let (mut project, report) = utils::start(&args.project)?;

    let assets = project.plugin.emit()?;
    let written = utils::write_assets(&project.config.output_dir, assets).await?;
    ui::print_build_summary(&written, report.synthesis.imported.len(), report.duration);

    let ignored = vec![
        project.config.cache_dir.clone(),
        project.config.output_dir.clone(),
    ];
    let (watcher, mut rx) = FileWatcher::new(watch_roots(&project.config), ignored)?;
    for root in watcher.roots() {
        ui::info(&format!("Watching {} for changes", root.display()));
    }

    let quiet = Duration::from_millis(args.debounce);
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                ui::info("Stopping watcher");
                break;
            }
            batch = watcher::next_batch(&mut rx, quiet) => {
                let Some(batch) = batch else { break };
                if let Err(err) = rebuild(&mut project, &batch).await {
                    ui::error(&err.to_string());
                }
            }
        }
    }

    Ok(())
}

/// The source directory plus every existing alias target directory.
///
/// Alias targets may sit outside the source directory; scripts reached
/// through them must trigger cycles too.
fn watch_roots(config: &WxdepConfig) -> Vec<PathBuf> {
    let mut roots = vec![config.src_dir.clone()];
    for alias in &config.alias {
        if alias.path.is_dir() {
            roots.push(alias.path.clone());
        } else {
            tracing::warn!(
                symbol = %alias.symbol,
                path = %alias.path.display(),
                "alias target is not a directory, not watched"
            );
        }
    }
    roots
}

async fn rebuild(project: &mut Project, batch: &[PathBuf]) -> Result<()> {
    tracing::debug!(files = batch.len(), "change batch");

    let Some(report) = project.plugin.watch_run(batch)? else {
        return Ok(());
    };

    let config = &project.config;
    let removed =
        utils::remove_stale_outputs(&config.src_dir, &config.output_dir, &report.synthesis.dropped)
            .await?;
    let written = utils::write_assets(&config.output_dir, project.plugin.emit()?).await?;

    ui::success(&format!(
        "Rebuilt in {}: {} analyzed, {} reused, {} dropped, {} manifests written",
        ui::format_duration(report.duration),
        report.update.analyzed.len(),
        report.update.reused,
        report.synthesis.dropped.len(),
        written.len()
    ));
    for path in removed {
        ui::info(&format!("Removed {}", path.display()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use wxdep_config::AliasEntry;

    use crate::cli::ProjectArgs;

    fn write_page(src: &std::path::Path, page: &str) {
        let dir = src.join("pages").join(page);
        fs::create_dir_all(&dir).unwrap();
        for ext in ["json", "js", "wxss", "wxml"] {
            fs::write(dir.join(format!("{page}.{ext}")), "{}").unwrap();
        }
    }

    fn project_args(root: &std::path::Path) -> ProjectArgs {
        ProjectArgs {
            root: Some(root.to_path_buf()),
            ..ProjectArgs::default()
        }
    }

    #[tokio::test]
    async fn test_rebuild_removes_dropped_page_outputs() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        write_page(&src, "home");
        write_page(&src, "about");
        fs::write(
            src.join("app.json"),
            r#"{ "pages": ["pages/home/home", "pages/about/about"] }"#,
        )
        .unwrap();

        let (mut project, _) = utils::start(&project_args(temp.path())).unwrap();
        let dist = project.config.output_dir.clone();
        utils::write_assets(&dist, project.plugin.emit().unwrap())
            .await
            .unwrap();
        assert!(dist.join("pages/about/about.json").is_file());

        let manifest = r#"{ "pages": ["pages/home/home"] }"#;
        fs::write(src.join("app.json"), manifest).unwrap();
        let changed = project.config.src_dir.join("app.json");
        rebuild(&mut project, &[changed]).await.unwrap();

        assert!(!dist.join("pages/about/about.json").exists());
        assert!(dist.join("pages/home/home.json").is_file());
        assert_eq!(fs::read_to_string(dist.join("app.json")).unwrap(), manifest);
    }

    #[tokio::test]
    async fn test_rebuild_ignores_fake_importer_only_batch() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("app.json"), "{}").unwrap();

        let (mut project, _) = utils::start(&project_args(temp.path())).unwrap();
        let importer = project.config.cache_dir.join("fake_importer.js");
        rebuild(&mut project, &[importer]).await.unwrap();

        assert!(!project.config.output_dir.join("app.json").exists());
    }

    #[test]
    fn test_watch_roots_include_alias_targets_outside_src() {
        let temp = TempDir::new().unwrap();
        let shared = temp.path().join("shared");
        fs::create_dir_all(&shared).unwrap();

        let mut config = WxdepConfig::default().resolve_paths(temp.path());
        config.alias.push(AliasEntry::new("@shared", shared.clone()));
        config.alias.push(AliasEntry::new("@gone", temp.path().join("gone")));

        assert_eq!(watch_roots(&config), vec![config.src_dir.clone(), shared]);
    }
}
