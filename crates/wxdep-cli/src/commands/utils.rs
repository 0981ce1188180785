//! Helpers shared by the commands.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use wxdep_config::WxdepConfig;
use wxdep_graph::paths::{relative_path, to_slash};
use wxdep_graph::{BuildPlugin, CycleReport, EmittedAsset, MiniProgramPlugin, NativeRuntime};

use crate::cli::ProjectArgs;
use crate::config;
use crate::error::{Result, ResultExt};

/// A started plugin together with the configuration it was built from.
#[derive(Debug)]
pub(crate) struct Project {
    pub config: WxdepConfig,
    pub plugin: MiniProgramPlugin,
}

/// Load the configuration and run the initial cycle.
pub(crate) fn start(args: &ProjectArgs) -> Result<(Project, CycleReport)> {
    let config = config::load(args)?;

    let mut plugin = MiniProgramPlugin::new(
        config::plugin_options(&config),
        Arc::new(NativeRuntime::new()),
    )?;
    tracing::debug!(entry = %plugin.entry().name, "fake importer ready");

    let report = plugin.build_start(&config::build_context(&config))?;
    Ok((Project { config, plugin }, report))
}

/// Write emitted assets under `output_dir`, keyed by their relative path.
///
/// Returns (key, size) pairs in emission order.
pub(crate) async fn write_assets(
    output_dir: &Path,
    assets: Vec<EmittedAsset>,
) -> Result<Vec<(String, u64)>> {
    let mut written = Vec::with_capacity(assets.len());

    for asset in assets {
        let target = output_dir.join(&asset.key);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await.with_path(parent)?;
        }
        tokio::fs::write(&target, &asset.content)
            .await
            .with_path(&target)?;
        written.push((asset.key, asset.size as u64));
    }

    Ok(written)
}

/// Remove the output copies of files the orphan sweep dropped.
///
/// Returns the removed output paths.
pub(crate) async fn remove_stale_outputs(
    src_dir: &Path,
    output_dir: &Path,
    dropped: &[PathBuf],
) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();

    for path in dropped.iter().filter(|path| path.starts_with(src_dir)) {
        let target = output_dir.join(to_slash(&relative_path(src_dir, path)));
        if tokio::fs::try_exists(&target).await.unwrap_or(false) {
            tokio::fs::remove_file(&target).await.with_path(&target)?;
            removed.push(target);
        }
    }

    Ok(removed)
}
