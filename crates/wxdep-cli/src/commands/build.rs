//! Build command implementation.
//!
//! Runs the initial dependency cycle: the graph is built from the app
//! manifest, the fake importer is rewritten, and every live manifest is copied
//! to the output directory (the bundler only emits scripts it can import).

use std::time::Instant;

use wxdep_graph::BuildPlugin;

use crate::cli::BuildArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Execute the build command.
///
/// # Errors
///
/// Returns errors for invalid configuration, incomplete pages or components,
/// unresolvable script imports, invalid manifests and file-system failures.
pub async fn execute(args: BuildArgs) -> Result<()> {
    let start_time = Instant::now();

    ui::info("Loading configuration...");
    let (project, report) = utils::start(&args.project)?;

    let assets = project.plugin.emit()?;
    let written = utils::write_assets(&project.config.output_dir, assets).await?;

    ui::print_build_summary(&written, report.synthesis.imported.len(), report.duration);
    ui::success(&format!(
        "Build completed in {}",
        ui::format_duration(start_time.elapsed())
    ));

    Ok(())
}
