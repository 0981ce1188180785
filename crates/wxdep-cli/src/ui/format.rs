//! Formatting utilities for sizes, durations, build summaries and graphs.

use std::time::Duration;

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::colors_enabled;

/// Format file size in human-readable format.
///
/// # Examples
///
/// ```
/// use wxdep_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(1024), "1.00 KB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", size as u64, UNITS[unit_idx])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

/// Format duration in human-readable format (ms, s, m:s).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use wxdep_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Print the files written by a build, followed by a totals line.
///
/// `assets` holds (output key, size in bytes) pairs.
pub fn print_build_summary(assets: &[(String, u64)], live_files: usize, duration: Duration) {
    let width = (Term::stderr().size().1 as usize).min(80);
    let total_size: u64 = assets.iter().map(|(_, size)| size).sum();

    if colors_enabled() {
        eprintln!("\n{}", "Build Summary".bold().underline());
    } else {
        eprintln!("\nBuild Summary");
    }
    eprintln!("{}", "─".repeat(width));

    for (key, size) in assets {
        if colors_enabled() {
            eprintln!("  {} {} {}", "▸".blue(), key.bright_white().bold(), format_size(*size).dimmed());
        } else {
            eprintln!("  ▸ {} {}", key, format_size(*size));
        }
    }

    eprintln!("{}", "─".repeat(width));
    eprintln!(
        "  {} live files, {} manifests ({}) in {}",
        live_files,
        assets.len(),
        format_size(total_size),
        format_duration(duration)
    );
}

/// One live file of the dependency graph, as printed by `wxdep graph`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphLine {
    /// Path relative to the source directory
    pub path: String,
    /// Specifier used by the fake importer
    pub import_path: String,
    /// Inbound reference count (at least one for live files)
    pub references: usize,
    /// Dependencies, relative to the source directory
    pub dependencies: Vec<String>,
}

/// Print the graph listing to stdout.
pub fn print_graph(lines: &[GraphLine]) {
    for line in lines {
        if colors_enabled() {
            println!("{} {}", line.path.bold(), format!("({})", line.references).dimmed());
        } else {
            println!("{} ({})", line.path, line.references);
        }
        for dependency in &line.dependencies {
            println!("  └─ {}", dependency);
        }
    }
}
