//! Logging setup for the wxdep CLI.
//!
//! The graph core logs through `tracing`: one `info` line per cycle and a
//! `debug` line per analyzed file. This module installs the subscriber that
//! prints them.
//!
//! # Example
//!
//! ```rust,no_run
//! use wxdep_cli::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!("watching for changes");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used by `--verbose`.
pub const VERBOSE_FILTER: &str = "wxdep_graph=debug,wxdep_config=debug,wxdep_cli=debug";

/// Filter used by `--quiet`.
pub const QUIET_FILTER: &str = "error";

/// Filter used when neither flag nor `RUST_LOG` is given.
pub const DEFAULT_FILTER: &str = "wxdep_graph=info,wxdep_config=info,wxdep_cli=info";

/// Initialize the global tracing subscriber.
///
/// The level is chosen in this order:
/// 1. `--verbose`: debug for wxdep crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG`
/// 4. info for wxdep crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Initialize the subscriber with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}
