//! Command-line interface definition for wxdep.
//!
//! # Command Structure
//!
//! - `wxdep build` - Run one dependency cycle and write the emitted manifests
//! - `wxdep watch` - Build, then rebuild on every batch of source changes
//! - `wxdep graph` - Print the live dependency graph

mod commands;

use clap::Parser;

pub use commands::{BuildArgs, Command, GraphArgs, ProjectArgs, WatchArgs};

/// wxdep - keeps every page and component of a mini-program in the build
#[derive(Parser, Debug)]
#[command(
    name = "wxdep",
    version,
    about = "Dependency tracking for WeChat mini-programs",
    long_about = "wxdep follows the pages, components, scripts, markup and stylesheets a\n\
                  mini-program declares, and keeps a fake entry file importing every live\n\
                  file so a bundler emits all of them."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Shows every analyzed file and each update cycle in detail.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
