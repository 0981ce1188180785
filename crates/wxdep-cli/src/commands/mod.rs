//! Command implementations for the wxdep CLI.
//!
//! - [`build`] - One dependency cycle, then write the emitted manifests
//! - [`watch`] - Build, then an incremental cycle per batch of changes
//! - [`graph`] - Print the live dependency graph
//!
//! Each command provides an `execute` function taking its parsed arguments.

pub mod build;
pub mod graph;
pub(crate) mod utils;
pub mod watch;

pub use build::execute as build_execute;
pub use graph::execute as graph_execute;
pub use watch::execute as watch_execute;
