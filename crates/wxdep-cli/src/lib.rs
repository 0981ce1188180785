//! wxdep CLI - host driver for the mini-program dependency graph.
//!
//! The binary plays the part of a host build tool: it loads the project
//! configuration, drives [`wxdep_graph::MiniProgramPlugin`] through its
//! lifecycle hooks and writes what the plugin emits.
//!
//! # Architecture
//!
//! - [`cli`] - Argument definitions (clap derive)
//! - [`commands`] - `build`, `watch` and `graph`
//! - [`config`] - Project loading and conversion into plugin inputs
//! - [`error`] - CLI error type and miette rendering
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - Status lines and summaries on stderr
//! - [`watcher`] - notify-based source watcher with batching
//!
//! # Example
//!
//! ```rust,no_run
//! use wxdep_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;
pub mod watcher;

pub use error::{CliError, Result, ResultExt};
