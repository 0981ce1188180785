//! Miette rendering for CLI errors.

use miette::Report;
use wxdep_graph::{Error as GraphError, MissingFileError};

use crate::error::CliError;

/// Convert a `CliError` to a miette report, attaching a hint where one is
/// known.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => match e.hint() {
            Some(hint) => miette::miette!(help = hint.to_string(), "Configuration error: {}", e),
            None => miette::miette!("Configuration error: {}", e),
        },
        CliError::Graph(e) => graph_error_to_miette(e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert a graph error to a miette report.
pub fn graph_error_to_miette(err: GraphError) -> Report {
    match &err {
        GraphError::MissingFile(MissingFileError::IncompletePageFiles { .. }) => miette::miette!(
            help = "Every page and component needs .json, .js (or .ts), .wxss and .wxml files",
            "{}",
            err
        ),
        GraphError::MissingFile(MissingFileError::UnresolvedScript { .. }) => miette::miette!(
            help = "Check the import path, or configure an alias for it in wxdep.toml",
            "{}",
            err
        ),
        GraphError::InvalidManifest { .. } => {
            miette::miette!(help = "Manifests must be valid JSON", "{}", err)
        }
        _ => miette::miette!("{}", err),
    }
}
