//! Project configuration for CLI commands.
//!
//! Loading is delegated to `wxdep-config` (defaults, config file, `WXDEP_*`
//! environment, then command-line overrides); this module picks the project
//! root, validates the result against the filesystem and converts it into the
//! plugin's inputs.

mod conversions;

use std::path::{Path, PathBuf};

use wxdep_config::{ConfigDiscovery, ConfigOverrides, WxdepConfig, validate_fs};

use crate::cli::ProjectArgs;
use crate::error::Result;

pub use conversions::{build_context, plugin_options};

/// Absolute project root: `--root` when given, else the working directory.
pub fn project_root(args: &ProjectArgs) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(match &args.root {
        Some(root) if root.is_absolute() => root.clone(),
        Some(root) => cwd.join(root),
        None => cwd,
    })
}

/// Load, resolve and validate the configuration for `args`.
pub fn load(args: &ProjectArgs) -> Result<WxdepConfig> {
    let root = project_root(args)?;
    load_from(&root, args)
}

/// Same as [`load`] with an explicit project root.
pub fn load_from(root: &Path, args: &ProjectArgs) -> Result<WxdepConfig> {
    let mut discovery = ConfigDiscovery::new(root);
    if let Some(file) = &args.config {
        discovery = discovery.with_file(file);
    }

    let overrides = ConfigOverrides {
        src_dir: args.src.clone(),
        output_dir: args.out_dir.clone(),
    };

    let config = discovery.load(&overrides)?;
    validate_fs(&config, root)?;

    tracing::debug!(
        src_dir = %config.src_dir.display(),
        output_dir = %config.output_dir.display(),
        aliases = config.alias.len(),
        "configuration loaded"
    );
    Ok(config)
}
