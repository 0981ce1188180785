use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Available wxdep subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze the project once and write the emitted files
    ///
    /// Walks the dependency graph from the app manifest, rewrites the fake
    /// importer and copies every live manifest into the output directory.
    Build(BuildArgs),

    /// Build, then keep the graph current as files change
    ///
    /// Watches the source directory and runs an incremental cycle for each
    /// batch of changes. Errors are reported and watching continues.
    Watch(WatchArgs),

    /// Print the live dependency graph
    Graph(GraphArgs),
}

/// Options shared by every command: where the project is and how to
/// override its configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Project root directory
    ///
    /// Config files are looked up here and relative paths resolve against
    /// it. Defaults to the current directory.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Config file to use instead of wxdep.toml / wxdep.json
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Mini-program source directory (overrides src_dir)
    #[arg(long, value_name = "DIR")]
    pub src: Option<PathBuf>,

    /// Output directory (overrides output_dir)
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

/// Arguments for the build command
#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

/// Arguments for the watch command
#[derive(Args, Debug, Clone)]
pub struct WatchArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Quiet period that closes a batch of changes, in milliseconds
    #[arg(long, default_value_t = 100, value_name = "MS")]
    pub debounce: u64,
}

/// Arguments for the graph command
#[derive(Args, Debug, Clone, Default)]
pub struct GraphArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Print the graph as JSON
    #[arg(long)]
    pub json: bool,
}
