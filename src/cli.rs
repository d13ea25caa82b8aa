// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Command-line arguments for `nodeharness`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "nodeharness",
    version,
    about = "Smoke-test helpers: launch node clusters, watch process output, inspect build dirs.",
    long_about = None
)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `NODEHARNESS_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Launch N copies of a test binary at once and wait for all of them.
    Network(NetworkArgs),
    /// Run a command and wait for a keyword to show up in its stdout.
    Watch(WatchArgs),
    /// Print the absolute path an executable name resolves to.
    Locate(LocateArgs),
    /// Print the CMake build type of a build directory.
    BuildType(BuildTypeArgs),
    /// List known project components and their source directories.
    Components,
    /// Count running processes whose name contains NAME.
    Count(CountArgs),
}

#[derive(Debug, Clone, Args)]
pub struct NetworkArgs {
    /// Number of node processes to launch.
    #[arg(long, short = 'n', value_name = "N")]
    pub count: usize,

    /// Executable name to look up.
    #[arg(long, value_name = "NAME", default_value = "test_common")]
    pub binary: String,

    /// Directory to search (repeatable). Defaults to the current directory.
    #[arg(long = "path", value_name = "DIR")]
    pub paths: Vec<PathBuf>,

    /// Discard the nodes' stdout/stderr.
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Args)]
pub struct WatchArgs {
    /// Substring to look for (case-sensitive).
    #[arg(long, short = 'k')]
    pub keyword: String,

    /// Lines allowed per required match.
    #[arg(long, value_name = "N", default_value_t = 100)]
    pub line_limit: usize,

    /// Number of lines that must contain the keyword.
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub repeat: usize,

    /// Give up waiting after this long, e.g. "30s" or "500ms".
    #[arg(long, value_name = "DURATION")]
    pub timeout: Option<String>,

    /// Wait for the command to exit after the scan instead of killing it.
    #[arg(long)]
    pub wait: bool,

    /// Command to run, followed by its arguments.
    #[arg(required = true, trailing_var_arg = true, num_args = 1.., value_name = "CMD")]
    pub command: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct LocateArgs {
    /// Executable name.
    pub name: String,

    /// Directory to search (repeatable). Defaults to `PATH`.
    #[arg(long = "path", value_name = "DIR")]
    pub paths: Vec<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct BuildTypeArgs {
    /// Build directory containing `CMakeCache.txt`.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct CountArgs {
    /// Substring of the process name (case-sensitive).
    pub name: String,

    /// Exit with status 2 if fewer than this many processes match.
    #[arg(long, value_name = "N")]
    pub expect: Option<usize>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
