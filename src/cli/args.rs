//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! There are no subcommands. Every flag is optional; the one positional
//! value is hidden from help. clap's own `--version` handling is disabled
//! because `-v/--version` prints build metadata instead.

use clap::Parser;

/// gitdeck - a terminal UI for browsing a git repository
#[derive(Parser, Debug, Default, Clone, PartialEq, Eq)]
#[command(name = "gitdeck")]
#[command(author, about, long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// Path of git repo. (equivalent to --work-tree=<path> --git-dir=<path>/.git/)
    #[arg(short = 'p', long = "path", value_name = "PATH")]
    pub path: Option<String>,

    /// Path to filter on in `git log -- <path>`. When in filter mode, the
    /// commits, reflog, and stash are filtered based on the given path
    #[arg(short = 'f', long = "filter", value_name = "PATH")]
    pub filter: Option<String>,

    /// Todo file
    #[arg(value_name = "GITARGS", hide = true)]
    pub gitargs: Option<String>,

    /// Print the current version
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Run in debug mode with logging (see --logs flag below). Use the
    /// LOG_LEVEL env var to set the log level (debug/info/warn/error)
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Tail gitdeck logs (intended to be used when `gitdeck --debug` is
    /// called in a separate terminal tab)
    #[arg(short = 'l', long = "logs")]
    pub logs: bool,

    /// Print the default config
    #[arg(short = 'c', long = "config")]
    pub config: bool,

    /// equivalent of the --work-tree git argument
    #[arg(short = 'w', long = "work-tree", value_name = "PATH")]
    pub work_tree: Option<String>,

    /// equivalent of the --git-dir git argument
    #[arg(short = 'g', long = "git-dir", value_name = "PATH")]
    pub git_dir: Option<String>,
}

impl Cli {
    /// Parse command-line arguments.
    ///
    /// Malformed input makes clap print usage and exit.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}
