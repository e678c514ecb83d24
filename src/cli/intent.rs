//! cli::intent
//!
//! Resolution of parsed arguments into a [`RunIntent`].
//!
//! # Rules
//!
//! - Empty flag values count as absent.
//! - `--path` cannot be combined with `--work-tree` or `--git-dir`.
//! - `--path <p>` expands to work tree `<p>` and git dir `<p>/.git`.
//!
//! The positional value is carried through untouched.

use std::path::Path;

use thiserror::Error;
use tracing::info;

use super::args::Cli;
use crate::core::env;

/// Errors from argument resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntentError {
    #[error("--path option is incompatible with the --work-tree and --git-dir options")]
    PathConflict,
}

/// Everything the bootstrap needs to know about this invocation.
///
/// Built once by [`RunIntent::resolve`] and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunIntent {
    pub repo_path: Option<String>,
    pub filter_path: Option<String>,
    pub positional_arg: Option<String>,
    pub show_version: bool,
    pub debug: bool,
    pub tail_logs: bool,
    pub show_config: bool,
    pub work_tree: Option<String>,
    pub git_dir: Option<String>,
}

impl RunIntent {
    /// Resolve parsed arguments.
    ///
    /// # Errors
    ///
    /// Returns [`IntentError::PathConflict`] when `--path` is combined with
    /// `--work-tree` or `--git-dir`.
    ///
    /// # Example
    ///
    /// ```
    /// use gitdeck::cli::{Cli, RunIntent};
    ///
    /// let cli = Cli {
    ///     path: Some("/src/project".into()),
    ///     ..Default::default()
    /// };
    /// let intent = RunIntent::resolve(cli).unwrap();
    /// assert_eq!(intent.work_tree.as_deref(), Some("/src/project"));
    /// assert_eq!(intent.git_dir.as_deref(), Some("/src/project/.git"));
    /// ```
    pub fn resolve(cli: Cli) -> Result<Self, IntentError> {
        let repo_path = non_empty(cli.path);
        let filter_path = non_empty(cli.filter);
        let mut work_tree = non_empty(cli.work_tree);
        let mut git_dir = non_empty(cli.git_dir);

        info!(
            repo_path = ?repo_path,
            filter_path = ?filter_path,
            positional_arg = ?cli.gitargs,
            tail_logs = cli.logs,
            debug = cli.debug,
            git_dir = ?git_dir,
            "resolving invocation"
        );

        if let Some(path) = &repo_path {
            if work_tree.is_some() || git_dir.is_some() {
                return Err(IntentError::PathConflict);
            }
            work_tree = Some(path.clone());
            git_dir = Some(dot_git(path));
        }

        Ok(Self {
            repo_path,
            filter_path,
            positional_arg: cli.gitargs,
            show_version: cli.version,
            debug: cli.debug,
            tail_logs: cli.logs,
            show_config: cli.config,
            work_tree,
            git_dir,
        })
    }

    /// Hand the resolved repository paths to the git layer.
    ///
    /// Relative paths are anchored to the current directory first, so they
    /// still point at the same place after launch changes into the work
    /// tree.
    pub fn export_git_env(&self) {
        if let Some(work_tree) = &self.work_tree {
            env::set_git_work_tree_env(&anchored(work_tree));
        }
        if let Some(git_dir) = &self.git_dir {
            env::set_git_dir_env(&anchored(git_dir));
        }
    }
}

fn anchored(path: &str) -> String {
    let path = Path::new(path);
    if path.is_absolute() {
        return path.to_string_lossy().into_owned();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path).to_string_lossy().into_owned(),
        Err(_) => path.to_string_lossy().into_owned(),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// `<path>/.git`, joined the way the platform joins paths.
fn dot_git(path: &str) -> String {
    Path::new(path).join(".git").to_string_lossy().into_owned()
}
