//! core::env
//!
//! Hand-off of resolved repository paths to the git layer.
//!
//! The bootstrap exports `GIT_WORK_TREE` and `GIT_DIR` once it has resolved
//! the command line; [`crate::git::Git::open_from_env`] reads them back when
//! the application opens the repository. These are the only process
//! environment writes in the crate and happen before anything else runs.

use std::path::PathBuf;

/// Environment variable naming the working tree.
pub const GIT_WORK_TREE: &str = "GIT_WORK_TREE";

/// Environment variable naming the git metadata directory.
pub const GIT_DIR: &str = "GIT_DIR";

/// Export the working tree path for the git layer.
pub fn set_git_work_tree_env(path: &str) {
    std::env::set_var(GIT_WORK_TREE, path);
}

/// Export the git directory path for the git layer.
pub fn set_git_dir_env(path: &str) {
    std::env::set_var(GIT_DIR, path);
}

/// Read back the exported working tree, ignoring empty values.
pub fn git_work_tree() -> Option<PathBuf> {
    non_empty_var(GIT_WORK_TREE)
}

/// Read back the exported git directory, ignoring empty values.
pub fn git_dir() -> Option<PathBuf> {
    non_empty_var(GIT_DIR)
}

fn non_empty_var(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
