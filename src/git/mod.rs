//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the only doorway to Git. No other module imports `git2`.
//! The application reads repository state exclusively through [`Git`].
//!
//! # Responsibilities
//!
//! - Opening the repository named by `GIT_DIR` / `GIT_WORK_TREE`, or
//!   discovering it from the working directory
//! - Status and state detection
//! - Branch listing
//! - History, reflog and stash queries with optional path filters
//!
//! # Example
//!
//! ```ignore
//! use gitdeck::git::Git;
//!
//! let git = Git::open_from_env()?;
//! for commit in git.recent_commits(20, Some("src"))? {
//!     println!("{} {}", commit.oid.short(7), commit.summary);
//! }
//! ```

mod interface;

pub use interface::{
    CommitInfo, Git, GitError, GitState, ReflogEntry, StashEntry, WorktreeStatus,
};
