//! git::interface
//!
//! Git interface implementation using git2.
//!
//! All repository reads performed by the session flow through [`Git`], which
//! returns structured results and normalizes errors into typed categories
//! the failure classifier can recognize.
//!
//! # Error Handling
//!
//! - [`GitError::NotARepo`]: no repository at or above the path
//! - [`GitError::BareRepo`]: repository has no working tree
//! - [`GitError::AccessError`]: permission or filesystem failure
//! - [`GitError::Internal`]: anything else libgit2 reports
//!
//! # Path Filters
//!
//! History queries take an optional path filter. A commit matches when its
//! diff against its first parent (or the empty tree for a root commit)
//! touches the path. Filters are relative to the work tree; an absolute
//! filter has the work tree prefix removed first.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::env;
use crate::core::types::{BranchName, Oid, TypeError};

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("bare repository not supported")]
    BareRepo,

    /// Requested ref does not exist.
    #[error("ref not found: {refname}")]
    RefNotFound {
        /// The ref that was not found
        refname: String,
    },

    /// Object not found in repository.
    #[error("object not found: {oid}")]
    ObjectNotFound {
        /// The OID that was not found
        oid: String,
    },

    /// Invalid object id or name returned by libgit2.
    #[error("invalid value from repository: {0}")]
    InvalidValue(#[from] TypeError),

    /// Permission or filesystem error.
    #[error("repository access error: {message}")]
    AccessError {
        /// Description of the error
        message: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Create a GitError from a git2::Error with context.
    fn from_git2(err: git2::Error, context: &str) -> Self {
        match (err.code(), err.class()) {
            (git2::ErrorCode::NotFound, _) if context.contains("ref") || context == "HEAD" => {
                GitError::RefNotFound {
                    refname: context.to_string(),
                }
            }
            (git2::ErrorCode::NotFound, _) => GitError::ObjectNotFound {
                oid: context.to_string(),
            },
            (git2::ErrorCode::Locked, _) => GitError::AccessError {
                message: format!("repository is locked: {}", err.message()),
            },
            (_, git2::ErrorClass::Os) | (_, git2::ErrorClass::Filesystem) => {
                GitError::AccessError {
                    message: format!("{}: {}", context, err.message()),
                }
            }
            _ => GitError::Internal {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }

    /// Classify a failure to open a repository.
    fn from_open(err: git2::Error, path: &Path) -> Self {
        match (err.code(), err.class()) {
            (git2::ErrorCode::NotFound, _) => GitError::NotARepo {
                path: path.to_path_buf(),
            },
            (_, git2::ErrorClass::Os) | (_, git2::ErrorClass::Filesystem) => {
                GitError::AccessError {
                    message: format!("{}: {}", path.display(), err.message()),
                }
            }
            _ => GitError::Internal {
                message: format!("{}: {}", path.display(), err.message()),
            },
        }
    }
}

/// State of in-progress Git operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitState {
    /// No operation in progress.
    Clean,
    /// Rebase in progress.
    Rebase,
    /// Merge in progress.
    Merge,
    /// Cherry-pick in progress.
    CherryPick,
    /// Revert in progress.
    Revert,
    /// Bisect in progress.
    Bisect,
    /// Apply mailbox in progress.
    ApplyMailbox,
}

impl GitState {
    /// Check if any operation is in progress.
    ///
    /// # Example
    ///
    /// ```
    /// use gitdeck::git::GitState;
    ///
    /// assert!(!GitState::Clean.is_in_progress());
    /// assert!(GitState::Merge.is_in_progress());
    /// ```
    pub fn is_in_progress(&self) -> bool {
        !matches!(self, GitState::Clean)
    }

    /// Get a human-readable description of the state.
    pub fn description(&self) -> &'static str {
        match self {
            GitState::Clean => "clean",
            GitState::Rebase => "rebase",
            GitState::Merge => "merge",
            GitState::CherryPick => "cherry-pick",
            GitState::Revert => "revert",
            GitState::Bisect => "bisect",
            GitState::ApplyMailbox => "apply-mailbox",
        }
    }
}

impl std::fmt::Display for GitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Summary of working tree status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorktreeStatus {
    /// Number of staged changes
    pub staged: usize,
    /// Number of unstaged changes to tracked files
    pub unstaged: usize,
    /// Number of untracked files (if requested)
    pub untracked: usize,
    /// Whether there are unresolved conflicts
    pub has_conflicts: bool,
}

impl WorktreeStatus {
    /// Check if the worktree is completely clean (untracked files aside).
    pub fn is_clean(&self) -> bool {
        self.staged == 0 && self.unstaged == 0 && !self.has_conflicts
    }
}

/// Information about a commit.
#[derive(Debug, Clone)]
pub struct CommitInfo {
    /// The commit OID
    pub oid: Oid,
    /// First line of the commit message
    pub summary: String,
    /// Author name
    pub author_name: String,
    /// Author timestamp
    pub author_time: chrono::DateTime<chrono::Utc>,
}

/// One entry of the HEAD reflog.
#[derive(Debug, Clone)]
pub struct ReflogEntry {
    /// Commit HEAD moved to
    pub oid: Oid,
    /// Reflog message (e.g. "commit: add parser")
    pub message: String,
}

/// One stash entry.
#[derive(Debug, Clone)]
pub struct StashEntry {
    /// Position in the stash list (`stash@{index}`)
    pub index: usize,
    /// Stash commit
    pub oid: Oid,
    /// Stash message
    pub message: String,
}

/// The Git interface.
///
/// This is the single point of interaction with Git. No other module
/// imports `git2` directly.
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    // =========================================================================
    // Repository Opening and Info
    // =========================================================================

    /// Open the repository described by the process environment.
    ///
    /// If `GIT_DIR` is set it is opened directly and `GIT_WORK_TREE` (when
    /// also set) becomes its working directory. Otherwise the repository is
    /// discovered from the current directory.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    /// - [`GitError::BareRepo`] if the repository has no working directory
    /// - [`GitError::AccessError`] if the location cannot be read
    pub fn open_from_env() -> Result<Self, GitError> {
        match env::git_dir() {
            Some(git_dir) => {
                let repo = git2::Repository::open(&git_dir)
                    .map_err(|e| GitError::from_open(e, &git_dir))?;
                if let Some(work_tree) = env::git_work_tree() {
                    repo.set_workdir(&work_tree, false)
                        .map_err(|e| GitError::from_open(e, &work_tree))?;
                }
                Self::from_repo(repo)
            }
            None => {
                let cwd = std::env::current_dir().map_err(|e| GitError::AccessError {
                    message: format!("cannot read current directory: {}", e),
                })?;
                Self::open(&cwd)
            }
        }
    }

    /// Open a repository at the given path.
    ///
    /// Uses `git2::Repository::discover`, so `path` can be any directory
    /// within the repository.
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|e| GitError::from_open(e, path))?;
        Self::from_repo(repo)
    }

    fn from_repo(repo: git2::Repository) -> Result<Self, GitError> {
        if repo.is_bare() {
            return Err(GitError::BareRepo);
        }
        Ok(Self { repo })
    }

    /// Root of the working tree.
    pub fn work_dir(&self) -> Result<&Path, GitError> {
        self.repo.workdir().ok_or(GitError::BareRepo)
    }

    // =========================================================================
    // State and Status
    // =========================================================================

    /// Get the current Git state (rebase, merge, etc.).
    pub fn state(&self) -> GitState {
        match self.repo.state() {
            git2::RepositoryState::Clean => GitState::Clean,
            git2::RepositoryState::Rebase
            | git2::RepositoryState::RebaseInteractive
            | git2::RepositoryState::RebaseMerge => GitState::Rebase,
            git2::RepositoryState::Merge => GitState::Merge,
            git2::RepositoryState::CherryPick | git2::RepositoryState::CherryPickSequence => {
                GitState::CherryPick
            }
            git2::RepositoryState::Revert | git2::RepositoryState::RevertSequence => {
                GitState::Revert
            }
            git2::RepositoryState::Bisect => GitState::Bisect,
            git2::RepositoryState::ApplyMailbox | git2::RepositoryState::ApplyMailboxOrRebase => {
                GitState::ApplyMailbox
            }
        }
    }

    /// Get working tree status summary.
    ///
    /// If `include_untracked` is false, untracked files are not counted.
    pub fn worktree_status(&self, include_untracked: bool) -> Result<WorktreeStatus, GitError> {
        let mut opts = git2::StatusOptions::new();
        opts.include_untracked(include_untracked)
            .include_ignored(false);

        let statuses = self
            .repo
            .statuses(Some(&mut opts))
            .map_err(|e| GitError::from_git2(e, "status"))?;

        let mut result = WorktreeStatus::default();

        for entry in statuses.iter() {
            let status = entry.status();

            if status.is_conflicted() {
                result.has_conflicts = true;
            }

            if status.is_index_new()
                || status.is_index_modified()
                || status.is_index_deleted()
                || status.is_index_renamed()
                || status.is_index_typechange()
            {
                result.staged += 1;
            }

            if status.is_wt_modified()
                || status.is_wt_deleted()
                || status.is_wt_renamed()
                || status.is_wt_typechange()
            {
                result.unstaged += 1;
            }

            if status.is_wt_new() {
                result.untracked += 1;
            }
        }

        Ok(result)
    }

    // =========================================================================
    // Refs and Branches
    // =========================================================================

    /// Get HEAD commit OID.
    ///
    /// # Errors
    ///
    /// - [`GitError::RefNotFound`] if HEAD is unborn (new repository)
    pub fn head_oid(&self) -> Result<Oid, GitError> {
        let oid = self
            .repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .map_err(|e| GitError::from_git2(e, "HEAD"))?
            .id();

        Ok(Oid::new(oid.to_string())?)
    }

    /// Check if a ref exists.
    pub fn ref_exists(&self, refname: &str) -> bool {
        self.repo.find_reference(refname).is_ok()
    }

    /// Get the current branch name, if on a branch.
    ///
    /// Returns `None` if HEAD is detached or unborn.
    pub fn current_branch(&self) -> Result<Option<BranchName>, GitError> {
        let head = match self.repo.head() {
            Ok(h) => h,
            Err(e)
                if e.code() == git2::ErrorCode::UnbornBranch
                    || e.code() == git2::ErrorCode::NotFound =>
            {
                return Ok(None)
            }
            Err(e) => return Err(GitError::from_git2(e, "HEAD")),
        };

        if head.is_branch() {
            if let Some(name) = head.shorthand() {
                return Ok(Some(BranchName::new(name)?));
            }
        }

        Ok(None)
    }

    /// List local branches, sorted by name.
    pub fn list_branches(&self) -> Result<Vec<BranchName>, GitError> {
        let branches = self
            .repo
            .branches(Some(git2::BranchType::Local))
            .map_err(|e| GitError::from_git2(e, "refs/heads"))?;

        let mut names = Vec::new();
        for branch in branches {
            let (branch, _) = branch.map_err(|e| GitError::from_git2(e, "refs/heads"))?;
            if let Some(name) = branch
                .name()
                .map_err(|e| GitError::from_git2(e, "refs/heads"))?
            {
                names.push(BranchName::new(name)?);
            }
        }
        names.sort();

        Ok(names)
    }

    // =========================================================================
    // History
    // =========================================================================

    /// Walk history from HEAD, newest first.
    ///
    /// Returns at most `limit` commits. With a `filter`, only commits that
    /// touch the path count toward the limit. An unborn HEAD yields an empty
    /// list.
    pub fn recent_commits(
        &self,
        limit: usize,
        filter: Option<&str>,
    ) -> Result<Vec<CommitInfo>, GitError> {
        match self.repo.head() {
            Ok(_) => {}
            Err(e)
                if e.code() == git2::ErrorCode::UnbornBranch
                    || e.code() == git2::ErrorCode::NotFound =>
            {
                return Ok(Vec::new())
            }
            Err(e) => return Err(GitError::from_git2(e, "HEAD")),
        }
        let filter = self.path_filter(filter)?;

        let mut revwalk = self
            .repo
            .revwalk()
            .map_err(|e| GitError::from_git2(e, "revwalk"))?;
        revwalk
            .push_head()
            .map_err(|e| GitError::from_git2(e, "HEAD"))?;
        revwalk
            .set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)
            .map_err(|e| GitError::from_git2(e, "revwalk"))?;

        let mut commits = Vec::new();
        for oid in revwalk {
            if commits.len() >= limit {
                break;
            }
            let oid = oid.map_err(|e| GitError::from_git2(e, "revwalk"))?;
            let commit = self.find_commit(oid)?;
            if !self.matches(&commit, &filter)? {
                continue;
            }
            commits.push(Self::describe_commit(&commit)?);
        }

        Ok(commits)
    }

    /// Read the HEAD reflog, newest first.
    pub fn reflog(&self, limit: usize, filter: Option<&str>) -> Result<Vec<ReflogEntry>, GitError> {
        let reflog = self
            .repo
            .reflog("HEAD")
            .map_err(|e| GitError::from_git2(e, "HEAD"))?;
        let filter = self.path_filter(filter)?;

        let mut entries = Vec::new();
        for entry in reflog.iter() {
            if entries.len() >= limit {
                break;
            }
            let id = entry.id_new();
            if filter != PathFilter::Everything {
                let commit = self.find_commit(id)?;
                if !self.matches(&commit, &filter)? {
                    continue;
                }
            }
            entries.push(ReflogEntry {
                oid: Oid::new(id.to_string())?,
                message: entry.message().unwrap_or("").to_string(),
            });
        }

        Ok(entries)
    }

    /// List stashes, newest first.
    ///
    /// Stash indices are preserved when a filter drops entries.
    pub fn stashes(&self, filter: Option<&str>) -> Result<Vec<StashEntry>, GitError> {
        if !self.ref_exists("refs/stash") {
            return Ok(Vec::new());
        }

        let reflog = self
            .repo
            .reflog("refs/stash")
            .map_err(|e| GitError::from_git2(e, "refs/stash"))?;
        let filter = self.path_filter(filter)?;

        let mut entries = Vec::new();
        for (index, entry) in reflog.iter().enumerate() {
            let id = entry.id_new();
            if filter != PathFilter::Everything {
                let commit = self.find_commit(id)?;
                if !self.matches(&commit, &filter)? {
                    continue;
                }
            }
            entries.push(StashEntry {
                index,
                oid: Oid::new(id.to_string())?,
                message: entry.message().unwrap_or("").to_string(),
            });
        }

        Ok(entries)
    }

    fn find_commit(&self, oid: git2::Oid) -> Result<git2::Commit<'_>, GitError> {
        self.repo
            .find_commit(oid)
            .map_err(|e| GitError::from_git2(e, &oid.to_string()))
    }

    fn describe_commit(commit: &git2::Commit<'_>) -> Result<CommitInfo, GitError> {
        let author = commit.author();
        let author_time = chrono::DateTime::from_timestamp(author.when().seconds(), 0)
            .unwrap_or(chrono::DateTime::UNIX_EPOCH);

        Ok(CommitInfo {
            oid: Oid::new(commit.id().to_string())?,
            summary: commit.summary().unwrap_or("").to_string(),
            author_name: author.name().unwrap_or("").to_string(),
            author_time,
        })
    }

    /// Turn a user filter into a pathspec relative to the work tree.
    ///
    /// Absolute filters have the work tree prefix stripped; one that points
    /// outside the work tree matches nothing.
    fn path_filter(&self, filter: Option<&str>) -> Result<PathFilter, GitError> {
        let Some(filter) = filter else {
            return Ok(PathFilter::Everything);
        };
        let path = Path::new(filter);
        if !path.is_absolute() {
            return Ok(PathFilter::Pathspec(normalize_filter(filter).to_string()));
        }

        let work_dir = self.work_dir()?;
        let relative = match relative_to(path, work_dir) {
            Some(relative) => relative,
            None => return Ok(PathFilter::Nothing),
        };
        if relative.is_empty() {
            Ok(PathFilter::Everything)
        } else {
            Ok(PathFilter::Pathspec(relative))
        }
    }

    fn matches(&self, commit: &git2::Commit<'_>, filter: &PathFilter) -> Result<bool, GitError> {
        match filter {
            PathFilter::Everything => Ok(true),
            PathFilter::Nothing => Ok(false),
            PathFilter::Pathspec(spec) => self.commit_touches(commit, spec),
        }
    }

    /// Check whether a commit changes anything under `pathspec`.
    fn commit_touches(&self, commit: &git2::Commit<'_>, pathspec: &str) -> Result<bool, GitError> {
        let context = commit.id().to_string();
        let tree = commit
            .tree()
            .map_err(|e| GitError::from_git2(e, &context))?;
        let parent_tree = match commit.parent(0) {
            Ok(parent) => Some(parent.tree().map_err(|e| GitError::from_git2(e, &context))?),
            Err(_) => None,
        };

        let mut opts = git2::DiffOptions::new();
        opts.pathspec(pathspec);

        let diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut opts))
            .map_err(|e| GitError::from_git2(e, &context))?;

        Ok(diff.deltas().next().is_some())
    }
}

/// A history filter resolved against the work tree.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PathFilter {
    Everything,
    Pathspec(String),
    Nothing,
}

/// `path` relative to `root` as a `/`-separated string.
///
/// Symlinked roots (such as a temp dir behind `/tmp`) are retried with
/// canonical paths. The path itself may no longer exist on disk.
fn relative_to(path: &Path, root: &Path) -> Option<String> {
    let canonical_root = root.canonicalize().ok();
    let stripped = path
        .strip_prefix(root)
        .ok()
        .map(Path::to_path_buf)
        .or_else(|| {
            let root = canonical_root.as_deref()?;
            path.strip_prefix(root).ok().map(Path::to_path_buf).or_else(|| {
                let path = path.canonicalize().ok()?;
                path.strip_prefix(root).ok().map(Path::to_path_buf)
            })
        })?;

    let parts: Vec<String> = stripped
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}

/// Strip a leading `./` and trailing slashes so the filter is a pathspec.
fn normalize_filter(path: &str) -> &str {
    let path = path.strip_prefix("./").unwrap_or(path);
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        path
    } else {
        trimmed
    }
}
