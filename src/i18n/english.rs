use super::TranslationSet;

pub(super) fn translations() -> TranslationSet {
    TranslationSet {
        error_occurred: "An error occurred! Please create an issue at: https://github.com/gitdeck/gitdeck/issues",
        not_a_repository: "Error: must be run inside a git repository",
        bare_repository: "Error: bare repositories are not supported, pass --work-tree to pick a working tree",
        repository_access_denied: "Error: the repository could not be read, check that you have permission to access it",
        log_file_missing: "Log file does not exist. Run `gitdeck --debug` first to create the log file",
        tailing_log_file: "Tailing log file",
        filter_mode_banner: "Filtering by path",
        branch_label: "On branch",
        detached_head: "HEAD detached",
        operation_in_progress: "in progress",
        staged_label: "staged",
        unstaged_label: "unstaged",
        untracked_label: "untracked",
        clean_worktree: "working tree clean",
        no_commits: "No commits",
        no_branches: "No branches",
        no_stashes: "No stash entries",
        no_reflog: "No reflog entries",
        unknown_key: "Unknown key",
        keybindings_title: "Keybindings",
        prompt: "gitdeck>",
        goodbye: "Bye",
    }
}
