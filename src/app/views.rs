//! app::views
//!
//! Read-only renderings of repository state, one per session command.

use std::io::Write;

use anyhow::Result;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};

use crate::core::config::UserConfig;
use crate::git::Git;
use crate::i18n::TranslationSet;

const FALLBACK_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub(super) fn status(
    git: &Git,
    user: &UserConfig,
    tr: &TranslationSet,
    out: &mut impl Write,
) -> Result<()> {
    match git.current_branch()? {
        Some(branch) => writeln!(out, "{} {}", tr.branch_label, branch)?,
        None => match git.head_oid() {
            Ok(oid) => writeln!(out, "{} {}", tr.detached_head, oid.short(7))?,
            Err(_) => writeln!(out, "{}", tr.no_commits)?,
        },
    }

    let state = git.state();
    if state.is_in_progress() {
        writeln!(out, "{} {}", state, tr.operation_in_progress)?;
    }

    let counts = git.worktree_status(user.git.show_untracked)?;
    if counts.is_clean() && counts.untracked == 0 {
        writeln!(out, "{}", tr.clean_worktree)?;
    } else if user.gui.show_file_counts {
        writeln!(
            out,
            "{} {}, {} {}, {} {}",
            counts.staged,
            tr.staged_label,
            counts.unstaged,
            tr.unstaged_label,
            counts.untracked,
            tr.untracked_label
        )?;
    }
    Ok(())
}

pub(super) fn log(
    git: &Git,
    user: &UserConfig,
    tr: &TranslationSet,
    filter: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let commits = git.recent_commits(user.git.log_limit, filter)?;
    if commits.is_empty() {
        writeln!(out, "{}", tr.no_commits)?;
        return Ok(());
    }
    for commit in commits {
        writeln!(
            out,
            "{} {} {} {}",
            commit.oid.short(7),
            format_time(&commit.author_time, &user.gui.time_format),
            commit.author_name,
            commit.summary
        )?;
    }
    Ok(())
}

pub(super) fn branches(git: &Git, tr: &TranslationSet, out: &mut impl Write) -> Result<()> {
    let names = git.list_branches()?;
    if names.is_empty() {
        writeln!(out, "{}", tr.no_branches)?;
        return Ok(());
    }
    let current = git.current_branch()?;
    for name in names {
        let marker = if current.as_ref() == Some(&name) { "*" } else { " " };
        writeln!(out, "{} {}", marker, name)?;
    }
    Ok(())
}

pub(super) fn stash(
    git: &Git,
    tr: &TranslationSet,
    filter: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let entries = git.stashes(filter)?;
    if entries.is_empty() {
        writeln!(out, "{}", tr.no_stashes)?;
        return Ok(());
    }
    for entry in entries {
        writeln!(out, "stash@{{{}}}: {}", entry.index, entry.message)?;
    }
    Ok(())
}

pub(super) fn reflog(
    git: &Git,
    user: &UserConfig,
    tr: &TranslationSet,
    filter: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let entries = git.reflog(user.git.log_limit, filter)?;
    if entries.is_empty() {
        writeln!(out, "{}", tr.no_reflog)?;
        return Ok(());
    }
    for entry in entries {
        writeln!(out, "{} {}", entry.oid.short(7), entry.message)?;
    }
    Ok(())
}

pub(super) fn help(user: &UserConfig, tr: &TranslationSet, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}:", tr.keybindings_title)?;
    for (action, key) in user.keybinding.entries() {
        writeln!(out, "  {}  {}", key, action)?;
    }
    Ok(())
}

/// Render a commit time in local time.
///
/// An unparseable format string falls back to an ISO-like layout instead of
/// failing the whole view.
fn format_time(time: &DateTime<Utc>, format: &str) -> String {
    let format = if StrftimeItems::new(format).any(|item| item == Item::Error) {
        FALLBACK_TIME_FORMAT
    } else {
        format
    };
    time.with_timezone(&Local).format(format).to_string()
}
