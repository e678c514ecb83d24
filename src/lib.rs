//! gitdeck - a terminal browser for git repositories
//!
//! This crate is the process bootstrap plus the small read-only session it
//! launches.
//!
//! # Architecture
//!
//! - [`cli`] - Argument parsing, resolution, mode dispatch, launch and
//!   failure classification
//! - [`logging`] - The dual-sink bootstrap logger and the application log
//! - [`app`] - The interactive session and the `--logs` tail
//! - [`core`] - Build metadata, configuration, environment handoff and
//!   domain types
//! - [`git`] - Single interface for all Git operations
//! - [`i18n`] - Translated user-facing strings
//!
//! # Invariants
//!
//! 1. Exactly one mode runs per invocation, chosen by fixed priority
//! 2. `--path` never combines with `--work-tree` or `--git-dir`
//! 3. Only `cli::run` ends the process with a failure code
//! 4. Only the [`git`] module talks to `git2`

pub mod app;
pub mod cli;
pub mod core;
pub mod git;
pub mod i18n;
pub mod logging;
