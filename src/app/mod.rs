//! app
//!
//! The interactive application the bootstrap launches.
//!
//! # Entry Points
//!
//! The bootstrap only talks to the application through:
//! - [`Application::new`] and [`Application::run`]
//! - [`Application::known_error`], which turns recognised failures into a
//!   short user-facing message
//! - [`Diagnostics`], the application's own log and translation set
//! - [`tail::LogTail`], which follows the debug log for `--logs`
//!
//! # Session
//!
//! [`App`] opens the repository through [`crate::git::Git`] and runs a
//! line-driven session: each input line is a single key from the
//! `[keybinding]` config section, answered by a read-only view.

mod session;
pub mod tail;
mod views;

pub use session::{App, SessionCommand};
pub use tail::{LogTail, TailError};

use crate::core::config::AppConfig;
use crate::git::GitError;
use crate::i18n::TranslationSet;
use crate::logging::{AppLog, LogError};

/// An application the bootstrap can construct, run and diagnose.
pub trait Application: Sized {
    /// Construct the application for a config and optional path filter.
    ///
    /// `diagnostics` is the log and translation set the bootstrap already
    /// built for this config.
    fn new(
        config: &AppConfig,
        diagnostics: &Diagnostics,
        filter_path: Option<&str>,
    ) -> anyhow::Result<Self>;

    /// Run until the user quits.
    fn run(&mut self) -> anyhow::Result<()>;

    /// A user-facing message for errors the application recognises.
    ///
    /// Returns `None` for anything unanticipated.
    fn known_error(err: &anyhow::Error, tr: &TranslationSet) -> Option<String>;
}

/// The application's own log and translation set.
///
/// Built from the config before the application itself, so failures during
/// construction can still be logged and localized.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    pub log: AppLog,
    pub tr: TranslationSet,
}

impl Diagnostics {
    /// Build diagnostics for a config.
    ///
    /// # Errors
    ///
    /// Returns [`LogError`] if debug mode is on and the debug log cannot be
    /// opened.
    pub fn new(config: &AppConfig) -> Result<Self, LogError> {
        Ok(Self {
            log: AppLog::for_config(config)?,
            tr: TranslationSet::from_config(&config.user),
        })
    }
}

/// Map repository errors anywhere in the chain to a short message.
pub fn known_repository_error(err: &anyhow::Error, tr: &TranslationSet) -> Option<String> {
    let git_err = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<GitError>())?;

    let message = match git_err {
        GitError::NotARepo { .. } => tr.not_a_repository,
        GitError::BareRepo => tr.bare_repository,
        GitError::AccessError { .. } => tr.repository_access_denied,
        _ => return None,
    };
    Some(message.to_string())
}
