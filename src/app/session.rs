//! app::session
//!
//! The line-driven repository session.

use std::io::{self, BufRead, Write};

use anyhow::{Context as _, Result};
use tracing::{debug, info};

use super::{known_repository_error, views, Application, Diagnostics};
use crate::core::config::{AppConfig, UserConfig};
use crate::git::Git;
use crate::i18n::TranslationSet;
use crate::logging::AppLog;

/// What a key press asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Status,
    Log,
    Branches,
    Stash,
    Reflog,
    Refresh,
    Help,
    Quit,
}

impl SessionCommand {
    /// Look a key up in the configured keybindings.
    pub fn from_key(key: &str, config: &UserConfig) -> Option<Self> {
        let bindings = &config.keybinding;
        let table = [
            (bindings.status.as_str(), SessionCommand::Status),
            (bindings.log.as_str(), SessionCommand::Log),
            (bindings.branches.as_str(), SessionCommand::Branches),
            (bindings.stash.as_str(), SessionCommand::Stash),
            (bindings.reflog.as_str(), SessionCommand::Reflog),
            (bindings.refresh.as_str(), SessionCommand::Refresh),
            (bindings.help.as_str(), SessionCommand::Help),
            (bindings.quit.as_str(), SessionCommand::Quit),
        ];
        table
            .iter()
            .find(|(bound, _)| *bound == key)
            .map(|(_, command)| *command)
    }
}

/// An open repository session.
pub struct App<I = io::StdinLock<'static>, O = io::Stdout> {
    git: Git,
    config: AppConfig,
    filter_path: Option<String>,
    log: AppLog,
    tr: TranslationSet,
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> App<I, O> {
    /// Open the repository from the environment and attach the given I/O.
    pub fn with_io(
        config: &AppConfig,
        diagnostics: &Diagnostics,
        filter_path: Option<&str>,
        input: I,
        output: O,
    ) -> Result<Self> {
        let Diagnostics { log, tr } = diagnostics.clone();

        let git = Git::open_from_env().context("opening repository")?;
        log.in_scope(|| {
            info!(
                version = %config.build.version,
                filter = ?filter_path,
                repo = ?git,
                "session started"
            )
        });

        Ok(Self {
            git,
            config: config.clone(),
            filter_path: filter_path.map(str::to_string),
            log,
            tr,
            input,
            output,
        })
    }

    /// Run the session until quit or end of input.
    pub fn run_session(&mut self) -> Result<()> {
        if let Some(filter) = &self.filter_path {
            writeln!(self.output, "{}: {}", self.tr.filter_mode_banner, filter)?;
        }
        self.render(SessionCommand::Status)?;

        loop {
            write!(self.output, "{} ", self.tr.prompt)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            let key = line.trim();
            if key.is_empty() {
                continue;
            }

            match SessionCommand::from_key(key, &self.config.user) {
                Some(SessionCommand::Quit) => break,
                Some(command) => {
                    self.log.in_scope(|| debug!(?command, "key pressed"));
                    self.render(command)?;
                }
                None => writeln!(self.output, "{}: {}", self.tr.unknown_key, key)?,
            }
        }

        writeln!(self.output, "{}", self.tr.goodbye)?;
        self.log.in_scope(|| info!("session ended"));
        Ok(())
    }

    fn render(&mut self, command: SessionCommand) -> Result<()> {
        let user = &self.config.user;
        let filter = self.filter_path.as_deref();
        let out = &mut self.output;

        match command {
            SessionCommand::Status => views::status(&self.git, user, &self.tr, out),
            SessionCommand::Log => views::log(&self.git, user, &self.tr, filter, out),
            SessionCommand::Branches => views::branches(&self.git, &self.tr, out),
            SessionCommand::Stash => views::stash(&self.git, &self.tr, filter, out),
            SessionCommand::Reflog => views::reflog(&self.git, user, &self.tr, filter, out),
            SessionCommand::Help => views::help(user, &self.tr, out),
            SessionCommand::Refresh => {
                self.git = Git::open_from_env().context("reopening repository")?;
                views::status(&self.git, user, &self.tr, out)
            }
            SessionCommand::Quit => Ok(()),
        }
    }
}

impl Application for App {
    fn new(
        config: &AppConfig,
        diagnostics: &Diagnostics,
        filter_path: Option<&str>,
    ) -> Result<Self> {
        Self::with_io(
            config,
            diagnostics,
            filter_path,
            io::stdin().lock(),
            io::stdout(),
        )
    }

    fn run(&mut self) -> Result<()> {
        self.run_session()
    }

    fn known_error(err: &anyhow::Error, tr: &TranslationSet) -> Option<String> {
        known_repository_error(err, tr)
    }
}
