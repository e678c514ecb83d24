//! cli
//!
//! The process bootstrap.
//!
//! # Flow
//!
//! 1. Open the bootstrap [`Logger`] and install it for the whole run
//! 2. Parse arguments ([`args`]) and resolve them ([`intent`])
//! 3. Export the resolved repository paths for the git layer
//! 4. Dispatch exactly one mode ([`dispatch`]); launch runs the application
//!    and classifies its failures ([`failure`])
//!
//! Every fatal condition travels back here as a [`Fatal`]; [`run`] is the
//! only place that turns one into a failing exit code.

pub mod args;
pub mod dispatch;
pub mod failure;
pub mod intent;
pub mod launch;

pub use args::Cli;
pub use dispatch::{Host, Mode};
pub use failure::ErrorReport;
pub use intent::{IntentError, RunIntent};
pub use launch::Bootstrap;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use thiserror::Error;
use tracing::error;

use crate::app::{App, TailError};
use crate::core::build::BuildInfo;
use crate::core::config::ConfigError;
use crate::logging::{LogError, Logger, BOOTSTRAP_LOG_PATH};

/// Conditions that end the process with a failure.
#[derive(Debug, Error)]
pub enum Fatal {
    #[error(transparent)]
    Intent(#[from] IntentError),

    #[error("failed to change directory to {path}: {source}")]
    ChangeDir { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("unable to open application log: {0}")]
    AppLog(#[from] LogError),

    #[error(transparent)]
    Tail(#[from] TailError),

    #[error("{0}")]
    Report(ErrorReport),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Run the bootstrap.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> ExitCode {
    let logger = match Logger::open(BOOTSTRAP_LOG_PATH) {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("unable to log to file: {}", err);
            return ExitCode::FAILURE;
        }
    };
    let _guard = logger.install();

    let cli = Cli::parse_args();
    let mut host = Bootstrap::<App>::new(BuildInfo::current());

    match bootstrap(cli, &mut host) {
        Ok(_) => ExitCode::SUCCESS,
        Err(fatal) => {
            error!("{}", fatal);
            ExitCode::FAILURE
        }
    }
}

/// Resolve, export and dispatch parsed arguments on `host`.
pub fn bootstrap<H: Host>(cli: Cli, host: &mut H) -> Result<Mode, Fatal> {
    let intent = RunIntent::resolve(cli)?;
    intent.export_git_env();
    dispatch::dispatch(&intent, host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingHost {
        calls: usize,
    }

    impl Host for CountingHost {
        fn version(&mut self) -> Result<(), Fatal> {
            self.calls += 1;
            Ok(())
        }
        fn default_config(&mut self) -> Result<(), Fatal> {
            self.calls += 1;
            Ok(())
        }
        fn tail_logs(&mut self) -> Result<(), Fatal> {
            self.calls += 1;
            Ok(())
        }
        fn launch(&mut self, _: &RunIntent) -> Result<(), Fatal> {
            self.calls += 1;
            Ok(())
        }
    }

    #[test]
    fn conflict_stops_before_any_mode() {
        let mut host = CountingHost::default();
        let cli = Cli {
            path: Some("repo".into()),
            git_dir: Some("other/.git".into()),
            version: true,
            ..Default::default()
        };

        let err = bootstrap(cli, &mut host).unwrap_err();
        assert!(matches!(err, Fatal::Intent(IntentError::PathConflict)));
        assert_eq!(host.calls, 0);
    }

    #[test]
    fn version_runs_once() {
        let mut host = CountingHost::default();
        let cli = Cli {
            version: true,
            config: true,
            ..Default::default()
        };

        assert_eq!(bootstrap(cli, &mut host).unwrap(), Mode::Version);
        assert_eq!(host.calls, 1);
    }

    #[test]
    fn report_displays_verbatim() {
        let fatal = Fatal::Report(ErrorReport::Known {
            message: "repository not found".into(),
        });
        assert_eq!(fatal.to_string(), "repository not found");
    }
}
