//! logging
//!
//! Logging sinks built on `tracing-subscriber`.
//!
//! Two independent sinks exist, each a constructed [`tracing::Dispatch`]
//! rather than a process-global subscriber:
//!
//! - [`Logger`] is the bootstrap log. Every line goes to standard output and
//!   to an append-only file, in the same order on both. It is installed for
//!   the duration of the bootstrap with [`Logger::install`].
//! - [`AppLog`] is the application log. In debug mode it appends to
//!   `<config dir>/development.log` at the level named by `LOG_LEVEL`;
//!   otherwise it discards everything.
//!
//! Both use the same line layout: `YYYY/MM/DD HH:MM:SS LEVEL file:line: message`.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;
use tracing::dispatcher::{self, DefaultGuard};
use tracing::{Dispatch, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::{self, time::ChronoLocal, writer::MakeWriterExt, MakeWriter};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{prelude::*, Layer};

use crate::core::config::AppConfig;

/// Bootstrap log file, relative to the directory the process starts in.
pub const BOOTSTRAP_LOG_PATH: &str = "../gitdeck.log";

/// Environment variable selecting the application log level.
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

const TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Errors from opening a log sink.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("file={path} err={source}")]
    Open {
        path: PathBuf,
        source: io::Error,
    },
}

/// Dual-sink bootstrap logger.
pub struct Logger {
    dispatch: Dispatch,
    path: PathBuf,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger").field("path", &self.path).finish()
    }
}

impl Logger {
    /// Open the log file and fan out to standard output.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Open`] if the file cannot be opened or created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LogError> {
        Self::with_console(path, io::stdout)
    }

    /// Open the log file and fan out to the given console writer.
    pub fn with_console<W>(path: impl AsRef<Path>, console: W) -> Result<Self, LogError>
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let path = path.as_ref().to_path_buf();
        let file = open_append(&path)?;

        let layer = line_layer(console.and(Arc::new(file))).with_filter(LevelFilter::INFO);
        let dispatch = Dispatch::new(tracing_subscriber::registry().with(layer));

        Ok(Self { dispatch, path })
    }

    /// Route this thread's `tracing` events to the logger until the guard
    /// is dropped.
    pub fn install(&self) -> DefaultGuard {
        dispatcher::set_default(&self.dispatch)
    }
}

/// The application's own log.
#[derive(Clone)]
pub struct AppLog {
    dispatch: Dispatch,
}

impl std::fmt::Debug for AppLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppLog").finish_non_exhaustive()
    }
}

impl AppLog {
    /// Build the application log for a config.
    ///
    /// Debug runs append to [`AppConfig::log_path`]; other runs get a
    /// disabled log.
    pub fn for_config(config: &AppConfig) -> Result<Self, LogError> {
        if !config.debug {
            return Ok(Self::disabled());
        }
        Self::to_file(config.log_path(), level_from_env())
    }

    /// Append to a file at the given level.
    pub fn to_file(path: impl AsRef<Path>, level: LevelFilter) -> Result<Self, LogError> {
        let file = open_append(path.as_ref())?;
        let layer = line_layer(Arc::new(file)).with_filter(level);
        Ok(Self {
            dispatch: Dispatch::new(tracing_subscriber::registry().with(layer)),
        })
    }

    /// A log that drops every event.
    pub fn disabled() -> Self {
        Self {
            dispatch: Dispatch::none(),
        }
    }

    /// Run `f` with `tracing` events routed to this log.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        dispatcher::with_default(&self.dispatch, f)
    }

    /// Record an error-level line.
    pub fn error(&self, message: &str) {
        self.in_scope(|| tracing::error!("{}", message));
    }
}

/// Level named by `LOG_LEVEL`, defaulting to debug.
fn level_from_env() -> LevelFilter {
    std::env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|value| LevelFilter::from_str(value.trim()).ok())
        .unwrap_or(LevelFilter::DEBUG)
}

fn open_append(path: &Path) -> Result<File, LogError> {
    OpenOptions::new()
        .read(true)
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LogError::Open {
            path: path.to_path_buf(),
            source: e,
        })
}

fn line_layer<S, W>(writer: W) -> impl Layer<S> + Send + Sync
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .with_writer(writer)
        .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_ansi(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn captured_logger(path: &Path) -> (Logger, Captured) {
        let console = Captured::default();
        let sink = console.clone();
        let logger = Logger::with_console(path, move || sink.clone()).unwrap();
        (logger, console)
    }

    #[test]
    fn lines_reach_both_sinks_in_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("boot.log");
        let (logger, console) = captured_logger(&path);

        {
            let _guard = logger.install();
            tracing::info!("first");
            tracing::info!("second");
            tracing::error!("third");
        }

        let file = std::fs::read_to_string(&path).unwrap();
        assert_eq!(console.contents(), file);

        let first = file.find("first").unwrap();
        let second = file.find("second").unwrap();
        let third = file.find("third").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn line_prefix_has_date_time_and_location() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("boot.log");
        let (logger, console) = captured_logger(&path);

        {
            let _guard = logger.install();
            tracing::info!("hello");
        }

        let line = console.contents();
        let bytes = line.as_bytes();
        // YYYY/MM/DD HH:MM:SS
        assert_eq!(bytes[4], b'/');
        assert_eq!(bytes[7], b'/');
        assert_eq!(bytes[13], b':');
        assert!(line.contains("logging.rs:"), "no source location: {line}");
        assert!(line.trim_end().ends_with("hello"));
    }

    #[test]
    fn appends_to_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("boot.log");
        std::fs::write(&path, "earlier run\n").unwrap();

        let (logger, _console) = captured_logger(&path);
        {
            let _guard = logger.install();
            tracing::info!("later run");
        }

        let file = std::fs::read_to_string(&path).unwrap();
        assert!(file.starts_with("earlier run\n"));
        assert!(file.contains("later run"));
    }

    #[test]
    fn open_fails_for_missing_directory() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing/dir/boot.log");

        let err = Logger::open(&path).unwrap_err();
        assert!(err.to_string().starts_with("file="));
    }

    #[test]
    fn events_outside_install_are_not_logged() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("boot.log");
        let (logger, console) = captured_logger(&path);

        drop(logger.install());
        tracing::info!("nobody listening");

        assert!(console.contents().is_empty());
    }

    #[test]
    fn app_log_writes_at_level() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("development.log");
        let log = AppLog::to_file(&path, LevelFilter::WARN).unwrap();

        log.in_scope(|| {
            tracing::info!("too quiet");
            tracing::warn!("loud enough");
        });
        log.error("stack trace here");

        let file = std::fs::read_to_string(&path).unwrap();
        assert!(!file.contains("too quiet"));
        assert!(file.contains("loud enough"));
        assert!(file.contains("stack trace here"));
    }

    #[test]
    fn disabled_app_log_drops_events() {
        let log = AppLog::disabled();
        let value = log.in_scope(|| {
            tracing::error!("dropped");
            7
        });
        assert_eq!(value, 7);
    }
}
