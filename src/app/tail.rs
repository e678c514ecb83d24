//! app::tail
//!
//! Follow the debug log for `--logs`.
//!
//! The file is printed from the start, then polled for growth. A file that
//! shrinks is treated as truncated and read again from the beginning.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::i18n::TranslationSet;

/// How often [`LogTail::follow`] checks for new lines.
pub const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Errors from following the log.
#[derive(Debug, Error)]
pub enum TailError {
    /// The log has not been created yet.
    #[error("{message}")]
    Missing { path: PathBuf, message: String },

    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
}

/// A followed log file.
#[derive(Debug)]
pub struct LogTail {
    path: PathBuf,
    file: File,
    offset: u64,
}

impl LogTail {
    /// Open an existing log file.
    ///
    /// # Errors
    ///
    /// [`TailError::Missing`] carries the localized hint to run with
    /// `--debug` first.
    pub fn open(path: impl AsRef<Path>, tr: &TranslationSet) -> Result<Self, TailError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(TailError::Missing {
                path,
                message: tr.log_file_missing.to_string(),
            });
        }
        let file = File::open(&path).map_err(|source| TailError::Read {
            path: path.clone(),
            source,
        })?;
        Ok(Self {
            path,
            file,
            offset: 0,
        })
    }

    /// Copy anything appended since the last poll. Returns the byte count.
    pub fn poll(&mut self, out: &mut impl Write) -> io::Result<u64> {
        let len = self.file.metadata()?.len();
        if len < self.offset {
            debug!(path = %self.path.display(), "log truncated");
            self.offset = 0;
        }
        if len == self.offset {
            return Ok(0);
        }

        self.file.seek(SeekFrom::Start(self.offset))?;
        let copied = io::copy(&mut (&self.file).take(len - self.offset), out)?;
        self.offset += copied;
        out.flush()?;
        Ok(copied)
    }

    /// Poll forever. Only returns on a read or write failure.
    pub fn follow(mut self, out: &mut impl Write, interval: Duration) -> Result<(), TailError> {
        loop {
            self.poll(out).map_err(|source| TailError::Read {
                path: self.path.clone(),
                source,
            })?;
            thread::sleep(interval);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::OpenOptions;
    use tempfile::TempDir;

    fn tr() -> TranslationSet {
        TranslationSet::for_language("en")
    }

    fn append(path: &Path, text: &str) {
        let mut file = OpenOptions::new().append(true).open(path).unwrap();
        file.write_all(text.as_bytes()).unwrap();
    }

    #[test]
    fn missing_file_reports_hint() {
        let temp = TempDir::new().unwrap();
        let err = LogTail::open(temp.path().join("development.log"), &tr()).unwrap_err();

        assert!(matches!(err, TailError::Missing { .. }));
        assert_eq!(err.to_string(), tr().log_file_missing);
    }

    #[test]
    fn poll_prints_existing_then_new_lines() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("development.log");
        std::fs::write(&path, "one\n").unwrap();

        let mut tail = LogTail::open(&path, &tr()).unwrap();
        let mut out = Vec::new();

        assert_eq!(tail.poll(&mut out).unwrap(), 4);
        assert_eq!(tail.poll(&mut out).unwrap(), 0);

        append(&path, "two\n");
        tail.poll(&mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn truncated_file_is_reread() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("development.log");
        std::fs::write(&path, "a long first line\n").unwrap();

        let mut tail = LogTail::open(&path, &tr()).unwrap();
        let mut out = Vec::new();
        tail.poll(&mut out).unwrap();

        std::fs::write(&path, "short\n").unwrap();
        let mut out = Vec::new();
        tail.poll(&mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "short\n");
    }
}
