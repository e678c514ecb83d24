//! cli::failure
//!
//! Two-tier classification of application failures.
//!
//! An error the application recognises is reported with its short message.
//! Anything else gets the full cause chain plus a backtrace, which is also
//! recorded in the application log.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;

use crate::app::{Application, Diagnostics};

/// What the user is told about a failed launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorReport {
    /// The application recognised the error.
    Known { message: String },
    /// Unanticipated failure with its trace.
    Unknown { headline: String, trace: String },
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorReport::Known { message } => write!(f, "{}", message),
            ErrorReport::Unknown { headline, trace } => write!(f, "{}\n\n{}", headline, trace),
        }
    }
}

/// Classify an error from constructing or running `A`.
pub fn classify<A: Application>(err: &anyhow::Error, diagnostics: &Diagnostics) -> ErrorReport {
    if let Some(message) = A::known_error(err, &diagnostics.tr) {
        return ErrorReport::Known { message };
    }

    let trace = capture_trace(err);
    diagnostics.log.error(&trace);

    ErrorReport::Unknown {
        headline: diagnostics.tr.error_occurred.to_string(),
        trace,
    }
}

/// The error's cause chain followed by a backtrace.
///
/// Uses the backtrace anyhow recorded when one exists, otherwise captures
/// one here regardless of `RUST_BACKTRACE`.
pub fn capture_trace(err: &anyhow::Error) -> String {
    let mut trace = String::new();
    for (depth, cause) in err.chain().enumerate() {
        if depth == 0 {
            trace.push_str(&format!("{}\n", cause));
        } else {
            trace.push_str(&format!("Caused by: {}\n", cause));
        }
    }

    let recorded = err.backtrace();
    let backtrace = if recorded.status() == BacktraceStatus::Captured {
        recorded.to_string()
    } else {
        Backtrace::force_capture().to_string()
    };
    trace.push('\n');
    trace.push_str(&backtrace);
    trace
}
