//! cli::dispatch
//!
//! Selection of the one terminal action for an invocation.
//!
//! The priority order lives in [`MODE_PRIORITY`]: the first entry whose
//! predicate accepts the intent wins. Launch accepts everything, so exactly
//! one mode is always chosen.

use tracing::info;

use super::intent::RunIntent;
use super::Fatal;

/// The terminal actions, one per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Print the version line.
    Version,
    /// Print the default config.
    Config,
    /// Follow the application log.
    TailLogs,
    /// Start the application.
    Launch,
}

type Predicate = fn(&RunIntent) -> bool;

fn wants_version(intent: &RunIntent) -> bool {
    intent.show_version
}

fn wants_config(intent: &RunIntent) -> bool {
    intent.show_config
}

fn wants_tail(intent: &RunIntent) -> bool {
    intent.tail_logs
}

fn always(_: &RunIntent) -> bool {
    true
}

/// Modes in priority order, highest first.
pub const MODE_PRIORITY: [(Mode, Predicate); 4] = [
    (Mode::Version, wants_version),
    (Mode::Config, wants_config),
    (Mode::TailLogs, wants_tail),
    (Mode::Launch, always),
];

impl Mode {
    /// The highest-priority mode the intent asks for.
    pub fn select(intent: &RunIntent) -> Mode {
        MODE_PRIORITY
            .iter()
            .find(|(_, accepts)| accepts(intent))
            .map(|(mode, _)| *mode)
            .unwrap_or(Mode::Launch)
    }
}

/// The actions a mode can run.
///
/// Implemented by the real bootstrap and by test doubles.
pub trait Host {
    fn version(&mut self) -> Result<(), Fatal>;
    fn default_config(&mut self) -> Result<(), Fatal>;
    fn tail_logs(&mut self) -> Result<(), Fatal>;
    fn launch(&mut self, intent: &RunIntent) -> Result<(), Fatal>;
}

/// Run the selected mode on `host` and report which one ran.
pub fn dispatch<H: Host>(intent: &RunIntent, host: &mut H) -> Result<Mode, Fatal> {
    let mode = Mode::select(intent);
    info!(?mode, "dispatching");

    match mode {
        Mode::Version => host.version()?,
        Mode::Config => host.default_config()?,
        Mode::TailLogs => host.tail_logs()?,
        Mode::Launch => host.launch(intent)?,
    }
    Ok(mode)
}
