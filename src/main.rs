//! gitdeck binary entry point.

use std::process::ExitCode;

fn main() -> ExitCode {
    gitdeck::cli::run()
}
