//! kakbridge-demo — a small Kakoune plugin served by kakbridge.
//!
//! Add to kakrc:
//!
//! ```text
//! evaluate-commands %sh{ kakbridge-demo }
//! ```
//!
//! Kakoune then knows `kb-hello`, `kb-count`, `kb-greet` and `kb-fail`; each
//! use re-runs this binary with the command name and block index.

mod commands;

use std::process::ExitCode;

fn main() -> ExitCode {
    kakbridge_executor::run_main(commands::register)
}
