//! Logging setup.
//!
//! Stdout belongs to Kakoune: every line on it is evaluated as a command.
//! Logs therefore go to stderr, which Kakoune copies into `*debug*`, or to
//! the file named by `log_file`.

use std::fs::OpenOptions;
use std::sync::Mutex;

use crate::config::BridgeConfig;
use crate::{Error, Result};

/// Install the global `tracing` subscriber described by `config`.
///
/// Calling it again once a subscriber is installed is a no-op.
///
/// # Errors
///
/// Returns `Error::Config` if the level is invalid or the log file cannot
/// be opened.
pub fn init_logging(config: &BridgeConfig) -> Result<()> {
    let level = config.level_filter()?;
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_target(true);

    let installed = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| Error::Config {
                    reason: format!("failed to open log file '{}': {}", path.display(), e),
                })?;
            builder.with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    if installed.is_err() {
        tracing::debug!(target: "kakbridge::logging", "subscriber already installed");
    }
    Ok(())
}
