//! Tracing setup: console output plus a daily-rotated log file.

use std::path::Path;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// File name prefix of the rotated log files.
pub const LOG_FILE: &str = "herald.log";

const DEFAULT_FILTER: &str = "info,herald_api=debug,herald_core=debug";

/// Non-blocking writer for the rotated log file in `dir`.
pub fn file_writer(dir: &Path) -> (NonBlocking, WorkerGuard) {
    tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, LOG_FILE))
}

/// Install the global subscriber. Keep the guard alive until exit or buffered
/// file output is lost.
pub fn init(log_dir: &Path) -> WorkerGuard {
    let (writer, guard) = file_writer(log_dir);
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .init();
    guard
}
