//! File logging for the runlog binaries.
//!
//! The TUI owns the terminal, so nothing is logged to stdout. Both binaries
//! write to a daily file under `$XDG_STATE_HOME/runlog/`.

use crate::config::{Config, LoggingConfig};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Prefix of every log file; rotation appends the date.
const LOG_FILE_PREFIX: &str = "runlog.log";

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `config.level`. Keep the returned guard alive for
/// the life of the process or buffered lines are lost.
pub fn init(config: &LoggingConfig) -> Result<LoggingGuard> {
    let log_dir = Config::state_dir();
    let appender = rolling_appender(&log_dir, config.max_files)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    // Already installed (tests, repeated init): keep the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();

    tracing::info!(log_dir = %log_dir.display(), level = %config.level, "runlog logging ready");

    Ok(LoggingGuard { _worker: guard })
}

fn rolling_appender(log_dir: &Path, max_files: usize) -> Result<RollingFileAppender> {
    std::fs::create_dir_all(log_dir)?;

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .max_log_files(max_files.max(1))
        .build(log_dir)
        .map_err(|e| Error::Config(format!("cannot open log file in {}: {}", log_dir.display(), e)))
}

/// Route test logs through the test harness writer.
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .with_span_events(FmtSpan::CLOSE)
        .try_init();
}

/// Flushes pending log lines on drop.
pub struct LoggingGuard {
    _worker: WorkerGuard,
}

/// Base path of the current log file.
pub fn log_file_path() -> PathBuf {
    Config::log_path()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_log_file_path() {
        let path = log_file_path();
        assert!(path.ends_with(LOG_FILE_PREFIX));
    }

    #[test]
    fn test_rolling_appender_creates_missing_dir() {
        let dir = TempDir::new().unwrap();
        let log_dir = dir.path().join("state").join("runlog");

        rolling_appender(&log_dir, 0).unwrap();

        assert!(log_dir.is_dir());
    }
}
