//! tracing subscriber setup
//!
//! The TUI owns the terminal, so interactive sessions log to a daily-rolling
//! file under `<data_dir>/logs`. One-shot commands log to stderr.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "tech-researcher.log";

/// `RUST_LOG` wins over the configured level
fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log to stderr without timestamps or targets
pub fn init_stderr(default_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(default_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

/// Log to `<data_dir>/logs/tech-researcher.log.<date>`.
///
/// The returned guard flushes buffered lines on drop and must outlive the session.
pub fn init_file(data_dir: &Path, default_level: &str) -> Result<WorkerGuard> {
    let log_dir = data_dir.join("logs");
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(default_level))
        .with_writer(writer)
        .with_ansi(false)
        .try_init();

    Ok(guard)
}
