//! Tracing subscriber setup.
//!
//! Filter resolution order:
//! 1. `PLANIT_LOG` environment variable
//! 2. `debug` when verbose output was requested
//! 3. `[logging] level` from config
//! 4. `warn`

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::Config;

pub const LOG_ENV: &str = "PLANIT_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

/// Keeps the file writer alive; drop it last so buffered lines are flushed.
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Picks the filter directive for this run.
pub fn filter_directive(config: &Config, verbose: bool) -> String {
    if let Ok(value) = std::env::var(LOG_ENV)
        && !value.trim().is_empty()
    {
        return value;
    }
    if verbose {
        return "debug".to_string();
    }
    config
        .logging
        .level
        .as_deref()
        .map(str::trim)
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_DIRECTIVE)
        .to_string()
}

/// Installs the global subscriber: stderr always, plus a log file when
/// `[logging] file` is set.
///
/// # Errors
/// Returns an error if the filter is invalid, the log directory cannot be
/// created, or a subscriber is already installed.
pub fn init(config: &Config, verbose: bool) -> Result<LogGuard> {
    let directive = filter_directive(config, verbose);
    let stderr_filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("Invalid log filter '{directive}'"))?;
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(stderr_filter);

    let (file_layer, guard) = match config.log_file_path() {
        Some(path) => {
            let (writer, guard) = file_writer(&path)?;
            let file_filter = EnvFilter::try_new(&directive)
                .with_context(|| format!("Invalid log filter '{directive}'"))?;
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(file_filter);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(LogGuard { _file: guard })
}

fn file_writer(path: &Path) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let file_name = path
        .file_name()
        .with_context(|| format!("Log path has no file name: {}", path.display()))?;
    let appender = tracing_appender::rolling::never(dir, file_name);
    Ok(tracing_appender::non_blocking(appender))
}
