//! Logging setup for the console client.
//!
//! Logs go to stderr (default level `warn`, so they stay out of the game
//! text) and, when enabled, to a daily-rolling file at `info`. `RUST_LOG`
//! overrides both.
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::CliConfig;

const FILE_DEFAULT: &str = "info";
const STDERR_DEFAULT: &str = "warn";
const LOG_FILE_PREFIX: &str = "arena.log";

/// Keeps the file writer alive; drop it only at process exit.
#[must_use = "dropping the guard stops the log file writer"]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
    pub log_dir: Option<PathBuf>,
}

pub fn setup_logging(config: &CliConfig) -> Result<LoggingGuard> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter(STDERR_DEFAULT));

    let (file_layer, guard, log_dir) = if config.log_file {
        let dir = match &config.log_dir {
            Some(dir) => dir.clone(),
            None => default_log_dir()?,
        };
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;

        let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_filter(filter(FILE_DEFAULT));
        (Some(layer), Some(guard), Some(dir))
    } else {
        (None, None, None)
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    if let Some(dir) = &log_dir {
        tracing::info!(dir = %dir.display(), "logging to file");
    }

    Ok(LoggingGuard {
        _file: guard,
        log_dir,
    })
}

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Platform data directory, e.g. `~/.local/share/arena/logs` on Linux.
fn default_log_dir() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "arena")
        .context("could not determine a home directory for logs")?;
    Ok(dirs.data_local_dir().join("logs"))
}
