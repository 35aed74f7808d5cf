//! File logging for the console client.
//!
//! Game output goes to stdout, so tracing only writes to a log file.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global subscriber. Keep the guard alive for the whole run.
pub fn setup_logging(log_dir: Option<&Path>) -> Result<WorkerGuard> {
    let log_dir = match log_dir {
        Some(dir) => dir.to_path_buf(),
        None => default_log_directory()?,
    };
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!("Log file: {}/client.log", log_dir.display());

    Ok(guard)
}

fn default_log_directory() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "office-revenge")
        .context("No home directory to place logs in; set REVENGE_LOG_DIR")?;
    Ok(dirs.cache_dir().join("logs"))
}
