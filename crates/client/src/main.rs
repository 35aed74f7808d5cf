//! Office revenge console client.
//!
//! Composition root: reads configuration from the environment, sets up file
//! logging, loads content, builds the runtime and hands stdin to the console
//! front end.

mod config;
mod console;
mod logging;
mod presenter;

use std::sync::Arc;

use anyhow::{Context, Result};
use revenge_content::{ContentFactory, ContentSet};
use revenge_runtime::{FileProgressRepository, Runtime};

use config::ClientConfig;
use presenter::ConsolePresenter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _log_guard = logging::setup_logging(config.log_dir.as_deref())?;

    let content = match &config.data_dir {
        Some(dir) => ContentFactory::new(dir)
            .load_all()
            .with_context(|| format!("Failed to load content from {}", dir.display()))?,
        None => ContentSet::builtin().context("Built-in content is invalid")?,
    };
    let items = content.items.items.clone();

    let repository = match &config.save_file {
        Some(path) => FileProgressRepository::new(path)?,
        None => FileProgressRepository::in_default_location()?,
    };
    tracing::info!("Progress file: {}", repository.path().display());

    let seed = config.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, tick = ?config.tick_interval, "Starting office revenge");

    let mut builder = Runtime::builder()
        .content(content)
        .repository(Arc::new(repository))
        .presenter(Arc::new(ConsolePresenter::new(config.cue_duration)))
        .seed(seed);
    if let Some(period) = config.tick_interval {
        builder = builder.tick_interval(period);
    }
    let runtime = builder.build().await?;

    console::run(runtime.handle(), items).await?;

    runtime.shutdown().await?;
    tracing::info!("Client shutdown complete");
    Ok(())
}
