//! Content loaders for reading game data from files.
//!
//! Each loader has a `load` entry point that reads a path and a `parse` entry
//! point that works on already-loaded text, so embedded content goes through
//! the same validation as files on disk.

pub mod config;
pub mod factory;
pub mod item;
pub mod roster;

pub use config::ConfigLoader;
pub use factory::{ContentFactory, ContentSet};
pub use item::{ItemCatalog, ItemLoader};
pub use roster::{RosterCatalog, RosterLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
