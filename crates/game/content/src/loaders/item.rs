//! Item catalog loader.

use std::collections::BTreeSet;
use std::path::Path;

use revenge_core::Item;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
///
/// Order matters: it is the order the selection cursor walks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<Item>,
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<ItemCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse and validate catalog text. Item ids must be unique.
    pub fn parse(content: &str) -> LoadResult<ItemCatalog> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for item in &catalog.items {
            if !seen.insert(item.id) {
                anyhow::bail!("Duplicate item id {} ({})", item.id, item.name);
            }
        }

        Ok(catalog)
    }
}
