//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use revenge_core::CombatConfig;

use crate::loaders::{
    ConfigLoader, ItemCatalog, ItemLoader, LoadResult, RosterCatalog, RosterLoader,
};

const BUILTIN_CONFIG: &str = include_str!("../../data/config.toml");
const BUILTIN_ITEMS: &str = include_str!("../../data/items.ron");
const BUILTIN_ROSTER: &str = include_str!("../../data/roster.ron");

/// Everything a session needs, loaded and cross-checked.
#[derive(Debug, Clone)]
pub struct ContentSet {
    pub config: CombatConfig,
    pub items: ItemCatalog,
    pub roster: RosterCatalog,
}

impl ContentSet {
    /// Content compiled into the binary from the crate's `data/` directory.
    pub fn builtin() -> LoadResult<Self> {
        Self::validated(
            ConfigLoader::parse(BUILTIN_CONFIG)?,
            ItemLoader::parse(BUILTIN_ITEMS)?,
            RosterLoader::parse(BUILTIN_ROSTER)?,
        )
    }

    /// Checks that stage unlocks and enemy items exist in the item catalog.
    fn validated(config: CombatConfig, items: ItemCatalog, roster: RosterCatalog) -> LoadResult<Self> {
        let known = |id| items.items.iter().any(|item| item.id == id);

        for stage in &roster.stages {
            if let Some(id) = stage.unlocks
                && !known(id)
            {
                anyhow::bail!("Stage {} unlocks unknown {}", stage.name, id);
            }
        }
        for profile in &roster.enemies {
            if let Some(id) = profile.item
                && !known(id)
            {
                anyhow::bail!("Enemy {} carries unknown {}", profile.name, id);
            }
        }

        Ok(Self {
            config,
            items,
            roster,
        })
    }
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── items.ron
/// └── roster.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<ItemCatalog> {
        let path = self.data_dir.join("items.ron");
        ItemLoader::load(&path)
    }

    /// Load player template, enemy presets and stages from `roster.ron`.
    pub fn load_roster(&self) -> LoadResult<RosterCatalog> {
        let path = self.data_dir.join("roster.ron");
        RosterLoader::load(&path)
    }

    /// Load every file and cross-check references between them.
    ///
    /// A missing `config.toml` falls back to the default tuning; the other
    /// two files are required.
    pub fn load_all(&self) -> LoadResult<ContentSet> {
        let config = if self.data_dir.join("config.toml").exists() {
            self.load_config()?
        } else {
            CombatConfig::default()
        };
        ContentSet::validated(config, self.load_items()?, self.load_roster()?)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revenge_core::{ItemId, Rank};

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn builtin_content_is_consistent() {
        let content = ContentSet::builtin().unwrap();

        assert_eq!(content.items.items.len(), 5);
        assert_eq!(content.roster.stages.len(), 5);
        assert_eq!(content.roster.stages[4].enemy, Rank::Ceo);
        assert_eq!(content.roster.stages[0].unlocks, Some(ItemId(1)));
        assert_eq!(content.roster.stages[4].unlocks, None);

        let starters: Vec<_> = content
            .items
            .items
            .iter()
            .filter(|item| item.starter)
            .map(|item| item.id)
            .collect();
        assert_eq!(starters, vec![ItemId(0)]);

        let ceo = content.roster.profile(Rank::Ceo).unwrap();
        assert_eq!(ceo.stats.max_hp, 400.0);
        assert_eq!(ceo.stats.attack_coefficient, 2.0);
        assert_eq!(content.config.timing.bar_width, 800.0);
        assert_eq!(content.config.timing.attack_zones.perfect.half_width, 30.0);
        assert_eq!(content.config.fixed_step, CombatConfig::DEFAULT_FIXED_STEP);
    }

    #[test]
    fn builtin_item_summaries() {
        let content = ContentSet::builtin().unwrap();
        let summaries: Vec<_> = content.items.items.iter().map(|item| item.summary()).collect();
        assert_eq!(summaries[0], "Report Bundle x1.5");
        assert_eq!(summaries[2], "Stapler x1.0 (2 hits)");
    }

    #[test]
    fn unknown_unlock_is_rejected() {
        let items = ItemLoader::parse(BUILTIN_ITEMS).unwrap();
        let mut roster = RosterLoader::parse(BUILTIN_ROSTER).unwrap();
        roster.stages[0].unlocks = Some(ItemId(99));

        let err = ContentSet::validated(CombatConfig::default(), items, roster).unwrap_err();
        assert!(err.to_string().contains("unknown item#99"));
    }
}
