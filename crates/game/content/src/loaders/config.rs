//! Combat configuration loader.

use std::path::Path;

use revenge_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat tuning from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load combat config from a TOML file. Omitted fields keep their defaults.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        let timing = &config.timing;
        if !(timing.bar_width.is_finite() && timing.bar_width > 0.0) {
            anyhow::bail!("bar_width must be positive, got {}", timing.bar_width);
        }
        if !(config.fixed_step.is_finite() && config.fixed_step > 0.0) {
            anyhow::bail!("fixed_step must be positive, got {}", config.fixed_step);
        }

        Ok(config)
    }
}
