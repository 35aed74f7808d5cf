//! Config oracle implementation for runtime.

use revenge_core::{CombatConfig, ConfigOracle};

/// Runtime implementation of ConfigOracle that wraps CombatConfig
pub struct ConfigOracleImpl {
    config: CombatConfig,
}

impl ConfigOracleImpl {
    pub fn new(config: CombatConfig) -> Self {
        Self { config }
    }
}

impl ConfigOracle for ConfigOracleImpl {
    fn combat(&self) -> &CombatConfig {
        &self.config
    }
}
