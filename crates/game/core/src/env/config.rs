//! Configuration oracle for exposing combat tuning to the engine.

use crate::config::CombatConfig;

/// Provides access to combat tuning values.
pub trait ConfigOracle: Send + Sync {
    fn combat(&self) -> &CombatConfig;
}

impl ConfigOracle for CombatConfig {
    fn combat(&self) -> &CombatConfig {
        self
    }
}
