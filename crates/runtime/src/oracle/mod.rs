//! Runtime wrappers around static game content oracles.
//!
//! These implementations expose `revenge-core` oracle traits and bundle them
//! into an [`OracleManager`] so the runtime can build [`CombatEnv`] views on
//! demand. The data is immutable at runtime; dynamic state lives in
//! repositories or [`revenge_core::GameState`].
mod config;
mod items;
mod roster;

use revenge_content::ContentSet;
use revenge_core::{CombatEnv, Env, PcgRng};
use std::sync::Arc;

pub use config::ConfigOracleImpl;
pub use items::ItemOracleImpl;
pub use roster::RosterOracleImpl;

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) items: Arc<ItemOracleImpl>,
    pub(crate) roster: Arc<RosterOracleImpl>,
    pub(crate) config: Arc<ConfigOracleImpl>,
    pub(crate) rng: PcgRng,
}

impl OracleManager {
    pub fn new(
        items: Arc<ItemOracleImpl>,
        roster: Arc<RosterOracleImpl>,
        config: Arc<ConfigOracleImpl>,
    ) -> Self {
        Self {
            items,
            roster,
            config,
            rng: PcgRng,
        }
    }

    /// Wraps a loaded content set.
    pub fn from_content(content: ContentSet) -> Self {
        Self::new(
            Arc::new(ItemOracleImpl::new(content.items.items)),
            Arc::new(RosterOracleImpl::new(content.roster)),
            Arc::new(ConfigOracleImpl::new(content.config)),
        )
    }

    /// Borrows every oracle as a type-erased [`CombatEnv`].
    pub fn as_combat_env(&self) -> CombatEnv<'_> {
        Env::with_all(
            self.items.as_ref(),
            self.roster.as_ref(),
            self.config.as_ref(),
            &self.rng,
        )
        .as_combat_env()
    }
}
