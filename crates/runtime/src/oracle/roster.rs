//! [`revenge_core::RosterOracle`] backed by the loaded roster.
use revenge_content::RosterCatalog;
use revenge_core::{CombatantStats, EnemyProfile, Rank, RosterOracle, Stage};

pub struct RosterOracleImpl {
    catalog: RosterCatalog,
}

impl RosterOracleImpl {
    pub fn new(catalog: RosterCatalog) -> Self {
        Self { catalog }
    }
}

impl RosterOracle for RosterOracleImpl {
    fn player_stats(&self) -> CombatantStats {
        self.catalog.player
    }

    fn profile(&self, rank: Rank) -> Option<EnemyProfile> {
        self.catalog.profile(rank).cloned()
    }

    fn stages(&self) -> Vec<Stage> {
        self.catalog.stages.clone()
    }
}
