//! Roster oracle: the player template, enemy presets and stage order.

use crate::combatant::{CombatantStats, EnemyProfile, Rank};
use crate::stage::Stage;

/// Provides the player template, rank presets and the ordered stage list.
pub trait RosterOracle: Send + Sync {
    fn player_stats(&self) -> CombatantStats;

    /// Preset for `rank`, if the roster defines one.
    fn profile(&self, rank: Rank) -> Option<EnemyProfile>;

    /// Stages in play order.
    fn stages(&self) -> Vec<Stage>;

    /// Highest rank fought in any stage. Defeating it clears the game.
    fn final_rank(&self) -> Option<Rank> {
        self.stages().iter().map(|stage| stage.enemy).max()
    }
}
