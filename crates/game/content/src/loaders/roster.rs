//! Player template, enemy presets and stage order.

use std::path::Path;

use revenge_core::{CombatantStats, EnemyProfile, Rank, Stage};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Roster structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterCatalog {
    #[serde(default = "CombatantStats::player_default")]
    pub player: CombatantStats,
    pub enemies: Vec<EnemyProfile>,
    pub stages: Vec<Stage>,
}

impl RosterCatalog {
    pub fn profile(&self, rank: Rank) -> Option<&EnemyProfile> {
        self.enemies.iter().find(|profile| profile.rank == rank)
    }
}

/// Loader for the roster from RON files.
pub struct RosterLoader;

impl RosterLoader {
    pub fn load(path: &Path) -> LoadResult<RosterCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse and validate roster text.
    ///
    /// Every stage must reference a rank that has a preset, ranks may appear
    /// once in the preset list, and there must be at least one stage.
    pub fn parse(content: &str) -> LoadResult<RosterCatalog> {
        let roster: RosterCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        if roster.stages.is_empty() {
            anyhow::bail!("Roster defines no stages");
        }

        for (index, profile) in roster.enemies.iter().enumerate() {
            if roster.enemies[..index]
                .iter()
                .any(|other| other.rank == profile.rank)
            {
                anyhow::bail!("Duplicate enemy preset for rank {}", profile.rank);
            }
        }

        for (index, stage) in roster.stages.iter().enumerate() {
            if roster.profile(stage.enemy).is_none() {
                anyhow::bail!(
                    "Stage {} ({}) references rank {} with no enemy preset",
                    index,
                    stage.name,
                    stage.enemy
                );
            }
        }

        Ok(roster)
    }
}
