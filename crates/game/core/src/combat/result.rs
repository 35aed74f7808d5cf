//! Reports describing how an attack or a defense resolved.

use crate::item::ItemId;
use crate::timing::Tier;

/// Outcome of one hit of an attack.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HitOutcome {
    /// The defender negated the hit.
    Defended,
    /// The hit landed for `damage` HP.
    Landed { damage: f32 },
}

impl HitOutcome {
    pub fn damage(&self) -> f32 {
        match self {
            HitOutcome::Defended => 0.0,
            HitOutcome::Landed { damage } => *damage,
        }
    }
}

/// One resolved hit.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitReport {
    pub index: u8,
    pub defense_chance: f32,
    pub roll: f32,
    pub outcome: HitOutcome,
    pub enemy_hp_after: f32,
}

/// Player attack resolution.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackReport {
    pub item: ItemId,
    pub tier: Tier,
    pub timing_multiplier: f32,
    /// Damage each landed hit deals after mitigation.
    pub damage_per_hit: f32,
    pub hits: Vec<HitReport>,
    pub enemy_defeated: bool,
}

impl AttackReport {
    pub fn total_damage(&self) -> f32 {
        self.hits.iter().map(|hit| hit.outcome.damage()).sum()
    }

    pub fn landed_hits(&self) -> usize {
        self.hits
            .iter()
            .filter(|hit| matches!(hit.outcome, HitOutcome::Landed { .. }))
            .count()
    }
}

/// Player defense resolution against the enemy's counterattack.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefenseReport {
    pub tier: Tier,
    pub defense_chance: f32,
    /// Absent when the tier granted automatic success.
    pub roll: Option<f32>,
    pub defended: bool,
    pub damage: f32,
    pub player_hp_after: f32,
    pub player_defeated: bool,
}
