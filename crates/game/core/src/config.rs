//! Combat tuning constants and tunable parameters.

use crate::timing::{AttackZones, Tier, Zone};

/// Balance parameters consumed by the combat engine.
///
/// Defaults reproduce the shipped game; content files may override any field.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Timing bar geometry and multipliers.
    pub timing: TimingConfig,
    /// HP fraction at or below which a combatant shows the angry pose.
    pub low_hp_threshold: f32,
    /// Defense coefficients below this value are treated as 1.0.
    pub defense_epsilon: f32,
    /// Fixed simulation step for timing bars, in seconds.
    pub fixed_step: f32,
}

impl CombatConfig {
    pub const DEFAULT_LOW_HP_THRESHOLD: f32 = 0.3;
    pub const DEFAULT_DEFENSE_EPSILON: f32 = 1e-4;
    pub const DEFAULT_FIXED_STEP: f32 = 1.0 / 60.0;

    pub fn new() -> Self {
        Self {
            timing: TimingConfig::default(),
            low_hp_threshold: Self::DEFAULT_LOW_HP_THRESHOLD,
            defense_epsilon: Self::DEFAULT_DEFENSE_EPSILON,
            fixed_step: Self::DEFAULT_FIXED_STEP,
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Timing minigame parameters for both bars.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimingConfig {
    /// Full bar width `W`; the indicator travels on `[-W/2, +W/2]`.
    pub bar_width: f32,
    /// Attack indicator speed in bar units per second.
    pub attack_speed: f32,
    /// Defense indicator speed in bar units per second.
    pub defense_speed: f32,
    /// Nested attack zones (Perfect ⊂ Great ⊂ Good).
    pub attack_zones: AttackZones,
    /// Single defense zone.
    pub defense_zone: Zone,
    pub good_multiplier: f32,
    pub great_multiplier: f32,
    pub perfect_multiplier: f32,
    /// Multiplier applied when the indicator is outside every zone.
    pub miss_multiplier: f32,
    /// Defense chance bonus when the defense check lands in the zone.
    pub perfect_defense_bonus: f32,
    /// When set, landing in the defense zone skips the roll entirely.
    pub perfect_defense_auto_success: bool,
}

impl TimingConfig {
    /// Damage multiplier for an attack tier.
    pub fn attack_multiplier(&self, tier: Tier) -> f32 {
        match tier {
            Tier::Miss => self.miss_multiplier,
            Tier::Good => self.good_multiplier,
            Tier::Great => self.great_multiplier,
            Tier::Perfect => self.perfect_multiplier,
        }
    }

    /// Defense chance bonus for a defense tier.
    pub fn defense_bonus(&self, tier: Tier) -> f32 {
        match tier {
            Tier::Miss => 0.0,
            _ => self.perfect_defense_bonus,
        }
    }

    /// Whether a defense tier succeeds without rolling.
    pub fn defense_auto_success(&self, tier: Tier) -> bool {
        self.perfect_defense_auto_success && tier != Tier::Miss
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            bar_width: 800.0,
            attack_speed: 500.0,
            defense_speed: 700.0,
            attack_zones: AttackZones::default(),
            defense_zone: Zone::centered(0.0, 100.0),
            good_multiplier: 1.0,
            great_multiplier: 1.5,
            perfect_multiplier: 2.0,
            miss_multiplier: 1.0,
            perfect_defense_bonus: 0.3,
            perfect_defense_auto_success: false,
        }
    }
}
