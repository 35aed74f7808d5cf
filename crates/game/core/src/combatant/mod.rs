//! Shared combatant model for the player and enemies.
//!
//! A single [`Combatant`] type covers both sides. Enemy variety comes from
//! rank-specific stat presets ([`EnemyProfile`]), not from subtypes.

mod rank;

pub use rank::{EnemyProfile, Rank};

/// Which side of the fight a value refers to.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    /// Stable numeric tag mixed into rng seeds.
    pub const fn tag(self) -> u32 {
        match self {
            Side::Player => 0,
            Side::Enemy => 1,
        }
    }
}

/// Base attributes a combatant is created from.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantStats {
    pub max_hp: f32,
    pub base_damage: f32,
    pub attack_coefficient: f32,
    /// Divisor applied to incoming damage.
    pub defense_coefficient: f32,
    /// Probability in `[0, 1]` of negating an incoming hit.
    pub base_defense_chance: f32,
}

impl CombatantStats {
    pub const DEFAULT_MAX_HP: f32 = 100.0;
    pub const PLAYER_BASE_DAMAGE: f32 = 10.0;
    pub const ENEMY_BASE_DAMAGE: f32 = 15.0;
    pub const DEFAULT_DEFENSE_CHANCE: f32 = 0.3;

    pub const fn player_default() -> Self {
        Self {
            max_hp: Self::DEFAULT_MAX_HP,
            base_damage: Self::PLAYER_BASE_DAMAGE,
            attack_coefficient: 1.0,
            defense_coefficient: 1.0,
            base_defense_chance: Self::DEFAULT_DEFENSE_CHANCE,
        }
    }

    pub const fn enemy_default() -> Self {
        Self {
            base_damage: Self::ENEMY_BASE_DAMAGE,
            ..Self::player_default()
        }
    }

    /// Replaces out-of-range values with safe defaults.
    ///
    /// Non-positive max HP becomes 100, non-positive coefficients become 1.0,
    /// negative damage becomes 0 and the defense chance is clamped to `[0, 1]`.
    pub fn normalized(self) -> Self {
        let positive_or = |value: f32, fallback: f32| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        };

        Self {
            max_hp: positive_or(self.max_hp, Self::DEFAULT_MAX_HP),
            base_damage: if self.base_damage.is_finite() {
                self.base_damage.max(0.0)
            } else {
                0.0
            },
            attack_coefficient: positive_or(self.attack_coefficient, 1.0),
            defense_coefficient: positive_or(self.defense_coefficient, 1.0),
            base_defense_chance: clamp_unit(self.base_defense_chance),
        }
    }
}

impl Default for CombatantStats {
    fn default() -> Self {
        Self::player_default()
    }
}

/// One-turn status applied by item effects.
///
/// Cleared by [`Combatant::end_turn`] at the end of the turn that set it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnStatus {
    pub defense_blocked: bool,
    pub defense_chance_reduction: f32,
}

impl TurnStatus {
    pub fn block_defense(&mut self) {
        self.defense_blocked = true;
    }

    /// Records a defense chance reduction; reapplying keeps the larger one.
    pub fn reduce_defense_chance(&mut self, amount: f32) {
        self.defense_chance_reduction = self.defense_chance_reduction.max(clamp_unit(amount));
    }

    pub fn is_clear(&self) -> bool {
        !self.defense_blocked && self.defense_chance_reduction == 0.0
    }
}

/// Live combatant: HP, stats and transient per-turn status.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    stats: CombatantStats,
    hp: f32,
    status: TurnStatus,
}

impl Combatant {
    pub fn new(stats: CombatantStats) -> Self {
        let stats = stats.normalized();
        Self {
            hp: stats.max_hp,
            stats,
            status: TurnStatus::default(),
        }
    }

    pub fn stats(&self) -> &CombatantStats {
        &self.stats
    }

    pub fn hp(&self) -> f32 {
        self.hp
    }

    pub fn max_hp(&self) -> f32 {
        self.stats.max_hp
    }

    pub fn status(&self) -> &TurnStatus {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut TurnStatus {
        &mut self.status
    }

    pub fn is_defeated(&self) -> bool {
        self.hp <= 0.0
    }

    /// HP at or below `threshold * max_hp`.
    pub fn is_low_hp(&self, threshold: f32) -> bool {
        self.hp <= self.stats.max_hp * threshold
    }

    /// Sets HP, clamped into `[0, max_hp]`. NaN leaves HP unchanged.
    pub fn set_hp(&mut self, hp: f32) {
        if !hp.is_nan() {
            self.hp = hp.clamp(0.0, self.stats.max_hp);
        }
    }

    /// Applies `raw` damage after dividing by the guarded defense coefficient.
    ///
    /// Returns the HP actually removed.
    pub fn take_damage(&mut self, raw: f32, epsilon: f32) -> f32 {
        let amount = crate::combat::mitigate(raw, self.stats.defense_coefficient, epsilon);
        let before = self.hp;
        self.set_hp(before - amount);
        before - self.hp
    }

    /// Defense chance after status modifiers and a timing bonus.
    pub fn defense_chance(&self, bonus: f32) -> f32 {
        crate::combat::effective_defense_chance(
            self.stats.base_defense_chance,
            self.status.defense_chance_reduction,
            bonus,
            self.status.defense_blocked,
        )
    }

    /// Clears per-turn status.
    pub fn end_turn(&mut self) {
        self.status = TurnStatus::default();
    }

    /// Restores full HP and clears status.
    pub fn restore(&mut self) {
        self.hp = self.stats.max_hp;
        self.status = TurnStatus::default();
    }
}

pub(crate) fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_stats_are_normalized() {
        let stats = CombatantStats {
            max_hp: -10.0,
            base_damage: -3.0,
            attack_coefficient: 0.0,
            defense_coefficient: f32::NAN,
            base_defense_chance: 1.7,
        }
        .normalized();

        assert_eq!(stats.max_hp, 100.0);
        assert_eq!(stats.base_damage, 0.0);
        assert_eq!(stats.attack_coefficient, 1.0);
        assert_eq!(stats.defense_coefficient, 1.0);
        assert_eq!(stats.base_defense_chance, 1.0);
    }

    #[test]
    fn hp_stays_within_bounds() {
        let mut combatant = Combatant::new(CombatantStats::player_default());
        combatant.take_damage(250.0, 1e-4);
        assert_eq!(combatant.hp(), 0.0);
        assert!(combatant.is_defeated());

        combatant.set_hp(1_000.0);
        assert_eq!(combatant.hp(), 100.0);

        combatant.set_hp(f32::NAN);
        assert_eq!(combatant.hp(), 100.0);
    }

    #[test]
    fn take_damage_divides_by_defense_coefficient() {
        let mut ceo = Combatant::new(CombatantStats {
            max_hp: 400.0,
            base_damage: 50.0,
            attack_coefficient: 2.0,
            defense_coefficient: 2.0,
            base_defense_chance: 0.65,
        });
        let dealt = ceo.take_damage(60.0, 1e-4);
        assert_eq!(dealt, 30.0);
        assert_eq!(ceo.hp(), 370.0);
    }

    #[test]
    fn status_modifies_defense_chance_until_end_of_turn() {
        let mut enemy = Combatant::new(CombatantStats::enemy_default());
        enemy.status_mut().reduce_defense_chance(0.2);
        assert!((enemy.defense_chance(0.0) - 0.1).abs() < 1e-6);

        enemy.status_mut().block_defense();
        assert_eq!(enemy.defense_chance(0.3), 0.0);

        enemy.end_turn();
        assert!(enemy.status().is_clear());
        assert!((enemy.defense_chance(0.0) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn low_hp_threshold_is_inclusive() {
        let mut player = Combatant::new(CombatantStats::player_default());
        player.set_hp(30.0);
        assert!(player.is_low_hp(0.3));
        player.set_hp(31.0);
        assert!(!player.is_low_hp(0.3));
    }
}
