//! Defense chance and defense rolls.

use crate::combatant::clamp_unit;

/// Defense chance after per-turn modifiers.
///
/// A blocked defense is always 0. Otherwise the result is
/// `base - reduction + bonus`, clamped to `[0, 1]`.
pub fn effective_defense_chance(base: f32, reduction: f32, bonus: f32, blocked: bool) -> f32 {
    if blocked {
        return 0.0;
    }
    clamp_unit(base - reduction + bonus)
}

/// Whether a defense attempt negates the incoming hit.
///
/// `roll` is uniform in `[0, 1)`; the attempt succeeds when it falls strictly
/// below `chance`. `auto_success` bypasses the roll entirely.
pub fn defense_succeeds(chance: f32, roll: f32, auto_success: bool) -> bool {
    auto_success || roll < chance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_bonus_can_push_past_roll() {
        // base 0.3 + Perfect bonus 0.3 = 0.6, roll 0.95 still fails
        let chance = effective_defense_chance(0.3, 0.0, 0.3, false);
        assert!(!defense_succeeds(chance, 0.95, false));
        assert!(defense_succeeds(chance, 0.5, false));
        assert!(defense_succeeds(chance, 0.95, true));
    }

    #[test]
    fn chance_is_clamped() {
        assert_eq!(effective_defense_chance(0.25, 0.3, 0.0, false), 0.0);
        assert_eq!(effective_defense_chance(0.9, 0.0, 0.3, false), 1.0);
        assert_eq!(effective_defense_chance(0.9, 0.0, 0.3, true), 0.0);
    }

    #[test]
    fn zero_chance_never_defends() {
        assert!(!defense_succeeds(0.0, 0.0, false));
    }
}
