use crate::combatant::TurnStatus;

/// Item effect, applied once before an attack's hits are resolved.
#[derive(Clone, Copy, Debug, PartialEq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effect {
    /// The target cannot defend against this attack.
    BlockNextDefense,
    /// The attack lands `hits` times.
    DoubleAttack { hits: u8 },
    /// Lowers the target's defense chance by `amount` for this attack.
    ReduceEnemyDefense { amount: f32 },
    /// Descriptive marker; the damage itself comes from the multiplier.
    HighDamage,
}

impl Effect {
    /// Hit count override, if this effect sets one.
    pub fn hit_count(&self) -> Option<u8> {
        match self {
            Effect::DoubleAttack { hits } => Some((*hits).max(1)),
            _ => None,
        }
    }

    /// Configures the target's per-turn status. Reapplying is harmless.
    pub fn apply(&self, target: &mut TurnStatus) {
        match *self {
            Effect::BlockNextDefense => target.block_defense(),
            Effect::ReduceEnemyDefense { amount } => target.reduce_defense_chance(amount),
            Effect::DoubleAttack { .. } | Effect::HighDamage => {}
        }
    }

    /// Short label shown next to the item name.
    pub fn description(&self) -> String {
        match self {
            Effect::BlockNextDefense => "Blocks defense".to_string(),
            Effect::DoubleAttack { hits } => format!("{} hits", (*hits).max(1)),
            Effect::ReduceEnemyDefense { amount } => {
                format!("Defense -{:.0}%", amount * 100.0)
            }
            Effect::HighDamage => "High damage".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptions() {
        assert_eq!(Effect::BlockNextDefense.description(), "Blocks defense");
        assert_eq!(Effect::DoubleAttack { hits: 2 }.description(), "2 hits");
        assert_eq!(
            Effect::ReduceEnemyDefense { amount: 0.3 }.description(),
            "Defense -30%"
        );
    }

    #[test]
    fn zero_hit_count_is_treated_as_one() {
        assert_eq!(Effect::DoubleAttack { hits: 0 }.hit_count(), Some(1));
        assert_eq!(Effect::HighDamage.hit_count(), None);
    }
}
