//! Enemy ranks and their stat presets.

use super::CombatantStats;
use crate::item::ItemId;

/// Enemy seniority, lowest to highest.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rank {
    Associate,
    Manager,
    DepartmentHead,
    Director,
    Ceo,
}

impl Rank {
    /// Display title used in stage banners.
    pub const fn title(self) -> &'static str {
        match self {
            Rank::Associate => "Associate",
            Rank::Manager => "Manager",
            Rank::DepartmentHead => "Department Head",
            Rank::Director => "Director",
            Rank::Ceo => "CEO",
        }
    }
}

/// Rank-specific preset an enemy is spawned from.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyProfile {
    pub name: String,
    pub rank: Rank,
    pub stats: CombatantStats,
    /// Item whose multiplier feeds the enemy's attacks.
    #[cfg_attr(feature = "serde", serde(default))]
    pub item: Option<ItemId>,
}

impl EnemyProfile {
    pub fn new(name: impl Into<String>, rank: Rank, stats: CombatantStats) -> Self {
        Self {
            name: name.into(),
            rank,
            stats,
            item: None,
        }
    }

    pub fn with_item(mut self, item: ItemId) -> Self {
        self.item = Some(item);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn ranks_ascend_to_ceo() {
        let ranks: Vec<Rank> = Rank::iter().collect();
        assert_eq!(ranks.first(), Some(&Rank::Associate));
        assert_eq!(ranks.iter().max(), Some(&Rank::Ceo));
        assert_eq!("Director".parse::<Rank>().ok(), Some(Rank::Director));
        assert_eq!(Rank::DepartmentHead.title(), "Department Head");
    }
}
