//! Zone geometry and accuracy tiers.

/// Classification of timing accuracy, ordered from worst to best.
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
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tier {
    Miss,
    Good,
    Great,
    Perfect,
}

/// Closed interval `[center - half_width, center + half_width]` on the bar.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zone {
    pub center: f32,
    pub half_width: f32,
}

impl Zone {
    pub const fn centered(center: f32, half_width: f32) -> Self {
        Self { center, half_width }
    }

    pub fn left(&self) -> f32 {
        self.center - self.half_width.abs()
    }

    pub fn right(&self) -> f32 {
        self.center + self.half_width.abs()
    }

    pub fn contains(&self, position: f32) -> bool {
        position >= self.left() && position <= self.right()
    }
}

/// Nested attack zones: Perfect ⊂ Great ⊂ Good.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackZones {
    pub good: Zone,
    pub great: Zone,
    pub perfect: Zone,
}

impl AttackZones {
    pub fn tiers(&self) -> [(Tier, Zone); 3] {
        [
            (Tier::Good, self.good),
            (Tier::Great, self.great),
            (Tier::Perfect, self.perfect),
        ]
    }
}

impl Default for AttackZones {
    fn default() -> Self {
        Self {
            good: Zone::centered(0.0, 150.0),
            great: Zone::centered(0.0, 80.0),
            perfect: Zone::centered(0.0, 30.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_bounds_are_inclusive() {
        let zone = Zone::centered(10.0, 5.0);
        assert!(zone.contains(5.0));
        assert!(zone.contains(15.0));
        assert!(!zone.contains(15.5));
    }

    #[test]
    fn tiers_are_ordered() {
        assert!(Tier::Perfect > Tier::Great);
        assert!(Tier::Great > Tier::Good);
        assert!(Tier::Good > Tier::Miss);
        assert_eq!(Tier::Perfect.to_string(), "Perfect");
    }
}
