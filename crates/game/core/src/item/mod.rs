//! Items the player throws and the effects they carry.
//!
//! Every item has a damage multiplier and zero or more effects. Effects
//! configure a single attack action; none of them persist past the turn.

mod effect;
mod selection;

pub use effect::Effect;
pub use selection::ItemSelection;

/// Stable identifier of an item definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u16);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Item definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub damage_multiplier: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<Effect>,
    /// Unlocked from the start, independent of stage progress.
    #[cfg_attr(feature = "serde", serde(default))]
    pub starter: bool,
}

impl Item {
    pub fn new(id: ItemId, name: impl Into<String>, damage_multiplier: f32) -> Self {
        Self {
            id,
            name: name.into(),
            damage_multiplier,
            effects: Vec::new(),
            starter: false,
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn starter(mut self) -> Self {
        self.starter = true;
        self
    }

    /// Damage multiplier, with non-positive or non-finite values read as 1.0.
    pub fn multiplier(&self) -> f32 {
        if self.damage_multiplier.is_finite() && self.damage_multiplier > 0.0 {
            self.damage_multiplier
        } else {
            1.0
        }
    }

    /// Number of hits the attack delivers. `DoubleAttack` overrides the default of 1.
    pub fn hit_count(&self) -> u8 {
        self.effects
            .iter()
            .filter_map(Effect::hit_count)
            .max()
            .unwrap_or(1)
    }

    /// Applies every pre-hit effect to the target's turn status.
    pub fn apply_effects(&self, target: &mut crate::TurnStatus) {
        for effect in &self.effects {
            effect.apply(target);
        }
    }

    /// Effect descriptions joined with `, `, or an empty string.
    pub fn description(&self) -> String {
        self.effects
            .iter()
            .map(Effect::description)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Name, multiplier and effects, e.g. `Stapler x1.0 (2 hits)`.
    pub fn summary(&self) -> String {
        let effects = self.description();
        if effects.is_empty() {
            format!("{} x{:.1}", self.name, self.multiplier())
        } else {
            format!("{} x{:.1} ({effects})", self.name, self.multiplier())
        }
    }
}
