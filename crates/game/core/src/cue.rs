//! Presentation cues.
//!
//! The engine never talks to audio, sprites or video directly. Each operation
//! returns an ordered list of [`Cue`]s that the presentation layer plays back
//! before the next input is accepted.

use crate::combatant::{Rank, Side};
use crate::item::ItemId;
use crate::timing::Tier;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SoundEffect {
    Select,
    Throw,
    Hit,
    Defend,
    Unlock,
    Victory,
    Defeat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pose {
    Normal,
    Angry,
    Dodge,
    Throw,
}

/// Background music track, addressed by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MusicTrack {
    Normal,
    Boss,
}

impl MusicTrack {
    pub fn name(self) -> &'static str {
        self.into()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cutscene {
    Intro,
    GameOver,
    GameClear,
}

/// One presentation step.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cue {
    Sound(SoundEffect),
    Pose { side: Side, pose: Pose },
    /// Thrown projectile travelling from `from` to the other side.
    Projectile { from: Side, item: Option<ItemId> },
    /// Floating text over a combatant: damage numbers, "Miss", "Blocked".
    FloatingText { side: Side, text: String },
    TimingResult { tier: Tier },
    HpChanged { side: Side, hp: f32, max_hp: f32 },
    ItemDescription { item: ItemId, text: String },
    ItemUnlocked { item: ItemId },
    StageStarted { index: usize, enemy: String, rank: Rank },
    Music(MusicTrack),
    StopMusic,
    Cutscene(Cutscene),
}

impl Cue {
    pub fn floating(side: Side, text: impl Into<String>) -> Self {
        Cue::FloatingText {
            side,
            text: text.into(),
        }
    }

    /// Cues that stand for an animation the presenter should wait on.
    pub fn is_blocking(&self) -> bool {
        matches!(
            self,
            Cue::Projectile { .. } | Cue::FloatingText { .. } | Cue::Cutscene(_)
        )
    }
}
