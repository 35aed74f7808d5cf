//! Event types for different topics.

use revenge_core::{GameState, Phase, StageAdvance};
use serde::{Deserialize, Serialize};

use crate::api::InputEvent;

/// Combat state changes.
#[derive(Debug, Clone)]
pub enum CombatEvent {
    /// A presentation sequence finished and its staged state was committed.
    StateChanged {
        /// Name of the input that produced the sequence.
        cause: &'static str,
        state: Box<GameState>,
    },

    /// A sequence was cancelled by a reset before it committed.
    SequenceCancelled { cause: &'static str },

    /// An input was dropped: wrong phase or a sequence was still playing.
    InputIgnored { input: InputEvent, busy: bool },

    /// The committed phase became terminal.
    GameEnded { outcome: GameOutcome },
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Defeat,
    Cleared,
}

impl GameOutcome {
    pub fn from_phase(phase: Phase) -> Option<Self> {
        match phase {
            Phase::Defeat => Some(Self::Defeat),
            Phase::GameClear => Some(Self::Cleared),
            _ => None,
        }
    }
}

/// Stage progression and persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ProgressEvent {
    StageAdvanced { advance: StageAdvance },

    /// The progress snapshot reached the repository.
    Saved { flags: usize },

    /// Writing the progress snapshot failed. In-memory progress is kept.
    SaveFailed { error: String },
}
