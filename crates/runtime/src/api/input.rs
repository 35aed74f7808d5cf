//! Discrete input events and their outcomes.

use revenge_core::{CombatError, ItemId};

/// Player intents, decoupled from physical key bindings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    SelectPrevious,
    SelectNext,
    /// Records a specific unlocked item as pending.
    SelectItem(ItemId),
    /// Confirms the pending item and starts the attack bar.
    ConfirmItem,
    /// Selects the item under the cursor and confirms it.
    UseCurrentItem,
    ConfirmAttack,
    ConfirmDefense,
    ResetCombat,
    /// Leaves Defeat or GameClear.
    Restart,
    StartNewGame,
    /// Advances the active timing bar by `dt` seconds.
    Tick(f32),
}

impl InputEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectPrevious => "select_previous",
            Self::SelectNext => "select_next",
            Self::SelectItem(_) => "select_item",
            Self::ConfirmItem => "confirm_item",
            Self::UseCurrentItem => "use_current_item",
            Self::ConfirmAttack => "confirm_attack",
            Self::ConfirmDefense => "confirm_defense",
            Self::ResetCombat => "reset_combat",
            Self::Restart => "restart",
            Self::StartNewGame => "start_new_game",
            Self::Tick(_) => "tick",
        }
    }
}

/// What the session did with an input.
#[derive(Debug, Clone, PartialEq)]
pub enum InputOutcome {
    /// The transition ran. Its state commits once the cue sequence finishes.
    Applied,
    /// Wrong phase, or a presentation sequence was still playing.
    Ignored,
    /// The transition was aborted; state is unchanged.
    Rejected(CombatError),
}

impl InputOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}
