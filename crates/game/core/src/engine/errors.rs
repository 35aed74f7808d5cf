//! Errors surfaced when the engine rejects a transition.

use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::item::ItemId;

/// Reasons a combat transition was rejected.
///
/// A rejected transition leaves the state exactly as it was. Triggers fired
/// in the wrong phase are not errors; they resolve as
/// [`StepOutcome::Ignored`](super::StepOutcome::Ignored).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatError {
    #[error("no player is configured")]
    PlayerNotConfigured,

    #[error("no enemy is configured")]
    EnemyNotConfigured,

    #[error("no item has been selected")]
    NoItemSelected,

    #[error("{0} is not unlocked yet")]
    ItemLocked(ItemId),

    #[error("{0} is not in the catalog")]
    UnknownItem(ItemId),

    /// The fight already ended; only an explicit restart is accepted.
    #[error("combat has ended; restart first")]
    TerminalState,

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CombatError::PlayerNotConfigured | CombatError::EnemyNotConfigured => {
                ErrorSeverity::Fatal
            }
            CombatError::NoItemSelected => ErrorSeverity::Recoverable,
            CombatError::ItemLocked(_)
            | CombatError::UnknownItem(_)
            | CombatError::TerminalState => ErrorSeverity::Validation,
            CombatError::Oracle(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            CombatError::PlayerNotConfigured => "COMBAT_PLAYER_NOT_CONFIGURED",
            CombatError::EnemyNotConfigured => "COMBAT_ENEMY_NOT_CONFIGURED",
            CombatError::NoItemSelected => "COMBAT_NO_ITEM_SELECTED",
            CombatError::ItemLocked(_) => "COMBAT_ITEM_LOCKED",
            CombatError::UnknownItem(_) => "COMBAT_UNKNOWN_ITEM",
            CombatError::TerminalState => "COMBAT_TERMINAL_STATE",
            CombatError::Oracle(error) => error.error_code(),
        }
    }
}
