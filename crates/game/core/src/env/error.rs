//! Oracle access errors.

use crate::combatant::Rank;
use crate::error::{ErrorSeverity, GameError};
use crate::item::ItemId;

/// Errors that occur when accessing oracle data.
///
/// Missing oracles are fatal: the engine cannot resolve anything without its
/// catalog, roster, tuning and rng.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("ItemOracle not available")]
    ItemsNotAvailable,

    #[error("RosterOracle not available")]
    RosterNotAvailable,

    #[error("ConfigOracle not available")]
    ConfigNotAvailable,

    #[error("RngOracle not available")]
    RngNotAvailable,

    /// Item definition was not found by id.
    #[error("item definition {0} not found")]
    ItemNotFound(ItemId),

    /// The roster has no preset for this rank.
    #[error("no enemy profile for rank {0}")]
    ProfileNotFound(Rank),

    /// Stage index past the end of the roster.
    #[error("stage {0} not found")]
    StageNotFound(usize),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            ItemsNotAvailable | RosterNotAvailable | ConfigNotAvailable | RngNotAvailable => {
                ErrorSeverity::Fatal
            }

            ItemNotFound(_) | ProfileNotFound(_) | StageNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            ItemsNotAvailable => "ORACLE_ITEMS_NOT_AVAILABLE",
            RosterNotAvailable => "ORACLE_ROSTER_NOT_AVAILABLE",
            ConfigNotAvailable => "ORACLE_CONFIG_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
            ItemNotFound(_) => "ORACLE_ITEM_NOT_FOUND",
            ProfileNotFound(_) => "ORACLE_PROFILE_NOT_FOUND",
            StageNotFound(_) => "ORACLE_STAGE_NOT_FOUND",
        }
    }
}
