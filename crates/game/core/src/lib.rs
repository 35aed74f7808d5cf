//! Deterministic combat rules for the office revenge minigame.
//!
//! `revenge-core` defines the canonical combat resolution: the
//! item-select → attack-timing → defense-timing turn cycle, the damage and
//! defense formulas, item effect application, and stage progression with item
//! unlocks. It performs no I/O. Static data is read through the oracles
//! bundled in [`env::CombatEnv`], persistence goes through
//! [`stage::ProgressStore`], and everything the presentation layer should
//! show is returned as [`cue::Cue`] values.
//!
//! All state mutation flows through [`engine::CombatEngine`].
pub mod combat;
pub mod combatant;
pub mod config;
pub mod cue;
pub mod engine;
pub mod env;
pub mod error;
pub mod item;
pub mod stage;
pub mod state;
pub mod timing;

pub use combat::{AttackReport, DefenseReport, HitOutcome, HitReport};
pub use combatant::{Combatant, CombatantStats, EnemyProfile, Rank, Side, TurnStatus};
pub use config::{CombatConfig, TimingConfig};
pub use cue::{Cue, Cutscene, MusicTrack, Pose, SoundEffect};
pub use engine::{CombatEngine, CombatError, Phase, Resolution, StepOutcome};
pub use env::{
    CombatEnv, ConfigOracle, Env, ItemOracle, OracleError, PcgRng, RngOracle, RosterOracle,
    compute_seed,
};
pub use error::{ErrorSeverity, GameError};
pub use item::{Effect, Item, ItemId, ItemSelection};
pub use stage::{ProgressStore, Stage, StageAdvance, StageTracker, StoreError};
pub use state::{CombatState, Enemy, GameState};
pub use timing::{AttackZones, FixedStepClock, TimingBar, Tier, Zone};
