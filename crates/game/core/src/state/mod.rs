//! Authoritative game state.
//!
//! Runtime layers clone or query this state but mutate it exclusively through
//! [`crate::engine::CombatEngine`].

use crate::combatant::{Combatant, EnemyProfile, Rank};
use crate::config::CombatConfig;
use crate::cue::MusicTrack;
use crate::engine::Phase;
use crate::env::{CombatEnv, OracleError};
use crate::item::{ItemId, ItemSelection};
use crate::stage::StageTracker;
use crate::timing::{FixedStepClock, TimingBar};

/// Enemy currently in the fight.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enemy {
    pub name: String,
    pub rank: Rank,
    pub item: Option<ItemId>,
    pub combatant: Combatant,
}

impl Enemy {
    pub fn from_profile(profile: EnemyProfile) -> Self {
        Self {
            name: profile.name,
            rank: profile.rank,
            item: profile.item,
            combatant: Combatant::new(profile.stats),
        }
    }
}

/// Turn cycle state: phase, combatants, item selection and timing bars.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatState {
    pub phase: Phase,
    pub player: Option<Combatant>,
    pub enemy: Option<Enemy>,
    pub selection: ItemSelection,
    pub attack_bar: TimingBar,
    pub defense_bar: TimingBar,
    pub clock: FixedStepClock,
    /// Track currently playing, `None` when stopped.
    pub music: Option<MusicTrack>,
}

impl CombatState {
    pub fn new(config: &CombatConfig) -> Self {
        let timing = &config.timing;
        Self {
            phase: Phase::ItemSelect,
            player: None,
            enemy: None,
            selection: ItemSelection::default(),
            attack_bar: TimingBar::new(timing.bar_width, timing.attack_speed),
            defense_bar: TimingBar::new(timing.bar_width, timing.defense_speed),
            clock: FixedStepClock::new(config.fixed_step),
            music: None,
        }
    }

    /// Stops both bars and drops any partial clock step.
    pub fn park_bars(&mut self) {
        self.attack_bar.stop();
        self.defense_bar.stop();
        self.clock.reset();
    }
}

/// Canonical snapshot of the deterministic game state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Set once at game start; combined with `nonce` to seed each roll.
    pub game_seed: u64,
    /// Count of resolved attack and defense actions.
    pub nonce: u64,
    pub combat: CombatState,
    pub stages: StageTracker,
}

impl GameState {
    pub fn new(game_seed: u64, config: &CombatConfig, stages: StageTracker) -> Self {
        Self {
            game_seed,
            nonce: 0,
            combat: CombatState::new(config),
            stages,
        }
    }

    /// Builds a fresh state from the roster's stages and the catalog's starter items.
    ///
    /// # Errors
    ///
    /// Returns an `OracleError` if the item, roster or config oracle is missing.
    pub fn from_env(game_seed: u64, env: &CombatEnv<'_>) -> Result<Self, OracleError> {
        let stages = StageTracker::new(env.roster()?.stages(), env.items()?.starter_items());
        Ok(Self::new(game_seed, env.config()?.combat(), stages))
    }

    pub fn phase(&self) -> Phase {
        self.combat.phase
    }

    pub fn player(&self) -> Option<&Combatant> {
        self.combat.player.as_ref()
    }

    pub fn enemy(&self) -> Option<&Enemy> {
        self.combat.enemy.as_ref()
    }
}
