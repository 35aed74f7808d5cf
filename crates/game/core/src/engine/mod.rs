//! Combat turn state machine.
//!
//! The [`CombatEngine`] is the authoritative reducer for [`GameState`]. Every
//! operation validates first and mutates second, so a rejected transition
//! leaves the state untouched. Triggers fired in the wrong phase resolve as
//! [`StepOutcome::Ignored`].
//!
//! Cycle: `ItemSelect → AttackTiming → DefenseTiming → ItemSelect`, ending in
//! `Defeat` or `GameClear`. The enemy's counterattack is resolved inside the
//! defense step and never exposed as a phase of its own.

mod errors;
mod turns;

pub use errors::CombatError;

use crate::combat::{AttackReport, DefenseReport};
use crate::combatant::{Combatant, EnemyProfile, Rank, Side};
use crate::cue::{Cue, Cutscene, MusicTrack, Pose, SoundEffect};
use crate::env::{CombatEnv, ItemOracle, OracleError, RosterOracle};
use crate::item::{ItemId, ItemSelection};
use crate::stage::{ProgressStore, StageAdvance, StageTracker, StoreError};
use crate::state::{Enemy, GameState};

/// Exposed phase of the turn cycle.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    #[default]
    ItemSelect,
    AttackTiming,
    DefenseTiming,
    /// Player lost. Only `restart` leaves this phase.
    Defeat,
    /// Final enemy beaten. Only `restart` or a new game leaves this phase.
    GameClear,
}

impl Phase {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::Defeat | Phase::GameClear)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepOutcome {
    Applied,
    /// Trigger did not apply in the current phase. Nothing changed.
    Ignored,
}

/// Everything one engine operation produced.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resolution {
    pub outcome: StepOutcome,
    /// Presentation steps, in playback order.
    pub cues: Vec<Cue>,
    pub attack: Option<AttackReport>,
    pub defense: Option<DefenseReport>,
    pub stage: Option<StageAdvance>,
    /// Progress store flush failure. The in-memory transition still happened.
    pub save_error: Option<StoreError>,
}

impl Resolution {
    pub fn ignored() -> Self {
        Self {
            outcome: StepOutcome::Ignored,
            ..Self::applied(Vec::new())
        }
    }

    pub fn applied(cues: Vec<Cue>) -> Self {
        Self {
            outcome: StepOutcome::Applied,
            cues,
            attack: None,
            defense: None,
            stage: None,
            save_error: None,
        }
    }

    pub fn is_applied(&self) -> bool {
        self.outcome == StepOutcome::Applied
    }
}

/// Reducer over a borrowed [`GameState`].
pub struct CombatEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> CombatEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Loads progress, creates the player and spawns the current stage's enemy.
    ///
    /// Emits the intro cutscene first when the store reports a first run.
    pub fn initialize(
        &mut self,
        env: &CombatEnv<'_>,
        store: &dyn ProgressStore,
    ) -> Result<Resolution, CombatError> {
        let roster = env.roster()?;
        let items = env.items()?;
        env.config()?;
        let profile = stage_profile(roster, &self.state.stages, self.state.stages.current_index())?;
        let final_rank = roster.final_rank();

        let mut cues = Vec::new();
        if self.state.stages.is_first_run(store) {
            cues.push(Cue::Cutscene(Cutscene::Intro));
        }

        self.state.stages.load(store);
        self.state.combat.player = Some(Combatant::new(roster.player_stats()));
        self.refresh_selection(items);
        self.enter_stage(profile, final_rank, &mut cues);

        Ok(Resolution::applied(cues))
    }

    pub fn select_next(&mut self, env: &CombatEnv<'_>) -> Result<Resolution, CombatError> {
        self.navigate(env, ItemSelection::select_next)
    }

    pub fn select_previous(&mut self, env: &CombatEnv<'_>) -> Result<Resolution, CombatError> {
        self.navigate(env, ItemSelection::select_previous)
    }

    /// Records `id` as the pending item. Does not leave `ItemSelect`.
    pub fn select_item(
        &mut self,
        env: &CombatEnv<'_>,
        id: ItemId,
    ) -> Result<Resolution, CombatError> {
        if self.state.combat.phase != Phase::ItemSelect {
            return Ok(Resolution::ignored());
        }
        let items = env.items()?;
        let item = items.item(id).ok_or(CombatError::UnknownItem(id))?;
        if !self.state.stages.is_unlocked(id) || !self.state.combat.selection.select(id) {
            return Err(CombatError::ItemLocked(id));
        }

        Ok(Resolution::applied(vec![
            Cue::Sound(SoundEffect::Select),
            Cue::ItemDescription {
                item: id,
                text: item.summary(),
            },
        ]))
    }

    /// Confirms the pending item and starts the attack bar.
    pub fn confirm_item(&mut self, env: &CombatEnv<'_>) -> Result<Resolution, CombatError> {
        if self.state.combat.phase != Phase::ItemSelect {
            return Ok(Resolution::ignored());
        }
        let id = self
            .state
            .combat
            .selection
            .pending()
            .ok_or(CombatError::NoItemSelected)?;
        self.begin_attack(env, id)
    }

    /// Selects the item under the cursor and confirms it in one step.
    pub fn use_current_item(&mut self, env: &CombatEnv<'_>) -> Result<Resolution, CombatError> {
        if self.state.combat.phase != Phase::ItemSelect {
            return Ok(Resolution::ignored());
        }
        let id = self
            .state
            .combat
            .selection
            .current()
            .ok_or(CombatError::NoItemSelected)?;
        self.begin_attack(env, id)
    }

    /// Advances the active timing bar by `dt` seconds in fixed steps.
    pub fn tick(&mut self, dt: f32) -> Resolution {
        let combat = &mut self.state.combat;
        let bar = match combat.phase {
            Phase::AttackTiming => &mut combat.attack_bar,
            Phase::DefenseTiming => &mut combat.defense_bar,
            _ => return Resolution::ignored(),
        };

        let step = combat.clock.step();
        for _ in 0..combat.clock.accumulate(dt) {
            bar.advance(step);
        }
        Resolution::applied(Vec::new())
    }

    /// Restores both combatants and returns to `ItemSelect`.
    ///
    /// # Errors
    ///
    /// Returns `CombatError::TerminalState` after a defeat or game clear.
    pub fn reset_combat(&mut self) -> Result<Resolution, CombatError> {
        if self.state.combat.phase.is_terminal() {
            return Err(CombatError::TerminalState);
        }

        let mut cues = Vec::new();
        self.restore_combatants(&mut cues);
        let combat = &mut self.state.combat;
        combat.selection.clear_pending();
        combat.phase = Phase::ItemSelect;
        combat.park_bars();
        Ok(Resolution::applied(cues))
    }

    /// Leaves a terminal phase.
    ///
    /// After a defeat the current stage is fought again from full HP. After a
    /// game clear all progress is wiped and the campaign restarts at stage 0.
    pub fn restart(
        &mut self,
        env: &CombatEnv<'_>,
        store: &mut dyn ProgressStore,
    ) -> Result<Resolution, CombatError> {
        match self.state.combat.phase {
            Phase::Defeat => {
                let final_rank = env.roster()?.final_rank();
                let mut cues = Vec::new();
                self.restore_combatants(&mut cues);
                let combat = &mut self.state.combat;
                combat.selection.clear_pending();
                combat.phase = Phase::ItemSelect;
                combat.park_bars();
                self.ensure_music(final_rank, &mut cues);
                Ok(Resolution::applied(cues))
            }
            Phase::GameClear => self.restart_campaign(env, store, false),
            _ => Ok(Resolution::ignored()),
        }
    }

    /// Starts over from stage 0 with all progress wiped and the first-run flag cleared.
    pub fn start_new_game(
        &mut self,
        env: &CombatEnv<'_>,
        store: &mut dyn ProgressStore,
    ) -> Result<Resolution, CombatError> {
        self.restart_campaign(env, store, true)
    }

    fn restart_campaign(
        &mut self,
        env: &CombatEnv<'_>,
        store: &mut dyn ProgressStore,
        new_game: bool,
    ) -> Result<Resolution, CombatError> {
        let roster = env.roster()?;
        let items = env.items()?;
        let profile = stage_profile(roster, &self.state.stages, 0)?;
        let final_rank = roster.final_rank();

        let mut save_error = self.state.stages.reset_all_progress(store).err();
        if new_game && let Err(error) = self.state.stages.complete_first_run(store) {
            save_error.get_or_insert(error);
        }
        self.state.stages.restart_from_beginning();
        self.state.combat.music = None;

        let mut cues = Vec::new();
        self.refresh_selection(items);
        self.enter_stage(profile, final_rank, &mut cues);

        let mut resolution = Resolution::applied(cues);
        resolution.save_error = save_error;
        Ok(resolution)
    }

    fn navigate(
        &mut self,
        env: &CombatEnv<'_>,
        step: fn(&mut ItemSelection) -> Option<ItemId>,
    ) -> Result<Resolution, CombatError> {
        if self.state.combat.phase != Phase::ItemSelect {
            return Ok(Resolution::ignored());
        }
        let items = env.items()?;
        let Some(id) = step(&mut self.state.combat.selection) else {
            return Ok(Resolution::ignored());
        };

        let text = items.item(id).map(|item| item.summary()).unwrap_or_default();
        Ok(Resolution::applied(vec![
            Cue::Sound(SoundEffect::Select),
            Cue::ItemDescription { item: id, text },
        ]))
    }

    fn begin_attack(&mut self, env: &CombatEnv<'_>, id: ItemId) -> Result<Resolution, CombatError> {
        self.require_combatants()?;
        if env.items()?.item(id).is_none() {
            return Err(CombatError::UnknownItem(id));
        }
        if !self.state.stages.is_unlocked(id) {
            return Err(CombatError::ItemLocked(id));
        }

        let combat = &mut self.state.combat;
        combat.selection.select(id);
        combat.phase = Phase::AttackTiming;
        combat.clock.reset();
        combat.attack_bar.restart();
        Ok(Resolution::applied(Vec::new()))
    }

    fn require_combatants(&self) -> Result<(), CombatError> {
        if self.state.combat.player.is_none() {
            return Err(CombatError::PlayerNotConfigured);
        }
        if self.state.combat.enemy.is_none() {
            return Err(CombatError::EnemyNotConfigured);
        }
        Ok(())
    }

    /// Rebuilds the selectable list from the catalog, in catalog order.
    fn refresh_selection(&mut self, items: &dyn ItemOracle) {
        let unlocked = items
            .all_items()
            .into_iter()
            .map(|item| item.id)
            .filter(|id| self.state.stages.is_unlocked(*id))
            .collect();
        self.state.combat.selection.refresh(unlocked);
    }

    fn restore_combatants(&mut self, cues: &mut Vec<Cue>) {
        let combat = &mut self.state.combat;
        if let Some(player) = combat.player.as_mut() {
            player.restore();
            cues.push(hp_cue(Side::Player, player));
            cues.push(Cue::Pose {
                side: Side::Player,
                pose: Pose::Normal,
            });
        }
        if let Some(enemy) = combat.enemy.as_mut() {
            enemy.combatant.restore();
            cues.push(hp_cue(Side::Enemy, &enemy.combatant));
            cues.push(Cue::Pose {
                side: Side::Enemy,
                pose: Pose::Normal,
            });
        }
    }

    /// Spawns the stage's enemy and resets the turn cycle for it.
    fn enter_stage(
        &mut self,
        profile: Option<EnemyProfile>,
        final_rank: Option<Rank>,
        cues: &mut Vec<Cue>,
    ) {
        let index = self.state.stages.current_index();
        let combat = &mut self.state.combat;
        combat.enemy = profile.map(Enemy::from_profile);
        if let Some(enemy) = &combat.enemy {
            cues.push(Cue::StageStarted {
                index,
                enemy: enemy.name.clone(),
                rank: enemy.rank,
            });
        }

        self.restore_combatants(cues);
        let combat = &mut self.state.combat;
        combat.selection.clear_pending();
        combat.phase = Phase::ItemSelect;
        combat.park_bars();
        self.ensure_music(final_rank, cues);
    }

    /// Switches to the boss track against the final rank. Emits only on change.
    fn ensure_music(&mut self, final_rank: Option<Rank>, cues: &mut Vec<Cue>) {
        let boss = self
            .state
            .combat
            .enemy
            .as_ref()
            .is_some_and(|enemy| Some(enemy.rank) == final_rank);
        let track = if boss {
            MusicTrack::Boss
        } else {
            MusicTrack::Normal
        };

        if self.state.combat.music != Some(track) {
            self.state.combat.music = Some(track);
            cues.push(Cue::Music(track));
        }
    }

    fn stop_music(&mut self, cues: &mut Vec<Cue>) {
        if self.state.combat.music.take().is_some() {
            cues.push(Cue::StopMusic);
        }
    }
}

/// Enemy preset for the stage at `index`; `None` past the last stage.
fn stage_profile(
    roster: &dyn RosterOracle,
    stages: &StageTracker,
    index: usize,
) -> Result<Option<EnemyProfile>, OracleError> {
    match stages.stages().get(index) {
        Some(stage) => roster
            .profile(stage.enemy)
            .map(Some)
            .ok_or(OracleError::ProfileNotFound(stage.enemy)),
        None => Ok(None),
    }
}

fn hp_cue(side: Side, combatant: &Combatant) -> Cue {
    Cue::HpChanged {
        side,
        hp: combatant.hp(),
        max_hp: combatant.max_hp(),
    }
}

fn hp_pose(combatant: &Combatant, threshold: f32) -> Pose {
    if combatant.is_low_hp(threshold) {
        Pose::Angry
    } else {
        Pose::Normal
    }
}
