//! Session worker that owns the authoritative [`revenge_core::GameState`].
//!
//! Every input is resolved by [`CombatEngine`] against a clone of the
//! committed state and a [`StagedProgress`] copy of the committed flags. The
//! resulting cues are handed to the [`Presenter`]; when the last one has
//! played, the staged state and flags replace the committed ones. A
//! `ResetCombat` arriving mid-sequence drops the staged copy instead, so no
//! damage or progress from the cancelled sequence is ever applied.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use revenge_core::{
    CombatEngine, CombatError, Cue, Cutscene, GameError, GameState, StageAdvance, StoreError,
};

use crate::api::{InputEvent, InputOutcome, Presenter};
use crate::events::{CombatEvent, Event, EventBus, GameOutcome, ProgressEvent};
use crate::oracle::OracleManager;
use crate::repository::{ProgressRepository, ProgressSnapshot, StagedProgress};

/// Commands that can be sent to the session worker
pub enum Command {
    /// Resolve a player input. The reply is sent before the cues play.
    Input {
        event: InputEvent,
        reply: oneshot::Sender<InputOutcome>,
    },
    /// Query the committed game state (read-only).
    QueryState { reply: oneshot::Sender<GameState> },
}

/// Resolved transition waiting for its cues to finish.
pub(crate) struct Sequence {
    cause: &'static str,
    /// Ticks commit without announcing a state change.
    quiet: bool,
    state: GameState,
    progress: StagedProgress,
    cues: Vec<Cue>,
    stage: Option<StageAdvance>,
    save_error: Option<StoreError>,
}

/// Measures wall-clock time between automatic ticks.
///
/// Skipped ticks still count, so the bars keep pace with real time. Time
/// spent playing a sequence does not: `pause` drops the reference point.
#[derive(Debug, Default)]
struct TickTimer {
    last: Option<Instant>,
}

impl TickTimer {
    fn elapsed(&mut self, now: Instant) -> Duration {
        let elapsed = self
            .last
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or(Duration::ZERO);
        self.last = Some(now);
        elapsed
    }

    fn pause(&mut self) {
        self.last = None;
    }
}

impl Sequence {
    fn plays_intro(&self) -> bool {
        self.cues
            .iter()
            .any(|cue| matches!(cue, Cue::Cutscene(Cutscene::Intro)))
    }
}

/// Builds the initial state and the opening sequence.
///
/// The returned state is already initialized; the sequence carries the same
/// state plus the opening cues (intro cutscene on a first run, stage banner,
/// music).
pub(crate) fn open_session(
    game_seed: u64,
    oracles: &OracleManager,
    progress: &ProgressSnapshot,
) -> Result<(GameState, Sequence), CombatError> {
    let env = oracles.as_combat_env();
    let mut state = GameState::from_env(game_seed, &env)?;
    let staged = StagedProgress::new(progress);
    let resolution = CombatEngine::new(&mut state).initialize(&env, &staged)?;

    let opening = Sequence {
        cause: "initialize",
        quiet: false,
        state: state.clone(),
        progress: staged,
        cues: resolution.cues,
        stage: None,
        save_error: None,
    };
    Ok((state, opening))
}

/// Background task that processes session commands.
pub(crate) struct SessionWorker {
    state: GameState,
    progress: ProgressSnapshot,
    oracles: OracleManager,
    repository: Arc<dyn ProgressRepository>,
    presenter: Arc<dyn Presenter>,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    tick_interval: Option<Duration>,
    tick_timer: TickTimer,
    opening: Option<Sequence>,
}

impl SessionWorker {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        state: GameState,
        progress: ProgressSnapshot,
        opening: Sequence,
        oracles: OracleManager,
        repository: Arc<dyn ProgressRepository>,
        presenter: Arc<dyn Presenter>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        tick_interval: Option<Duration>,
    ) -> Self {
        info!(
            target: "runtime::worker",
            stage = state.stages.current_index(),
            seed = state.game_seed,
            "SessionWorker initialized"
        );

        Self {
            state,
            progress,
            oracles,
            repository,
            presenter,
            command_rx,
            event_bus,
            tick_interval,
            tick_timer: TickTimer::default(),
            opening: Some(opening),
        }
    }

    /// Main worker loop. Returns once every handle has been dropped.
    pub async fn run(mut self) {
        if let Some(opening) = self.opening.take() {
            self.play_chain(opening).await;
        }

        let period = self.tick_interval.filter(|period| !period.is_zero());
        let mut ticker = period.map(|period| {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            ticker
        });

        loop {
            match ticker.as_mut() {
                Some(ticker) => tokio::select! {
                    command = self.command_rx.recv() => match command {
                        Some(command) => self.handle_command(command).await,
                        None => break,
                    },
                    _ = ticker.tick() => self.auto_tick(Instant::now()),
                },
                None => match self.command_rx.recv().await {
                    Some(command) => self.handle_command(command).await,
                    None => break,
                },
            }
        }

        debug!(target: "runtime::worker", "command channel closed, session worker stopping");
    }

    async fn handle_command(&mut self, command: Command) {
        match command {
            Command::Input { event, reply } => {
                let (outcome, sequence) = self.resolve(event);
                if reply.send(outcome).is_err() {
                    debug!("Input reply channel closed (caller dropped)");
                }
                if let Some(sequence) = sequence {
                    self.play_chain(sequence).await;
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
        }
    }

    /// Timing bars advance between inputs. Tick transitions carry no cues.
    fn auto_tick(&mut self, now: Instant) {
        let dt = self.tick_timer.elapsed(now);
        if dt.is_zero() {
            return;
        }
        if let (_, Some(sequence)) = self.resolve(InputEvent::Tick(dt.as_secs_f32())) {
            self.commit(sequence);
        }
    }

    /// Runs the engine on a staged copy. Committed state is not touched.
    fn resolve(&self, event: InputEvent) -> (InputOutcome, Option<Sequence>) {
        let env = self.oracles.as_combat_env();
        let mut state = self.state.clone();
        let mut progress = StagedProgress::new(&self.progress);

        let result = {
            let mut engine = CombatEngine::new(&mut state);
            match event {
                InputEvent::SelectPrevious => engine.select_previous(&env),
                InputEvent::SelectNext => engine.select_next(&env),
                InputEvent::SelectItem(id) => engine.select_item(&env, id),
                InputEvent::ConfirmItem => engine.confirm_item(&env),
                InputEvent::UseCurrentItem => engine.use_current_item(&env),
                InputEvent::ConfirmAttack => engine.confirm_attack(&env, &mut progress),
                InputEvent::ConfirmDefense => engine.confirm_defense(&env),
                InputEvent::ResetCombat => engine.reset_combat(),
                InputEvent::Restart => engine.restart(&env, &mut progress),
                InputEvent::StartNewGame => engine.start_new_game(&env, &mut progress),
                InputEvent::Tick(dt) => Ok(engine.tick(dt)),
            }
        };

        match result {
            Err(error) => {
                debug!(
                    target: "runtime::worker",
                    input = event.name(),
                    code = error.error_code(),
                    severity = ?error.severity(),
                    %error,
                    "Input rejected"
                );
                (InputOutcome::Rejected(error), None)
            }
            Ok(resolution) if !resolution.is_applied() => {
                if !matches!(event, InputEvent::Tick(_)) {
                    debug!(
                        target: "runtime::worker",
                        input = event.name(),
                        phase = %self.state.phase(),
                        "Input ignored in current phase"
                    );
                    self.publish(CombatEvent::InputIgnored { input: event, busy: false });
                }
                (InputOutcome::Ignored, None)
            }
            Ok(resolution) => {
                let sequence = Sequence {
                    cause: event.name(),
                    quiet: matches!(event, InputEvent::Tick(_)),
                    state,
                    progress,
                    cues: resolution.cues,
                    stage: resolution.stage,
                    save_error: resolution.save_error,
                };
                (InputOutcome::Applied, Some(sequence))
            }
        }
    }

    /// Plays a sequence and, when it was the first-run intro, the new game
    /// that follows it.
    async fn play_chain(&mut self, sequence: Sequence) {
        let mut next = Some(sequence);
        while let Some(sequence) = next.take() {
            let intro = sequence.plays_intro();
            if !self.play(sequence).await || !intro {
                break;
            }

            let (outcome, follow_up) = self.resolve(InputEvent::StartNewGame);
            if let InputOutcome::Rejected(error) = outcome {
                warn!(target: "runtime::worker", %error, "Failed to start game after intro");
            }
            next = follow_up;
        }
        self.tick_timer.pause();
    }

    /// Plays every cue, then commits. Returns `false` if a reset cancelled it.
    async fn play(&mut self, sequence: Sequence) -> bool {
        let presenter = Arc::clone(&self.presenter);

        for cue in &sequence.cues {
            if !cue.is_blocking() {
                presenter.show(cue);
                continue;
            }

            let mut playback = presenter.play(cue);
            loop {
                tokio::select! {
                    () = &mut playback => break,
                    command = self.command_rx.recv() => match command {
                        Some(Command::Input { event: InputEvent::ResetCombat, reply }) => {
                            self.cancel(sequence.cause, reply);
                            return false;
                        }
                        Some(Command::Input { event, reply }) => {
                            debug!(
                                target: "runtime::worker",
                                input = event.name(),
                                playing = sequence.cause,
                                "Input ignored while presentation is playing"
                            );
                            self.publish(CombatEvent::InputIgnored { input: event, busy: true });
                            if reply.send(InputOutcome::Ignored).is_err() {
                                debug!("Input reply channel closed (caller dropped)");
                            }
                        }
                        Some(Command::QueryState { reply }) => {
                            if reply.send(self.state.clone()).is_err() {
                                debug!("QueryState reply channel closed (caller dropped)");
                            }
                        }
                        None => {
                            (&mut playback).await;
                            break;
                        }
                    },
                }
            }
        }

        self.commit(sequence);
        true
    }

    /// Drops the staged sequence and resets the committed combat.
    fn cancel(&mut self, cause: &'static str, reply: oneshot::Sender<InputOutcome>) {
        info!(target: "runtime::worker", cancelled = cause, "Presentation cancelled by reset");
        self.publish(CombatEvent::SequenceCancelled { cause });

        let (outcome, reset) = self.resolve(InputEvent::ResetCombat);
        if reply.send(outcome).is_err() {
            debug!("Input reply channel closed (caller dropped)");
        }
        if let Some(reset) = reset {
            for cue in &reset.cues {
                self.presenter.show(cue);
            }
            self.commit(reset);
        }
    }

    fn commit(&mut self, sequence: Sequence) {
        let Sequence {
            cause,
            quiet,
            state,
            progress,
            stage,
            save_error,
            ..
        } = sequence;

        let previous_phase = self.state.phase();
        self.state = state;

        let flush = progress.flush_requested();
        self.progress = progress.into_snapshot();
        if flush {
            self.persist_progress();
        }
        if let Some(error) = save_error {
            warn!(target: "runtime::worker", %error, "Progress store reported a save failure");
        }

        if let Some(advance) = stage {
            info!(
                target: "runtime::worker",
                cleared = advance.cleared,
                first_clear = advance.first_clear,
                unlocked = ?advance.unlocked,
                next = ?advance.next,
                "Stage cleared"
            );
            self.event_bus
                .publish(Event::Progress(ProgressEvent::StageAdvanced { advance }));
        }

        let phase = self.state.phase();
        if phase != previous_phase
            && let Some(outcome) = GameOutcome::from_phase(phase)
        {
            info!(target: "runtime::worker", ?outcome, "Game ended");
            self.publish(CombatEvent::GameEnded { outcome });
        }

        if !quiet {
            self.publish(CombatEvent::StateChanged {
                cause,
                state: Box::new(self.state.clone()),
            });
        }
    }

    fn persist_progress(&self) {
        match self.repository.save(&self.progress) {
            Ok(()) => {
                debug!(
                    target: "runtime::worker",
                    flags = self.progress.flags.len(),
                    "Progress saved"
                );
                self.event_bus.publish(Event::Progress(ProgressEvent::Saved {
                    flags: self.progress.flags.len(),
                }));
            }
            Err(error) => {
                warn!(target: "runtime::worker", %error, "Failed to persist progress");
                self.event_bus.publish(Event::Progress(ProgressEvent::SaveFailed {
                    error: error.to_string(),
                }));
            }
        }
    }

    fn publish(&self, event: CombatEvent) {
        self.event_bus.publish(Event::Combat(event));
    }
}
