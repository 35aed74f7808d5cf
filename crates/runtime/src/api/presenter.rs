//! Presentation collaborator driven by the session worker.

use async_trait::async_trait;

use revenge_core::Cue;

/// Receives the cues produced by each resolved input.
///
/// Blocking cues (projectiles, floating text, cutscenes) go through
/// [`Presenter::play`], which the worker awaits before moving to the next
/// cue; the rest go through [`Presenter::show`]. State commits after the last
/// cue of a sequence, and a reset during `play` drops the remaining cues.
#[async_trait]
pub trait Presenter: Send + Sync {
    fn show(&self, cue: &Cue);

    async fn play(&self, cue: &Cue) {
        self.show(cue);
    }
}

/// Presenter that drops every cue. Sequences commit immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

#[async_trait]
impl Presenter for NullPresenter {
    fn show(&self, _cue: &Cue) {}
}
