//! Stage progression and item unlocks.
//!
//! [`StageTracker`] walks an ordered list of encounters, records which ones
//! have been cleared, and decides which items are selectable. Clear flags are
//! monotone: only [`StageTracker::reset_all_progress`] ever unsets them.

mod store;

use std::collections::BTreeSet;

pub use store::{FIRST_RUN_KEY, ProgressStore, StoreError, stage_cleared_key};

use crate::combatant::Rank;
use crate::item::ItemId;

/// One encounter in the campaign.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stage {
    pub name: String,
    pub enemy: Rank,
    /// Item unlocked the first time this stage is cleared.
    #[cfg_attr(feature = "serde", serde(default))]
    pub unlocks: Option<ItemId>,
}

impl Stage {
    pub fn new(name: impl Into<String>, enemy: Rank, unlocks: Option<ItemId>) -> Self {
        Self {
            name: name.into(),
            enemy,
            unlocks,
        }
    }
}

/// What happened when the current stage's enemy was defeated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StageAdvance {
    pub cleared: usize,
    /// False when the stage had already been cleared earlier.
    pub first_clear: bool,
    pub unlocked: Option<ItemId>,
    /// Stage now in play, or `None` once the campaign is complete.
    pub next: Option<usize>,
    pub save_error: Option<StoreError>,
}

impl StageAdvance {
    pub fn campaign_complete(&self) -> bool {
        self.next.is_none()
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StageTracker {
    stages: Vec<Stage>,
    cleared: Vec<bool>,
    current: usize,
    starters: BTreeSet<ItemId>,
    unlocked: BTreeSet<ItemId>,
}

impl StageTracker {
    pub fn new(stages: Vec<Stage>, starters: impl IntoIterator<Item = ItemId>) -> Self {
        let starters: BTreeSet<ItemId> = starters.into_iter().collect();
        Self {
            cleared: vec![false; stages.len()],
            stages,
            current: 0,
            unlocked: starters.clone(),
            starters,
        }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_stage(&self) -> Option<&Stage> {
        self.stages.get(self.current)
    }

    pub fn current_enemy_rank(&self) -> Option<Rank> {
        self.current_stage().map(|stage| stage.enemy)
    }

    /// Out-of-range indices read as not cleared.
    pub fn is_stage_cleared(&self, index: usize) -> bool {
        self.cleared.get(index).copied().unwrap_or(false)
    }

    pub fn is_unlocked(&self, item: ItemId) -> bool {
        self.unlocked.contains(&item)
    }

    /// Reads every stage's clear flag and unlocks the items of cleared stages.
    pub fn load(&mut self, store: &dyn ProgressStore) {
        for (index, stage) in self.stages.iter().enumerate() {
            let cleared = store.get_bool(&stage_cleared_key(index), false);
            self.cleared[index] = cleared;
            if cleared && let Some(item) = stage.unlocks {
                self.unlocked.insert(item);
            }
        }
    }

    /// Marks the current stage cleared and moves to the next one.
    ///
    /// The clear flag is persisted and the stage's item unlocked only on the
    /// first clear. Past the last stage the tracker stays put and reports the
    /// campaign complete.
    pub fn on_enemy_defeated(&mut self, store: &mut dyn ProgressStore) -> StageAdvance {
        let index = self.current;
        let first_clear = index < self.stages.len() && !self.cleared[index];
        let mut unlocked = None;
        let mut save_error = None;

        if first_clear {
            self.cleared[index] = true;
            store.set_bool(&stage_cleared_key(index), true);
            save_error = store.save().err();

            if let Some(item) = self.stages[index].unlocks
                && self.unlocked.insert(item)
            {
                unlocked = Some(item);
            }
        }

        let next = if index + 1 < self.stages.len() {
            self.current = index + 1;
            Some(self.current)
        } else {
            None
        };

        StageAdvance {
            cleared: index,
            first_clear,
            unlocked,
            next,
            save_error,
        }
    }

    /// Clears every flag and re-locks all non-starter items.
    ///
    /// # Errors
    ///
    /// Returns the store's error if flushing fails. In-memory progress is
    /// reset either way.
    pub fn reset_all_progress(&mut self, store: &mut dyn ProgressStore) -> Result<(), StoreError> {
        for (index, cleared) in self.cleared.iter_mut().enumerate() {
            *cleared = false;
            store.set_bool(&stage_cleared_key(index), false);
        }
        self.unlocked = self.starters.clone();
        store.save()
    }

    pub fn restart_from_beginning(&mut self) {
        self.current = 0;
    }

    pub fn is_first_run(&self, store: &dyn ProgressStore) -> bool {
        store.get_bool(FIRST_RUN_KEY, true)
    }

    /// # Errors
    ///
    /// Returns the store's error if flushing fails.
    pub fn complete_first_run(&self, store: &mut dyn ProgressStore) -> Result<(), StoreError> {
        store.set_bool(FIRST_RUN_KEY, false);
        store.save()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn campaign() -> StageTracker {
        StageTracker::new(
            vec![
                Stage::new("Stage 1", Rank::Associate, Some(ItemId(1))),
                Stage::new("Stage 2", Rank::Manager, Some(ItemId(2))),
                Stage::new("Stage 3", Rank::Ceo, None),
            ],
            [ItemId(0)],
        )
    }

    #[test]
    fn defeating_enemy_persists_unlocks_and_advances() {
        let mut tracker = campaign();
        let mut store = BTreeMap::new();

        let advance = tracker.on_enemy_defeated(&mut store);
        assert_eq!(advance.cleared, 0);
        assert!(advance.first_clear);
        assert_eq!(advance.unlocked, Some(ItemId(1)));
        assert_eq!(advance.next, Some(1));
        assert!(store.get_bool("Stage_0_Cleared", false));
        assert!(tracker.is_unlocked(ItemId(1)));
        assert_eq!(tracker.current_enemy_rank(), Some(Rank::Manager));
    }

    #[test]
    fn repeated_clear_unlocks_once() {
        let mut tracker = campaign();
        let mut store = BTreeMap::new();

        assert_eq!(tracker.on_enemy_defeated(&mut store).unlocked, Some(ItemId(1)));
        tracker.restart_from_beginning();

        let again = tracker.on_enemy_defeated(&mut store);
        assert!(!again.first_clear);
        assert_eq!(again.unlocked, None);
    }

    #[test]
    fn last_stage_completes_campaign() {
        let mut tracker = campaign();
        let mut store = BTreeMap::new();
        tracker.on_enemy_defeated(&mut store);
        tracker.on_enemy_defeated(&mut store);

        let last = tracker.on_enemy_defeated(&mut store);
        assert!(last.campaign_complete());
        assert_eq!(tracker.current_index(), 2);
    }

    #[test]
    fn reset_relocks_everything_but_starters() {
        let mut tracker = campaign();
        let mut store = BTreeMap::new();
        tracker.on_enemy_defeated(&mut store);
        tracker.on_enemy_defeated(&mut store);

        tracker.reset_all_progress(&mut store).unwrap();

        for index in 0..3 {
            assert!(!tracker.is_stage_cleared(index));
            assert!(!store.get_bool(&stage_cleared_key(index), true));
        }
        assert!(tracker.is_unlocked(ItemId(0)));
        assert!(!tracker.is_unlocked(ItemId(1)));
        assert!(!tracker.is_unlocked(ItemId(2)));
    }

    #[test]
    fn load_restores_unlocks_but_not_position() {
        let mut store = BTreeMap::new();
        store.set_bool(&stage_cleared_key(0), true);
        store.set_bool(&stage_cleared_key(1), true);

        let mut tracker = campaign();
        tracker.load(&store);

        assert!(tracker.is_stage_cleared(1));
        assert!(!tracker.is_stage_cleared(2));
        assert!(!tracker.is_stage_cleared(99));
        assert!(tracker.is_unlocked(ItemId(2)));
        assert_eq!(tracker.current_index(), 0);
    }

    #[test]
    fn first_run_flag() {
        let tracker = campaign();
        let mut store = BTreeMap::new();
        assert!(tracker.is_first_run(&store));
        tracker.complete_first_run(&mut store).unwrap();
        assert!(!tracker.is_first_run(&store));
    }
}
