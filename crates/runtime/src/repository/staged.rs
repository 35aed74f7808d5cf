//! Uncommitted progress writes for one presentation sequence.

use std::collections::BTreeMap;

use revenge_core::{ProgressStore, StoreError};

use crate::repository::ProgressSnapshot;

/// [`ProgressStore`] over a private copy of the committed flags.
///
/// `save` only records that a flush was requested; the worker writes the
/// snapshot to the repository when it commits. Dropping a staged store
/// discards its writes.
#[derive(Debug, Clone)]
pub struct StagedProgress {
    flags: BTreeMap<String, bool>,
    flush_requested: bool,
}

impl StagedProgress {
    pub fn new(snapshot: &ProgressSnapshot) -> Self {
        Self {
            flags: snapshot.flags.clone(),
            flush_requested: false,
        }
    }

    pub fn flush_requested(&self) -> bool {
        self.flush_requested
    }

    pub fn into_snapshot(self) -> ProgressSnapshot {
        ProgressSnapshot { flags: self.flags }
    }
}

impl ProgressStore for StagedProgress {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.flags.get(key).copied().unwrap_or(default)
    }

    fn set_bool(&mut self, key: &str, value: bool) {
        self.flags.insert(key.to_owned(), value);
    }

    fn save(&mut self) -> Result<(), StoreError> {
        self.flush_requested = true;
        Ok(())
    }
}
