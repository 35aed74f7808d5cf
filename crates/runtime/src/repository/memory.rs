//! In-memory progress repository for tests and local runs.

use std::sync::RwLock;

use crate::repository::{ProgressRepository, ProgressSnapshot, RepositoryError, Result};

pub struct InMemoryProgressRepo {
    snapshot: RwLock<ProgressSnapshot>,
}

impl InMemoryProgressRepo {
    pub fn new() -> Self {
        Self::with_snapshot(ProgressSnapshot::default())
    }

    pub fn with_snapshot(snapshot: ProgressSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
        }
    }
}

impl Default for InMemoryProgressRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressRepository for InMemoryProgressRepo {
    fn load(&self) -> Result<ProgressSnapshot> {
        let snapshot = self
            .snapshot
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(snapshot.clone())
    }

    fn save(&self, snapshot: &ProgressSnapshot) -> Result<()> {
        let mut stored = self
            .snapshot
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *stored = snapshot.clone();
        Ok(())
    }
}
