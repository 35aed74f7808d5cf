//! Progress persistence adapters.
//!
//! The core only sees [`revenge_core::ProgressStore`]. The runtime keeps the
//! committed flags in a [`ProgressSnapshot`], hands the worker a
//! [`StagedProgress`] copy per input, and writes the snapshot through a
//! [`ProgressRepository`] once the presentation sequence commits.
mod error;
mod file;
mod memory;
mod staged;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use error::{RepositoryError, Result};
pub use file::FileProgressRepository;
pub use memory::InMemoryProgressRepo;
pub use staged::StagedProgress;

/// Persisted boolean flags, keyed like `Stage_{i}_Cleared` and `FirstRun`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    #[serde(default)]
    pub flags: BTreeMap<String, bool>,
}

impl ProgressSnapshot {
    pub fn get(&self, key: &str) -> Option<bool> {
        self.flags.get(key).copied()
    }
}

/// Storage backend for progress flags.
pub trait ProgressRepository: Send + Sync {
    /// Reads the saved snapshot. A store that was never written yields an empty snapshot.
    fn load(&self) -> Result<ProgressSnapshot>;

    /// Replaces the saved snapshot.
    fn save(&self, snapshot: &ProgressSnapshot) -> Result<()>;
}
