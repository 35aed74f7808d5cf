//! JSON file progress repository.

use std::fs;
use std::path::{Path, PathBuf};

use crate::repository::{ProgressRepository, ProgressSnapshot, RepositoryError, Result};

/// Stores the progress snapshot as a single JSON file.
///
/// Writes go to a sibling `.tmp` file first and are renamed into place, so a
/// crash mid-write leaves the previous save intact.
pub struct FileProgressRepository {
    path: PathBuf,
}

impl FileProgressRepository {
    /// Create a repository writing to `path`. Parent directories are created.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }

    /// Repository at `progress.json` in the platform data directory.
    pub fn in_default_location() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "office-revenge")
            .ok_or(RepositoryError::NoDataDir)?;
        Self::new(dirs.data_dir().join("progress.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressRepository for FileProgressRepository {
    fn load(&self) -> Result<ProgressSnapshot> {
        if !self.path.exists() {
            return Ok(ProgressSnapshot::default());
        }

        let bytes = fs::read(&self.path)?;
        let snapshot: ProgressSnapshot =
            serde_json::from_slice(&bytes).map_err(|e| RepositoryError::Json(e.to_string()))?;

        tracing::debug!(
            "Loaded {} progress flags from {}",
            snapshot.flags.len(),
            self.path.display()
        );

        Ok(snapshot)
    }

    fn save(&self, snapshot: &ProgressSnapshot) -> Result<()> {
        let temp_path = self.path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| RepositoryError::Json(e.to_string()))?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!("Saved progress to {}", self.path.display());

        Ok(())
    }
}
