//! Key-value persistence seam for stage progress.

use std::collections::BTreeMap;

use crate::error::{ErrorSeverity, GameError};

/// Key for the first-run flag.
pub const FIRST_RUN_KEY: &str = "FirstRun";

/// Key under which stage `index`'s clear flag is stored.
pub fn stage_cleared_key(index: usize) -> String {
    format!("Stage_{index}_Cleared")
}

/// Failure reported by a store when flushing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("progress store save failed: {message}")]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl GameError for StoreError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        "STORE_SAVE_FAILED"
    }
}

/// Boolean key-value store the stage tracker persists through.
///
/// `set_bool` may buffer; `save` flushes everything written so far.
pub trait ProgressStore {
    fn get_bool(&self, key: &str, default: bool) -> bool;

    fn set_bool(&mut self, key: &str, value: bool);

    fn save(&mut self) -> Result<(), StoreError>;
}

impl ProgressStore for BTreeMap<String, bool> {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key).copied().unwrap_or(default)
    }

    fn set_bool(&mut self, key: &str, value: bool) {
        self.insert(key.to_owned(), value);
    }

    fn save(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_match_save_format() {
        assert_eq!(stage_cleared_key(3), "Stage_3_Cleared");
        assert_eq!(FIRST_RUN_KEY, "FirstRun");
    }

    #[test]
    fn map_store_falls_back_to_default() {
        let mut store = BTreeMap::new();
        assert!(store.get_bool(FIRST_RUN_KEY, true));
        store.set_bool(FIRST_RUN_KEY, false);
        assert!(!store.get_bool(FIRST_RUN_KEY, true));
    }
}
