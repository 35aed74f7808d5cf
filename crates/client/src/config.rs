//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Composition-root settings.
///
/// Environment variables:
/// - `REVENGE_DATA_DIR` - directory with `items.ron`, `roster.ron`, `config.toml` (default: built-in content)
/// - `REVENGE_SAVE_FILE` - progress JSON file (default: platform data directory)
/// - `REVENGE_SEED` - seed for defense rolls (default: random)
/// - `REVENGE_TICK_MS` - timing bar refresh period, `0` disables auto ticks (default: 16)
/// - `REVENGE_CUE_MS` - how long blocking cues hold the session (default: 400)
/// - `REVENGE_LOG_DIR` - log directory (default: platform cache directory)
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub data_dir: Option<PathBuf>,
    pub save_file: Option<PathBuf>,
    pub seed: Option<u64>,
    pub tick_interval: Option<Duration>,
    pub cue_duration: Duration,
    pub log_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            save_file: None,
            seed: None,
            tick_interval: Some(Duration::from_millis(16)),
            cue_duration: Duration::from_millis(400),
            log_dir: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let parse = |key: &str| lookup(key).and_then(|value| value.trim().parse::<u64>().ok());

        config.data_dir = lookup("REVENGE_DATA_DIR").map(PathBuf::from);
        config.save_file = lookup("REVENGE_SAVE_FILE").map(PathBuf::from);
        config.log_dir = lookup("REVENGE_LOG_DIR").map(PathBuf::from);
        config.seed = parse("REVENGE_SEED");

        if let Some(ms) = parse("REVENGE_TICK_MS") {
            config.tick_interval = (ms > 0).then(|| Duration::from_millis(ms));
        }
        if let Some(ms) = parse("REVENGE_CUE_MS") {
            config.cue_duration = Duration::from_millis(ms);
        }

        config
    }
}
