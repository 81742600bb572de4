//! Client configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;

use drill_core::{Difficulty, RoundConfig};
use runtime::RuntimeConfig;

/// Settings for one client session.
#[derive(Clone, Debug, Default)]
pub struct Config {
    pub runtime: RuntimeConfig,
    /// Word-list file to import at startup; the bundled list is used if unset.
    pub word_list: Option<PathBuf>,
    /// Directory holding the word database; the platform data dir if unset.
    pub data_dir: Option<PathBuf>,
    /// Keep words in memory only.
    pub in_memory: bool,
}

impl Config {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DRILL_ROUND_SIZE` - Words per round (default: 5)
    /// - `DRILL_DIFFICULTY` - `easy`, `medium` or `hard`; overrides the size
    /// - `DRILL_WORD_LIST` - Word-list file to import/sync
    /// - `DRILL_DATA_DIR` - Directory for `words.json`
    /// - `DRILL_IN_MEMORY` - Skip persistence (`true`/`false`)
    /// - `DRILL_COMMAND_BUFFER` - Command channel capacity (default: 32)
    /// - `DRILL_EVENT_BUFFER` - Event channel capacity (default: 100)
    /// - `DRILL_SEED` - Seed for picker shuffles
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(size) = parse::<usize>(read("DRILL_ROUND_SIZE")) {
            config.runtime.round = RoundConfig::with_round_size(size);
        }
        if let Some(difficulty) = parse::<Difficulty>(read("DRILL_DIFFICULTY")) {
            config.runtime.round = RoundConfig::with_difficulty(difficulty);
        }
        if let Some(capacity) = parse::<usize>(read("DRILL_COMMAND_BUFFER")) {
            config.runtime.command_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = parse::<usize>(read("DRILL_EVENT_BUFFER")) {
            config.runtime.event_buffer_size = capacity.max(1);
        }
        config.runtime.seed = parse(read("DRILL_SEED"));

        config.word_list = read("DRILL_WORD_LIST").map(PathBuf::from);
        config.data_dir = read("DRILL_DATA_DIR").map(PathBuf::from);
        config.in_memory = parse(read("DRILL_IN_MEMORY")).unwrap_or(false);

        config
    }
}

fn parse<T>(value: Option<String>) -> Option<T>
where
    T: std::str::FromStr,
{
    value?.trim().parse().ok()
}
