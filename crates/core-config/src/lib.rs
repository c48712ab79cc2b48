//! Optional TOML configuration: toast duration and a line's initial gap
//! capacity. Unknown fields are ignored and a missing or unparsable file
//! falls back to defaults, matching the teacher's tolerant-parsing idiom.

use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::warn;

const DEFAULT_TOAST_DURATION_MS: u64 = 1500;
const DEFAULT_GAP_CAPACITY: usize = 64;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "Config::default_toast_duration_ms")]
    pub toast_duration_ms: u64,
    #[serde(default = "Config::default_gap_capacity")]
    pub gap_capacity: usize,
}

impl Config {
    const fn default_toast_duration_ms() -> u64 {
        DEFAULT_TOAST_DURATION_MS
    }

    const fn default_gap_capacity() -> usize {
        DEFAULT_GAP_CAPACITY
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            toast_duration_ms: Self::default_toast_duration_ms(),
            gap_capacity: Self::default_gap_capacity(),
        }
    }
}

/// Load `path` if given; a missing path (the `--config` flag was omitted) is
/// not an error, nor is a file that fails to parse — both yield defaults.
pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    match std::fs::read_to_string(&path) {
        Ok(content) => match toml::from_str::<Config>(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed");
                Ok(Config::default())
            }
        },
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_file_unreadable");
            Ok(Config::default())
        }
    }
}
