//! Match configuration, loaded from TOML and overridable from the command line

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use chess_core::Side;

use crate::error::ConfigError;

/// Initial clock presets offered by the front-end, in seconds.
pub const INITIAL_TIME_PRESETS: [u32; 4] = [60, 180, 300, 900];
/// Increment presets offered by the front-end, in seconds.
pub const INCREMENT_PRESETS: [u32; 4] = [1, 2, 5, 10];

/// Deepest minimax search accepted from configuration.
pub const MAX_HARD_DEPTH: u8 = 8;

/// Which strategy the automated side plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Uniformly random legal moves
    #[default]
    Easy,
    /// Minimax with alpha-beta at the configured depth
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "hard" => Ok(Difficulty::Hard),
            other => Err(ConfigError::Invalid {
                message: format!("unknown difficulty {other:?}, expected easy or hard"),
            }),
        }
    }
}

/// Configuration for a match session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Starting time on each clock, in seconds
    pub initial_seconds: u32,
    /// Seconds credited to a side after each of its moves
    pub increment_seconds: u32,
    pub difficulty: Difficulty,
    /// Search depth used by the hard difficulty
    pub hard_depth: u8,
    /// The side the human plays
    pub human_side: Side,
    /// Length of one clock tick in milliseconds
    pub tick_millis: u64,
    /// Append-only log written when the session fails unexpectedly
    pub fault_log: PathBuf,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            initial_seconds: 180,
            increment_seconds: 2,
            difficulty: Difficulty::Easy,
            hard_depth: classical_engine::DEFAULT_DEPTH,
            human_side: Side::First,
            tick_millis: 1000,
            fault_log: PathBuf::from("bug_report.txt"),
        }
    }
}

impl MatchConfig {
    /// Load and validate a TOML config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_seconds == 0 {
            return Err(invalid("initial_seconds must be positive"));
        }
        if !(1..=MAX_HARD_DEPTH).contains(&self.hard_depth) {
            return Err(invalid(&format!(
                "hard_depth must be between 1 and {MAX_HARD_DEPTH}"
            )));
        }
        if self.tick_millis == 0 {
            return Err(invalid("tick_millis must be positive"));
        }
        Ok(())
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Invalid {
        message: message.to_string(),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
