//! Error types for match sessions and their configuration

use std::path::PathBuf;

use chess_core::RulesError;
use classical_engine::SearchError;

/// Errors raised while loading or validating a [`crate::MatchConfig`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {message}")]
    Invalid { message: String },
}

/// Errors that can occur while running a match
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    /// The oracle produced a result string outside `1-0`, `0-1`, `1/2-1/2`
    #[error("unrecognised game result {0:?}")]
    ResultParse(String),

    #[error("engine failed to produce a move: {0}")]
    Search(#[from] SearchError),

    #[error(transparent)]
    Rules(#[from] RulesError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("no match is in progress")]
    NotOngoing,

    #[error("it is not the automated side's turn")]
    NotAutomatedTurn,

    #[error("cannot change this while a match is in progress")]
    MatchInProgress,

    #[error("failed to start clock worker: {0}")]
    ClockSpawn(#[source] std::io::Error),

    #[error("failed to write fault log {path}: {source}")]
    FaultLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
