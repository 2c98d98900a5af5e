//! Match engine for human versus computer chess
//!
//! This crate provides:
//! - [`MatchSession`], the match state machine (setup, ongoing, terminal)
//! - [`Clock`], a two-sided countdown clock with increment
//! - Scoring across consecutive matches
//! - Configuration and the append-only fault log

mod clock;
mod config;
mod error;
mod fault_log;
mod score;
mod session;

pub use clock::*;
pub use config::*;
pub use error::*;
pub use fault_log::*;
pub use score::*;
pub use session::*;

use chess_core::Engine;
use classical_engine::ClassicalEngine;
use random_engine::RandomEngine;

/// Create the engine that plays the automated side at `difficulty`.
pub fn engine_for(difficulty: Difficulty, hard_depth: u8) -> Box<dyn Engine> {
    match difficulty {
        Difficulty::Easy => Box::new(RandomEngine::new()),
        Difficulty::Hard => Box::new(ClassicalEngine::new(hard_depth)),
    }
}
