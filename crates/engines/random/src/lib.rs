//! Random Move Chess Engine
//!
//! Picks uniformly from the legal moves of the side to move. This is the
//! "easy" opponent of the match engine, and a handy baseline in tests.

use chess_core::{Engine, Move, Position, SearchResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[cfg(test)]
mod lib_tests;

/// A chess engine that plays random legal moves.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: StdRng,
    nodes: u64,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            nodes: 0,
        }
    }

    /// Reproducible engine, for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            nodes: 0,
        }
    }

    /// A uniformly chosen legal move, `None` when there are none.
    pub fn random_move(&mut self, pos: &Position) -> Option<Move> {
        pos.legal_moves().choose(&mut self.rng).copied()
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn search(&mut self, pos: &Position) -> SearchResult {
        self.nodes = 1;
        SearchResult {
            best_move: self.random_move(pos),
            score: 0.0,
            depth: 1,
            nodes: self.nodes,
        }
    }

    fn name(&self) -> &str {
        "Random"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}
