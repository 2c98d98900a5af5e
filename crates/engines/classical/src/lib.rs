//! Minimax chess engine
//!
//! Fixed-depth minimax with alpha-beta pruning over a hand-tuned heuristic
//! evaluation. This is the "hard" opponent of the match engine.

mod eval;
mod search;

use chess_core::{Engine, Position, SearchResult};

pub use eval::{breakdown, evaluate, material, EvalBreakdown};
pub use search::{minimax, pick_best_move, SearchError};

/// Search depth used when none is configured.
pub const DEFAULT_DEPTH: u8 = 4;

/// Minimax engine searching a fixed number of plies.
#[derive(Debug, Clone)]
pub struct ClassicalEngine {
    depth: u8,
    /// Node counter for statistics
    nodes: u64,
}

impl ClassicalEngine {
    /// A depth of 0 is raised to 1 so the engine always produces a move.
    pub fn new(depth: u8) -> Self {
        Self {
            depth: depth.max(1),
            nodes: 0,
        }
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Nodes visited by the most recent search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }
}

impl Default for ClassicalEngine {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl Engine for ClassicalEngine {
    fn search(&mut self, pos: &Position) -> SearchResult {
        let side = pos.turn();
        let result = minimax(pos, side, self.depth, f64::NEG_INFINITY, f64::INFINITY, true);
        self.nodes = result.nodes;
        tracing::debug!(
            depth = self.depth,
            nodes = result.nodes,
            score = result.score,
            "minimax search finished"
        );
        result
    }

    fn name(&self) -> &str {
        "Minimax"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod lib_tests;
