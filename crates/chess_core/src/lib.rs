pub mod error;
pub mod notation;
pub mod position;
pub mod types;

// Re-export the rules oracle surface used by engines and the match engine
pub use error::*;
pub use notation::*;
pub use position::*;
pub use types::*;

// =============================================================================
// Engine trait, implemented by every move-choosing strategy
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// The best move found (None only if there are no legal moves)
    pub best_move: Option<Move>,
    /// Evaluation score from the searching side's perspective
    pub score: f64,
    /// Search depth used
    pub depth: u8,
    /// Number of nodes searched (optional, for stats)
    pub nodes: u64,
}

impl SearchResult {
    /// A leaf result: a score with no move attached.
    pub fn leaf(score: f64) -> Self {
        Self {
            best_move: None,
            score,
            depth: 0,
            nodes: 1,
        }
    }
}

/// Trait that all move-choosing strategies implement.
///
/// The side to move in `pos` is the side the engine plays for.
pub trait Engine: Send {
    /// Choose a move for the side to move in `pos`.
    ///
    /// Returns a result with `best_move = None` only when `pos` has no legal
    /// moves; callers are expected to have checked for game over first.
    fn search(&mut self, pos: &Position) -> SearchResult;

    /// Returns the engine's display name
    fn name(&self) -> &str;

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}
