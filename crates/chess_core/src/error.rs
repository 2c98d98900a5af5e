//! Errors surfaced by the rules oracle adapter.

use thiserror::Error;

/// Errors that can occur while talking to the rules oracle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    /// Move text that is not `<from><to>[promotion]` long algebraic notation
    #[error("invalid move notation '{0}' (expected e.g. e2e4 or e7e8q)")]
    InvalidNotation(String),

    /// Square text that is not a file letter followed by a rank digit
    #[error("invalid square '{0}'")]
    InvalidSquare(String),

    /// FEN string rejected by the oracle
    #[error("invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    /// Well-formed move that is not in the legal-move set
    #[error("illegal move {0} in the current position")]
    IllegalMove(String),
}

/// Result type alias for oracle operations
pub type RulesResult<T> = Result<T, RulesError>;
