//! Depth-limited minimax with alpha-beta pruning

use chess_core::{Move, Position, SearchResult, Side};
use thiserror::Error;

use crate::eval::evaluate;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("no move found: the position has no legal moves")]
    EmptySearch,
    #[error("search depth must be at least one ply")]
    ZeroDepth,
}

/// Searches `pos` to `depth` plies, scoring leaves from `side`'s point of view.
///
/// `maximizing` is true on plies where `side` chooses. Ties keep the first
/// move in generation order. The caller's position is never touched; the
/// search runs on a private copy.
pub fn minimax(
    pos: &Position,
    side: Side,
    depth: u8,
    alpha: f64,
    beta: f64,
    maximizing: bool,
) -> SearchResult {
    let mut tmp = pos.clone();
    let mut nodes = 0;
    let (score, best_move) = alpha_beta(&mut tmp, side, depth, alpha, beta, maximizing, &mut nodes);
    SearchResult {
        best_move,
        score,
        depth,
        nodes,
    }
}

/// Full-window search for `side`, which must be the side to move.
///
/// # Errors
/// `ZeroDepth` if `depth` is 0, `EmptySearch` if nothing could be chosen
/// (the position has no legal moves or is already decided).
pub fn pick_best_move(pos: &Position, side: Side, depth: u8) -> Result<(Move, f64), SearchError> {
    if depth == 0 {
        return Err(SearchError::ZeroDepth);
    }
    let result = minimax(pos, side, depth, f64::NEG_INFINITY, f64::INFINITY, true);
    let mv = result.best_move.ok_or(SearchError::EmptySearch)?;
    Ok((mv, result.score))
}

fn alpha_beta(
    pos: &mut Position,
    side: Side,
    depth: u8,
    mut alpha: f64,
    mut beta: f64,
    maximizing: bool,
    nodes: &mut u64,
) -> (f64, Option<Move>) {
    *nodes += 1;

    if depth == 0 || pos.is_game_over() {
        return (evaluate(pos, side), None);
    }

    let mut best_move = None;
    let mut best = if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };

    for mv in pos.legal_moves() {
        pos.make_move(mv);
        let (value, _) = alpha_beta(pos, side, depth - 1, alpha, beta, !maximizing, nodes);
        pos.unmake_move();

        if maximizing {
            if value > best {
                best = value;
                best_move = Some(mv);
            }
            alpha = alpha.max(best);
        } else {
            if value < best {
                best = value;
                best_move = Some(mv);
            }
            beta = beta.min(best);
        }
        if alpha >= beta {
            break;
        }
    }

    (best, best_move)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
