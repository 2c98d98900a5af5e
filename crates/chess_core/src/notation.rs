//! Long algebraic move notation (`e2e4`, `e7e8q`).

use crate::error::{RulesError, RulesResult};
use crate::types::*;

pub fn move_to_notation(mv: Move) -> String {
    let mut s = String::with_capacity(5);
    s.push_str(&square_name(mv.get_source()));
    s.push_str(&square_name(mv.get_dest()));
    if let Some(p) = mv.get_promotion() {
        let ch = match p {
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            _ => 'q',
        };
        s.push(ch);
    }
    s
}

/// Parse a move from long algebraic notation.
///
/// Only the shape is checked here; whether the move is legal is up to the
/// position it is played in.
pub fn parse_move(text: &str) -> RulesResult<Move> {
    let text = text.trim();
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(RulesError::InvalidNotation(text.to_string()));
    }
    let invalid = |_| RulesError::InvalidNotation(text.to_string());
    let from = parse_square(&text[0..2]).map_err(invalid)?;
    let to = parse_square(&text[2..4]).map_err(invalid)?;
    let promo = match text.as_bytes().get(4) {
        None => None,
        Some(ch) => Some(parse_promotion(*ch as char).ok_or_else(|| {
            RulesError::InvalidNotation(text.to_string())
        })?),
    };
    Ok(Move::new(from, to, promo))
}

/// Promotion piece from its letter (`q`, `r`, `b`, `n`, either case).
pub fn parse_promotion(ch: char) -> Option<PieceKind> {
    match ch.to_ascii_lowercase() {
        'q' => Some(PieceKind::Queen),
        'r' => Some(PieceKind::Rook),
        'b' => Some(PieceKind::Bishop),
        'n' => Some(PieceKind::Knight),
        _ => None,
    }
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
