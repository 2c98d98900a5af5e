use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{RulesError, RulesResult};

// The oracle's move and square types are the canonical ones.
pub use chess::{ChessMove as Move, File, Piece as PieceKind, Rank, Square};

/// One of the two competing players. `First` plays White.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::First, Side::Second];

    pub fn other(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    pub fn idx(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }

    pub fn color(self) -> chess::Color {
        match self {
            Side::First => chess::Color::White,
            Side::Second => chess::Color::Black,
        }
    }

    pub fn from_color(color: chess::Color) -> Side {
        match color {
            chess::Color::White => Side::First,
            chess::Color::Black => Side::Second,
        }
    }

    /// Rank index (0..8) of this side's back rank.
    pub fn back_rank(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 7,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::First => write!(f, "White"),
            Side::Second => write!(f, "Black"),
        }
    }
}

/// A piece as seen by the match engine: who owns it and what it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
}

// Helpers
pub fn file_of(sq: Square) -> usize {
    sq.get_file().to_index()
}

pub fn rank_of(sq: Square) -> usize {
    sq.get_rank().to_index()
}

pub fn square(file: i8, rank: i8) -> Option<Square> {
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        Some(Square::make_square(
            Rank::from_index(rank as usize),
            File::from_index(file as usize),
        ))
    } else {
        None
    }
}

pub fn square_name(sq: Square) -> String {
    let f = (b'a' + file_of(sq) as u8) as char;
    let r = (b'1' + rank_of(sq) as u8) as char;
    format!("{f}{r}")
}

pub fn parse_square(text: &str) -> RulesResult<Square> {
    let b = text.as_bytes();
    if b.len() != 2 || !(b'a'..=b'h').contains(&b[0]) || !(b'1'..=b'8').contains(&b[1]) {
        return Err(RulesError::InvalidSquare(text.to_string()));
    }
    square((b[0] - b'a') as i8, (b[1] - b'1') as i8)
        .ok_or_else(|| RulesError::InvalidSquare(text.to_string()))
}

/// Ordering rank of an optional promotion piece: none < N < B < R < Q.
pub fn promotion_rank(promo: Option<PieceKind>) -> u8 {
    match promo {
        None => 0,
        Some(PieceKind::Knight) => 1,
        Some(PieceKind::Bishop) => 2,
        Some(PieceKind::Rook) => 3,
        Some(PieceKind::Queen) => 4,
        Some(_) => 5,
    }
}

/// Sort key for the deterministic move order used everywhere a move list is
/// enumerated: from-square (a1=0 .. h8=63), then to-square, then promotion.
pub fn move_order_key(mv: Move) -> (usize, usize, u8) {
    (
        mv.get_source().to_index(),
        mv.get_dest().to_index(),
        promotion_rank(mv.get_promotion()),
    )
}
