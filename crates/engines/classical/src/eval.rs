//! Heuristic position evaluation.
//!
//! Scores are in pawns, from the point of view of the side passed in.
//! Every term except king safety is computed as "ours minus theirs", so those
//! terms flip sign exactly when the perspective flips.

use chess_core::{file_of, rank_of, square, PieceKind, Position, Side, Square};

/// Ranks (counted from a side's back rank) that make up its home zone.
const HOME_ZONE_RANKS: usize = 2;

const CENTER: [Square; 6] = [
    Square::C4,
    Square::D4,
    Square::E4,
    Square::C5,
    Square::D5,
    Square::E5,
];

/// The individual evaluation terms, each already signed for the perspective side.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EvalBreakdown {
    pub material: f64,
    pub development: f64,
    pub center: f64,
    pub pawn_structure: f64,
    pub king_safety: f64,
}

impl EvalBreakdown {
    pub fn total(&self) -> f64 {
        self.material + self.development + self.center + self.pawn_structure + self.king_safety
    }
}

fn material_value(kind: PieceKind) -> f64 {
    match kind {
        PieceKind::Pawn => 1.0,
        PieceKind::Knight | PieceKind::Bishop => 3.0,
        PieceKind::Rook => 5.0,
        PieceKind::Queen => 9.0,
        PieceKind::King => 0.0,
    }
}

/// Weight of a piece still sitting in its home zone.
fn development_coefficient(kind: PieceKind) -> f64 {
    match kind {
        PieceKind::Pawn => 2.0,
        PieceKind::Knight | PieceKind::Bishop => 0.5,
        PieceKind::Rook => 0.15,
        PieceKind::Queen => 0.1,
        PieceKind::King => 0.0,
    }
}

/// Evaluate `pos` for `side`. Positive is good for `side`.
pub fn evaluate(pos: &Position, side: Side) -> f64 {
    breakdown(pos, side).total()
}

/// Material balance alone, `side` minus opponent.
pub fn material(pos: &Position, side: Side) -> f64 {
    pos.pieces()
        .map(|(_, pc)| sign(pc.side, side) * material_value(pc.kind))
        .sum()
}

pub fn breakdown(pos: &Position, side: Side) -> EvalBreakdown {
    let mut terms = EvalBreakdown::default();

    for (sq, pc) in pos.pieces() {
        let sign = sign(pc.side, side);
        terms.material += sign * material_value(pc.kind);

        let distance = rank_of(sq).abs_diff(pc.side.back_rank());
        if distance < HOME_ZONE_RANKS {
            terms.development += sign * home_zone_value(pos, pc.kind, pc.side, distance);
        }

        if pc.kind == PieceKind::Pawn {
            terms.pawn_structure += sign * if is_supported(pos, sq, pc.side) { 1.0 } else { -1.0 };
        }
    }

    for sq in CENTER {
        terms.center += match pos.piece_at(sq) {
            Some(pc) => sign(pc.side, side),
            None => 0.0,
        };
    }

    let king = pos.king_square(side);
    terms.king_safety = if pos.is_attacked_by(side.other(), king) { -1.0 } else { 1.0 };

    terms
}

fn sign(owner: Side, perspective: Side) -> f64 {
    if owner == perspective {
        1.0
    } else {
        -1.0
    }
}

fn home_zone_value(pos: &Position, kind: PieceKind, owner: Side, distance: usize) -> f64 {
    if kind == PieceKind::King {
        // An uncastled king at home is only fine while castling is still possible
        let castling = if pos.has_castling_rights(owner) { 1.0 } else { 0.0 };
        return castling - 1.0;
    }
    development_coefficient(kind) * (7 - distance) as f64
}

/// A pawn is supported when a friendly pawn stands beside it on the same rank.
fn is_supported(pos: &Position, sq: Square, owner: Side) -> bool {
    let file = file_of(sq) as i8;
    let rank = rank_of(sq) as i8;
    [file - 1, file + 1]
        .into_iter()
        .filter_map(|f| square(f, rank))
        .filter_map(|neighbour| pos.piece_at(neighbour))
        .any(|pc| pc.side == owner && pc.kind == PieceKind::Pawn)
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
