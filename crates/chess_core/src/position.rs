//! Position wrapper around the `chess` crate board.
//!
//! The board itself is owned by the oracle; this type adds what the match
//! engine needs on top of it: an explicit undo stack (so recursive search can
//! apply and retract moves on its own copy), the half-move clock, repetition
//! history, and the automatic game-ending rules.

use chess::{BitBoard, Board, BoardStatus, MoveGen, EMPTY};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{RulesError, RulesResult};
use crate::notation::move_to_notation;
use crate::types::*;

/// Half-moves without a capture or pawn move after which the game ends.
const SEVENTY_FIVE_MOVE_PLIES: u32 = 150;
/// Occurrences of the same position after which the game ends.
const FIVEFOLD: usize = 5;

/// Why a game ended on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    SeventyFiveMoves,
    FivefoldRepetition,
}

#[derive(Clone, Debug)]
struct Undo {
    board: Board,
    halfmove_clock: u32,
    fullmove_number: u32,
    mv: Move,
}

#[derive(Clone, Debug)]
pub struct Position {
    board: Board,
    halfmove_clock: u32,
    fullmove_number: u32,
    undo_stack: Vec<Undo>,
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub fn startpos() -> Self {
        Self {
            board: Board::default(),
            halfmove_clock: 0,
            fullmove_number: 1,
            undo_stack: Vec::new(),
        }
    }

    pub fn from_fen(fen: &str) -> RulesResult<Self> {
        let board = Board::from_str(fen).map_err(|e| RulesError::InvalidFen {
            fen: fen.to_string(),
            reason: format!("{e:?}"),
        })?;
        let fields: Vec<&str> = fen.split_whitespace().collect();
        let halfmove_clock = fields.get(4).and_then(|s| s.parse().ok()).unwrap_or(0);
        let fullmove_number = fields
            .get(5)
            .and_then(|s| s.parse().ok())
            .unwrap_or(1)
            .max(1);
        Ok(Self {
            board,
            halfmove_clock,
            fullmove_number,
            undo_stack: Vec::new(),
        })
    }

    pub fn fen(&self) -> String {
        let board_fen = self.board.to_string();
        let fields: Vec<&str> = board_fen.split_whitespace().take(4).collect();
        format!(
            "{} {} {}",
            fields.join(" "),
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Raw oracle board, for code that wants bitboard access.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Side {
        Side::from_color(self.board.side_to_move())
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Legal moves in the deterministic order given by [`move_order_key`].
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves: Vec<Move> = MoveGen::new_legal(&self.board).collect();
        moves.sort_by_key(|mv| move_order_key(*mv));
        moves
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        self.board.legal(mv)
    }

    /// Apply `mv` after checking it against the legal-move set.
    pub fn play(&mut self, mv: Move) -> RulesResult<()> {
        if !self.is_legal(mv) {
            return Err(RulesError::IllegalMove(move_to_notation(mv)));
        }
        self.make_move(mv);
        Ok(())
    }

    /// Apply a move known to be legal (e.g. taken from [`Self::legal_moves`]).
    pub fn make_move(&mut self, mv: Move) {
        let resets_clock =
            self.board.piece_on(mv.get_source()) == Some(PieceKind::Pawn) || self.is_capture(mv);
        let mover = self.turn();

        self.undo_stack.push(Undo {
            board: self.board,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            mv,
        });
        self.board = self.board.make_move_new(mv);
        self.halfmove_clock = if resets_clock {
            0
        } else {
            self.halfmove_clock + 1
        };
        if mover == Side::Second {
            self.fullmove_number += 1;
        }
    }

    /// Retract the last move, returning it. `None` if nothing was played.
    pub fn unmake_move(&mut self) -> Option<Move> {
        let undo = self.undo_stack.pop()?;
        self.board = undo.board;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;
        Some(undo.mv)
    }

    /// Moves played since this position was created, oldest first.
    pub fn moves(&self) -> Vec<Move> {
        self.undo_stack.iter().map(|u| u.mv).collect()
    }

    pub fn ply_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Space separated long algebraic move history.
    pub fn history_notation(&self) -> String {
        self.undo_stack
            .iter()
            .map(|u| move_to_notation(u.mv))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_capture(&self, mv: Move) -> bool {
        if self.board.piece_on(mv.get_dest()).is_some() {
            return true;
        }
        // En passant: a pawn changing file onto an empty square
        self.board.piece_on(mv.get_source()) == Some(PieceKind::Pawn)
            && file_of(mv.get_source()) != file_of(mv.get_dest())
    }

    pub fn is_check(&self) -> bool {
        *self.board.checkers() != EMPTY
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        let kind = self.board.piece_on(sq)?;
        let color = self.board.color_on(sq)?;
        Some(Piece {
            side: Side::from_color(color),
            kind,
        })
    }

    /// Every occupied square with its piece, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        let occupied = *self.board.combined();
        occupied.filter_map(move |sq| self.piece_at(sq).map(|pc| (sq, pc)))
    }

    pub fn king_square(&self, side: Side) -> Square {
        self.board.king_square(side.color())
    }

    pub fn has_castling_rights(&self, side: Side) -> bool {
        let rights = self.board.castle_rights(side.color());
        rights.has_kingside() || rights.has_queenside()
    }

    /// Whether any piece of `attacker` attacks `target`.
    pub fn is_attacked_by(&self, attacker: Side, target: Square) -> bool {
        let b = &self.board;
        let theirs = *b.color_combined(attacker.color());
        let occupied = *b.combined();
        let of = |kind: PieceKind| *b.pieces(kind) & theirs;

        // A pawn of the defending colour on `target` attacks exactly the
        // squares from which an attacking pawn would hit `target`.
        let pawn_hits = chess::get_pawn_attacks(target, !attacker.color(), of(PieceKind::Pawn));
        if pawn_hits != EMPTY {
            return true;
        }
        if chess::get_knight_moves(target) & of(PieceKind::Knight) != EMPTY {
            return true;
        }
        if chess::get_king_moves(target) & of(PieceKind::King) != EMPTY {
            return true;
        }
        let diagonal = of(PieceKind::Bishop) | of(PieceKind::Queen);
        if chess::get_bishop_moves(target, occupied) & diagonal != EMPTY {
            return true;
        }
        let straight = of(PieceKind::Rook) | of(PieceKind::Queen);
        chess::get_rook_moves(target, occupied) & straight != EMPTY
    }

    /// Times the current position has occurred, counting this occurrence.
    pub fn repetitions(&self) -> usize {
        let key = self.board.get_hash();
        // Nothing before the last capture or pawn move can repeat.
        let window = self.halfmove_clock as usize;
        1 + self
            .undo_stack
            .iter()
            .rev()
            .take(window)
            .filter(|u| u.board.get_hash() == key)
            .count()
    }

    pub fn is_insufficient_material(&self) -> bool {
        let b = &self.board;
        let heavy = *b.pieces(PieceKind::Pawn) | *b.pieces(PieceKind::Rook) | *b.pieces(PieceKind::Queen);
        if heavy != EMPTY {
            return false;
        }
        let knights = *b.pieces(PieceKind::Knight);
        let bishops = *b.pieces(PieceKind::Bishop);
        if (knights | bishops).popcnt() <= 1 {
            return true;
        }
        // Only bishops left, all on one square colour
        knights == EMPTY && single_square_colour(bishops)
    }

    /// The automatic game-ending condition in effect, if any.
    pub fn termination(&self) -> Option<Termination> {
        match self.board.status() {
            BoardStatus::Checkmate => Some(Termination::Checkmate),
            BoardStatus::Stalemate => Some(Termination::Stalemate),
            BoardStatus::Ongoing => {
                if self.is_insufficient_material() {
                    Some(Termination::InsufficientMaterial)
                } else if self.halfmove_clock >= SEVENTY_FIVE_MOVE_PLIES {
                    Some(Termination::SeventyFiveMoves)
                } else if self.repetitions() >= FIVEFOLD {
                    Some(Termination::FivefoldRepetition)
                } else {
                    None
                }
            }
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.termination().is_some()
    }

    /// Game result string: `1-0`, `0-1`, `1/2-1/2`, or `*` while undecided.
    pub fn result(&self) -> &'static str {
        match self.termination() {
            Some(Termination::Checkmate) => match self.turn() {
                Side::First => "0-1",
                Side::Second => "1-0",
            },
            Some(_) => "1/2-1/2",
            None => "*",
        }
    }
}

fn single_square_colour(pieces: BitBoard) -> bool {
    let mut colours = pieces.map(|sq| (file_of(sq) + rank_of(sq)) % 2);
    match colours.next() {
        Some(first) => colours.all(|c| c == first),
        None => true,
    }
}

#[cfg(test)]
#[path = "position_tests.rs"]
mod position_tests;
