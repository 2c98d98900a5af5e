//! Text rendering of the board and match status

use std::fmt::Write as _;

use chess_core::{square, Piece, PieceKind, Position, Side};
use match_engine::{format_clock, MatchSnapshot, Phase};

/// Letter for a piece: upper case for White, lower case for Black.
pub fn piece_char(piece: Piece) -> char {
    let ch = match piece.kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };
    match piece.side {
        Side::First => ch.to_ascii_uppercase(),
        Side::Second => ch,
    }
}

/// The board as seen from `viewer`'s side of the table.
pub fn render_board(position: &Position, viewer: Side) -> String {
    let (ranks, files): (Vec<i8>, Vec<i8>) = match viewer {
        Side::First => ((0..8).rev().collect(), (0..8).collect()),
        Side::Second => ((0..8).collect(), (0..8).rev().collect()),
    };

    let mut out = String::new();
    for &rank in &ranks {
        let row: Vec<String> = files
            .iter()
            .filter_map(|&file| square(file, rank))
            .map(|sq| position.piece_at(sq).map_or('.', piece_char).to_string())
            .collect();
        let _ = writeln!(out, "{} | {} |", rank + 1, row.join(" "));
    }
    let labels: Vec<String> = files
        .iter()
        .map(|&f| char::from(b'a' + f as u8).to_string())
        .collect();
    let _ = writeln!(out, "    {}", labels.join(" "));
    out
}

fn clock_line(snapshot: &MatchSnapshot, side: Side) -> String {
    let state = snapshot.clock(side);
    let marker = if state.running { " <" } else { "" };
    let who = if side == snapshot.human_side { "you" } else { "computer" };
    format!(
        "{:<5} ({who}) {:>6}{marker}",
        side.to_string(),
        format_clock(state.remaining_seconds)
    )
}

/// Clocks, scores and the match state under the board.
pub fn render_status(snapshot: &MatchSnapshot) -> String {
    let mut out = String::new();
    // The opponent's clock sits on the far side of the board
    let human = snapshot.human_side;
    let _ = writeln!(out, "{}", clock_line(snapshot, human.other()));
    let _ = writeln!(out, "{}", clock_line(snapshot, human));
    let _ = writeln!(
        out,
        "Score: you {} - {} computer ({}, +{}s per move)",
        snapshot.scores.get(human),
        snapshot.scores.get(human.other()),
        snapshot.difficulty,
        snapshot.increment_seconds
    );
    if !snapshot.moves.is_empty() {
        let _ = writeln!(out, "Moves: {}", snapshot.moves.join(" "));
    }
    match (snapshot.phase, snapshot.outcome) {
        (Phase::Setup, _) => {
            let _ = writeln!(out, "Type play to start a match.");
        }
        (Phase::Ongoing, _) => {
            let check = if snapshot.in_check { " (check)" } else { "" };
            let _ = writeln!(out, "{} to move{check}", snapshot.to_move);
        }
        (Phase::Terminal, Some(outcome)) => {
            let _ = writeln!(out, "{outcome}. Type play for a new match.");
        }
        (Phase::Terminal, None) => {
            let _ = writeln!(out, "Match over. Type play for a new match.");
        }
    }
    if let Some(diagnostic) = &snapshot.diagnostic {
        let _ = writeln!(out, "Note: {diagnostic}");
    }
    out
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
