use super::*;
use match_engine::{MatchConfig, MatchSession};

#[test]
fn test_board_from_white() {
    let text = render_board(&Position::startpos(), Side::First);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "8 | r n b q k b n r |");
    assert_eq!(lines[7], "1 | R N B Q K B N R |");
    assert_eq!(lines[8], "    a b c d e f g h");
}

#[test]
fn test_board_from_black_is_rotated() {
    let text = render_board(&Position::startpos(), Side::Second);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "1 | R N B K Q B N R |");
    assert_eq!(lines[4], "5 | . . . . . . . . |");
    assert_eq!(lines[8], "    h g f e d c b a");
}

#[test]
fn test_piece_letters() {
    let piece = Piece {
        side: Side::Second,
        kind: PieceKind::Knight,
    };
    assert_eq!(piece_char(piece), 'n');
    let piece = Piece {
        side: Side::First,
        kind: PieceKind::King,
    };
    assert_eq!(piece_char(piece), 'K');
}

#[test]
fn test_status_shows_clocks_and_turn() {
    let config = MatchConfig {
        tick_millis: 3_600_000,
        ..MatchConfig::default()
    };
    let mut session = MatchSession::new(config).unwrap();
    let setup = render_status(&session.snapshot());
    assert!(setup.contains("Type play"));

    session.start().unwrap();
    let text = render_status(&session.snapshot());
    assert!(text.contains("White (you)   3:00 <"), "{text}");
    assert!(text.contains("Black (computer)"));
    assert!(text.contains("White to move"));
    assert!(text.contains("Score: you 0 - 0 computer"));

    session.resign(Side::First);
    let text = render_status(&session.snapshot());
    assert!(text.contains("White resigns, Black wins"), "{text}");
    assert!(text.contains("Score: you 0 - 1 computer"));
    session.shutdown();
}
