use super::*;
use chess_core::move_to_notation;

#[test]
fn test_engine_returns_legal_move() {
    let mut engine = ClassicalEngine::new(2);
    let pos = Position::startpos();
    let result = engine.search(&pos);
    let mv = result.best_move.expect("start position has moves");
    assert!(pos.legal_moves().contains(&mv));
    assert_eq!(result.depth, 2);
    assert!(engine.nodes() > 20);
}

#[test]
fn test_engine_plays_for_side_to_move() {
    // Black to move can win White's queen
    let pos = Position::from_fen("4k3/8/8/3Q4/8/8/3r4/4K3 b - - 0 1").unwrap();
    let mut engine = ClassicalEngine::new(1);
    let mv = engine.search(&pos).best_move.unwrap();
    assert_eq!(move_to_notation(mv), "d2d5");
}

#[test]
fn test_zero_depth_is_raised() {
    assert_eq!(ClassicalEngine::new(0).depth(), 1);
    assert_eq!(ClassicalEngine::default().depth(), DEFAULT_DEPTH);
}

#[test]
fn test_no_move_when_game_is_over() {
    let pos = Position::from_fen("k7/8/1Q6/2K5/8/8/8/8 b - - 0 1").unwrap();
    let mut engine = ClassicalEngine::new(3);
    assert_eq!(engine.search(&pos).best_move, None);
}
