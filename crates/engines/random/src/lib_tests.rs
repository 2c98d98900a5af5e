use super::*;

#[test]
fn random_engine_returns_legal_move() {
    let mut engine = RandomEngine::new();
    let pos = Position::startpos();

    let result = engine.search(&pos);

    let mv = result.best_move.expect("start position has moves");
    assert!(pos.legal_moves().contains(&mv));
}

#[test]
fn random_engine_handles_checkmate() {
    let mut engine = RandomEngine::new();
    let pos =
        Position::from_fen("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1")
            .unwrap();

    let result = engine.search(&pos);

    assert!(result.best_move.is_none());
}

#[test]
fn random_engine_handles_stalemate() {
    let mut engine = RandomEngine::new();
    let pos = Position::from_fen("k7/8/1Q6/8/8/8/8/1K6 b - - 0 1").unwrap();

    assert!(engine.random_move(&pos).is_none());
}

#[test]
fn seeded_engines_agree() {
    let pos = Position::startpos();
    let mut a = RandomEngine::with_seed(7);
    let mut b = RandomEngine::with_seed(7);
    for _ in 0..10 {
        assert_eq!(a.random_move(&pos), b.random_move(&pos));
    }
}

#[test]
fn random_engine_eventually_tries_several_moves() {
    let pos = Position::startpos();
    let mut engine = RandomEngine::with_seed(42);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
        let mv = engine.random_move(&pos).unwrap();
        seen.insert((mv.get_source().to_index(), mv.get_dest().to_index()));
    }
    assert!(seen.len() > 5, "only {} distinct moves", seen.len());
}
