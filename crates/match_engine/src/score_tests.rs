use super::*;

#[test]
fn test_parse_known_results() {
    assert_eq!(parse_result("1-0").unwrap(), Award { first: 2, second: 0 });
    assert_eq!(parse_result("0-1").unwrap(), Award { first: 0, second: 2 });
    assert_eq!(parse_result("1/2-1/2").unwrap(), Award { first: 1, second: 1 });
}

#[test]
fn test_parse_unknown_result_fails() {
    for text in ["*", "", "1-1", "½-½", "1/2"] {
        assert!(
            matches!(parse_result(text), Err(MatchError::ResultParse(ref s)) if s == text),
            "{text:?} should not parse"
        );
    }
}

#[test]
fn test_draw_adds_half_point_each() {
    let mut board = Scoreboard::default();
    board.add(parse_result("1/2-1/2").unwrap());
    assert_eq!(board.get(Side::First).points(), 0.5);
    assert_eq!(board.get(Side::Second).points(), 0.5);
    assert_eq!(board.first.to_string(), "0.5");
}

#[test]
fn test_scores_accumulate_and_reset() {
    let mut board = Scoreboard::default();
    board.add(Award::win(Side::Second));
    board.add(Award::win(Side::Second));
    board.add(Award::draw());
    assert_eq!(board.second.to_string(), "2.5");
    assert_eq!(board.first.to_string(), "0.5");

    board.reset();
    assert_eq!(board, Scoreboard::default());
}

#[test]
fn test_swap_exchanges_tallies() {
    let mut board = Scoreboard::default();
    board.add(Award::win(Side::First));
    board.swap();
    assert_eq!(board.get(Side::First), Score::default());
    assert_eq!(board.get(Side::Second), Score::from_half_points(2));
}
