use super::*;

#[test]
fn test_parse_simple_move() {
    let mv = parse_move("e2e4").unwrap();
    assert_eq!(square_name(mv.get_source()), "e2");
    assert_eq!(square_name(mv.get_dest()), "e4");
    assert_eq!(mv.get_promotion(), None);
}

#[test]
fn test_parse_promotion_move() {
    let mv = parse_move("e7e8q").unwrap();
    assert_eq!(mv.get_promotion(), Some(PieceKind::Queen));

    let mv = parse_move("a2a1N").unwrap();
    assert_eq!(mv.get_promotion(), Some(PieceKind::Knight));
}

#[test]
fn test_notation_round_trip() {
    for text in ["e2e4", "g1f3", "e7e8q", "b2b1r"] {
        assert_eq!(move_to_notation(parse_move(text).unwrap()), text);
    }
}

#[test]
fn test_wrong_length_is_format_error() {
    for text in ["", "e2", "e2e", "e2e4qq", "e2-e4"] {
        assert_eq!(
            parse_move(text),
            Err(RulesError::InvalidNotation(text.to_string())),
            "{text:?} should be rejected"
        );
    }
}

#[test]
fn test_bad_characters_are_format_errors() {
    assert!(parse_move("i2e4").is_err());
    assert!(parse_move("e9e4").is_err());
    assert!(parse_move("e7e8k").is_err());
    assert!(parse_move("é2e4").is_err());
}

#[test]
fn test_parse_square_bounds() {
    assert_eq!(square_name(parse_square("a1").unwrap()), "a1");
    assert_eq!(square_name(parse_square("h8").unwrap()), "h8");
    assert!(parse_square("h9").is_err());
    assert!(parse_square("a").is_err());
}
