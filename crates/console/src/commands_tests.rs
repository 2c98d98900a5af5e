use super::*;

#[test]
fn test_move_forms() {
    assert_eq!(
        parse_command("e2e4").unwrap(),
        Command::MoveText("e2e4".to_string())
    );
    assert_eq!(
        parse_command("  E7E8Q ").unwrap(),
        Command::MoveText("e7e8q".to_string())
    );
    assert_eq!(
        parse_command("e2 e4").unwrap(),
        Command::Move {
            from: "e2".to_string(),
            to: "e4".to_string(),
            promotion: None
        }
    );
    assert_eq!(
        parse_command("a7 a8 n").unwrap(),
        Command::Move {
            from: "a7".to_string(),
            to: "a8".to_string(),
            promotion: Some('n')
        }
    );
}

#[test]
fn test_malformed_moves_still_reach_the_session() {
    assert_eq!(
        parse_command("e2e9").unwrap(),
        Command::MoveText("e2e9".to_string())
    );
    assert_eq!(
        parse_command("I2E4").unwrap(),
        Command::MoveText("i2e4".to_string())
    );
    assert_eq!(
        parse_command("e2 e9").unwrap(),
        Command::Move {
            from: "e2".to_string(),
            to: "e9".to_string(),
            promotion: None
        }
    );
    assert_eq!(
        parse_command("a7 a8 k").unwrap(),
        Command::Move {
            from: "a7".to_string(),
            to: "a8".to_string(),
            promotion: Some('k')
        }
    );
}

#[test]
fn test_text_that_is_not_move_shaped_is_unknown() {
    for line in ["xyzzy", "e2-e4", "e2e4qq", "e2 e4 qq", "e2 e4 q x", "é2e4"] {
        assert!(
            matches!(parse_command(line), Err(CommandError::Unknown(_))),
            "{line:?}"
        );
    }
}

#[test]
fn test_keywords() {
    assert_eq!(parse_command("").unwrap(), Command::Empty);
    assert_eq!(parse_command("new").unwrap(), Command::New);
    assert_eq!(parse_command("PLAY").unwrap(), Command::New);
    assert_eq!(parse_command("resign").unwrap(), Command::Resign);
    assert_eq!(parse_command("undo").unwrap(), Command::Undo);
    assert_eq!(parse_command("hint").unwrap(), Command::Hint);
    assert_eq!(
        parse_command("hard").unwrap(),
        Command::SetDifficulty(Difficulty::Hard)
    );
    assert_eq!(parse_command("reset").unwrap(), Command::ResetScores);
    assert_eq!(parse_command("json").unwrap(), Command::Json);
    assert_eq!(parse_command("quit").unwrap(), Command::Quit);
}

#[test]
fn test_time_command() {
    assert_eq!(
        parse_command("time 5 2").unwrap(),
        Command::Time {
            minutes: 5,
            increment: 2
        }
    );
    assert!(matches!(
        parse_command("time 5"),
        Err(CommandError::Usage(_))
    ));
    assert!(matches!(
        parse_command("time five 2"),
        Err(CommandError::Usage(_))
    ));
}

#[test]
fn test_side_command() {
    assert_eq!(
        parse_command("side black").unwrap(),
        Command::Side(SideChoice::Fixed(Side::Second))
    );
    assert_eq!(
        parse_command("side swap").unwrap(),
        Command::Side(SideChoice::Swap)
    );
    assert_eq!(
        parse_command("side random").unwrap(),
        Command::Side(SideChoice::Random)
    );
    assert!(parse_command("side").is_err());
}
