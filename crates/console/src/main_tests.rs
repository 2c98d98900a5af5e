use super::*;

#[test]
fn test_flags_override_defaults() {
    let args = Args::parse_from([
        "chess_console",
        "--side",
        "second",
        "--difficulty",
        "hard",
        "--minutes",
        "5",
        "--increment",
        "10",
        "--depth",
        "3",
    ]);
    let config = build_config(&args).unwrap();
    assert_eq!(config.human_side, Side::Second);
    assert_eq!(config.difficulty, Difficulty::Hard);
    assert_eq!(config.initial_seconds, 300);
    assert_eq!(config.increment_seconds, 10);
    assert_eq!(config.hard_depth, 3);
}

#[test]
fn test_no_flags_gives_defaults() {
    let args = Args::parse_from(["chess_console"]);
    assert_eq!(build_config(&args).unwrap(), MatchConfig::default());
    assert_eq!(args.fps, 30);
}

#[test]
fn test_invalid_override_rejected() {
    let args = Args::parse_from(["chess_console", "--minutes", "0"]);
    assert!(build_config(&args).is_err());
    assert!(Args::try_parse_from(["chess_console", "--difficulty", "medium"]).is_err());
}

#[test]
fn test_config_file_is_read() {
    let path = std::env::temp_dir().join(format!("console-config-{}.toml", std::process::id()));
    std::fs::write(&path, "increment_seconds = 5\nhard_depth = 2\n").unwrap();
    let args = Args::parse_from(["chess_console", "--config", path.to_str().unwrap()]);
    let config = build_config(&args).unwrap();
    assert_eq!(config.increment_seconds, 5);
    assert_eq!(config.hard_depth, 2);
    std::fs::remove_file(&path).unwrap();
}
