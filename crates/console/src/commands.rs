//! Parsing of the lines typed at the console

use chess_core::Side;
use match_engine::Difficulty;

/// Which side the human wants to play next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideChoice {
    Fixed(Side),
    Random,
    Swap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `e2e4`, `e7e8q`
    MoveText(String),
    /// `e2 e4`, `e7 e8 q`
    Move {
        from: String,
        to: String,
        promotion: Option<char>,
    },
    New,
    Resign,
    Undo,
    Hint,
    SetDifficulty(Difficulty),
    Time { minutes: u32, increment: u32 },
    Side(SideChoice),
    ResetScores,
    Board,
    Json,
    Help,
    Quit,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command {0:?}, type help for a list")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

pub const HELP: &str = "\
commands:
  e2e4 | e2 e4 [q]     play a move (promotion letter q, r, b or n)
  play | new           start a new match
  resign               resign the current match
  undo                 take back your last move and the reply
  hint                 let a random move be played for you
  easy | hard          choose the computer's strength
  time <min> <inc>     set the time control for the next match
  side first|second|random|swap
                       choose your side for the next match
  reset                reset the scores
  board                show the board
  json                 dump the match state as JSON
  help                 show this help
  quit                 leave";

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some(first) = tokens.first() else {
        return Ok(Command::Empty);
    };

    let command = match first.to_ascii_lowercase().as_str() {
        "play" | "new" => Command::New,
        "resign" => Command::Resign,
        "undo" | "u" => Command::Undo,
        "hint" => Command::Hint,
        "easy" => Command::SetDifficulty(Difficulty::Easy),
        "hard" => Command::SetDifficulty(Difficulty::Hard),
        "reset" => Command::ResetScores,
        "board" => Command::Board,
        "json" => Command::Json,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "time" => parse_time(&tokens[1..])?,
        "side" => parse_side(&tokens[1..])?,
        _ => {
            return parse_move_line(&line.to_ascii_lowercase())
                .ok_or_else(|| CommandError::Unknown(line.trim().to_string()))
        }
    };
    Ok(command)
}

fn parse_time(args: &[&str]) -> Result<Command, CommandError> {
    const USAGE: &str = "time <minutes> <increment seconds>";
    match args {
        [minutes, increment] => {
            let minutes = minutes.parse().map_err(|_| CommandError::Usage(USAGE))?;
            let increment = increment.parse().map_err(|_| CommandError::Usage(USAGE))?;
            Ok(Command::Time { minutes, increment })
        }
        _ => Err(CommandError::Usage(USAGE)),
    }
}

fn parse_side(args: &[&str]) -> Result<Command, CommandError> {
    const USAGE: &str = "side first|second|random|swap";
    let choice = match args {
        [arg] => match arg.to_ascii_lowercase().as_str() {
            "first" | "white" => SideChoice::Fixed(Side::First),
            "second" | "black" => SideChoice::Fixed(Side::Second),
            "random" => SideChoice::Random,
            "swap" => SideChoice::Swap,
            _ => return Err(CommandError::Usage(USAGE)),
        },
        _ => return Err(CommandError::Usage(USAGE)),
    };
    Ok(Command::Side(choice))
}

/// A move typed either as one token or as separate squares. Move-shaped
/// input that is not a real move still goes to the session, which drops it
/// without a message.
fn parse_move_line(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [text] if move_shaped(text) => Some(Command::MoveText(text.to_string())),
        [from, to, rest @ ..] if square_shaped(from) && square_shaped(to) => {
            let promotion = match rest {
                [] => None,
                [p] => {
                    let mut chars = p.chars();
                    let ch = chars.next()?;
                    if chars.next().is_some() {
                        return None;
                    }
                    Some(ch)
                }
                _ => return None,
            };
            Some(Command::Move {
                from: from.to_string(),
                to: to.to_string(),
                promotion,
            })
        }
        _ => None,
    }
}

/// A letter followed by a digit, like `e2` or `i9`.
fn square_shaped(token: &str) -> bool {
    let bytes = token.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1].is_ascii_digit()
}

/// Two square-shaped halves with an optional trailing letter.
fn move_shaped(token: &str) -> bool {
    if !token.is_ascii() || !(4..=5).contains(&token.len()) {
        return false;
    }
    square_shaped(&token[..2])
        && square_shaped(&token[2..4])
        && token[4..].bytes().all(|b| b.is_ascii_alphabetic())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod commands_tests;
