//! Cumulative match scores

use serde::{Deserialize, Serialize};
use std::fmt;

use chess_core::Side;

use crate::error::MatchError;

/// A player's tally, kept in half points so draws add up exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Score {
    half_points: u32,
}

impl Score {
    pub fn from_half_points(half_points: u32) -> Self {
        Self { half_points }
    }

    pub fn half_points(&self) -> u32 {
        self.half_points
    }

    pub fn points(&self) -> f64 {
        f64::from(self.half_points) / 2.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.half_points / 2;
        if self.half_points % 2 == 0 {
            write!(f, "{whole}")
        } else {
            write!(f, "{whole}.5")
        }
    }
}

/// Half points awarded to each side by one finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Award {
    pub first: u32,
    pub second: u32,
}

impl Award {
    pub fn win(side: Side) -> Self {
        match side {
            Side::First => Self { first: 2, second: 0 },
            Side::Second => Self { first: 0, second: 2 },
        }
    }

    pub fn draw() -> Self {
        Self { first: 1, second: 1 }
    }
}

/// Translate a result string into an award.
///
/// # Errors
/// Anything other than `1-0`, `0-1` or `1/2-1/2` is a `ResultParse` error.
pub fn parse_result(result: &str) -> Result<Award, MatchError> {
    match result {
        "1-0" => Ok(Award::win(Side::First)),
        "0-1" => Ok(Award::win(Side::Second)),
        "1/2-1/2" => Ok(Award::draw()),
        other => Err(MatchError::ResultParse(other.to_string())),
    }
}

/// Scores per side, carried across matches until reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub first: Score,
    pub second: Score,
}

impl Scoreboard {
    pub fn get(&self, side: Side) -> Score {
        match side {
            Side::First => self.first,
            Side::Second => self.second,
        }
    }

    pub fn add(&mut self, award: Award) {
        self.first.half_points += award.first;
        self.second.half_points += award.second;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Exchange the two tallies, used when the players change sides.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.first, &mut self.second);
    }
}

#[cfg(test)]
#[path = "score_tests.rs"]
mod score_tests;
