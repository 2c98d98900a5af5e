//! Match state machine for one human against the engine.

use serde::Serialize;
use std::fmt;

use chess_core::{
    move_to_notation, parse_move, parse_promotion, parse_square, Engine, Move, Position, Side,
    Termination,
};
use classical_engine::SearchError;
use random_engine::RandomEngine;

use crate::clock::{Clock, ClockState};
use crate::config::{Difficulty, MatchConfig};
use crate::engine_for;
use crate::error::MatchError;
use crate::fault_log::FaultReport;
use crate::score::{parse_result, Award, Scoreboard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Setup,
    Ongoing,
    Terminal,
}

/// How a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Checkmate { winner: Side },
    Stalemate,
    Resignation { loser: Side },
    Timeout { loser: Side },
    /// Insufficient material, seventy-five moves or fivefold repetition
    Draw { rule: Termination },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Checkmate { winner } => write!(f, "Checkmate, {winner} wins"),
            Outcome::Stalemate => write!(f, "Stalemate"),
            Outcome::Resignation { loser } => {
                write!(f, "{loser} resigns, {} wins", loser.other())
            }
            Outcome::Timeout { loser } => {
                write!(f, "{loser} ran out of time, {} wins", loser.other())
            }
            Outcome::Draw { rule } => match rule {
                Termination::InsufficientMaterial => write!(f, "Draw by insufficient material"),
                Termination::SeventyFiveMoves => write!(f, "Draw by the seventy-five move rule"),
                Termination::FivefoldRepetition => write!(f, "Draw by fivefold repetition"),
                _ => write!(f, "Draw"),
            },
        }
    }
}

/// Why a submitted move was not played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    NotOngoing,
    NotYourTurn,
    Malformed,
    Illegal,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::NotOngoing => write!(f, "no match in progress"),
            RejectReason::NotYourTurn => write!(f, "not your turn"),
            RejectReason::Malformed => write!(f, "malformed move"),
            RejectReason::Illegal => write!(f, "illegal move"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveSubmission {
    pub accepted: bool,
    pub reason: Option<RejectReason>,
}

impl MoveSubmission {
    fn accepted() -> Self {
        Self {
            accepted: true,
            reason: None,
        }
    }

    fn rejected(reason: RejectReason) -> Self {
        Self {
            accepted: false,
            reason: Some(reason),
        }
    }
}

/// Read-only view of a session for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct MatchSnapshot {
    pub phase: Phase,
    pub to_move: Side,
    pub human_side: Side,
    pub difficulty: Difficulty,
    pub scores: Scoreboard,
    pub outcome: Option<Outcome>,
    pub first_clock: ClockState,
    pub second_clock: ClockState,
    pub increment_seconds: u32,
    pub moves: Vec<String>,
    pub fen: String,
    pub in_check: bool,
    pub diagnostic: Option<String>,
}

impl MatchSnapshot {
    pub fn clock(&self, side: Side) -> ClockState {
        match side {
            Side::First => self.first_clock,
            Side::Second => self.second_clock,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// One human against one engine, with clocks and a running score.
pub struct MatchSession {
    config: MatchConfig,
    position: Position,
    phase: Phase,
    outcome: Option<Outcome>,
    scores: Scoreboard,
    clock: Clock,
    engine: Box<dyn Engine>,
    hint: RandomEngine,
    diagnostic: Option<String>,
}

impl MatchSession {
    /// Create a session in the setup phase. Spawns the clock workers.
    pub fn new(config: MatchConfig) -> Result<Self, MatchError> {
        config.validate()?;
        let clock = Clock::new(config.tick())?;
        clock.set_increment(config.increment_seconds);
        clock.reset(config.initial_seconds);
        let engine = engine_for(config.difficulty, config.hard_depth);
        Ok(Self {
            config,
            position: Position::startpos(),
            phase: Phase::Setup,
            outcome: None,
            scores: Scoreboard::default(),
            clock,
            engine,
            hint: RandomEngine::new(),
            diagnostic: None,
        })
    }

    /// Start a new match from the initial position.
    pub fn start(&mut self) -> Result<(), MatchError> {
        self.start_from(Position::startpos())
    }

    /// Start a new match from `position`. Scores carry over.
    pub fn start_from(&mut self, position: Position) -> Result<(), MatchError> {
        if self.phase == Phase::Ongoing {
            return Err(MatchError::MatchInProgress);
        }
        self.clock.ensure_running()?;
        self.position = position;
        self.outcome = None;
        self.diagnostic = None;
        self.engine.new_game();
        self.clock.set_increment(self.config.increment_seconds);
        self.clock.reset(self.config.initial_seconds);
        self.clock.start(self.position.turn());
        self.phase = Phase::Ongoing;
        tracing::info!(
            human = %self.config.human_side,
            difficulty = %self.config.difficulty,
            engine = self.engine.name(),
            initial = self.config.initial_seconds,
            increment = self.config.increment_seconds,
            "match started"
        );
        // A position that is already decided ends the match at once
        self.settle();
        Ok(())
    }

    pub fn is_human_turn(&self) -> bool {
        self.phase == Phase::Ongoing && self.position.turn() == self.config.human_side
    }

    /// Submit the human's move as separate from/to squares plus an optional
    /// promotion letter.
    pub fn submit_move(&mut self, from: &str, to: &str, promotion: Option<char>) -> MoveSubmission {
        if let Some(reason) = self.human_move_gate() {
            return MoveSubmission::rejected(reason);
        }
        match move_from_parts(from, to, promotion) {
            Some(mv) => self.apply_player_move(mv),
            None => MoveSubmission::rejected(RejectReason::Malformed),
        }
    }

    /// Submit the human's move in long algebraic notation (`e2e4`, `e7e8q`).
    pub fn submit_notation(&mut self, text: &str) -> MoveSubmission {
        if let Some(reason) = self.human_move_gate() {
            return MoveSubmission::rejected(reason);
        }
        match parse_move(text) {
            Ok(mv) => self.apply_player_move(mv),
            Err(err) => {
                tracing::debug!(%err, "rejected move text");
                MoveSubmission::rejected(RejectReason::Malformed)
            }
        }
    }

    /// Play `mv` for the human if the match is on, it is their turn and the
    /// move is legal. Otherwise nothing changes.
    pub fn apply_player_move(&mut self, mv: Move) -> MoveSubmission {
        if let Some(reason) = self.human_move_gate() {
            return MoveSubmission::rejected(reason);
        }
        if !self.position.is_legal(mv) {
            tracing::debug!(mv = %move_to_notation(mv), "rejected illegal move");
            return MoveSubmission::rejected(RejectReason::Illegal);
        }
        self.commit(mv);
        MoveSubmission::accepted()
    }

    /// Let the engine choose and play a move for the automated side.
    pub fn request_automated_move(&mut self) -> Result<Move, MatchError> {
        if self.check_timeout() || self.phase != Phase::Ongoing {
            return Err(MatchError::NotOngoing);
        }
        if self.is_human_turn() {
            return Err(MatchError::NotAutomatedTurn);
        }
        let result = self.engine.search(&self.position);
        let mv = result.best_move.ok_or(SearchError::EmptySearch)?;
        tracing::debug!(
            engine = self.engine.name(),
            mv = %move_to_notation(mv),
            score = result.score,
            nodes = result.nodes,
            "engine move"
        );
        self.commit(mv);
        Ok(mv)
    }

    /// Play a random legal move for the human. `None` when it is not the
    /// human's turn.
    pub fn play_hint_move(&mut self) -> Option<Move> {
        if self.check_timeout() || !self.is_human_turn() {
            return None;
        }
        let mv = self.hint.random_move(&self.position)?;
        self.commit(mv);
        Some(mv)
    }

    /// Take back the engine's last reply and the human move before it.
    pub fn take_back(&mut self) -> bool {
        if !self.is_human_turn() || self.position.ply_count() < 2 {
            return false;
        }
        self.position.unmake_move();
        self.position.unmake_move();
        tracing::debug!("took back one move pair");
        true
    }

    /// `side` resigns. Returns false when no match is in progress.
    pub fn resign(&mut self, side: Side) -> bool {
        if self.phase != Phase::Ongoing {
            return false;
        }
        self.finish(Outcome::Resignation { loser: side });
        self.scores.add(Award::win(side.other()));
        true
    }

    /// End the match if either flag has fallen. Returns true if it did.
    pub fn check_timeout(&mut self) -> bool {
        if self.phase != Phase::Ongoing || !self.clock.is_expired() {
            return false;
        }
        let Some(loser) = self.clock.expired_side() else {
            return false;
        };
        self.finish(Outcome::Timeout { loser });
        self.scores.add(Award::win(loser.other()));
        true
    }

    /// End the match if the board says the game is over, scoring it from
    /// the result string. Returns whether the match ended.
    ///
    /// # Errors
    /// `ResultParse` if the result string is not recognised; the match still
    /// ends but no score is recorded.
    pub fn check_terminal(&mut self) -> Result<bool, MatchError> {
        if self.phase != Phase::Ongoing {
            return Ok(false);
        }
        let Some(termination) = self.position.termination() else {
            return Ok(false);
        };
        let outcome = match termination {
            Termination::Checkmate => Outcome::Checkmate {
                winner: self.position.turn().other(),
            },
            Termination::Stalemate => Outcome::Stalemate,
            rule => Outcome::Draw { rule },
        };
        self.finish(outcome);
        if let Err(err) = score_result(&mut self.scores, self.position.result()) {
            self.diagnostic = Some(err.to_string());
            return Err(err);
        }
        Ok(true)
    }

    /// One step of the primary loop: keep the clock alive, watch for flag
    /// fall, and let the engine move when it is its turn.
    pub fn tick(&mut self) -> Result<(), MatchError> {
        if self.phase != Phase::Ongoing {
            return Ok(());
        }
        self.clock.ensure_running()?;
        if self.check_timeout() || self.is_human_turn() {
            return Ok(());
        }
        self.request_automated_move()?;
        Ok(())
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            phase: self.phase,
            to_move: self.position.turn(),
            human_side: self.config.human_side,
            difficulty: self.config.difficulty,
            scores: self.scores,
            outcome: self.outcome,
            first_clock: self.clock.state(Side::First),
            second_clock: self.clock.state(Side::Second),
            increment_seconds: self.clock.increment(),
            moves: self.position.moves().into_iter().map(move_to_notation).collect(),
            fen: self.position.fen(),
            in_check: self.position.is_check(),
            diagnostic: self.diagnostic.clone(),
        }
    }

    /// Switch strategy. Takes effect from the engine's next move.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if difficulty == self.config.difficulty {
            return;
        }
        self.config.difficulty = difficulty;
        self.engine = engine_for(difficulty, self.config.hard_depth);
        tracing::info!(%difficulty, "difficulty changed");
    }

    pub fn set_time_control(
        &mut self,
        initial_seconds: u32,
        increment_seconds: u32,
    ) -> Result<(), MatchError> {
        if self.phase == Phase::Ongoing {
            return Err(MatchError::MatchInProgress);
        }
        let mut config = self.config.clone();
        config.initial_seconds = initial_seconds;
        config.increment_seconds = increment_seconds;
        config.validate()?;
        self.config = config;
        self.clock.set_increment(increment_seconds);
        self.clock.reset(initial_seconds);
        tracing::info!(initial_seconds, increment_seconds, "time control changed");
        Ok(())
    }

    /// Change the human's side between matches. The scores follow the players.
    pub fn set_human_side(&mut self, side: Side) -> Result<(), MatchError> {
        if self.phase == Phase::Ongoing {
            return Err(MatchError::MatchInProgress);
        }
        if side != self.config.human_side {
            self.config.human_side = side;
            self.scores.swap();
        }
        Ok(())
    }

    pub fn reset_scores(&mut self) {
        self.scores.reset();
    }

    /// Stop the clock workers. The session is unusable for play afterwards.
    pub fn shutdown(&mut self) {
        self.clock.pause();
        self.clock.shutdown();
    }

    /// Failure report carrying the side played and the moves so far.
    pub fn fault_report(&self, error: impl fmt::Display) -> FaultReport {
        FaultReport::new(error, self.config.human_side, self.position.history_notation())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn scores(&self) -> Scoreboard {
        self.scores
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn human_side(&self) -> Side {
        self.config.human_side
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    pub fn clock_state(&self, side: Side) -> ClockState {
        self.clock.state(side)
    }

    pub fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_deref()
    }

    fn human_move_gate(&mut self) -> Option<RejectReason> {
        // A fallen flag ends the match before any move is looked at
        if self.check_timeout() || self.phase != Phase::Ongoing {
            Some(RejectReason::NotOngoing)
        } else if !self.is_human_turn() {
            Some(RejectReason::NotYourTurn)
        } else {
            None
        }
    }

    fn commit(&mut self, mv: Move) {
        let mover = self.position.turn();
        self.position.make_move(mv);
        self.clock.update_time(mover);
        self.settle();
    }

    fn settle(&mut self) {
        if let Err(err) = self.check_terminal() {
            tracing::error!(%err, "could not score finished game");
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.clock.pause();
        self.phase = Phase::Terminal;
        self.outcome = Some(outcome);
        tracing::info!(%outcome, moves = self.position.ply_count(), "match over");
    }

    #[cfg(test)]
    pub(crate) fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }
}

fn move_from_parts(from: &str, to: &str, promotion: Option<char>) -> Option<Move> {
    let from = parse_square(from).ok()?;
    let to = parse_square(to).ok()?;
    let promo = match promotion {
        Some(ch) => Some(parse_promotion(ch)?),
        None => None,
    };
    Some(Move::new(from, to, promo))
}

fn score_result(scores: &mut Scoreboard, result: &str) -> Result<(), MatchError> {
    let award = parse_result(result)?;
    scores.add(award);
    Ok(())
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
