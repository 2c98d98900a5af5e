//! The primary loop: read commands, drive the session, redraw.

use anyhow::{anyhow, Result};
use crossbeam_channel::{unbounded, Receiver, TryRecvError};
use std::any::Any;
use std::io::{self, BufRead};
use std::panic::{self, AssertUnwindSafe};
use std::thread;
use std::time::{Duration, Instant};

use chess_core::Side;
use match_engine::{FaultLog, MatchError, MatchSession, Phase};

use crate::board::{render_board, render_status};
use crate::commands::{parse_command, Command, SideChoice, HELP};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// What the last redraw showed; a change triggers a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Shown {
    phase: Phase,
    plies: usize,
    human_side: Side,
}

pub struct App {
    session: MatchSession,
    fault_log: FaultLog,
    input: Receiver<String>,
    frame: Duration,
    shown: Option<Shown>,
}

/// Forward stdin lines to the primary loop. The channel closes on EOF.
fn spawn_input_reader() -> Result<Receiver<String>> {
    let (tx, rx) = unbounded();
    thread::Builder::new()
        .name("stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        })?;
    Ok(rx)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

impl App {
    pub fn new(session: MatchSession, fault_log: FaultLog, fps: u32) -> Result<Self> {
        let input = spawn_input_reader()?;
        Ok(Self::with_input(session, fault_log, input, fps))
    }

    fn with_input(
        session: MatchSession,
        fault_log: FaultLog,
        input: Receiver<String>,
        fps: u32,
    ) -> Self {
        Self {
            session,
            fault_log,
            input,
            frame: Duration::from_secs(1) / fps.max(1),
            shown: None,
        }
    }

    /// Run until the user quits or stdin closes. Any failure is written to
    /// the fault log before it is returned.
    pub fn run(&mut self) -> Result<()> {
        println!("Type help for the list of commands.");
        if let Err(err) = self.session.start() {
            return Err(self.record_fault(err.into()));
        }

        loop {
            let started = Instant::now();
            let step = panic::catch_unwind(AssertUnwindSafe(|| self.step()));
            match step {
                Ok(Ok(Flow::Continue)) => {}
                Ok(Ok(Flow::Quit)) => break,
                Ok(Err(err)) => return Err(self.record_fault(err)),
                Err(payload) => {
                    let err = anyhow!("panic: {}", panic_message(payload.as_ref()));
                    return Err(self.record_fault(err));
                }
            }
            thread::sleep(self.frame.saturating_sub(started.elapsed()));
        }

        self.session.shutdown();
        tracing::info!("session closed");
        Ok(())
    }

    fn step(&mut self) -> Result<Flow> {
        loop {
            match self.input.try_recv() {
                Ok(line) => {
                    if self.handle_line(&line)? == Flow::Quit {
                        return Ok(Flow::Quit);
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Ok(Flow::Quit),
            }
        }
        self.session.tick()?;
        self.redraw_if_changed();
        Ok(Flow::Continue)
    }

    fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::MoveText(text) => {
                let submission = self.session.submit_notation(&text);
                tracing::debug!(?submission, "move submitted");
            }
            Command::Move {
                from,
                to,
                promotion,
            } => {
                let submission = self.session.submit_move(&from, &to, promotion);
                tracing::debug!(?submission, "move submitted");
            }
            Command::New => user_error(self.session.start())?,
            Command::Resign => {
                self.session.resign(self.session.human_side());
            }
            Command::Undo => {
                if self.session.take_back() {
                    self.shown = None;
                }
            }
            Command::Hint => {
                self.session.play_hint_move();
            }
            Command::SetDifficulty(difficulty) => {
                self.session.set_difficulty(difficulty);
                println!("Difficulty: {difficulty}");
            }
            Command::Time { minutes, increment } => {
                let initial = minutes.saturating_mul(60);
                user_error(self.session.set_time_control(initial, increment))?;
            }
            Command::Side(choice) => {
                let side = match choice {
                    SideChoice::Fixed(side) => side,
                    SideChoice::Random => random_side(),
                    SideChoice::Swap => self.session.human_side().other(),
                };
                user_error(self.session.set_human_side(side))?;
                self.shown = None;
            }
            Command::ResetScores => {
                self.session.reset_scores();
                self.shown = None;
            }
            Command::Board => self.redraw(),
            Command::Json => println!("{}", self.session.snapshot().to_json()?),
            Command::Help => println!("{HELP}"),
            Command::Quit => return Ok(Flow::Quit),
            Command::Empty => {}
        }
        Ok(Flow::Continue)
    }

    fn redraw_if_changed(&mut self) {
        let now = Shown {
            phase: self.session.phase(),
            plies: self.session.position().ply_count(),
            human_side: self.session.human_side(),
        };
        if self.shown.as_ref() != Some(&now) {
            self.redraw();
        }
    }

    fn redraw(&mut self) {
        let snapshot = self.session.snapshot();
        println!();
        print!("{}", render_board(self.session.position(), snapshot.human_side));
        print!("{}", render_status(&snapshot));
        self.shown = Some(Shown {
            phase: snapshot.phase,
            plies: snapshot.moves.len(),
            human_side: snapshot.human_side,
        });
    }

    fn record_fault(&mut self, err: anyhow::Error) -> anyhow::Error {
        tracing::error!(error = %format!("{err:#}"), "session failed");
        let report = self.session.fault_report(format!("{err:?}"));
        if let Err(log_err) = self.fault_log.append(&report) {
            tracing::error!(%log_err, "could not write fault log");
        }
        self.session.shutdown();
        err
    }
}

/// Report mistakes the user can fix; let anything else propagate.
fn user_error(result: Result<(), MatchError>) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(err @ (MatchError::MatchInProgress | MatchError::Config(_))) => {
            println!("{err}");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn random_side() -> Side {
    if rand::random::<bool>() {
        Side::First
    } else {
        Side::Second
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod app_tests;
