//! Two-sided countdown clock.
//!
//! Each side has its own worker thread that waits one tick at a time on a
//! stop channel and, while its side is the running one, takes a second off
//! that side's remaining time. All state the workers touch lives in atomics:
//! a single `active` value names the running side, so both sides can never
//! run at once, and remaining time is decremented with a compare-and-swap
//! that stops at zero.

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chess_core::Side;

use crate::error::MatchError;

const IDLE: u8 = 0;

fn active_code(side: Side) -> u8 {
    side.idx() as u8 + 1
}

/// What the clock shows for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockState {
    pub remaining_seconds: u32,
    pub running: bool,
}

/// Format seconds as `m:ss`.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[derive(Debug, Default)]
struct Shared {
    remaining: [AtomicU32; 2],
    active: AtomicU8,
    increment: AtomicU32,
    expired: AtomicBool,
}

impl Shared {
    fn is_running(&self, side: Side) -> bool {
        self.active.load(Ordering::SeqCst) == active_code(side)
    }

    /// Take one second off `side` if it is running. Never goes below zero.
    fn tick(&self, side: Side) {
        if !self.is_running(side) {
            return;
        }
        let left = self.remaining[side.idx()].fetch_update(
            Ordering::SeqCst,
            Ordering::SeqCst,
            |secs| secs.checked_sub(1),
        );
        // Ok(1): this tick hit zero. Err: it was already at zero.
        if matches!(left, Ok(1) | Err(_)) && !self.expired.swap(true, Ordering::SeqCst) {
            tracing::info!(side = %side, "clock expired");
        }
    }
}

#[derive(Debug)]
struct Worker {
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

fn spawn_worker(side: Side, shared: Arc<Shared>, tick: Duration) -> Result<Worker, MatchError> {
    let (stop, stop_rx): (Sender<()>, Receiver<()>) = bounded(1);
    let handle = thread::Builder::new()
        .name(format!("clock-{}", side.to_string().to_lowercase()))
        .spawn(move || loop {
            match stop_rx.recv_timeout(tick) {
                Err(RecvTimeoutError::Timeout) => shared.tick(side),
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        })
        .map_err(MatchError::ClockSpawn)?;
    Ok(Worker { stop, handle })
}

/// A chess clock for both sides, backed by two worker threads.
#[derive(Debug)]
pub struct Clock {
    shared: Arc<Shared>,
    tick: Duration,
    workers: [Option<Worker>; 2],
    closed: bool,
}

impl Clock {
    /// Spawn both workers. Clocks start at zero and paused; call
    /// [`Clock::reset`] and [`Clock::start`] to begin a game.
    pub fn new(tick: Duration) -> Result<Self, MatchError> {
        let shared = Arc::new(Shared::default());
        let first = spawn_worker(Side::First, Arc::clone(&shared), tick)?;
        let second = spawn_worker(Side::Second, Arc::clone(&shared), tick)?;
        Ok(Self {
            shared,
            tick,
            workers: [Some(first), Some(second)],
            closed: false,
        })
    }

    pub fn tick_duration(&self) -> Duration {
        self.tick
    }

    /// Pause both sides, set both to `initial_seconds` and clear expiry.
    pub fn reset(&self, initial_seconds: u32) {
        self.shared.active.store(IDLE, Ordering::SeqCst);
        for slot in &self.shared.remaining {
            slot.store(initial_seconds, Ordering::SeqCst);
        }
        self.shared.expired.store(false, Ordering::SeqCst);
    }

    /// Make `side` the running side.
    pub fn start(&self, side: Side) {
        self.shared.active.store(active_code(side), Ordering::SeqCst);
    }

    /// `side` has just moved: hand the clock to the opponent and credit the
    /// increment to `side`. A clock that has run out stays at zero.
    pub fn update_time(&self, side: Side) {
        self.shared
            .active
            .store(active_code(side.other()), Ordering::SeqCst);
        let inc = self.increment();
        let _ = self.shared.remaining[side.idx()].fetch_update(
            Ordering::SeqCst,
            Ordering::SeqCst,
            |secs| (secs > 0).then(|| secs.saturating_add(inc)),
        );
    }

    /// Stop both sides.
    pub fn pause(&self) {
        self.shared.active.store(IDLE, Ordering::SeqCst);
    }

    pub fn set_increment(&self, seconds: u32) {
        self.shared.increment.store(seconds, Ordering::SeqCst);
    }

    pub fn increment(&self) -> u32 {
        self.shared.increment.load(Ordering::SeqCst)
    }

    pub fn remaining(&self, side: Side) -> u32 {
        self.shared.remaining[side.idx()].load(Ordering::SeqCst)
    }

    pub fn is_running(&self, side: Side) -> bool {
        self.shared.is_running(side)
    }

    pub fn running_side(&self) -> Option<Side> {
        Side::BOTH.into_iter().find(|side| self.is_running(*side))
    }

    pub fn state(&self, side: Side) -> ClockState {
        ClockState {
            remaining_seconds: self.remaining(side),
            running: self.is_running(side),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.shared.expired.load(Ordering::SeqCst)
    }

    /// The side whose time ran out, once the clock has expired.
    pub fn expired_side(&self) -> Option<Side> {
        if !self.is_expired() {
            return None;
        }
        Side::BOTH.into_iter().find(|side| self.remaining(*side) == 0)
    }

    /// Advance `side` by one tick without waiting for its worker.
    pub(crate) fn tick_once(&self, side: Side) {
        self.shared.tick(side);
    }

    /// Whether the worker for `side` is alive.
    pub fn worker_alive(&self, side: Side) -> bool {
        self.workers[side.idx()]
            .as_ref()
            .is_some_and(|w| !w.handle.is_finished())
    }

    /// Restart any worker that has stopped. Returns how many were restarted.
    pub fn ensure_running(&mut self) -> Result<usize, MatchError> {
        if self.closed {
            return Ok(0);
        }
        let mut restarted = 0;
        for side in Side::BOTH {
            let slot = &mut self.workers[side.idx()];
            let stalled = slot.as_ref().map_or(true, |w| w.handle.is_finished());
            if !stalled {
                continue;
            }
            if let Some(old) = slot.take() {
                if old.handle.join().is_err() {
                    tracing::warn!(side = %side, "clock worker panicked");
                }
            }
            *slot = Some(spawn_worker(side, Arc::clone(&self.shared), self.tick)?);
            tracing::warn!(side = %side, "clock worker had stopped, restarted");
            restarted += 1;
        }
        Ok(restarted)
    }

    /// Stop and join both workers. Idempotent.
    pub fn shutdown(&mut self) {
        self.closed = true;
        self.pause();
        for slot in &mut self.workers {
            if let Some(worker) = slot.take() {
                drop(worker.stop);
                if worker.handle.join().is_err() {
                    tracing::warn!("clock worker panicked during shutdown");
                }
            }
        }
    }

    /// Stop one worker without marking the clock closed, as a crash would.
    #[cfg(test)]
    pub(crate) fn stop_worker(&mut self, side: Side) {
        if let Some(worker) = &self.workers[side.idx()] {
            let _ = worker.stop.send(());
            while !worker.handle.is_finished() {
                thread::sleep(Duration::from_millis(1));
            }
        }
    }
}

impl Drop for Clock {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod clock_tests;
