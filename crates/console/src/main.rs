//! Play timed chess matches against the engine in a terminal.
//!
//! ```bash
//! cargo run -p chess_console -- --side random --difficulty hard --minutes 5 --increment 2
//! ```

mod app;
mod board;
mod commands;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use chess_core::Side;
use match_engine::{Difficulty, FaultLog, MatchConfig, MatchSession};

use crate::app::App;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SideArg {
    First,
    Second,
    Random,
}

/// Command-line arguments. Flags override values from the config file.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file with match settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Side the human plays
    #[arg(short, long, value_enum)]
    side: Option<SideArg>,

    /// Computer strength: easy (random) or hard (minimax)
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// Initial time per side in minutes
    #[arg(short, long)]
    minutes: Option<u32>,

    /// Seconds added after each move
    #[arg(short, long)]
    increment: Option<u32>,

    /// Search depth for the hard difficulty
    #[arg(long)]
    depth: Option<u8>,

    /// Frames per second of the primary loop
    #[arg(long, default_value_t = 30)]
    fps: u32,
}

fn build_config(args: &Args) -> Result<MatchConfig> {
    let mut config = match &args.config {
        Some(path) => MatchConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => MatchConfig::default(),
    };
    if let Some(side) = args.side {
        config.human_side = match side {
            SideArg::First => Side::First,
            SideArg::Second => Side::Second,
            SideArg::Random => {
                if rand::random::<bool>() {
                    Side::First
                } else {
                    Side::Second
                }
            }
        };
    }
    if let Some(difficulty) = args.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(minutes) = args.minutes {
        config.initial_seconds = minutes.saturating_mul(60);
    }
    if let Some(increment) = args.increment {
        config.increment_seconds = increment;
    }
    if let Some(depth) = args.depth {
        config.hard_depth = depth;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = build_config(&args)?;
    tracing::info!(?config, "starting console");

    let fault_log = FaultLog::new(config.fault_log.clone());
    let session = MatchSession::new(config).context("creating match session")?;
    let mut app = App::new(session, fault_log, args.fps)?;
    app.run()
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod main_tests;
