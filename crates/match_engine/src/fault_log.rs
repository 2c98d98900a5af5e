//! Append-only, human-readable log of unexpected session failures

use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chess_core::Side;

use crate::error::MatchError;

const FOOTER: &str = "-----------------------------";

/// One failure: when it happened, what went wrong, and the game so far.
#[derive(Debug, Clone)]
pub struct FaultReport {
    pub timestamp: DateTime<Local>,
    pub error: String,
    /// The side the human was playing
    pub side: Side,
    /// Space separated move history in long algebraic notation
    pub history: String,
}

impl FaultReport {
    pub fn new(error: impl std::fmt::Display, side: Side, history: String) -> Self {
        Self {
            timestamp: Local::now(),
            error: error.to_string(),
            side,
            history,
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "----- {} -----", self.timestamp.format("%Y-%m-%d %H:%M:%S"));
        let _ = writeln!(out, "{}", self.error.trim_end());
        let _ = writeln!(out, "Playing as {}:", self.side.to_string().to_uppercase());
        let _ = writeln!(out, "\t{}", self.history);
        let _ = writeln!(out, "{FOOTER}");
        out.push('\n');
        out
    }
}

#[derive(Debug, Clone)]
pub struct FaultLog {
    path: PathBuf,
}

impl FaultLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `report`, creating the file on first use.
    pub fn append(&self, report: &FaultReport) -> Result<(), MatchError> {
        let to_error = |source| MatchError::FaultLog {
            path: self.path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(to_error)?;
        file.write_all(report.render().as_bytes()).map_err(to_error)?;
        tracing::info!(path = %self.path.display(), "fault report written");
        Ok(())
    }
}

#[cfg(test)]
#[path = "fault_log_tests.rs"]
mod fault_log_tests;
