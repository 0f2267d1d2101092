//! High score persistence
//!
//! The session talks to a `ScoreStore`; the JSON file store is what the
//! native binary uses, the memory store backs tests and demos.
//!
//! Failures here never end a session. Loading falls back to an empty list
//! and a failed write still returns the updated in-memory list.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::highscores::{HighScoreEntry, HighScores};

pub trait ScoreStore {
    /// Current list, sorted descending, at most ten entries
    fn load_scores(&mut self) -> HighScores;
    /// Insert a score and return the updated list
    fn record_score(&mut self, name: &str, score: u64) -> HighScores;
}

/// Scores kept only for the lifetime of the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    scores: HighScores,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scores(scores: HighScores) -> Self {
        Self { scores }
    }
}

impl ScoreStore for MemoryStore {
    fn load_scores(&mut self) -> HighScores {
        self.scores.clone()
    }

    fn record_score(&mut self, name: &str, score: u64) -> HighScores {
        self.scores.record(name, score);
        log::info!("Recorded score {} for {}", score, name);
        self.scores.clone()
    }
}

/// Scores stored as a JSON array of `{name, score}` objects
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<HighScores> {
        let json = fs::read_to_string(&self.path)?;
        let entries: Vec<HighScoreEntry> = serde_json::from_str(&json)?;
        Ok(HighScores::from_entries(entries))
    }

    fn write(&self, scores: &HighScores) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&scores.entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl ScoreStore for JsonFileStore {
    fn load_scores(&mut self) -> HighScores {
        if !self.path.exists() {
            log::info!("No high scores found, starting fresh");
            return HighScores::new();
        }
        match self.read() {
            Ok(scores) => {
                log::info!("Loaded {} high scores from {}", scores.len(), self.path.display());
                scores
            }
            Err(e) => {
                log::warn!("Ignoring unreadable score file {}: {}", self.path.display(), e);
                HighScores::new()
            }
        }
    }

    fn record_score(&mut self, name: &str, score: u64) -> HighScores {
        let mut scores = self.load_scores();
        scores.record(name, score);
        match self.write(&scores) {
            Ok(()) => log::info!("High scores saved ({} entries)", scores.len()),
            Err(e) => log::warn!("Failed to save high scores to {}: {}", self.path.display(), e),
        }
        scores
    }
}
