//! Score submission and the high score leaderboard
//!
//! The game fires one submission per finished run through a [`ScoreSink`].
//! [`ScoreBoard`] is the local sink: it keeps every record, serves the top
//! ten, and can mirror itself to a JSON file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of entries served by [`ScoreBoard::top`]
pub const MAX_HIGH_SCORES: usize = 10;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("score store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("score store is corrupt: {0}")]
    Json(#[from] serde_json::Error),
    #[error("score service unavailable: {0}")]
    Unavailable(String),
}

/// Destination for finished-run scores
pub trait ScoreSink {
    fn submit(&mut self, username: &str, score: u64) -> Result<(), ScoreError>;
}

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub username: String,
    pub score: u64,
    /// Unix timestamp (ms) assigned when stored
    pub timestamp: u64,
}

/// High score leaderboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    /// Sorted by score, descending; ties keep submission order
    entries: Vec<ScoreRecord>,
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl ScoreBoard {
    /// Create empty in-memory leaderboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON file, starting empty if it does not exist yet
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ScoreError> {
        let path = path.as_ref();
        let mut board = match std::fs::read_to_string(path) {
            Ok(json) => serde_json::from_str::<ScoreBoard>(&json)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No score file at {}, starting fresh", path.display());
                Self::new()
            }
            Err(e) => return Err(e.into()),
        };
        board.path = Some(path.to_path_buf());
        log::info!("Loaded {} scores", board.entries.len());
        Ok(board)
    }

    /// Store a record, returning its rank (1-indexed)
    pub fn add_score(&mut self, username: &str, score: u64, timestamp: u64) -> usize {
        let entry = ScoreRecord {
            username: username.to_string(),
            score,
            timestamp,
        };
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        pos + 1
    }

    /// Up to ten best records, highest first
    pub fn top(&self) -> &[ScoreRecord] {
        &self.entries[..self.entries.len().min(MAX_HIGH_SCORES)]
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Write to the backing file, if any
    pub fn save(&self) -> Result<(), ScoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

impl ScoreSink for ScoreBoard {
    fn submit(&mut self, username: &str, score: u64) -> Result<(), ScoreError> {
        let rank = self.add_score(username, score, now_millis());
        log::info!("Stored score {} for {} (rank {})", score, username, rank);
        self.save()
    }
}

fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
