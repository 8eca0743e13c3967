//! High score leaderboard system
//!
//! Persisted as JSON under the platform data directory, tracks top 10
//! scores. This is the score sink the driver reports into; the simulation
//! core never compares or stores scores itself.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::driver::ScoreSink;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Pipes cleared
    pub score: u32,
    /// Unix timestamp (seconds) when achieved
    pub timestamp: u64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    const FILE_NAME: &'static str = "highscores.json";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u32, timestamp: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry { score, timestamp };

        // Find insertion point (sorted descending by score)
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    fn storage_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "flapcraft")
            .map(|dirs| dirs.data_dir().join(Self::FILE_NAME))
    }

    /// Load high scores from disk; missing or corrupt files fall back to an
    /// empty leaderboard
    pub fn load() -> Self {
        if let Some(path) = Self::storage_path() {
            if let Ok(json) = fs::read_to_string(&path) {
                match serde_json::from_str::<HighScores>(&json) {
                    Ok(scores) => {
                        log::info!("Loaded {} high scores", scores.entries.len());
                        return scores;
                    }
                    Err(e) => log::warn!("Ignoring corrupt high score file: {e}"),
                }
            }
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    /// Save high scores to disk
    pub fn save(&self) {
        let Some(path) = Self::storage_path() else {
            log::warn!("No data directory available, high scores not saved");
            return;
        };

        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("Failed to create data directory: {e}");
                return;
            }
        }

        match serde_json::to_string_pretty(self) {
            Ok(json) => match fs::write(&path, json) {
                Ok(()) => log::info!("High scores saved ({} entries)", self.entries.len()),
                Err(e) => log::warn!("Failed to write high scores: {e}"),
            },
            Err(e) => log::warn!("Failed to serialize high scores: {e}"),
        }
    }
}

impl ScoreSink for HighScores {
    fn report(&mut self, score: u32) {
        match self.add_score(score, unix_now()) {
            Some(rank) => log::info!("Score {score} enters the leaderboard at rank {rank}"),
            None => log::debug!("Score {score} did not qualify for the leaderboard"),
        }
    }
}

/// Seconds since the Unix epoch, 0 if the clock is set before it
fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
