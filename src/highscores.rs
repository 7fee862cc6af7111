//! High score leaderboard system
//!
//! Keeps the top 10 scores, sorted descending. Storage is injected through
//! `LeaderboardStore` so the engine never touches a global.

use serde::{Deserialize, Serialize};

use crate::persistence::StoreError;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub player_name: String,
    /// Player's score
    pub score: u64,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

impl ScoreEntry {
    pub fn new(player_name: impl Into<String>, score: u64, timestamp: f64) -> Self {
        Self {
            player_name: player_name.into(),
            score,
            timestamp,
        }
    }
}

/// Where the leaderboard lives between rounds
pub trait LeaderboardStore {
    /// Stored entries, best first
    fn load(&self) -> Result<Vec<ScoreEntry>, StoreError>;
    /// Replace the stored entries
    fn save(&mut self, entries: &[ScoreEntry]) -> Result<(), StoreError>;
}

/// In-memory store (tests, embedding without persistence)
#[derive(Debug, Clone, Default)]
pub struct MemoryLeaderboardStore {
    entries: Vec<ScoreEntry>,
    saves: usize,
}

impl MemoryLeaderboardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Number of `save` calls received
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl LeaderboardStore for MemoryLeaderboardStore {
    fn load(&self) -> Result<Vec<ScoreEntry>, StoreError> {
        Ok(self.entries.clone())
    }

    fn save(&mut self, entries: &[ScoreEntry]) -> Result<(), StoreError> {
        self.entries = entries.to_vec();
        self.saves += 1;
        Ok(())
    }
}

/// Top-N leaderboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<ScoreEntry>,
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Leaderboard {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build from stored entries, restoring order and the size cap
    pub fn from_entries(mut entries: Vec<ScoreEntry>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add an entry to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add(&mut self, entry: ScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }

        // Find insertion point (sorted descending, ties after existing entries)
        let pos = self.entries.iter().position(|e| entry.score > e.score);
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
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load from a store, starting fresh if it cannot be read
    pub fn load_from<S: LeaderboardStore + ?Sized>(store: &S) -> Self {
        match store.load() {
            Ok(entries) => {
                log::debug!("Loaded {} high scores", entries.len());
                Self::from_entries(entries)
            }
            Err(err) => {
                log::warn!("Could not load high scores, starting fresh: {}", err);
                Self::new()
            }
        }
    }
}

/// Format a timestamp as a relative date string
pub fn format_relative(timestamp: f64, now: f64) -> String {
    let diff_secs = (now - timestamp) / 1000.0;
    let diff_mins = diff_secs / 60.0;
    let diff_hours = diff_mins / 60.0;
    let diff_days = diff_hours / 24.0;

    if diff_days >= 1.0 {
        let days = diff_days.floor() as i64;
        if days == 1 {
            "Yesterday".to_string()
        } else if days < 7 {
            format!("{} days ago", days)
        } else if days < 14 {
            "1 week ago".to_string()
        } else {
            format!("{} weeks ago", days / 7)
        }
    } else if diff_hours >= 1.0 {
        let hours = diff_hours.floor() as i64;
        if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", hours)
        }
    } else if diff_mins >= 1.0 {
        let mins = diff_mins.floor() as i64;
        if mins == 1 {
            "1 min ago".to_string()
        } else {
            format!("{} mins ago", mins)
        }
    } else {
        "Just now".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: u64) -> ScoreEntry {
        ScoreEntry::new(name, score, 0.0)
    }

    #[test]
    fn test_empty_board_accepts_anything() {
        let board = Leaderboard::new();
        assert!(board.qualifies(0));
        assert_eq!(board.potential_rank(0), Some(1));
        assert!(board.is_empty());
        assert_eq!(board.top_score(), None);
    }

    #[test]
    fn test_cap_and_order() {
        let mut board = Leaderboard::new();
        let scores = [40, 5, 120, 75, 10, 95, 60, 150, 25, 85, 55, 130, 15, 110, 70];
        let mut rejected = Vec::new();
        for (i, &score) in scores.iter().enumerate() {
            if board.add(entry(&format!("P{}", i), score)).is_none() {
                rejected.push(score);
            }
        }

        assert_eq!(board.len(), MAX_HIGH_SCORES);
        let kept: Vec<u64> = board.entries().iter().map(|e| e.score).collect();
        assert!(kept.windows(2).all(|w| w[0] >= w[1]));

        // Entries pushed out after insertion count as rejected too
        let tenth = kept[MAX_HIGH_SCORES - 1];
        for score in scores.iter().filter(|s| !kept.contains(s)) {
            assert!(tenth >= *score);
        }
        for score in rejected {
            assert!(tenth >= score);
        }
        assert_eq!(board.top_score(), Some(150));
    }

    #[test]
    fn test_full_board_requires_beating_lowest() {
        let mut board = Leaderboard::new();
        for i in 1..=10 {
            board.add(entry("p", i * 10));
        }
        assert!(!board.qualifies(10));
        assert!(!board.qualifies(5));
        assert!(board.qualifies(11));
        assert_eq!(board.potential_rank(11), Some(10));
        assert_eq!(board.potential_rank(1000), Some(1));
        assert_eq!(board.add(entry("late", 10)), None);
    }

    #[test]
    fn test_ties_rank_after_existing() {
        let mut board = Leaderboard::new();
        board.add(entry("first", 50));
        assert_eq!(board.add(entry("second", 50)), Some(2));
        assert_eq!(board.entries()[0].player_name, "first");
    }

    #[test]
    fn test_from_entries_sorts_and_truncates() {
        let entries: Vec<ScoreEntry> = (0..14).map(|i| entry("p", i)).collect();
        let board = Leaderboard::from_entries(entries);
        assert_eq!(board.len(), MAX_HIGH_SCORES);
        assert_eq!(board.top_score(), Some(13));
        assert_eq!(board.entries().last().map(|e| e.score), Some(4));
    }

    #[test]
    fn test_loaded_board_keeps_cap() {
        let entries: Vec<ScoreEntry> = (1..=10).map(|i| entry("p", i * 10)).collect();
        let mut board = Leaderboard::from_entries(entries);
        assert!(!board.qualifies(10));
        assert_eq!(board.add(entry("new", 55)), Some(6));
        assert_eq!(board.len(), MAX_HIGH_SCORES);
        assert_eq!(board.entries().last().map(|e| e.score), Some(20));
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryLeaderboardStore::new();
        store.save(&[entry("a", 3)]).unwrap();
        let board = Leaderboard::load_from(&store);
        assert_eq!(board.top_score(), Some(3));
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_format_relative() {
        let now = 10.0 * 24.0 * 3600.0 * 1000.0;
        let min = 60_000.0;
        assert_eq!(format_relative(now - 5_000.0, now), "Just now");
        assert_eq!(format_relative(now - min, now), "1 min ago");
        assert_eq!(format_relative(now - 5.0 * min, now), "5 mins ago");
        assert_eq!(format_relative(now - 60.0 * min, now), "1 hour ago");
        assert_eq!(format_relative(now - 180.0 * min, now), "3 hours ago");
        assert_eq!(format_relative(now - 1440.0 * min, now), "Yesterday");
        assert_eq!(format_relative(now - 3.0 * 1440.0 * min, now), "3 days ago");
        assert_eq!(format_relative(now - 8.0 * 1440.0 * min, now), "1 week ago");
    }
}
