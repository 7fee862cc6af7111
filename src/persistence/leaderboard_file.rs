//! JSON file-backed leaderboard

use std::path::{Path, PathBuf};

use super::{StoreError, read_json, write_json};
use crate::highscores::{LeaderboardStore, ScoreEntry};

/// Leaderboard stored as a JSON array of entries
#[derive(Debug, Clone)]
pub struct FileLeaderboardStore {
    path: PathBuf,
}

impl FileLeaderboardStore {
    /// Default file name, relative to the working directory
    pub const DEFAULT_FILE: &'static str = "bubble_pop_highscores.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileLeaderboardStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FILE)
    }
}

impl LeaderboardStore for FileLeaderboardStore {
    fn load(&self) -> Result<Vec<ScoreEntry>, StoreError> {
        Ok(read_json(&self.path)?.unwrap_or_default())
    }

    fn save(&mut self, entries: &[ScoreEntry]) -> Result<(), StoreError> {
        write_json(&self.path, entries)?;
        log::info!("High scores saved ({} entries)", entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::test_util::scratch_path;

    #[test]
    fn test_fresh_store_is_empty() {
        let store = FileLeaderboardStore::new(scratch_path("scores.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let path = scratch_path("scores.json");
        let mut store = FileLeaderboardStore::new(&path);
        let entries = vec![
            ScoreEntry::new("ada", 42, 1_700_000_000_000.0),
            ScoreEntry::new("bob", 7, 1_700_000_100_000.0),
        ];
        store.save(&entries).unwrap();

        let reopened = FileLeaderboardStore::new(&path);
        assert_eq!(reopened.load().unwrap(), entries);
    }
}
