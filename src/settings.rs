//! Game settings and preferences
//!
//! Persisted separately from the leaderboard. Values are always kept inside
//! the ranges the settings screen offers.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence::{StoreError, read_json, write_json};
use crate::sim::RoundConfig;

/// Allowed round length in seconds
pub const GAME_TIME_RANGE: (u32, u32) = (30, 120);
/// Stepper increment for the round length
pub const GAME_TIME_STEP: u32 = 5;
/// Allowed bubble cap
pub const MAX_BUBBLES_RANGE: (u32, u32) = (5, 30);
/// Stepper increment for the bubble cap
pub const MAX_BUBBLES_STEP: u32 = 1;

/// Game settings/preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    /// Round length (seconds)
    pub game_time: u32,
    /// Most bubbles on screen at once
    pub max_bubbles: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            game_time: 60,
            max_bubbles: 15,
        }
    }
}

impl GameSettings {
    /// Create settings, clamping out-of-range values to the nearest bound
    pub fn new(game_time: i64, max_bubbles: i64) -> Self {
        Self {
            game_time: clamp_to(game_time, GAME_TIME_RANGE),
            max_bubbles: clamp_to(max_bubbles, MAX_BUBBLES_RANGE),
        }
    }

    /// Re-apply the ranges (e.g. after deserializing a hand-edited file)
    pub fn clamped(self) -> Self {
        Self::new(self.game_time as i64, self.max_bubbles as i64)
    }

    pub fn set_game_time(&mut self, seconds: i64) {
        self.game_time = clamp_to(seconds, GAME_TIME_RANGE);
    }

    pub fn set_max_bubbles(&mut self, count: i64) {
        self.max_bubbles = clamp_to(count, MAX_BUBBLES_RANGE);
    }

    pub fn increase_game_time(&mut self) {
        self.set_game_time(self.game_time as i64 + GAME_TIME_STEP as i64);
    }

    pub fn decrease_game_time(&mut self) {
        self.set_game_time(self.game_time as i64 - GAME_TIME_STEP as i64);
    }

    pub fn increase_max_bubbles(&mut self) {
        self.set_max_bubbles(self.max_bubbles as i64 + MAX_BUBBLES_STEP as i64);
    }

    pub fn decrease_max_bubbles(&mut self) {
        self.set_max_bubbles(self.max_bubbles as i64 - MAX_BUBBLES_STEP as i64);
    }

    /// Configuration handed to the round engine
    pub fn round_config(&self) -> RoundConfig {
        RoundConfig::new(self.game_time as i32, self.max_bubbles as i32)
    }

    /// Default file name, relative to the working directory
    pub const DEFAULT_FILE: &'static str = "bubble_pop_settings.json";

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match read_json::<GameSettings>(path) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings from {}", path.display());
                settings.clamped()
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(err) => {
                log::warn!("Ignoring unreadable settings: {}", err);
                Self::default()
            }
        }
    }

    /// Save settings to `path`
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        write_json(path, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

fn clamp_to(value: i64, (min, max): (u32, u32)) -> u32 {
    value.clamp(min as i64, max as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::test_util::scratch_path;

    #[test]
    fn test_defaults() {
        let settings = GameSettings::default();
        assert_eq!(settings.game_time, 60);
        assert_eq!(settings.max_bubbles, 15);
    }

    #[test]
    fn test_out_of_range_values_clamp() {
        let settings = GameSettings::new(20, 3);
        assert_eq!(settings.game_time, 30);
        assert_eq!(settings.max_bubbles, 5);

        let settings = GameSettings::new(500, 99);
        assert_eq!(settings.game_time, 120);
        assert_eq!(settings.max_bubbles, 30);
    }

    #[test]
    fn test_steppers_stop_at_bounds() {
        let mut settings = GameSettings::new(115, 29);
        settings.increase_game_time();
        settings.increase_game_time();
        assert_eq!(settings.game_time, 120);
        settings.increase_max_bubbles();
        settings.increase_max_bubbles();
        assert_eq!(settings.max_bubbles, 30);

        let mut settings = GameSettings::new(35, 6);
        settings.decrease_game_time();
        settings.decrease_game_time();
        assert_eq!(settings.game_time, 30);
        settings.decrease_max_bubbles();
        settings.decrease_max_bubbles();
        assert_eq!(settings.max_bubbles, 5);
    }

    #[test]
    fn test_round_config() {
        let config = GameSettings::new(90, 20).round_config();
        assert_eq!(config, RoundConfig::new(90, 20));
    }

    #[test]
    fn test_save_and_load() {
        let path = scratch_path("settings.json");
        assert_eq!(GameSettings::load(&path), GameSettings::default());

        let settings = GameSettings::new(45, 8);
        settings.save(&path).unwrap();
        assert_eq!(GameSettings::load(&path), settings);
    }

    #[test]
    fn test_load_clamps_hand_edited_file() {
        let path = scratch_path("settings.json");
        write_json(&path, &GameSettings { game_time: 5, max_bubbles: 500 }).unwrap();
        let settings = GameSettings::load(&path);
        assert_eq!(settings.game_time, 30);
        assert_eq!(settings.max_bubbles, 30);
    }
}
