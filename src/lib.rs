//! Bubble Pop - A timed bubble-popping arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (color picking, placement, physics, round engine)
//! - `highscores`: Top-10 leaderboard and the storage capability it is persisted through
//! - `persistence`: JSON file storage for the leaderboard and settings
//! - `settings`: Player-facing game settings, resolved into a `RoundConfig`

pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use highscores::{Leaderboard, LeaderboardStore, MemoryLeaderboardStore, ScoreEntry};
pub use persistence::{FileLeaderboardStore, StoreError};
pub use settings::GameSettings;

/// Game configuration constants
pub mod consts {
    /// Bubble radius in play-area units (bubbles are drawn 40 units wide)
    pub const BUBBLE_RADIUS: f32 = 20.0;

    /// Physics steps per game-clock second (~16 ms movement cadence)
    pub const PHYSICS_STEPS_PER_SECOND: u32 = 60;

    /// Bubbles spawned when a round starts (further capped by max bubbles)
    pub const INITIAL_BUBBLE_CAP: usize = 10;
    /// Most bubbles a single once-per-second refresh may add
    pub const REFRESH_SPAWN_CAP: usize = 5;
    /// Random samples tried before giving up on placing one bubble
    pub const PLACEMENT_ATTEMPTS: u32 = 50;

    /// Multiplier for popping the same color as the previous pop
    pub const COMBO_MULTIPLIER: f64 = 1.5;

    /// Visual state of a freshly spawned replacement bubble
    pub const SPAWN_SCALE: f32 = 0.1;
    pub const SPAWN_OPACITY: f32 = 0.0;
    /// Scale/opacity gained per physics step while popping in (~0.3 s)
    pub const POP_IN_RATE: f32 = 1.0 / 18.0;

    /// Player name recorded when none was entered
    pub const DEFAULT_PLAYER_NAME: &str = "Player";
}

/// Current Unix time in milliseconds
pub fn unix_millis() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}
