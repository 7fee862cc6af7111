//! Round state and core simulation types
//!
//! Everything a renderer needs to draw a frame lives in `RoundState`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::color::BubbleColor;
use crate::consts::*;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RoundPhase {
    /// No round started yet (welcome / name entry)
    #[default]
    Idle,
    /// Clock running, bubbles live
    Running,
    /// Time ran out or the round was ended; state is frozen
    Ended,
}

/// Unique bubble identifier (never reused within an engine)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BubbleId(pub u32);

/// Presentation hints for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualState {
    /// 0-1
    pub scale: f32,
    /// 0-1
    pub opacity: f32,
}

impl VisualState {
    pub const FULL: VisualState = VisualState {
        scale: 1.0,
        opacity: 1.0,
    };

    /// Starting point of the pop-in animation
    pub const SPAWNING: VisualState = VisualState {
        scale: SPAWN_SCALE,
        opacity: SPAWN_OPACITY,
    };

    /// Advance the pop-in animation by one physics step
    pub fn grow(&mut self) {
        self.scale = (self.scale + POP_IN_RATE).clamp(0.0, 1.0);
        self.opacity = (self.opacity + POP_IN_RATE).clamp(0.0, 1.0);
    }

    pub fn is_full(&self) -> bool {
        self.scale >= 1.0 && self.opacity >= 1.0
    }
}

impl Default for VisualState {
    fn default() -> Self {
        Self::FULL
    }
}

/// A bubble entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    pub id: BubbleId,
    pub color: BubbleColor,
    pub points: u32,
    pub pos: Vec2,
    /// Units per physics tick
    pub vel: Vec2,
    pub visual: VisualState,
}

impl Bubble {
    pub fn new(id: BubbleId, color: BubbleColor, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            color,
            points: color.points(),
            pos,
            vel,
            visual: VisualState::FULL,
        }
    }
}

/// Play area, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when a bubble of `radius` cannot be placed at all
    pub fn is_degenerate(&self, radius: f32) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && radius.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
            || self.width <= 2.0 * radius
            || self.height <= 2.0 * radius
    }

    /// Range of valid bubble centers on each axis `(min, max)`
    ///
    /// `max` never drops below `min`, even for degenerate bounds.
    pub fn center_range(&self, radius: f32) -> (Vec2, Vec2) {
        let min = Vec2::splat(radius);
        let max = Vec2::new(self.width - radius, self.height - radius).max(min);
        (min, max)
    }

    pub fn contains(&self, pos: Vec2, radius: f32) -> bool {
        let (min, max) = self.center_range(radius);
        pos.x >= min.x && pos.x <= max.x && pos.y >= min.y && pos.y <= max.y
    }
}

/// Per-round configuration, fixed while the round runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    pub duration_seconds: i32,
    pub max_bubbles: i32,
}

impl RoundConfig {
    pub fn new(duration_seconds: i32, max_bubbles: i32) -> Self {
        Self {
            duration_seconds,
            max_bubbles,
        }
    }

    /// Clamp to values the engine can run (at least 1 second, at least 1 bubble)
    pub fn sanitized(self) -> Self {
        Self {
            duration_seconds: self.duration_seconds.max(1),
            max_bubbles: self.max_bubbles.max(1),
        }
    }

    pub fn duration(&self) -> u32 {
        self.duration_seconds.max(1) as u32
    }

    pub fn max_bubbles(&self) -> usize {
        self.max_bubbles.max(1) as usize
    }
}

/// Something a subscriber may want to react to (sounds, animations, HUD)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RoundEvent {
    Started {
        duration_seconds: u32,
        max_bubbles: usize,
    },
    Spawned {
        id: BubbleId,
        color: BubbleColor,
    },
    Popped {
        id: BubbleId,
        color: BubbleColor,
        points: u32,
        combo: bool,
    },
    /// Clock reached zero
    Expired,
    Ended {
        score: u64,
        /// Leaderboard rank achieved (1-indexed), if the score qualified
        rank: Option<usize>,
    },
}

/// Complete round state (read-only snapshot for renderers)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundState {
    pub phase: RoundPhase,
    pub config: Option<RoundConfig>,
    pub bounds: Option<Bounds>,
    /// Game-clock ticks since the round started
    pub elapsed_ticks: u32,
    /// Physics steps since the round started
    pub physics_steps: u64,
    pub remaining_seconds: u32,
    /// Once-per-second refreshes performed
    pub refresh_count: u32,
    pub score: u64,
    pub last_popped_color: Option<BubbleColor>,
    /// Timestamp of the most recent pop
    pub last_pop_at: Option<f64>,
    /// Live bubbles in spawn order
    pub bubbles: Vec<Bubble>,
    /// Leaderboard rank earned when the round ended (1-indexed)
    pub high_score_rank: Option<usize>,
}

impl RoundState {
    /// Fraction of the round already played (0 at start, 1 at the end)
    pub fn elapsed_fraction(&self) -> f32 {
        let duration = self.config.map(|c| c.duration()).unwrap_or(1);
        (self.elapsed_ticks as f32 / duration as f32).clamp(0.0, 1.0)
    }

    pub fn bubble(&self, id: BubbleId) -> Option<&Bubble> {
        self.bubbles.iter().find(|b| b.id == id)
    }

    pub fn is_running(&self) -> bool {
        self.phase == RoundPhase::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_bounds() {
        assert!(Bounds::new(0.0, 500.0).is_degenerate(20.0));
        assert!(Bounds::new(-10.0, 500.0).is_degenerate(20.0));
        assert!(Bounds::new(40.0, 500.0).is_degenerate(20.0));
        assert!(Bounds::new(500.0, 40.0).is_degenerate(20.0));
        assert!(Bounds::new(f32::NAN, 500.0).is_degenerate(20.0));
        assert!(!Bounds::new(41.0, 41.0).is_degenerate(20.0));
    }

    #[test]
    fn test_center_range_never_inverts() {
        let (min, max) = Bounds::new(10.0, 10.0).center_range(20.0);
        assert!(max.x >= min.x && max.y >= min.y);
    }

    #[test]
    fn test_config_sanitized() {
        let config = RoundConfig::new(0, -4).sanitized();
        assert_eq!(config.duration_seconds, 1);
        assert_eq!(config.max_bubbles, 1);
        assert_eq!(RoundConfig::new(60, 15).sanitized(), RoundConfig::new(60, 15));
    }

    #[test]
    fn test_visual_pop_in() {
        let mut visual = VisualState::SPAWNING;
        assert!(!visual.is_full());
        for _ in 0..100 {
            visual.grow();
        }
        assert!(visual.is_full());
        assert!(visual.scale <= 1.0 && visual.opacity <= 1.0);
    }
}
