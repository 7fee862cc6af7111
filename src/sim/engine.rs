//! Round engine
//!
//! Owns the live bubbles and the round clock. Everything is driven from
//! outside: `tick` once per game-clock second, `step` at the faster physics
//! cadence, `tap` for each input event. No timers, threads or I/O besides the
//! injected leaderboard store at round end.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::color::ColorPicker;
use super::physics::{advance_in_place, confine, velocity_from_angle};
use super::placement::find_position;
use super::scoring::combo_points;
use super::state::{
    Bounds, Bubble, BubbleId, RoundConfig, RoundEvent, RoundPhase, RoundState, VisualState,
};
use crate::consts::*;
use crate::highscores::{Leaderboard, LeaderboardStore, MemoryLeaderboardStore, ScoreEntry};

/// Result of a tap event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Bubble popped for `points` (combo bonus included)
    Popped { points: u32, combo: bool },
    /// No live bubble with that id (already popped or refreshed away)
    Missed,
    /// No round in progress
    NotRunning,
}

/// Bubble field simulation and scoring for one player
pub struct RoundEngine<S: LeaderboardStore = MemoryLeaderboardStore> {
    state: RoundState,
    store: S,
    rng: Pcg32,
    seed: u64,
    picker: ColorPicker,
    radius: f32,
    player_name: String,
    clock: fn() -> f64,
    events: Vec<RoundEvent>,
    next_id: u32,
}

impl<S: LeaderboardStore> RoundEngine<S> {
    /// Create an idle engine with a seeded RNG
    pub fn new(store: S, seed: u64) -> Self {
        Self {
            state: RoundState::default(),
            store,
            rng: Pcg32::seed_from_u64(seed),
            seed,
            picker: ColorPicker::default(),
            radius: BUBBLE_RADIUS,
            player_name: String::new(),
            clock: crate::unix_millis,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Replace the color weights
    pub fn with_picker(mut self, picker: ColorPicker) -> Self {
        self.picker = picker;
        self
    }

    /// Replace the bubble radius
    ///
    /// Negative radii clamp to 0; non-finite ones keep the default.
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = if radius.is_finite() {
            radius.max(0.0)
        } else {
            log::warn!("Ignoring non-finite bubble radius {}", radius);
            BUBBLE_RADIUS
        };
        self
    }

    /// Replace the timestamp source used for leaderboard entries
    pub fn with_clock(mut self, clock: fn() -> f64) -> Self {
        self.clock = clock;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Read-only snapshot for renderers
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }

    /// Set the name recorded with this player's scores
    ///
    /// Returns false (and keeps the previous name) for a blank name.
    pub fn set_player_name(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.player_name = name.to_string();
        true
    }

    pub fn player_name(&self) -> &str {
        if self.player_name.is_empty() {
            DEFAULT_PLAYER_NAME
        } else {
            &self.player_name
        }
    }

    /// Best score currently on the leaderboard
    pub fn high_score(&self) -> Option<u64> {
        Leaderboard::load_from(&self.store).top_score()
    }

    /// Start (or restart) a round
    pub fn start_round(&mut self, config: RoundConfig, bounds: Bounds) {
        let config = config.sanitized();
        if self.state.phase == RoundPhase::Running {
            log::info!("Restarting round in progress");
        }

        self.state = RoundState {
            phase: RoundPhase::Running,
            config: Some(config),
            bounds: Some(bounds),
            remaining_seconds: config.duration(),
            ..Default::default()
        };
        self.events.push(RoundEvent::Started {
            duration_seconds: config.duration(),
            max_bubbles: config.max_bubbles(),
        });

        if bounds.is_degenerate(self.radius) {
            log::warn!(
                "Play area {}x{} too small for bubbles of radius {}",
                bounds.width,
                bounds.height,
                self.radius
            );
        }

        let initial = config.max_bubbles().min(INITIAL_BUBBLE_CAP);
        let spawned = (0..initial)
            .filter(|_| self.spawn_bubble(VisualState::FULL))
            .count();

        log::info!(
            "Round started: {}s, max {} bubbles, {} spawned",
            config.duration(),
            config.max_bubbles(),
            spawned
        );
    }

    /// Advance the game clock by one second
    ///
    /// The tick that reaches zero ends the round and leaves the field as it was.
    pub fn tick(&mut self) {
        if self.state.phase != RoundPhase::Running {
            return;
        }

        self.state.elapsed_ticks += 1;
        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);

        if self.state.remaining_seconds == 0 {
            self.events.push(RoundEvent::Expired);
            self.end_round();
            return;
        }

        self.advance_bubbles();
        self.refresh();
    }

    /// Advance bubble motion by one physics tick without touching the clock
    pub fn step(&mut self) {
        if self.state.phase != RoundPhase::Running {
            return;
        }
        self.advance_bubbles();
    }

    /// Resolve a tap on bubble `id` at time `at`
    pub fn tap(&mut self, id: BubbleId, at: f64) -> TapOutcome {
        if self.state.phase != RoundPhase::Running {
            return TapOutcome::NotRunning;
        }

        let Some(index) = self.state.bubbles.iter().position(|b| b.id == id) else {
            return TapOutcome::Missed;
        };

        let bubble = self.state.bubbles.remove(index);
        let (points, combo) = combo_points(bubble.points, self.state.last_popped_color, bubble.color);

        self.state.score += points as u64;
        self.state.last_popped_color = Some(bubble.color);
        self.state.last_pop_at = Some(at);
        self.events.push(RoundEvent::Popped {
            id,
            color: bubble.color,
            points,
            combo,
        });

        // Best effort: a crowded field stays one short until the next refresh
        self.spawn_bubble(VisualState::SPAWNING);

        TapOutcome::Popped { points, combo }
    }

    /// End the round and record the score if it makes the leaderboard
    ///
    /// Does nothing unless a round is running.
    pub fn end_round(&mut self) {
        if self.state.phase != RoundPhase::Running {
            return;
        }
        self.state.phase = RoundPhase::Ended;

        let score = self.state.score;
        let rank = match self.store.load() {
            Ok(entries) => self.record_score(Leaderboard::from_entries(entries), score),
            Err(err) => {
                // Saving over an unreadable leaderboard would wipe it
                log::warn!("Could not load high scores, score not recorded: {}", err);
                None
            }
        };

        self.state.high_score_rank = rank;
        self.events.push(RoundEvent::Ended { score, rank });

        match rank {
            Some(rank) => log::info!("Round over: score {} (new high score, rank {})", score, rank),
            None => log::info!("Round over: score {}", score),
        }
    }

    /// Update the play area (e.g. window resized), pulling bubbles inside
    pub fn set_bounds(&mut self, bounds: Bounds) {
        if self.state.phase != RoundPhase::Running {
            return;
        }
        self.state.bounds = Some(bounds);
        for bubble in &mut self.state.bubbles {
            confine(bubble, bounds, self.radius);
        }
    }

    /// Add the score to `board` and save it if it qualifies
    fn record_score(&mut self, mut board: Leaderboard, score: u64) -> Option<usize> {
        if !board.qualifies(score) {
            return None;
        }
        let entry = ScoreEntry::new(self.player_name(), score, (self.clock)());
        let rank = board.add(entry);
        if let Err(err) = self.store.save(board.entries()) {
            log::warn!("Failed to save high scores: {}", err);
        }
        rank
    }

    /// Allocate a new bubble ID
    fn next_bubble_id(&mut self) -> BubbleId {
        let id = self.next_id;
        self.next_id += 1;
        BubbleId(id)
    }

    fn advance_bubbles(&mut self) {
        let Some(bounds) = self.state.bounds else {
            return;
        };
        for bubble in &mut self.state.bubbles {
            advance_in_place(bubble, bounds, self.radius, 1.0);
            if !bubble.visual.is_full() {
                bubble.visual.grow();
            }
        }
        self.state.physics_steps += 1;
    }

    /// Drop a random number of bubbles from the end, then top the field back up
    fn refresh(&mut self) {
        let len = self.state.bubbles.len();
        let remove = self.rng.random_range(0..=len / 2);
        self.state.bubbles.truncate(len - remove);

        let max = self.max_bubbles();
        let wanted = max
            .saturating_sub(self.state.bubbles.len())
            .min(REFRESH_SPAWN_CAP);
        let spawned = (0..wanted)
            .filter(|_| self.spawn_bubble(VisualState::FULL))
            .count();

        self.state.refresh_count += 1;
        log::debug!(
            "Refresh: removed {}, spawned {}/{}, live {}",
            remove,
            spawned,
            wanted,
            self.state.bubbles.len()
        );
    }

    /// Try to add one bubble; false if the field is full or no spot was found
    fn spawn_bubble(&mut self, visual: VisualState) -> bool {
        let Some(bounds) = self.state.bounds else {
            return false;
        };
        if self.state.bubbles.len() >= self.max_bubbles() {
            return false;
        }

        let color = self.picker.pick(&mut self.rng);
        let Some(pos) = find_position(&self.state.bubbles, bounds, self.radius, &mut self.rng)
        else {
            log::debug!("No room for a new bubble ({} live)", self.state.bubbles.len());
            return false;
        };

        // Later spawns move faster
        let speed = 1.0 + self.state.elapsed_fraction();
        let angle = self.rng.random_range(0.0..std::f32::consts::TAU);

        let id = self.next_bubble_id();
        let mut bubble = Bubble::new(id, color, pos, velocity_from_angle(speed, angle));
        bubble.visual = visual;
        self.state.bubbles.push(bubble);
        self.events.push(RoundEvent::Spawned { id, color });
        true
    }

    fn max_bubbles(&self) -> usize {
        self.state.config.map(|c| c.max_bubbles()).unwrap_or(0)
    }
}
