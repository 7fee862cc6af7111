//! Bubble Pop headless runner
//!
//! Plays one round with a simple auto-player, driving the engine the way a
//! frontend would: physics steps at 60 Hz, a clock tick every second, taps
//! in between. Usage: `bubble-pop [seed] [player-name]`

use std::path::Path;

use bubble_pop::consts::PHYSICS_STEPS_PER_SECOND;
use bubble_pop::highscores::format_relative;
use bubble_pop::sim::{Bounds, BubbleId, RoundEngine, RoundEvent, RoundPhase, TapOutcome};
use bubble_pop::{FileLeaderboardStore, GameSettings, Leaderboard, unix_millis};

/// Physics steps between auto-player taps (~0.4 s reaction time)
const TAP_INTERVAL_STEPS: u32 = 24;

/// Portrait phone-sized play area
const PLAY_AREA: Bounds = Bounds {
    width: 390.0,
    height: 600.0,
};

/// Game instance holding the engine and the driver's clock
struct Game {
    engine: RoundEngine<FileLeaderboardStore>,
    /// Simulated milliseconds since the round started
    now_ms: f64,
    steps_since_tap: u32,
    combos: u32,
}

impl Game {
    fn new(seed: u64, name: &str) -> Self {
        let mut engine = RoundEngine::new(FileLeaderboardStore::default(), seed);
        if !engine.set_player_name(name) {
            log::warn!("Blank player name, recording as {}", engine.player_name());
        }
        Self {
            engine,
            now_ms: 0.0,
            steps_since_tap: 0,
            combos: 0,
        }
    }

    /// Pick a bubble: same color as the last pop if possible, else the most valuable
    fn choose_target(&self) -> Option<BubbleId> {
        let state = self.engine.state();
        let last = state.last_popped_color;
        state
            .bubbles
            .iter()
            .max_by_key(|b| (Some(b.color) == last, b.points))
            .map(|b| b.id)
    }

    /// One simulated second: physics substeps with taps, then the clock tick
    fn run_second(&mut self) {
        let step_ms = 1000.0 / PHYSICS_STEPS_PER_SECOND as f64;
        for _ in 0..PHYSICS_STEPS_PER_SECOND {
            self.engine.step();
            self.now_ms += step_ms;
            self.steps_since_tap += 1;

            if self.steps_since_tap >= TAP_INTERVAL_STEPS {
                self.steps_since_tap = 0;
                if let Some(id) = self.choose_target() {
                    if let TapOutcome::Popped { combo: true, .. } = self.engine.tap(id, self.now_ms) {
                        self.combos += 1;
                    }
                }
            }
        }
        self.engine.tick();
    }

    fn report_events(&mut self) {
        for event in self.engine.drain_events() {
            match event {
                RoundEvent::Started {
                    duration_seconds,
                    max_bubbles,
                } => println!("Round started: {}s, up to {} bubbles", duration_seconds, max_bubbles),
                RoundEvent::Expired => println!("Time's up!"),
                RoundEvent::Ended { score, rank } => {
                    println!("Game Over! Your final score: {}", score);
                    if let Some(rank) = rank {
                        println!("New High Score! Rank #{}", rank);
                    }
                }
                _ => {}
            }
        }
    }
}

fn print_leaderboard(store: &FileLeaderboardStore) {
    let board = Leaderboard::load_from(store);
    println!("\nHigh Scores");
    if board.is_empty() {
        println!("  (none yet)");
        return;
    }
    let now = unix_millis();
    for (i, entry) in board.entries().iter().enumerate() {
        println!(
            "  {:>2}. {:<16} {:>6}  {}",
            i + 1,
            entry.player_name,
            entry.score,
            format_relative(entry.timestamp, now)
        );
    }
}

fn main() {
    env_logger::init();
    log::info!("Bubble Pop (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| unix_millis() as u64);
    let name = args.next().unwrap_or_default();

    let settings_path = Path::new(GameSettings::DEFAULT_FILE);
    let settings = GameSettings::load(settings_path);
    if !settings_path.exists() {
        if let Err(err) = settings.save(settings_path) {
            log::warn!("Could not write default settings: {}", err);
        }
    }

    let mut game = Game::new(seed, &name);
    println!("Welcome to Bubble Pop, {}! (seed {})", game.engine.player_name(), seed);
    if let Some(best) = game.engine.high_score() {
        println!("High Score: {}", best);
    }

    game.engine.start_round(settings.round_config(), PLAY_AREA);
    game.report_events();

    while game.engine.state().phase == RoundPhase::Running {
        game.run_second();
        game.report_events();
    }

    log::info!("Combo pops: {}", game.combos);
    print_leaderboard(game.engine.store());
}
