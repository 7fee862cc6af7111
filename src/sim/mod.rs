//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Logical ticks only, driven by the caller
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod color;
pub mod engine;
pub mod physics;
pub mod placement;
pub mod scoring;
pub mod state;

pub use color::{BubbleColor, ColorPicker, points_for_name};
pub use engine::{RoundEngine, TapOutcome};
pub use physics::{advance, advance_in_place, reflect_velocity};
pub use placement::find_position;
pub use scoring::combo_points;
pub use state::{
    Bounds, Bubble, BubbleId, RoundConfig, RoundEvent, RoundPhase, RoundState, VisualState,
};
