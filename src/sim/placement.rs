//! Non-overlapping bubble placement
//!
//! Rejection sampling with a fixed attempt budget. A crowded field makes
//! placement fail rather than loop; callers skip the spawn and try again on
//! the next refresh.

use glam::Vec2;
use rand::Rng;

use super::state::{Bounds, Bubble};
use crate::consts::PLACEMENT_ATTEMPTS;

/// Find a center for a new bubble that keeps `2 * radius` from every existing one
pub fn find_position<R: Rng>(
    existing: &[Bubble],
    bounds: Bounds,
    radius: f32,
    rng: &mut R,
) -> Option<Vec2> {
    find_position_with_attempts(existing, bounds, radius, PLACEMENT_ATTEMPTS, rng)
}

/// `find_position` with an explicit attempt budget
pub fn find_position_with_attempts<R: Rng>(
    existing: &[Bubble],
    bounds: Bounds,
    radius: f32,
    attempts: u32,
    rng: &mut R,
) -> Option<Vec2> {
    if bounds.is_degenerate(radius) {
        return None;
    }

    let (min, max) = bounds.center_range(radius);
    let min_dist_sq = (2.0 * radius) * (2.0 * radius);

    for _ in 0..attempts {
        let candidate = Vec2::new(
            rng.random_range(min.x..=max.x),
            rng.random_range(min.y..=max.y),
        );
        if is_clear(existing, candidate, min_dist_sq) {
            return Some(candidate);
        }
    }

    None
}

fn is_clear(existing: &[Bubble], candidate: Vec2, min_dist_sq: f32) -> bool {
    existing
        .iter()
        .all(|b| b.pos.distance_squared(candidate) >= min_dist_sq)
}
