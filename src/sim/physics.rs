//! Per-tick bubble motion
//!
//! Axis-aligned elastic bounce: each axis is reflected independently, then
//! the position is clamped. Reflection alone is not enough to keep a fast
//! bubble inside, since a single step can carry it past the wall.

use glam::Vec2;

use super::state::{Bounds, Bubble};

/// Advance a bubble by `dt` physics ticks and return the moved copy
pub fn advance(bubble: &Bubble, bounds: Bounds, radius: f32, dt: f32) -> Bubble {
    let mut next = bubble.clone();
    advance_in_place(&mut next, bounds, radius, dt);
    next
}

/// Move, reflect off walls, then clamp into bounds
pub fn advance_in_place(bubble: &mut Bubble, bounds: Bounds, radius: f32, dt: f32) {
    let (min, max) = bounds.center_range(radius);

    bubble.pos += bubble.vel * dt;

    if bubble.pos.x < min.x || bubble.pos.x > max.x {
        bubble.vel = reflect_velocity(bubble.vel, Vec2::X);
    }
    if bubble.pos.y < min.y || bubble.pos.y > max.y {
        bubble.vel = reflect_velocity(bubble.vel, Vec2::Y);
    }

    bubble.pos = clamp_finite(bubble.pos, min, max);
}

/// Pull a bubble back into bounds without moving it (e.g. after a resize)
pub fn confine(bubble: &mut Bubble, bounds: Bounds, radius: f32) {
    let (min, max) = bounds.center_range(radius);
    bubble.pos = clamp_finite(bubble.pos, min, max);
}

/// Reflect velocity off a surface: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Velocity for a bubble moving at `speed` units per tick along `angle`
#[inline]
pub fn velocity_from_angle(speed: f32, angle: f32) -> Vec2 {
    Vec2::new(angle.cos() * speed, angle.sin() * speed)
}

/// Clamp that also pulls NaN coordinates back onto the lower bound
fn clamp_finite(pos: Vec2, min: Vec2, max: Vec2) -> Vec2 {
    let x = if pos.x.is_nan() { min.x } else { pos.x.clamp(min.x, max.x) };
    let y = if pos.y.is_nan() { min.y } else { pos.y.clamp(min.y, max.y) };
    Vec2::new(x, y)
}
