//! Ball integration and Δt hygiene

use glam::Vec2;

use super::state::Ball;
use crate::heading;

/// Candidate position after `dt` seconds of straight-line motion.
///
/// No collision logic; callers resolve the candidate against geometry.
#[inline]
pub fn integrate(ball: &Ball, dt: f32) -> Vec2 {
    ball.pos + heading(ball.angle) * ball.speed * dt
}

/// Make a frame delta safe to integrate.
///
/// Returns `None` for NaN, infinite or negative deltas (the tick is dropped)
/// and clamps anything above `max_dt` so a stalled frame cannot tunnel the
/// ball through geometry.
pub fn sanitize_dt(dt: f32, max_dt: f32) -> Option<f32> {
    if !dt.is_finite() || dt < 0.0 {
        return None;
    }
    Some(dt.min(max_dt))
}
