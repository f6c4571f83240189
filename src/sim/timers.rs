//! Wall-clock driven round timers
//!
//! Target rotation and difficulty are pure functions of elapsed round time,
//! recomputed on every tick rather than accumulated, so frame-rate variance
//! never skews their cadence and a replay with the same deltas lands on the
//! same values.

/// Pool slot of the target after `elapsed` seconds.
///
/// Starts at slot 0 and advances one slot per `period`, wrapping around.
#[inline]
pub fn target_slot(elapsed: f32, period: f32, pool_len: usize) -> usize {
    if pool_len == 0 {
        return 0;
    }
    let steps = (elapsed.max(0.0) / period).floor() as usize;
    steps % pool_len
}

/// Speed multiplier after `elapsed` seconds: `1 + floor(elapsed / period) * increment`
#[inline]
pub fn speed_multiplier(elapsed: f32, period: f32, increment: f32) -> f32 {
    let steps = (elapsed.max(0.0) / period).floor();
    1.0 + steps * increment
}

/// Ball speed after `elapsed` seconds
#[inline]
pub fn ball_speed(base_speed: f32, elapsed: f32, period: f32, increment: f32) -> f32 {
    base_speed * speed_multiplier(elapsed, period, increment)
}
