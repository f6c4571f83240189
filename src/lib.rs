//! Signbreak - sign-matching breakout engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, round state)
//! - `tuning`: Data-driven board geometry and difficulty balance
//! - `error`: Engine error type
//! - `web`: wasm-bindgen surface for a JavaScript shell (wasm32 only)

pub mod error;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::EngineError;
pub use sim::{Engine, RoundEvent, RoundSnapshot, RoundStatus};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    use std::f32::consts::PI;

    /// Board dimensions (board-local units, y grows downward)
    pub const BOARD_WIDTH: f32 = 800.0;
    pub const BOARD_HEIGHT: f32 = 600.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_BASE_SPEED: f32 = 240.0;
    /// Heading at serve: up and to the right
    pub const LAUNCH_ANGLE: f32 = -PI / 3.0;

    /// Paddle defaults - sits on the bottom of the board
    pub const PADDLE_WIDTH: f32 = 110.0;
    pub const PADDLE_HEIGHT: f32 = 14.0;
    pub const PADDLE_BOTTOM_MARGIN: f32 = 24.0;

    /// Rebound steering limits (fractions of π, before negation)
    pub const PADDLE_MIN_STEER: f32 = 0.3;
    pub const PADDLE_MAX_STEER: f32 = 0.7;

    /// Brick grid layout
    pub const BRICK_HEIGHT: f32 = 24.0;
    pub const BRICK_GAP: f32 = 6.0;
    pub const BRICK_SIDE_MARGIN: f32 = 40.0;
    pub const BRICK_TOP_OFFSET: f32 = 60.0;

    /// Number of signs eligible to be the target in one round
    pub const SIGN_POOL_SIZE: usize = 3;

    /// Target advances to the next sign every this many seconds
    pub const TARGET_PERIOD: f32 = 5.0;

    /// Speed multiplier steps up by `DIFFICULTY_INCREMENT` every `DIFFICULTY_PERIOD` seconds
    pub const DIFFICULTY_PERIOD: f32 = 15.0;
    pub const DIFFICULTY_INCREMENT: f32 = 0.1;

    /// Largest Δt integrated in one tick (stalled frames are clamped to this)
    pub const MAX_DT: f32 = 1.0 / 30.0;

    /// Seconds between a win/loss and the round-end callback
    pub const ROUND_END_DELAY: f32 = 1.5;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit heading vector for an angle (board coordinates, y down)
#[inline]
pub fn heading(angle: f32) -> glam::Vec2 {
    glam::Vec2::new(angle.cos(), angle.sin())
}

/// Does a heading point toward the bottom of the board
#[inline]
pub fn heads_down(angle: f32) -> bool {
    angle.sin() > 0.0
}
