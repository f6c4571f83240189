//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Timers derived from elapsed time only
//! - Seeded RNG only
//! - Stable iteration order (brick storage order)
//! - No rendering or platform dependencies

pub mod bricks;
pub mod collision;
pub mod engine;
pub mod input;
pub mod motion;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod timers;

pub use bricks::{BrickContact, layout_grid, resolve_contact};
pub use collision::{
    BrickSide, PaddleHit, WallContact, paddle_collision, reflect_horizontal, reflect_vertical,
    reflect_walls, steering_angle,
};
pub use engine::Engine;
pub use input::{InputQueue, PaddleCommand, PaddleSender};
pub use motion::{integrate, sanitize_dt};
pub use session::completion_percentage;
pub use snapshot::{BallView, BrickView, PaddleView, RoundSnapshot};
pub use state::{Ball, Brick, Paddle, RoundEvent, RoundState, RoundStatus, SignPool};
pub use tick::tick;
pub use timers::{ball_speed, speed_multiplier, target_slot};
