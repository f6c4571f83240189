//! Round state and core simulation types
//!
//! Everything a round mutates lives in [`RoundState`], owned by the engine.

use glam::Vec2;
use rand::Rng;
use rand::seq::index;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::SIGN_POOL_SIZE;
use crate::error::EngineError;
use crate::tuning::Tuning;

/// Round status; anything but `Playing` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStatus {
    /// Ball in motion, bricks and timers live
    Playing,
    /// Ball left through the bottom of the board
    Lost,
    /// Every brick destroyed
    Won,
}

impl RoundStatus {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RoundStatus::Playing)
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Center, board-local (y grows downward)
    pub pos: Vec2,
    /// Heading (radians); `sin > 0` means moving down
    pub angle: f32,
    /// Units per second
    pub speed: f32,
    pub radius: f32,
}

impl Ball {
    /// Serve position: resting on the paddle center, heading up
    pub fn serve(paddle: &Paddle, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(
                paddle.center_x(),
                paddle.top - tuning.ball_radius - 1.0,
            ),
            angle: tuning.launch_angle,
            speed: tuning.ball_base_speed,
            radius: tuning.ball_radius,
        }
    }

    #[inline]
    pub fn moving_down(&self) -> bool {
        crate::heads_down(self.angle)
    }
}

/// The player's paddle; x is owned by the input side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge (fixed)
    pub top: f32,
    pub width: f32,
    pub height: f32,
    /// Rightmost legal left edge (`board_width - width`)
    max_x: f32,
}

impl Paddle {
    /// Paddle centered on the bottom of the board
    pub fn centered(tuning: &Tuning) -> Self {
        let max_x = tuning.board_width - tuning.paddle_width;
        Self {
            x: max_x / 2.0,
            top: tuning.paddle_top(),
            width: tuning.paddle_width,
            height: tuning.paddle_height,
            max_x,
        }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Move the left edge to `x`, clamped to the board. Non-finite input is ignored.
    pub fn set_position(&mut self, x: f32) {
        if x.is_finite() {
            self.x = x.clamp(0.0, self.max_x);
        }
    }

    /// Shift the paddle by `dx`, clamped to the board
    pub fn nudge(&mut self, dx: f32) {
        self.set_position(self.x + dx);
    }
}

/// A brick. Geometry is fixed at layout; only `active` ever changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub active: bool,
    /// Slot in the round's [`SignPool`]
    pub sign: usize,
}

impl Brick {
    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Does a circle at `center` with `radius` overlap this brick's rectangle
    /// inflated by that radius
    #[inline]
    pub fn overlaps(&self, center: Vec2, radius: f32) -> bool {
        center.x + radius > self.left()
            && center.x - radius < self.right()
            && center.y + radius > self.top()
            && center.y - radius < self.bottom()
    }
}

/// The three signs eligible to be the target this round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignPool {
    signs: Vec<String>,
}

impl SignPool {
    /// Pick the round's pool from the content provider's signs.
    ///
    /// Exactly three signs are kept in the order given. A longer list is
    /// sampled with `rng`, preserving relative order.
    pub fn select(available: &[String], rng: &mut Pcg32) -> Result<Self, EngineError> {
        if available.len() < SIGN_POOL_SIZE {
            return Err(EngineError::NotEnoughSigns {
                required: SIGN_POOL_SIZE,
                got: available.len(),
            });
        }
        for (i, sign) in available.iter().enumerate() {
            if sign.trim().is_empty() {
                return Err(EngineError::EmptySign);
            }
            if available[..i].contains(sign) {
                return Err(EngineError::DuplicateSign(sign.clone()));
            }
        }

        let signs = if available.len() == SIGN_POOL_SIZE {
            available.to_vec()
        } else {
            let mut picked = index::sample(rng, available.len(), SIGN_POOL_SIZE).into_vec();
            picked.sort_unstable();
            picked.into_iter().map(|i| available[i].clone()).collect()
        };

        Ok(Self { signs })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.signs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.signs.is_empty()
    }

    /// Sign at a pool slot
    pub fn get(&self, slot: usize) -> Option<&str> {
        self.signs.get(slot).map(String::as_str)
    }

    pub fn signs(&self) -> &[String] {
        &self.signs
    }

    /// Random slot for a new brick
    pub fn random_slot(&self, rng: &mut Pcg32) -> usize {
        rng.random_range(0..self.signs.len())
    }
}

/// Something the renderer or shell may want to react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RoundEvent {
    /// Target advanced to a new pool slot
    TargetChanged { sign: String },
    /// Ball bounced off a wall
    WallBounce,
    /// Ball bounced off the paddle at normalized offset `h`
    PaddleBounce { offset: f32 },
    /// Ball bounced off a brick that does not match the target
    BrickBlocked { brick_id: u32 },
    /// Ball destroyed a brick
    BrickDestroyed { brick_id: u32, sign: String },
    /// Round became terminal
    RoundOver { status: RoundStatus, percentage: u8 },
    /// Display delay elapsed; the round-end callback has fired
    RoundEnded { percentage: u8 },
}

/// Complete state of one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    pub ball: Ball,
    pub paddle: Paddle,
    /// Storage order is the collision tie-break order
    pub bricks: Vec<Brick>,
    pub pool: SignPool,
    /// Pool slot of the current target
    pub target: usize,
    pub destroyed: u32,
    pub total: u32,
    /// Seconds of play (frozen once terminal)
    pub elapsed: f32,
    pub status: RoundStatus,
    /// Seconds since the terminal transition
    pub since_terminal: f32,
    /// Round-end callback already fired
    pub end_reported: bool,
}

impl RoundState {
    /// Fresh round: all bricks active, ball served from a centered paddle
    pub fn new(pool: SignPool, bricks: Vec<Brick>, tuning: &Tuning) -> Self {
        let paddle = Paddle::centered(tuning);
        let ball = Ball::serve(&paddle, tuning);
        let total = bricks.len() as u32;
        Self {
            ball,
            paddle,
            bricks,
            pool,
            target: 0,
            destroyed: 0,
            total,
            elapsed: 0.0,
            status: RoundStatus::Playing,
            since_terminal: 0.0,
            end_reported: false,
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Current target sign
    pub fn target_sign(&self) -> &str {
        self.pool.get(self.target).unwrap_or_default()
    }

    /// Sign for a brick
    pub fn brick_sign(&self, brick: &Brick) -> &str {
        self.pool.get(brick.sign).unwrap_or_default()
    }

    /// Bricks still standing, in storage order
    pub fn active_bricks(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter().filter(|b| b.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn signs(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pool_keeps_three_in_order() {
        let mut rng = Pcg32::seed_from_u64(1);
        let pool = SignPool::select(&signs(&["A", "B", "C"]), &mut rng).expect("valid pool");
        assert_eq!(pool.signs(), &signs(&["A", "B", "C"])[..]);
    }

    #[test]
    fn test_pool_samples_three_from_more() {
        let available = signs(&["stop", "yield", "merge", "school", "exit"]);
        let mut rng = Pcg32::seed_from_u64(42);
        let pool = SignPool::select(&available, &mut rng).expect("valid pool");
        assert_eq!(pool.len(), 3);

        // Subsequence of the input, so relative order holds
        let positions: Vec<usize> = pool
            .signs()
            .iter()
            .map(|s| available.iter().position(|a| a == s).expect("from input"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        // Same seed, same pool
        let mut rng = Pcg32::seed_from_u64(42);
        assert_eq!(SignPool::select(&available, &mut rng).expect("valid"), pool);
    }

    #[test]
    fn test_pool_rejects_bad_content() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(
            SignPool::select(&signs(&["A", "B"]), &mut rng),
            Err(EngineError::NotEnoughSigns { required: 3, got: 2 })
        );
        assert_eq!(
            SignPool::select(&signs(&["A", "B", "A"]), &mut rng),
            Err(EngineError::DuplicateSign("A".to_string()))
        );
        assert_eq!(
            SignPool::select(&signs(&["A", " ", "C"]), &mut rng),
            Err(EngineError::EmptySign)
        );
    }

    #[test]
    fn test_paddle_clamps_to_board() {
        let tuning = Tuning::default();
        let mut paddle = Paddle::centered(&tuning);

        paddle.set_position(-50.0);
        assert_eq!(paddle.x, 0.0);

        paddle.set_position(tuning.board_width);
        assert_eq!(paddle.x, tuning.board_width - tuning.paddle_width);

        paddle.nudge(-10.0);
        assert_eq!(paddle.x, tuning.board_width - tuning.paddle_width - 10.0);

        paddle.set_position(f32::NAN);
        assert_eq!(paddle.x, tuning.board_width - tuning.paddle_width - 10.0);
    }

    #[test]
    fn test_brick_overlap_inflated_by_radius() {
        let brick = Brick {
            id: 1,
            pos: Vec2::new(100.0, 50.0),
            size: Vec2::new(60.0, 20.0),
            active: true,
            sign: 0,
        };
        assert!(brick.overlaps(Vec2::new(95.0, 60.0), 8.0));
        assert!(!brick.overlaps(Vec2::new(90.0, 60.0), 8.0));
        assert!(brick.overlaps(Vec2::new(130.0, 75.0), 8.0));
        assert!(!brick.overlaps(Vec2::new(130.0, 80.0), 8.0));
    }

    #[test]
    fn test_status_terminal_drives_playing() {
        assert!(!RoundStatus::Playing.is_terminal());
        assert!(RoundStatus::Lost.is_terminal());
        assert!(RoundStatus::Won.is_terminal());

        let tuning = Tuning::default();
        let pool = SignPool::select(&signs(&["A", "B", "C"]), &mut Pcg32::seed_from_u64(1))
            .expect("valid pool");
        let mut state = RoundState::new(pool, Vec::new(), &tuning);
        assert!(state.is_playing());
        state.status = RoundStatus::Won;
        assert!(!state.is_playing());
    }

    #[test]
    fn test_serve_sits_above_paddle() {
        let tuning = Tuning::default();
        let paddle = Paddle::centered(&tuning);
        let ball = Ball::serve(&paddle, &tuning);
        assert!(ball.pos.y + ball.radius < paddle.top);
        assert!(!ball.moving_down());

        let falling = Ball {
            angle: std::f32::consts::FRAC_PI_2,
            ..ball
        };
        assert!(falling.moving_down());
    }
}
