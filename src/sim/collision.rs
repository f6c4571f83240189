//! Collision detection and response
//!
//! Three reflecting walls, one open bottom, a steering paddle and
//! axis-aligned bricks. Headings are angles in board coordinates (y down),
//! so a vertical mirror is `-angle` and a horizontal mirror is `π - angle`.

use glam::Vec2;
use std::f32::consts::PI;

use super::state::{Brick, Paddle};
use crate::consts::{PADDLE_MAX_STEER, PADDLE_MIN_STEER};
use crate::heads_down;

/// Mirror a heading off a vertical surface (left/right wall, brick side)
#[inline]
pub fn reflect_horizontal(angle: f32) -> f32 {
    PI - angle
}

/// Mirror a heading off a horizontal surface (top wall, brick face)
#[inline]
pub fn reflect_vertical(angle: f32) -> f32 {
    -angle
}

/// Which walls a candidate position touched this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    pub left: bool,
    pub right: bool,
    pub top: bool,
}

impl WallContact {
    #[inline]
    pub fn any(&self) -> bool {
        self.left || self.right || self.top
    }
}

/// Clamp a candidate position against the left, right and top walls,
/// mirroring the heading for each wall touched.
///
/// The bottom is open: y past the bottom edge is left alone and becomes the
/// loss signal.
pub fn reflect_walls(
    pos: &mut Vec2,
    angle: &mut f32,
    radius: f32,
    board_width: f32,
) -> WallContact {
    let mut contact = WallContact::default();

    if pos.x < radius {
        pos.x = radius;
        *angle = reflect_horizontal(*angle);
        contact.left = true;
    } else if pos.x > board_width - radius {
        pos.x = board_width - radius;
        *angle = reflect_horizontal(*angle);
        contact.right = true;
    }

    if pos.y < radius {
        pos.y = radius;
        *angle = reflect_vertical(*angle);
        contact.top = true;
    }

    contact
}

/// Keep a resolved position inside the walls without touching the heading
#[inline]
pub fn clamp_inside(pos: &mut Vec2, radius: f32, board_width: f32) {
    pos.x = pos.x.clamp(radius, board_width - radius);
    pos.y = pos.y.max(radius);
}

/// Steering angle for a normalized paddle hit offset, before negation.
///
/// `h = 0` is the paddle's left edge. The result is clamped to
/// `[0.3π, 0.7π]` so a rebound never grazes along the paddle.
#[inline]
pub fn steering_angle(h: f32) -> f32 {
    let h = h.clamp(0.0, 1.0);
    let theta = PI * 0.25 + (1.0 - h) * PI * 0.5;
    theta.clamp(PI * PADDLE_MIN_STEER, PI * PADDLE_MAX_STEER)
}

/// Result of a paddle hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleHit {
    /// Ball y resting on the paddle top
    pub y: f32,
    /// New heading (always upward)
    pub angle: f32,
    /// Normalized hit offset in [0, 1]
    pub offset: f32,
}

/// Check whether the ball lands on the paddle this tick.
///
/// Fires only when moving down, when the ball's lower edge crosses the paddle
/// top between `prev` and `candidate`, and when the candidate x is within the
/// paddle span widened by the radius on both sides.
pub fn paddle_collision(
    prev: Vec2,
    candidate: Vec2,
    angle: f32,
    radius: f32,
    paddle: &Paddle,
) -> Option<PaddleHit> {
    if !heads_down(angle) {
        return None;
    }

    let crossed = prev.y + radius <= paddle.top && candidate.y + radius >= paddle.top;
    if !crossed {
        return None;
    }

    if candidate.x < paddle.x - radius || candidate.x > paddle.right() + radius {
        return None;
    }

    let offset = ((candidate.x - paddle.x) / paddle.width).clamp(0.0, 1.0);
    Some(PaddleHit {
        y: paddle.top - radius,
        angle: -steering_angle(offset),
        offset,
    })
}

/// Which brick face the ball came through, judged from its pre-tick position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickSide {
    Top,
    Bottom,
    Left,
    Right,
    /// None of the four tests matched (ball already overlapping)
    Inside,
}

/// Classify the struck face from the ball's position before the tick
pub fn brick_side(prev: Vec2, radius: f32, brick: &Brick) -> BrickSide {
    if prev.y + radius <= brick.top() {
        BrickSide::Top
    } else if prev.y - radius >= brick.bottom() {
        BrickSide::Bottom
    } else if prev.x + radius <= brick.left() {
        BrickSide::Left
    } else if prev.x - radius >= brick.right() {
        BrickSide::Right
    } else {
        BrickSide::Inside
    }
}

/// Bounce off a brick face: mirror the heading and rest the ball against the
/// struck face. The degenerate case reverses the heading and returns the ball
/// to where it started the tick.
///
/// Only the struck brick is considered. Where the gap between bricks is
/// narrower than the ball, the rested position can overlap a neighbour; the
/// next tick then starts inside that neighbour and takes the `Inside` path.
pub fn bounce_off_brick(
    side: BrickSide,
    prev: Vec2,
    pos: &mut Vec2,
    angle: &mut f32,
    radius: f32,
    brick: &Brick,
) {
    match side {
        BrickSide::Top => {
            *angle = reflect_vertical(*angle);
            pos.y = brick.top() - radius;
        }
        BrickSide::Bottom => {
            *angle = reflect_vertical(*angle);
            pos.y = brick.bottom() + radius;
        }
        BrickSide::Left => {
            *angle = reflect_horizontal(*angle);
            pos.x = brick.left() - radius;
        }
        BrickSide::Right => {
            *angle = reflect_horizontal(*angle);
            pos.x = brick.right() + radius;
        }
        BrickSide::Inside => {
            *angle += PI;
            *pos = prev;
        }
    }
}
