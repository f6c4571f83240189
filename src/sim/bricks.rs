//! Brick grid: layout at round start, contact resolution each tick

use glam::Vec2;
use rand_pcg::Pcg32;

use super::collision::{bounce_off_brick, brick_side};
use super::state::{Brick, RoundState, SignPool};
use crate::error::EngineError;
use crate::tuning::Tuning;

/// Lay out a `rows` x `cols` grid of active bricks, each assigned a random
/// slot of `pool`.
///
/// Bricks are stored row-major from the top-left; that order is the
/// collision tie-break order for the whole round.
pub fn layout_grid(
    tuning: &Tuning,
    rows: usize,
    cols: usize,
    pool: &SignPool,
    rng: &mut Pcg32,
) -> Result<Vec<Brick>, EngineError> {
    if rows == 0 || cols == 0 {
        return Err(EngineError::InvalidGrid { rows, cols });
    }

    let usable = tuning.board_width - 2.0 * tuning.brick_side_margin;
    let width = (usable - (cols - 1) as f32 * tuning.brick_gap) / cols as f32;
    if width < tuning.ball_radius {
        return Err(EngineError::GridDoesNotFit(format!(
            "{cols} columns leave bricks {width:.1} wide"
        )));
    }

    let grid_bottom = tuning.brick_top_offset
        + rows as f32 * tuning.brick_height
        + (rows - 1) as f32 * tuning.brick_gap;
    // Leave at least two ball diameters of open play above the paddle
    let limit = tuning.paddle_top() - 4.0 * tuning.ball_radius;
    if grid_bottom > limit {
        return Err(EngineError::GridDoesNotFit(format!(
            "{rows} rows reach y={grid_bottom:.1}, limit is {limit:.1}"
        )));
    }

    let mut bricks = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            let pos = Vec2::new(
                tuning.brick_side_margin + col as f32 * (width + tuning.brick_gap),
                tuning.brick_top_offset + row as f32 * (tuning.brick_height + tuning.brick_gap),
            );
            bricks.push(Brick {
                id: (bricks.len() + 1) as u32,
                pos,
                size: Vec2::new(width, tuning.brick_height),
                active: true,
                sign: pool.random_slot(rng),
            });
        }
    }

    log::debug!(
        "Laid out {} bricks ({}x{}), each {:.1}x{:.1}",
        bricks.len(),
        rows,
        cols,
        width,
        tuning.brick_height
    );
    Ok(bricks)
}

/// Outcome of a ball/brick contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickContact {
    /// Index into the round's brick storage
    pub index: usize,
    pub brick_id: u32,
    /// The brick matched the target and is now destroyed
    pub destroyed: bool,
}

/// Resolve at most one brick contact for this tick.
///
/// The first active brick in storage order that overlaps the candidate wins;
/// no other brick is examined, even if it overlaps too. The face is judged
/// from `prev`. A matching sign destroys the brick and bumps the round's
/// destroyed count; any other sign just bounces the ball.
pub fn resolve_contact(
    state: &mut RoundState,
    prev: Vec2,
    pos: &mut Vec2,
    angle: &mut f32,
) -> Option<BrickContact> {
    let radius = state.ball.radius;
    let index = state
        .bricks
        .iter()
        .position(|b| b.active && b.overlaps(*pos, radius))?;

    let target = state.target;
    let brick = &mut state.bricks[index];
    let side = brick_side(prev, radius, brick);
    bounce_off_brick(side, prev, pos, angle, radius, brick);

    let destroyed = brick.sign == target;
    if destroyed {
        brick.active = false;
        state.destroyed += 1;
    }

    Some(BrickContact {
        index,
        brick_id: brick.id,
        destroyed,
    })
}
