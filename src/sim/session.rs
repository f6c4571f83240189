//! Round evaluation: win/loss detection and completion percentage

use super::state::{RoundState, RoundStatus};
use crate::tuning::Tuning;

/// `round(destroyed / total * 100)`, 0 for an empty grid
pub fn completion_percentage(destroyed: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (destroyed.min(total) as f64 / total as f64 * 100.0).round();
    pct as u8
}

/// Check terminal conditions after a tick's collisions are resolved.
///
/// Returns the new status if the round just ended. Win is checked first;
/// loss needs the ball fully past the bottom edge (`y > board_height + r`),
/// not merely touching it.
pub fn evaluate(state: &mut RoundState, tuning: &Tuning) -> Option<RoundStatus> {
    if state.status.is_terminal() {
        return None;
    }

    let status = if state.destroyed >= state.total {
        RoundStatus::Won
    } else if state.ball.pos.y > tuning.board_height + state.ball.radius {
        RoundStatus::Lost
    } else {
        return None;
    };

    state.status = status;
    state.since_terminal = 0.0;
    Some(status)
}

/// Advance the display delay after a terminal transition.
///
/// Returns the percentage exactly once, on the call that crosses
/// `round_end_delay`.
pub fn tick_end_delay(state: &mut RoundState, tuning: &Tuning, dt: f32) -> Option<u8> {
    if state.is_playing() || state.end_reported {
        return None;
    }
    state.since_terminal += dt;
    if state.since_terminal < tuning.round_end_delay {
        return None;
    }
    state.end_reported = true;
    Some(completion_percentage(state.destroyed, state.total))
}
