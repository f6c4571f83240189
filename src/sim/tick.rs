//! One simulation tick
//!
//! Order of resolution each tick:
//! 1. timers (target slot, ball speed) from the new elapsed time
//! 2. integrate a candidate position
//! 3. walls, then paddle, then at most one brick
//! 4. win/loss evaluation

use super::bricks::resolve_contact;
use super::collision::{clamp_inside, paddle_collision, reflect_walls};
use super::motion::integrate;
use super::session::{completion_percentage, evaluate};
use super::state::{RoundEvent, RoundState};
use super::timers::{ball_speed, target_slot};
use crate::normalize_angle;
use crate::tuning::Tuning;

/// Advance a playing round by `dt` seconds (already sanitized).
///
/// Terminal rounds are left untouched.
pub fn tick(state: &mut RoundState, tuning: &Tuning, dt: f32, events: &mut Vec<RoundEvent>) {
    if !state.is_playing() {
        return;
    }

    state.elapsed += dt;

    // --- TIMERS ---
    let slot = target_slot(state.elapsed, tuning.target_period, state.pool.len());
    if slot != state.target {
        state.target = slot;
        let sign = state.target_sign().to_string();
        log::debug!("Target -> {} at t={:.2}s", sign, state.elapsed);
        events.push(RoundEvent::TargetChanged { sign });
    }
    state.ball.speed = ball_speed(
        tuning.ball_base_speed,
        state.elapsed,
        tuning.difficulty_period,
        tuning.difficulty_increment,
    );

    // --- MOTION ---
    let prev = state.ball.pos;
    let radius = state.ball.radius;
    let mut pos = integrate(&state.ball, dt);
    let mut angle = state.ball.angle;

    // --- WALLS ---
    if reflect_walls(&mut pos, &mut angle, radius, tuning.board_width).any() {
        events.push(RoundEvent::WallBounce);
    }

    // --- PADDLE ---
    if let Some(hit) = paddle_collision(prev, pos, angle, radius, &state.paddle) {
        pos.y = hit.y;
        angle = hit.angle;
        events.push(RoundEvent::PaddleBounce { offset: hit.offset });
    }

    // --- BRICKS ---
    if let Some(contact) = resolve_contact(state, prev, &mut pos, &mut angle) {
        if contact.destroyed {
            let sign = state.brick_sign(&state.bricks[contact.index]).to_string();
            log::debug!(
                "Brick {} ({}) destroyed, {}/{}",
                contact.brick_id,
                sign,
                state.destroyed,
                state.total
            );
            events.push(RoundEvent::BrickDestroyed {
                brick_id: contact.brick_id,
                sign,
            });
        } else {
            events.push(RoundEvent::BrickBlocked {
                brick_id: contact.brick_id,
            });
        }
        // Resting against a face near a wall must not push the ball outside
        clamp_inside(&mut pos, radius, tuning.board_width);
    }

    state.ball.pos = pos;
    state.ball.angle = normalize_angle(angle);

    // --- SESSION ---
    if let Some(status) = evaluate(state, tuning) {
        let percentage = completion_percentage(state.destroyed, state.total);
        log::info!(
            "Round over: {:?} at t={:.2}s, {}/{} bricks ({}%)",
            status,
            state.elapsed,
            state.destroyed,
            state.total,
            percentage
        );
        events.push(RoundEvent::RoundOver { status, percentage });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::bricks::layout_grid;
    use crate::sim::state::{RoundStatus, SignPool};
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::f32::consts::{FRAC_PI_2, PI};

    const DT: f32 = 1.0 / 60.0;

    fn round(rows: usize, cols: usize, seed: u64) -> (RoundState, Tuning) {
        let tuning = Tuning::default();
        let signs: Vec<String> = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
        let mut rng = Pcg32::seed_from_u64(seed);
        let pool = SignPool::select(&signs, &mut rng).expect("valid pool");
        let bricks = layout_grid(&tuning, rows, cols, &pool, &mut rng).expect("fits");
        (RoundState::new(pool, bricks, &tuning), tuning)
    }

    fn angle_close(a: f32, b: f32) -> bool {
        normalize_angle(a - b).abs() < 1e-4
    }

    #[test]
    fn test_right_wall_scenario() {
        let (mut state, tuning) = round(1, 3, 1);
        let r = state.ball.radius;
        state.ball.pos = Vec2::new(tuning.board_width - r + 1.0, 300.0);
        state.ball.angle = 0.0;

        let mut events = Vec::new();
        tick(&mut state, &tuning, DT, &mut events);

        assert_eq!(state.ball.pos.x, tuning.board_width - r);
        assert!(angle_close(state.ball.angle, PI));
        assert!(events.contains(&RoundEvent::WallBounce));
    }

    #[test]
    fn test_paddle_catch_sends_ball_up() {
        let (mut state, tuning) = round(1, 3, 2);
        let r = state.ball.radius;
        state.ball.pos = Vec2::new(state.paddle.center_x(), state.paddle.top - r - 1.0);
        state.ball.angle = FRAC_PI_2;

        let mut events = Vec::new();
        tick(&mut state, &tuning, DT, &mut events);

        assert_eq!(state.ball.pos.y, state.paddle.top - r);
        assert!(state.ball.angle.sin() < 0.0);
        assert!(matches!(events[..], [RoundEvent::PaddleBounce { .. }]));
    }

    #[test]
    fn test_loss_scenario_two_of_three() {
        let (mut state, tuning) = round(1, 3, 3);
        state.bricks[0].active = false;
        state.bricks[1].active = false;
        state.destroyed = 2;

        // Just inside the loss line, heading straight down, nowhere near the paddle
        let r = state.ball.radius;
        state.paddle.set_position(0.0);
        state.ball.pos = Vec2::new(tuning.board_width - 50.0, tuning.board_height + r - 1.0);
        state.ball.angle = FRAC_PI_2;

        let mut events = Vec::new();
        tick(&mut state, &tuning, DT, &mut events);

        assert_eq!(state.status, RoundStatus::Lost);
        assert!(events.contains(&RoundEvent::RoundOver {
            status: RoundStatus::Lost,
            percentage: 67,
        }));
    }

    #[test]
    fn test_terminal_round_is_frozen() {
        let (mut state, tuning) = round(1, 3, 4);
        state.status = RoundStatus::Lost;
        let before = state.clone();

        let mut events = Vec::new();
        for _ in 0..10 {
            tick(&mut state, &tuning, DT, &mut events);
        }
        assert_eq!(state, before);
        assert!(events.is_empty());
    }

    #[test]
    fn test_target_rotates_with_elapsed_time() {
        let (mut state, tuning) = round(1, 3, 5);
        let mut events = Vec::new();
        let mut seen = vec![state.target];

        // Keep the ball bouncing between walls where nothing can end the round
        let steps = (tuning.target_period * 3.0 / DT).ceil() as usize + 1;
        for _ in 0..steps {
            state.ball.pos = Vec2::new(400.0, 400.0);
            state.ball.angle = 0.0;
            tick(&mut state, &tuning, DT, &mut events);
            if *seen.last().expect("non-empty") != state.target {
                seen.push(state.target);
            }
        }
        assert_eq!(seen, vec![0, 1, 2, 0]);
        let changes = events
            .iter()
            .filter(|e| matches!(e, RoundEvent::TargetChanged { .. }))
            .count();
        assert_eq!(changes, 3);
    }

    #[test]
    fn test_target_rotates_on_schedule_during_play() {
        let (mut state, tuning) = round(4, 8, 7);
        let period = tuning.target_period;
        let pool_len = state.pool.len();
        let mut events = Vec::new();

        // Per interval between rotations: (blocked, paddle bounces)
        let mut intervals = vec![(0u32, 0u32)];
        let mut change_times = Vec::new();

        let steps = (period * 3.0 / DT).ceil() as usize + 30;
        for _ in 0..steps {
            // Paddle follows the ball, slightly off center so it wanders
            let x = state.ball.pos.x - state.paddle.width / 2.0 + 10.0;
            state.paddle.set_position(x);
            // Keep every brick off the target this tick will use
            let upcoming = target_slot(state.elapsed + DT, period, pool_len);
            for brick in &mut state.bricks {
                brick.sign = (upcoming + 1) % pool_len;
            }

            events.clear();
            tick(&mut state, &tuning, DT, &mut events);
            for event in &events {
                let current = intervals.last_mut().expect("non-empty");
                match event {
                    RoundEvent::BrickBlocked { .. } => current.0 += 1,
                    RoundEvent::PaddleBounce { .. } => current.1 += 1,
                    RoundEvent::TargetChanged { .. } => {
                        change_times.push(state.elapsed);
                        intervals.push((0, 0));
                    }
                    _ => {}
                }
            }
        }

        assert!(state.is_playing());
        assert_eq!(state.destroyed, 0);
        assert_eq!(change_times.len(), 3);
        for (k, t) in change_times.iter().enumerate() {
            let due = (k + 1) as f32 * period;
            assert!(
                *t >= due - 1e-4 && *t < due + DT + 1e-4,
                "rotation {} at t={} not on the first tick past {}",
                k + 1,
                t,
                due
            );
        }
        for (blocked, bounced) in &intervals[..3] {
            assert!(*blocked > 0, "no brick contact between rotations: {intervals:?}");
            assert!(*bounced > 0, "no paddle bounce between rotations: {intervals:?}");
        }
    }

    #[test]
    fn test_speed_follows_difficulty_curve() {
        let (mut state, tuning) = round(1, 3, 6);
        state.elapsed = tuning.difficulty_period * 2.0;
        state.ball.pos = Vec2::new(400.0, 400.0);
        state.ball.angle = 0.0;
        let mut events = Vec::new();
        tick(&mut state, &tuning, DT, &mut events);
        let expected = tuning.ball_base_speed * (1.0 + 2.0 * tuning.difficulty_increment);
        assert!((state.ball.speed - expected).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn prop_playing_ball_stays_inside_walls(
            seed in 0u64..1000,
            angle in -PI..PI,
            paddle_x in 0.0f32..700.0,
        ) {
            let (mut state, tuning) = round(3, 6, seed);
            state.ball.angle = angle;
            state.paddle.set_position(paddle_x);
            let mut events = Vec::new();
            let mut last_destroyed = 0;

            for _ in 0..600 {
                tick(&mut state, &tuning, DT, &mut events);
                prop_assert!(state.destroyed >= last_destroyed);
                prop_assert!(state.destroyed <= state.total);
                last_destroyed = state.destroyed;
                if !state.is_playing() {
                    break;
                }
                let r = state.ball.radius;
                prop_assert!(state.ball.pos.x >= r && state.ball.pos.x <= tuning.board_width - r);
                prop_assert!(state.ball.pos.y >= r);
            }

            let won = state.status == RoundStatus::Won;
            prop_assert_eq!(won, state.destroyed == state.total);
            let destroyed_bricks = state.bricks.iter().filter(|b| !b.active).count() as u32;
            prop_assert_eq!(destroyed_bricks, state.destroyed);
        }
    }
}
