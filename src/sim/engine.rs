//! Engine: the single owner of round state
//!
//! Every mutation of a round goes through one of the operations here, and
//! each of them checks the round status first: once a round is won or lost,
//! ticks, input and timers can no longer change it.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bricks::layout_grid;
use super::input::{InputQueue, PaddleCommand, PaddleSender};
use super::motion::sanitize_dt;
use super::session::tick_end_delay;
use super::snapshot::RoundSnapshot;
use super::state::{RoundEvent, RoundState, RoundStatus, SignPool};
use super::tick::tick;
use crate::error::EngineError;
use crate::tuning::Tuning;

type RoundEndCallback = Box<dyn FnMut(u8)>;

pub struct Engine {
    tuning: Tuning,
    rng: Pcg32,
    round: Option<RoundState>,
    input: InputQueue,
    on_round_end: Option<RoundEndCallback>,
    rounds_started: u32,
}

impl Engine {
    /// Build an engine; `seed` drives sign selection and brick assignment
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, EngineError> {
        tuning.validate()?;
        Ok(Self {
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            round: None,
            input: InputQueue::new(),
            on_round_end: None,
            rounds_started: 0,
        })
    }

    /// Register the callback fired once per round, after the display delay
    /// following a win or loss, with the completion percentage (0-100)
    pub fn on_round_end(&mut self, callback: impl FnMut(u8) + 'static) {
        self.on_round_end = Some(Box::new(callback));
    }

    /// Begin a new round from the content provider's signs.
    ///
    /// Rejects fewer than three distinct signs and grids that are empty or do
    /// not fit the board; on error any current round is left as it was.
    pub fn start_round<S: AsRef<str>>(
        &mut self,
        signs: &[S],
        rows: usize,
        cols: usize,
    ) -> Result<(), EngineError> {
        let available: Vec<String> = signs.iter().map(|s| s.as_ref().to_string()).collect();
        let pool = SignPool::select(&available, &mut self.rng)?;
        let bricks = layout_grid(&self.tuning, rows, cols, &pool, &mut self.rng)?;

        let round = RoundState::new(pool, bricks, &self.tuning);
        self.rounds_started += 1;
        log::info!(
            "Round {}: {}x{} bricks, signs {:?}, target {}",
            self.rounds_started,
            rows,
            cols,
            round.pool.signs(),
            round.target_sign()
        );

        // Stale input belongs to the previous round
        self.input.drain().for_each(drop);
        self.round = Some(round);
        Ok(())
    }

    /// Advance the simulation by one frame.
    ///
    /// Negative, NaN or infinite deltas are dropped; large deltas are clamped
    /// to `max_dt`. Terminal rounds only count down the display delay.
    pub fn advance(&mut self, dt: f32) -> Vec<RoundEvent> {
        let mut events = Vec::new();
        self.apply_queued_input();

        let Some(step) = sanitize_dt(dt, self.tuning.max_dt) else {
            log::warn!("Ignoring tick with invalid dt {}", dt);
            return events;
        };
        let Some(round) = self.round.as_mut() else {
            return events;
        };

        let was_playing = round.is_playing();
        if was_playing {
            tick(round, &self.tuning, step, &mut events);
        }

        if !round.is_playing() {
            // The transition tick starts the delay; later ticks count real time
            let delay_dt = if was_playing { 0.0 } else { dt };
            if let Some(percentage) = tick_end_delay(round, &self.tuning, delay_dt) {
                log::info!("Round ended with {}%", percentage);
                events.push(RoundEvent::RoundEnded { percentage });
                if let Some(callback) = self.on_round_end.as_mut() {
                    callback(percentage);
                }
            }
        }

        events
    }

    /// Move the paddle's left edge to `x`, clamped to the board
    pub fn set_paddle_position(&mut self, x: f32) {
        if let Some(round) = self.playing_round() {
            round.paddle.set_position(x);
        }
    }

    /// Shift the paddle by `dx`, clamped to the board
    pub fn nudge_paddle(&mut self, dx: f32) {
        if let Some(round) = self.playing_round() {
            round.paddle.nudge(dx);
        }
    }

    /// Handle for publishing paddle input from another thread
    pub fn paddle_sender(&self) -> PaddleSender {
        self.input.sender()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Current round, if one was started
    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn status(&self) -> Option<RoundStatus> {
        self.round.as_ref().map(|r| r.status)
    }

    pub fn target_sign(&self) -> Option<&str> {
        self.round.as_ref().map(|r| r.target_sign())
    }

    /// Renderer view of the current round
    pub fn snapshot(&self) -> Option<RoundSnapshot> {
        self.round.as_ref().map(RoundSnapshot::from)
    }

    fn playing_round(&mut self) -> Option<&mut RoundState> {
        self.round.as_mut().filter(|r| r.is_playing())
    }

    fn apply_queued_input(&mut self) {
        let Some(round) = self.round.as_mut() else {
            self.input.drain().for_each(drop);
            return;
        };
        for command in self.input.drain() {
            if !round.is_playing() {
                continue;
            }
            match command {
                PaddleCommand::SetPosition(x) => round.paddle.set_position(x),
                PaddleCommand::Nudge(dx) => round.paddle.nudge(dx),
            }
        }
    }
}
