//! Signbreak entry point
//!
//! Native builds run a headless round with an autopilot paddle and print the
//! completion percentage. The wasm build exposes `signbreak::web` instead.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::Cell;
    use std::path::PathBuf;
    use std::rc::Rc;

    use clap::Parser;
    use signbreak::sim::{Engine, RoundEvent};
    use signbreak::tuning::{DifficultyPreset, Tuning};

    /// Frame delta for the headless loop
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Give up after this much simulated time
    const MAX_SECONDS: f32 = 600.0;
    /// Autopilot paddle speed (units/second)
    const AUTOPILOT_SPEED: f32 = 520.0;

    const DEMO_SIGNS: &[&str] = &["stop", "yield", "no-entry", "school", "crossing"];

    #[derive(Debug, Parser)]
    #[command(name = "signbreak")]
    #[command(about = "Play one headless sign-matching breakout round with an autopilot paddle", long_about = None)]
    #[command(version)]
    pub(crate) struct Options {
        /// Seed for sign selection and brick assignment
        #[arg(long, default_value_t = 0x5EED)]
        pub(crate) seed: u64,

        /// Brick grid rows
        #[arg(long, default_value_t = 4)]
        pub(crate) rows: usize,

        /// Brick grid columns
        #[arg(long, default_value_t = 8)]
        pub(crate) cols: usize,

        /// Difficulty preset (easy, normal, hard)
        #[arg(long, default_value = "normal", value_parser = parse_preset)]
        pub(crate) preset: DifficultyPreset,

        /// JSON tuning file; overrides the preset
        #[arg(long)]
        pub(crate) tuning: Option<PathBuf>,
    }

    fn parse_preset(name: &str) -> Result<DifficultyPreset, String> {
        DifficultyPreset::parse(name).ok_or_else(|| format!("unknown preset {name}"))
    }

    pub fn run() -> Result<(), String> {
        let options = Options::parse();
        let tuning = match &options.tuning {
            Some(path) => Tuning::from_file(path).map_err(|e| e.to_string())?,
            None => Tuning::from_preset(options.preset),
        };
        log::info!("Signbreak (headless) starting with {:?}", options);

        let mut engine = Engine::new(tuning, options.seed).map_err(|e| e.to_string())?;
        let result = Rc::new(Cell::new(None));
        let sink = result.clone();
        engine.on_round_end(move |pct| sink.set(Some(pct)));
        engine
            .start_round(DEMO_SIGNS, options.rows, options.cols)
            .map_err(|e| e.to_string())?;

        let mut t = 0.0;
        while result.get().is_none() && t < MAX_SECONDS {
            steer(&mut engine);
            for event in engine.advance(FRAME_DT) {
                match event {
                    RoundEvent::TargetChanged { sign } => log::info!("t={t:6.2}s target -> {sign}"),
                    RoundEvent::BrickDestroyed { brick_id, sign } => {
                        log::info!("t={t:6.2}s brick {brick_id} ({sign}) destroyed")
                    }
                    RoundEvent::RoundOver { status, percentage } => {
                        log::info!("t={t:6.2}s {status:?} at {percentage}%")
                    }
                    _ => {}
                }
            }
            t += FRAME_DT;
        }

        match result.get() {
            Some(pct) => println!("Round complete: {pct}%"),
            None => println!("Round still running after {MAX_SECONDS}s"),
        }
        Ok(())
    }

    /// Chase the ball with the paddle center, at a capped speed
    fn steer(engine: &mut Engine) {
        let Some(round) = engine.round() else {
            return;
        };
        let wanted = round.ball.pos.x - round.paddle.width / 2.0;
        let max_step = AUTOPILOT_SPEED * FRAME_DT;
        let step = (wanted - round.paddle.x).clamp(-max_step, max_step);
        engine.nudge_paddle(step);
    }
}


#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = headless::run() {
        eprintln!("signbreak: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is signbreak::web::init, this is just to satisfy the compiler
}
