//! wasm-bindgen surface for the JavaScript shell
//!
//! The shell owns rendering, input devices and the animation frame loop; it
//! drives the engine through these calls and draws from `snapshot()`.

use wasm_bindgen::prelude::*;

use crate::sim::Engine;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
}

#[wasm_bindgen]
pub struct WebEngine {
    engine: Engine,
}

#[wasm_bindgen]
impl WebEngine {
    /// Engine with default tuning, or a JSON tuning override
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64, tuning_json: Option<String>) -> Result<WebEngine, JsValue> {
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json).map_err(to_js)?,
            None => Tuning::default(),
        };
        let engine = Engine::new(tuning, seed).map_err(to_js)?;
        Ok(Self { engine })
    }

    #[wasm_bindgen(js_name = startRound)]
    pub fn start_round(&mut self, signs: Vec<String>, rows: usize, cols: usize) -> Result<(), JsValue> {
        self.engine.start_round(signs.as_slice(), rows, cols).map_err(to_js)
    }

    /// Advance by `dt` seconds; returns the tick's events as JSON
    pub fn advance(&mut self, dt: f32) -> String {
        let events = self.engine.advance(dt);
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }

    #[wasm_bindgen(js_name = setPaddlePosition)]
    pub fn set_paddle_position(&mut self, x: f32) {
        self.engine.set_paddle_position(x);
    }

    #[wasm_bindgen(js_name = nudgePaddle)]
    pub fn nudge_paddle(&mut self, dx: f32) {
        self.engine.nudge_paddle(dx);
    }

    /// Current round as JSON, or `null` before the first round
    pub fn snapshot(&self) -> String {
        self.engine
            .snapshot()
            .and_then(|s| s.to_json().ok())
            .unwrap_or_else(|| "null".to_string())
    }

    /// Register `callback(percentage)` for the end of each round
    #[wasm_bindgen(js_name = onRoundEnd)]
    pub fn on_round_end(&mut self, callback: js_sys::Function) {
        self.engine.on_round_end(move |percentage| {
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from(percentage)) {
                log::warn!("Round-end callback failed: {:?}", e);
            }
        });
    }
}

fn to_js(err: crate::EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
