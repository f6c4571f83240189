//! Board geometry and difficulty tuning
//!
//! Defaults come from [`crate::consts`]; a shell may override them with a
//! JSON document.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::EngineError;

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyPreset {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl DifficultyPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyPreset::Easy => "Easy",
            DifficultyPreset::Normal => "Normal",
            DifficultyPreset::Hard => "Hard",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(DifficultyPreset::Easy),
            "normal" | "med" | "medium" => Some(DifficultyPreset::Normal),
            "hard" => Some(DifficultyPreset::Hard),
            _ => None,
        }
    }

    /// Base ball speed multiplier for this preset
    pub fn speed_scale(&self) -> f32 {
        match self {
            DifficultyPreset::Easy => 0.8,
            DifficultyPreset::Normal => 1.0,
            DifficultyPreset::Hard => 1.25,
        }
    }

    /// Seconds between speed steps
    pub fn difficulty_period(&self) -> f32 {
        match self {
            DifficultyPreset::Easy => 20.0,
            DifficultyPreset::Normal => DIFFICULTY_PERIOD,
            DifficultyPreset::Hard => 10.0,
        }
    }

    /// Paddle width multiplier
    pub fn paddle_scale(&self) -> f32 {
        match self {
            DifficultyPreset::Easy => 1.25,
            DifficultyPreset::Normal => 1.0,
            DifficultyPreset::Hard => 0.8,
        }
    }
}

/// Every number the engine plays with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Board ===
    pub board_width: f32,
    pub board_height: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Speed at elapsed time zero (units/second)
    pub ball_base_speed: f32,
    /// Heading at serve (radians)
    pub launch_angle: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between the paddle bottom and the board bottom
    pub paddle_bottom_margin: f32,

    // === Bricks ===
    pub brick_height: f32,
    pub brick_gap: f32,
    pub brick_side_margin: f32,
    pub brick_top_offset: f32,

    // === Timers ===
    /// Seconds per target sign
    pub target_period: f32,
    /// Seconds per speed step
    pub difficulty_period: f32,
    /// Multiplier added per speed step
    pub difficulty_increment: f32,
    /// Largest Δt integrated in one tick
    pub max_dt: f32,
    /// Seconds between a terminal transition and the round-end callback
    pub round_end_delay: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,

            ball_radius: BALL_RADIUS,
            ball_base_speed: BALL_BASE_SPEED,
            launch_angle: LAUNCH_ANGLE,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_bottom_margin: PADDLE_BOTTOM_MARGIN,

            brick_height: BRICK_HEIGHT,
            brick_gap: BRICK_GAP,
            brick_side_margin: BRICK_SIDE_MARGIN,
            brick_top_offset: BRICK_TOP_OFFSET,

            target_period: TARGET_PERIOD,
            difficulty_period: DIFFICULTY_PERIOD,
            difficulty_increment: DIFFICULTY_INCREMENT,
            max_dt: MAX_DT,
            round_end_delay: ROUND_END_DELAY,
        }
    }
}

impl Tuning {
    /// Create tuning from a difficulty preset (applies preset defaults)
    pub fn from_preset(preset: DifficultyPreset) -> Self {
        let mut tuning = Self::default();
        tuning.apply_preset(preset);
        tuning
    }

    /// Apply a difficulty preset on top of the current values
    pub fn apply_preset(&mut self, preset: DifficultyPreset) {
        self.ball_base_speed = BALL_BASE_SPEED * preset.speed_scale();
        self.difficulty_period = preset.difficulty_period();
        self.paddle_width = PADDLE_WIDTH * preset.paddle_scale();
    }

    /// Y coordinate of the paddle's top edge
    #[inline]
    pub fn paddle_top(&self) -> f32 {
        self.board_height - self.paddle_bottom_margin - self.paddle_height
    }

    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load tuning from a JSON file on disk
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: &std::path::Path) -> Result<Self, EngineError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| EngineError::TuningParse(format!("{}: {}", path.display(), e)))?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject geometry or timers the engine cannot play with
    pub fn validate(&self) -> Result<(), EngineError> {
        let positive = [
            ("board_width", self.board_width),
            ("board_height", self.board_height),
            ("ball_radius", self.ball_radius),
            ("ball_base_speed", self.ball_base_speed),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("brick_height", self.brick_height),
            ("target_period", self.target_period),
            ("difficulty_period", self.difficulty_period),
            ("max_dt", self.max_dt),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(EngineError::InvalidTuning(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("paddle_bottom_margin", self.paddle_bottom_margin),
            ("brick_gap", self.brick_gap),
            ("brick_side_margin", self.brick_side_margin),
            ("brick_top_offset", self.brick_top_offset),
            ("difficulty_increment", self.difficulty_increment),
            ("round_end_delay", self.round_end_delay),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::InvalidTuning(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        if !self.launch_angle.is_finite() || self.launch_angle.sin() >= 0.0 {
            return Err(EngineError::InvalidTuning(format!(
                "launch_angle must point upward, got {}",
                self.launch_angle
            )));
        }
        if self.paddle_width >= self.board_width {
            return Err(EngineError::InvalidTuning(format!(
                "paddle_width {} must be narrower than board_width {}",
                self.paddle_width, self.board_width
            )));
        }
        if self.ball_radius * 2.0 >= self.board_width.min(self.board_height) {
            return Err(EngineError::InvalidTuning(format!(
                "ball_radius {} does not fit the board",
                self.ball_radius
            )));
        }
        if self.paddle_top() <= self.brick_top_offset + self.ball_radius * 2.0 {
            return Err(EngineError::InvalidTuning(format!(
                "paddle top {} leaves no room below brick_top_offset {}",
                self.paddle_top(),
                self.brick_top_offset
            )));
        }
        if self.brick_side_margin * 2.0 >= self.board_width {
            return Err(EngineError::InvalidTuning(format!(
                "brick_side_margin {} leaves no room for bricks",
                self.brick_side_margin
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_valid() {
        assert!(Tuning::default().validate().is_ok());
        for preset in [
            DifficultyPreset::Easy,
            DifficultyPreset::Normal,
            DifficultyPreset::Hard,
        ] {
            assert!(Tuning::from_preset(preset).validate().is_ok(), "{}", preset.as_str());
        }
    }

    #[test]
    fn test_paddle_top() {
        let tuning = Tuning::default();
        assert_eq!(
            tuning.paddle_top(),
            BOARD_HEIGHT - PADDLE_BOTTOM_MARGIN - PADDLE_HEIGHT
        );
    }

    #[test]
    fn test_json_partial_override() {
        let tuning = Tuning::from_json(r#"{ "target_period": 2.5, "board_width": 640.0 }"#)
            .expect("valid tuning");
        assert_eq!(tuning.target_period, 2.5);
        assert_eq!(tuning.board_width, 640.0);
        assert_eq!(tuning.ball_radius, BALL_RADIUS);
    }

    #[test]
    fn test_json_roundtrip_preserves_values() {
        let tuning = Tuning::from_preset(DifficultyPreset::Hard);
        let json = tuning.to_json().expect("serializes");
        assert_eq!(Tuning::from_json(&json).expect("parses"), tuning);
    }

    #[test]
    fn test_rejects_bad_values() {
        let tuning = Tuning {
            target_period: 0.0,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(EngineError::InvalidTuning(_))));

        let tuning = Tuning {
            paddle_width: BOARD_WIDTH,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(EngineError::InvalidTuning(_))));

        let tuning = Tuning {
            launch_angle: 1.0,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(EngineError::InvalidTuning(_))));

        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(EngineError::TuningParse(_))
        ));
    }

    #[test]
    fn test_preset_parse() {
        assert_eq!(DifficultyPreset::parse("HARD"), Some(DifficultyPreset::Hard));
        assert_eq!(DifficultyPreset::parse("med"), Some(DifficultyPreset::Normal));
        assert_eq!(DifficultyPreset::parse("insane"), None);
    }
}
