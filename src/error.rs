//! Engine error type

use thiserror::Error;

/// Errors raised when a round or engine cannot be set up
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("Sign pool needs at least {required} distinct signs, got {got}")]
    NotEnoughSigns { required: usize, got: usize },

    #[error("Duplicate sign in pool: {0}")]
    DuplicateSign(String),

    #[error("Sign identifiers must not be empty")]
    EmptySign,

    #[error("Invalid grid dimensions: {rows} rows x {cols} cols")]
    InvalidGrid { rows: usize, cols: usize },

    #[error("Brick grid does not fit the board: {0}")]
    GridDoesNotFit(String),

    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("Tuning parse error: {0}")]
    TuningParse(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::TuningParse(err.to_string())
    }
}
