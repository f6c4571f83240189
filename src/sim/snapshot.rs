//! Read-only view of a round for renderers and shells

use serde::{Deserialize, Serialize};

use super::state::{RoundState, RoundStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaddleView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub active: bool,
    pub sign: String,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub ball: BallView,
    pub paddle: PaddleView,
    pub bricks: Vec<BrickView>,
    pub target: String,
    pub destroyed: u32,
    /// Bricks still standing
    pub remaining: u32,
    pub total: u32,
    pub elapsed: f32,
    pub status: RoundStatus,
}

impl From<&RoundState> for RoundSnapshot {
    fn from(state: &RoundState) -> Self {
        Self {
            ball: BallView {
                x: state.ball.pos.x,
                y: state.ball.pos.y,
                radius: state.ball.radius,
            },
            paddle: PaddleView {
                x: state.paddle.x,
                y: state.paddle.top,
                width: state.paddle.width,
                height: state.paddle.height,
            },
            bricks: state
                .bricks
                .iter()
                .map(|b| BrickView {
                    x: b.pos.x,
                    y: b.pos.y,
                    width: b.size.x,
                    height: b.size.y,
                    active: b.active,
                    sign: state.brick_sign(b).to_string(),
                })
                .collect(),
            target: state.target_sign().to_string(),
            destroyed: state.destroyed,
            remaining: state.active_bricks().count() as u32,
            total: state.total,
            elapsed: state.elapsed,
            status: state.status,
        }
    }
}

impl RoundSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
