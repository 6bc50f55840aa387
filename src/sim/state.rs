//! Session state and output types
//!
//! Everything the core hands back to the host UI: phase, outcome payloads and
//! the placement/notification events drained after each call.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::boundary::BoundaryId;
use super::bricks::BrickKind;
use super::geometry::{Rect, Shape};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball at rest above the paddle, waiting for the first tap
    NotStarted,
    /// Ball in motion
    InPlay,
    /// Ball frozen (or respawned after a lost life), waiting for a tap
    Paused,
    /// All bricks destroyed
    LevelCleared,
    /// No lives left
    GameOver,
}

impl GamePhase {
    /// Run finished; waiting for the outcome to be acknowledged
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::LevelCleared | GamePhase::GameOver)
    }
}

/// Which level a new game starts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelRequest {
    First,
    Current,
    Next,
}

/// Payload of the level-cleared / game-over presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub score: u32,
    pub lives_saved: u32,
    pub is_new_best_score: bool,
}

/// Style tag for entities the UI draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyleTag {
    Ball,
    Paddle,
    Brick(BrickKind),
}

/// Output events for the host UI
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PhaseChanged(GamePhase),
    PlaceBall {
        center: Vec2,
        radius: f32,
        angle: f32,
        style: StyleTag,
    },
    RemoveBall,
    PlacePaddle {
        rect: Rect,
        style: StyleTag,
    },
    PlaceBrick {
        index: u32,
        rect: Rect,
        style: StyleTag,
    },
    /// Start the cosmetic removal transition
    FadeBrick {
        index: u32,
    },
    RemoveBrick {
        index: u32,
    },
    /// Debug overlay
    BoundaryAdded {
        id: BoundaryId,
        shape: Shape,
    },
    BoundaryRemoved {
        id: BoundaryId,
    },
    ScoreChanged(u32),
    LivesChanged(u32),
    ComboChanged(u32),
    LevelCleared(Outcome),
    GameOver(Outcome),
}
