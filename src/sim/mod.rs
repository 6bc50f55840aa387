//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by boundary id / brick index)
//! - No rendering or platform dependencies

pub mod ball;
pub mod boundary;
pub mod bricks;
pub mod collision;
pub mod geometry;
pub mod paddle;
pub mod session;
pub mod state;
pub mod tick;
pub mod timeline;

pub use ball::{Ball, BallDynamics, PausedMotion};
pub use boundary::{Boundary, BoundaryChange, BoundaryId, BoundaryRegistry};
pub use bricks::{Brick, BrickField, BrickHit, BrickKind, FieldEvent};
pub use collision::{CollisionEngine, CollisionResult, Contact, StepReport, reflect_velocity};
pub use geometry::{Rect, Shape};
pub use paddle::Paddle;
pub use session::GameSession;
pub use state::{GameEvent, GamePhase, LevelRequest, Outcome, StyleTag};
pub use timeline::Timeline;
