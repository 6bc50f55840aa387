//! Breakout core - physics, collision and game rules for a single-screen Breakout game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball dynamics, collisions, bricks, session rules)
//! - `settings`: Difficulty presets and player preferences
//! - `scores`: Best/last score bookkeeping
//! - `persistence`: Key-value store seam for persisted preferences
//! - `platform`: Normalized input events forwarded by the UI layer

pub mod persistence;
pub mod platform;
pub mod scores;
pub mod settings;
pub mod sim;

pub use scores::ScoreRecord;
pub use settings::{ComboScoring, Difficulty, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Simulation ticks per second
    pub const TICKS_PER_SECOND: u64 = 120;

    /// Ball defaults (32pt sprite)
    pub const BALL_RADIUS: f32 = 16.0;
    /// Gap between a freshly spawned ball and the paddle top
    pub const BALL_SPAWN_GAP: f32 = 1.0;
    /// Ball speed (points/s) at the reference field height
    pub const BALL_SPEED_EASY: f32 = 300.0;
    pub const BALL_SPEED_HARD: f32 = 500.0;
    /// Field height the base speeds were tuned for (4-inch phone game view)
    pub const REFERENCE_FIELD_HEIGHT: f32 = 519.0;
    /// Default gravity (points/s², y grows downward) when no tilt vector is supplied
    pub const DEFAULT_GRAVITY: f32 = 250.0;
    /// Fraction of contact tangential speed converted into spin
    pub const SPIN_TRANSFER: f32 = 0.5;

    /// Paddle defaults
    pub const PADDLE_HEIGHT: f32 = 10.0;
    pub const PADDLE_BOTTOM_INDENT: f32 = 75.0;
    /// Paddle width as a fraction of field width
    pub const PADDLE_WIDTH_FRACTION: f32 = 0.2;
    /// Fraction of width lost on each ShortPaddleForce hit
    pub const PADDLE_SHRINK_FRACTION: f32 = 0.25;

    /// Brick grid
    pub const BRICK_ROWS: u32 = 3;
    pub const BRICK_COLUMNS: u32 = 5;
    pub const BRICK_SPACING: f32 = 4.0;
    pub const BRICK_HEIGHT: f32 = 30.0;
    /// Cosmetic removal transition (1 second at 120 Hz)
    pub const BRICK_REMOVAL_DELAY_TICKS: u64 = TICKS_PER_SECOND;

    /// Highest level with its own layout; later "next level" requests rebuild it
    pub const MAX_LEVEL: u32 = 2;

    /// Lives and combo bonus per difficulty
    pub const LIVES_EASY: u32 = 5;
    pub const LIVES_HARD: u32 = 3;
    pub const COMBO_BONUS_EASY: u32 = 2;
    pub const COMBO_BONUS_HARD: u32 = 3;
}

/// Unit vector pointing at `angle` radians (x right, y down)
#[inline]
pub fn unit_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Clamp `value` into `[min, max]`, preferring `min` when the range is inverted
#[inline]
pub fn clamp_low(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_vector() {
        let v = unit_vector(std::f32::consts::FRAC_PI_2);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
        assert!((unit_vector(1.234).length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_clamp_low_inverted_range() {
        assert_eq!(clamp_low(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp_low(15.0, 0.0, 10.0), 10.0);
        // Range inverted (paddle wider than field): min wins
        assert_eq!(clamp_low(3.0, 0.0, -20.0), 0.0);
    }
}
