//! Ball entity and its dynamics
//!
//! `BallDynamics` owns the (at most one) ball plus the motion parameters that
//! outlive it: speed scalar, rotation/gravity switches, the gravity vector and
//! the seeded RNG used for push angles.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::*;
use crate::unit_vector;

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Center position
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Rotation angle (radians), only integrated when rotation is allowed
    pub angle: f32,
    pub angular_vel: f32,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            angle: 0.0,
            angular_vel: 0.0,
        }
    }

    /// Bounding square of the ball
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(self.radius))
    }

    pub fn is_in_motion(&self) -> bool {
        self.vel != Vec2::ZERO
    }
}

/// Motion captured by `stop()` so `resume()` can restore it exactly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PausedMotion {
    pub vel: Vec2,
    pub angular_vel: f32,
}

/// Ball owner: spawning, impulses, pause/resume and integration
#[derive(Debug, Clone)]
pub struct BallDynamics {
    ball: Option<Ball>,
    radius: f32,
    speed: f32,
    rotation_allowed: bool,
    gravity_enabled: bool,
    gravity: Vec2,
    paused: Option<PausedMotion>,
    rng: Pcg32,
}

impl BallDynamics {
    /// Create dynamics with no ball; `seed` drives push angles
    pub fn new(seed: u64) -> Self {
        Self {
            ball: None,
            radius: BALL_RADIUS,
            speed: BALL_SPEED_EASY,
            rotation_allowed: false,
            gravity_enabled: false,
            gravity: Vec2::new(0.0, DEFAULT_GRAVITY),
            paused: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn ball(&self) -> Option<&Ball> {
        self.ball.as_ref()
    }

    pub fn ball_mut(&mut self) -> Option<&mut Ball> {
        self.ball.as_mut()
    }

    pub fn has_ball(&self) -> bool {
        self.ball.is_some()
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Create or reposition the ball at rest; gravity is switched off
    pub fn spawn(&mut self, pos: Vec2) {
        self.ball = Some(Ball::new(pos, self.radius));
        self.paused = None;
        self.gravity_enabled = false;
    }

    /// Drop the ball entity (it left the play field)
    pub fn remove(&mut self) -> Option<Ball> {
        self.paused = None;
        self.ball.take()
    }

    /// Instantaneous impulse of magnitude `speed` at a uniform random angle
    pub fn push(&mut self) {
        let Some(ball) = self.ball.as_mut() else {
            log::debug!("push ignored: no ball");
            return;
        };
        let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
        ball.vel += unit_vector(angle) * self.speed;
        log::debug!("ball pushed at {:.3} rad, speed {:.1}", angle, self.speed);
    }

    /// Freeze the ball in place, keeping its trajectory for `resume()`
    pub fn stop(&mut self) {
        let Some(ball) = self.ball.as_mut() else {
            return;
        };
        if self.paused.is_some() && !ball.is_in_motion() {
            // Already frozen; keep the saved trajectory
            return;
        }
        self.paused = Some(PausedMotion {
            vel: ball.vel,
            angular_vel: ball.angular_vel,
        });
        ball.vel = Vec2::ZERO;
        ball.angular_vel = 0.0;
    }

    /// Restore the motion saved by `stop()`
    pub fn resume(&mut self) {
        let Some(ball) = self.ball.as_mut() else {
            return;
        };
        if let Some(motion) = self.paused.take() {
            ball.vel = motion.vel;
            ball.angular_vel = if self.rotation_allowed {
                motion.angular_vel
            } else {
                0.0
            };
        }
    }

    /// Whether a trajectory is saved by `stop()` and waiting for `resume()`
    pub fn has_paused_motion(&self) -> bool {
        self.ball.is_some() && self.paused.is_some()
    }

    pub fn is_in_motion(&self) -> bool {
        self.ball.as_ref().is_some_and(Ball::is_in_motion)
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }

    pub fn set_gravity_enabled(&mut self, enabled: bool) {
        self.gravity_enabled = enabled;
    }

    pub fn gravity_enabled(&self) -> bool {
        self.gravity_enabled
    }

    /// Acceleration applied while gravity is enabled (e.g. device tilt)
    pub fn set_gravity_vector(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    pub fn gravity_vector(&self) -> Vec2 {
        self.gravity
    }

    /// Disallowing rotation cancels any spin immediately
    pub fn set_rotation_allowed(&mut self, allowed: bool) {
        self.rotation_allowed = allowed;
        if !allowed {
            if let Some(ball) = self.ball.as_mut() {
                ball.angular_vel = 0.0;
            }
            if let Some(motion) = self.paused.as_mut() {
                motion.angular_vel = 0.0;
            }
        }
    }

    pub fn rotation_allowed(&self) -> bool {
        self.rotation_allowed
    }

    /// Advance the ball by `dt`: gravity, position, spin. A frozen ball stays put.
    pub fn integrate(&mut self, dt: f32) {
        if self.paused.is_some() {
            return;
        }
        let Some(ball) = self.ball.as_mut() else {
            return;
        };
        if self.gravity_enabled {
            ball.vel += self.gravity * dt;
        }
        ball.pos += ball.vel * dt;
        if self.rotation_allowed {
            ball.angle = (ball.angle + ball.angular_vel * dt) % std::f32::consts::TAU;
        } else {
            ball.angular_vel = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn spawned(seed: u64) -> BallDynamics {
        let mut dynamics = BallDynamics::new(seed);
        dynamics.spawn(Vec2::new(100.0, 100.0));
        dynamics
    }

    #[test]
    fn test_spawn_at_rest() {
        let mut dynamics = spawned(1);
        dynamics.set_gravity_enabled(true);
        dynamics.spawn(Vec2::new(5.0, 6.0));
        let ball = dynamics.ball().unwrap();
        assert_eq!(ball.pos, Vec2::new(5.0, 6.0));
        assert!(!dynamics.is_in_motion());
        assert!(!dynamics.gravity_enabled());
    }

    #[test]
    fn test_push_magnitude_equals_speed() {
        let mut dynamics = spawned(7);
        dynamics.set_speed(420.0);
        dynamics.push();
        let speed = dynamics.ball().unwrap().vel.length();
        assert!((speed - 420.0).abs() < 1e-3);
        assert!(dynamics.is_in_motion());
    }

    #[test]
    fn test_push_is_deterministic_per_seed() {
        let mut a = spawned(99);
        let mut b = spawned(99);
        a.push();
        b.push();
        assert_eq!(a.ball().unwrap().vel, b.ball().unwrap().vel);
    }

    #[test]
    fn test_operations_without_ball_are_noops() {
        let mut dynamics = BallDynamics::new(3);
        dynamics.push();
        dynamics.stop();
        dynamics.resume();
        dynamics.set_rotation_allowed(false);
        dynamics.integrate(0.1);
        assert!(dynamics.ball().is_none());
        assert!(!dynamics.is_in_motion());
    }

    #[test]
    fn test_double_stop_keeps_trajectory() {
        let mut dynamics = spawned(5);
        dynamics.ball_mut().unwrap().vel = Vec2::new(3.0, -4.0);
        dynamics.stop();
        dynamics.stop();
        dynamics.resume();
        assert_eq!(dynamics.ball().unwrap().vel, Vec2::new(3.0, -4.0));
    }

    #[test]
    fn test_stopped_ball_does_not_fall() {
        let mut dynamics = spawned(5);
        dynamics.ball_mut().unwrap().vel = Vec2::new(10.0, 0.0);
        dynamics.set_gravity_enabled(true);
        dynamics.stop();
        dynamics.integrate(1.0);
        assert_eq!(dynamics.ball().unwrap().pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_gravity_integrates_when_enabled() {
        let mut dynamics = spawned(5);
        dynamics.set_gravity_vector(Vec2::new(0.0, 100.0));
        dynamics.integrate(0.5);
        assert_eq!(dynamics.ball().unwrap().vel, Vec2::ZERO);

        dynamics.set_gravity_enabled(true);
        dynamics.integrate(0.5);
        assert!((dynamics.ball().unwrap().vel.y - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_disallowing_rotation_cancels_spin() {
        let mut dynamics = spawned(5);
        dynamics.set_rotation_allowed(true);
        dynamics.set_gravity_enabled(true);
        dynamics.ball_mut().unwrap().angular_vel = 4.0;
        dynamics.integrate(0.1);
        let angle = dynamics.ball().unwrap().angle;
        assert!(angle > 0.0);

        dynamics.set_rotation_allowed(false);
        assert_eq!(dynamics.ball().unwrap().angular_vel, 0.0);

        // Gravity stays on, but no further rotation integrates
        dynamics.ball_mut().unwrap().angular_vel = 2.0;
        dynamics.integrate(0.1);
        let ball = dynamics.ball().unwrap();
        assert_eq!(ball.angle, angle);
        assert_eq!(ball.angular_vel, 0.0);
        assert!(ball.vel.y > 0.0);
    }

    proptest! {
        #[test]
        fn prop_stop_resume_restores_velocity(
            vx in -1000.0f32..1000.0,
            vy in -1000.0f32..1000.0,
        ) {
            prop_assume!(vx != 0.0 || vy != 0.0);
            let mut dynamics = spawned(11);
            dynamics.ball_mut().unwrap().vel = Vec2::new(vx, vy);

            dynamics.stop();
            prop_assert!(!dynamics.is_in_motion());
            dynamics.resume();

            prop_assert_eq!(dynamics.ball().unwrap().vel, Vec2::new(vx, vy));
            prop_assert!(!dynamics.has_paused_motion());
        }
    }
}
