//! Collision detection and response
//!
//! Each step the ball is tested against every registered outline. Contacts
//! are edge-triggered: a boundary reports one `Contact` when a contact
//! episode begins and stays quiet until the ball has separated from it.

use std::collections::BTreeSet;

use glam::Vec2;

use super::ball::BallDynamics;
use super::boundary::{BoundaryId, BoundaryRegistry};
use super::geometry::{Rect, Shape, sdf_gradient};
use crate::consts::SPIN_TRANSFER;

/// Extra distance within which an episode is considered ongoing
pub const CONTACT_SLOP: f32 = 0.5;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Closest point on the outline
    pub point: Vec2,
    /// Surface normal at collision (pointing toward ball center, for reflection)
    pub normal: Vec2,
    /// Penetration depth (negative while within the contact slop)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check a ball against an outline from whichever side the ball is on
pub fn ball_outline_collision(ball_pos: Vec2, ball_radius: f32, shape: &Shape) -> CollisionResult {
    let dist = shape.signed_distance(ball_pos);
    if dist.abs() >= ball_radius + CONTACT_SLOP {
        return CollisionResult::miss();
    }

    let gradient = sdf_gradient(ball_pos, |p| shape.signed_distance(p));
    // Inside the outline the ball is pushed back inward
    let normal = if dist < 0.0 { -gradient } else { gradient };
    CollisionResult {
        hit: true,
        point: ball_pos - normal * dist.abs(),
        normal,
        penetration: ball_radius - dist.abs(),
    }
}

/// Reflect velocity off a surface
///
/// v' = v - (1 + e)(v·n)n, with e = 1 for a perfectly elastic bounce
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2, restitution: f32) -> Vec2 {
    velocity - (1.0 + restitution) * velocity.dot(normal) * normal
}

/// A contact episode that began this step
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub id: BoundaryId,
    pub point: Vec2,
}

/// Everything that happened during one step
#[derive(Debug, Clone, Default)]
pub struct StepReport {
    /// New contact episodes, in registry order
    pub contacts: Vec<Contact>,
    /// The ball left the field and was removed
    pub left_field: bool,
}

/// Tracks contact episodes and the ball's presence in the field
#[derive(Debug, Clone, Default)]
pub struct CollisionEngine {
    touching: BTreeSet<BoundaryId>,
    outside: bool,
}

impl CollisionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget ongoing episodes (new ball or rebuilt field)
    pub fn reset(&mut self) {
        self.touching.clear();
        self.outside = false;
    }

    /// Integrate the ball by `dt`, resolve contacts and check the field bounds
    pub fn step(
        &mut self,
        dynamics: &mut BallDynamics,
        registry: &BoundaryRegistry,
        field: &Rect,
        dt: f32,
    ) -> StepReport {
        let mut report = StepReport::default();
        dynamics.integrate(dt);

        let rotation_allowed = dynamics.rotation_allowed();
        let Some(ball) = dynamics.ball_mut() else {
            self.touching.clear();
            return report;
        };

        let mut now_touching = BTreeSet::new();
        for (id, boundary) in registry.iter() {
            let result = ball_outline_collision(ball.pos, ball.radius, &boundary.shape);
            if !result.hit {
                continue;
            }

            // Only reflect if moving toward the surface
            if ball.vel.dot(result.normal) < 0.0 {
                if rotation_allowed {
                    let tangent = Vec2::new(-result.normal.y, result.normal.x);
                    ball.angular_vel += ball.vel.dot(tangent) / ball.radius * SPIN_TRANSFER;
                }
                ball.vel = reflect_velocity(ball.vel, result.normal, boundary.restitution);
            }
            // Push out
            if result.penetration > 0.0 {
                ball.pos += result.normal * result.penetration;
            }

            if !self.touching.contains(id) {
                log::debug!("contact began: {} at {:?}", id, result.point);
                report.contacts.push(Contact {
                    id: id.clone(),
                    point: result.point,
                });
            }
            now_touching.insert(id.clone());
        }
        self.touching = now_touching;

        if field.is_empty() {
            return report;
        }
        let outside = !ball.bounds().intersects(field);
        if outside && !self.outside {
            log::debug!("ball left the field at {:?}", ball.pos);
            report.left_field = true;
            dynamics.remove();
            self.touching.clear();
        }
        self.outside = outside;

        report
    }
}
