//! Geometry primitives and signed distance functions
//!
//! Every collision outline (walls, paddle, bricks) is expressed as a signed
//! distance field: negative inside the shape, positive outside. The ball
//! collides with the zero contour from whichever side it is on.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (origin at top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Vec2::ZERO,
        size: Vec2::ZERO,
    };

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Square/rectangle centered on `center` with half extents `half`
    pub fn from_center(center: Vec2, half: Vec2) -> Self {
        Self {
            origin: center - half,
            size: half * 2.0,
        }
    }

    #[inline]
    pub fn min_x(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn min_y(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn max_x(&self) -> f32 {
        self.origin.x + self.size.x
    }

    #[inline]
    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    #[inline]
    pub fn mid_x(&self) -> f32 {
        self.origin.x + self.size.x / 2.0
    }

    pub fn center(&self) -> Vec2 {
        self.origin + self.size / 2.0
    }

    pub fn half_extents(&self) -> Vec2 {
        self.size / 2.0
    }

    /// True when the rectangle encloses no area
    pub fn is_empty(&self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// True when the two rectangles share a region of positive area
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min_x() < other.max_x()
            && other.min_x() < self.max_x()
            && self.min_y() < other.max_y()
            && other.min_y() < self.max_y()
    }

    /// True when `other` lies entirely within this rectangle (edges included)
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.min_x() >= self.min_x()
            && other.max_x() <= self.max_x()
            && other.min_y() >= self.min_y()
            && other.max_y() <= self.max_y()
    }

    /// Same rectangle with negative extents clamped to zero
    pub fn clamped(&self) -> Rect {
        Rect {
            origin: self.origin,
            size: self.size.max(Vec2::ZERO),
        }
    }
}

/// A closed collision outline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Rectangle outline
    Rect(Rect),
    /// Ellipse inscribed in the given rectangle
    Oval(Rect),
    /// Arbitrary closed polygon (last point connects back to the first)
    Path(Vec<Vec2>),
}

impl Shape {
    /// Signed distance from `p` to the outline (negative inside)
    pub fn signed_distance(&self, p: Vec2) -> f32 {
        match self {
            Shape::Rect(rect) => sd_box(p, rect.center(), rect.half_extents()),
            Shape::Oval(rect) => sd_ellipse(p, rect.center(), rect.half_extents()),
            Shape::Path(points) => sd_polygon(p, points),
        }
    }
}

/// Signed distance to an axis-aligned box
#[inline]
pub fn sd_box(p: Vec2, center: Vec2, half: Vec2) -> f32 {
    let d = (p - center).abs() - half;
    d.max(Vec2::ZERO).length() + d.x.max(d.y).min(0.0)
}

/// Approximate signed distance to an axis-aligned ellipse
///
/// Exact on the axes, a close bound elsewhere. A degenerate ellipse (zero
/// radius on an axis) collapses to the segment it spans.
pub fn sd_ellipse(p: Vec2, center: Vec2, radii: Vec2) -> f32 {
    if radii.x <= f32::EPSILON || radii.y <= f32::EPSILON {
        return sd_box(p, center, radii.max(Vec2::ZERO));
    }
    let q = p - center;
    let k0 = (q / radii).length();
    let k1 = (q / (radii * radii)).length();
    if k1 < f32::EPSILON {
        // At the center
        return -radii.x.min(radii.y);
    }
    k0 * (k0 - 1.0) / k1
}

/// Signed distance to a closed polygon (winding-independent)
pub fn sd_polygon(p: Vec2, points: &[Vec2]) -> f32 {
    let n = points.len();
    if n == 0 {
        return f32::MAX;
    }
    if n == 1 {
        return (p - points[0]).length();
    }

    let mut dist_sq = (p - points[0]).length_squared();
    let mut sign = 1.0;
    let mut j = n - 1;
    for i in 0..n {
        let edge = points[j] - points[i];
        let to_p = p - points[i];
        let edge_len_sq = edge.length_squared();
        let t = if edge_len_sq > f32::EPSILON {
            (to_p.dot(edge) / edge_len_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };
        dist_sq = dist_sq.min((to_p - edge * t).length_squared());

        // Crossing number test
        let above = p.y >= points[i].y;
        let below = p.y < points[j].y;
        let left = edge.x * to_p.y > edge.y * to_p.x;
        if (above && below && left) || (!above && !below && !left) {
            sign = -sign;
        }
        j = i;
    }
    sign * dist_sq.sqrt()
}

/// Compute SDF gradient (surface normal) using central differences
pub fn sdf_gradient<F>(p: Vec2, sdf: F) -> Vec2
where
    F: Fn(Vec2) -> f32,
{
    let eps = 0.5;
    let dx = sdf(p + Vec2::new(eps, 0.0)) - sdf(p - Vec2::new(eps, 0.0));
    let dy = sdf(p + Vec2::new(0.0, eps)) - sdf(p - Vec2::new(0.0, eps));
    Vec2::new(dx, dy).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.intersects(&Rect::new(10.0, 0.0, 5.0, 5.0))); // touching edge only
        assert!(!a.intersects(&Rect::new(20.0, 20.0, 1.0, 1.0)));
    }

    #[test]
    fn test_sd_box() {
        let c = Vec2::new(50.0, 50.0);
        let half = Vec2::new(10.0, 5.0);
        assert!((sd_box(Vec2::new(70.0, 50.0), c, half) - 10.0).abs() < 1e-4);
        assert!((sd_box(Vec2::new(50.0, 50.0), c, half) + 5.0).abs() < 1e-4);
        // Corner region: distance to the corner point
        let d = sd_box(Vec2::new(63.0, 59.0), c, half);
        assert!((d - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_sd_ellipse_on_axes() {
        let c = Vec2::ZERO;
        let r = Vec2::new(40.0, 5.0);
        assert!(sd_ellipse(Vec2::new(0.0, -5.0), c, r).abs() < 1e-4);
        assert!((sd_ellipse(Vec2::new(0.0, -21.0), c, r) - 16.0).abs() < 1e-3);
        assert!((sd_ellipse(Vec2::new(50.0, 0.0), c, r) - 10.0).abs() < 1e-3);
        assert!(sd_ellipse(Vec2::new(1.0, 1.0), c, r) < 0.0);
    }

    #[test]
    fn test_sd_ellipse_degenerate() {
        // Zero-height oval behaves like a segment
        let d = sd_ellipse(Vec2::new(0.0, 3.0), Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert!((d - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_sd_polygon_square() {
        let square = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        assert!((sd_polygon(Vec2::new(5.0, 5.0), &square) + 5.0).abs() < 1e-4);
        assert!((sd_polygon(Vec2::new(15.0, 5.0), &square) - 5.0).abs() < 1e-4);

        // Opposite winding gives the same field
        let mut reversed = square.clone();
        reversed.reverse();
        assert!((sd_polygon(Vec2::new(5.0, 5.0), &reversed) + 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_gradient_points_outward() {
        let shape = Shape::Rect(Rect::new(0.0, 0.0, 100.0, 20.0));
        let n = sdf_gradient(Vec2::new(50.0, -5.0), |p| shape.signed_distance(p));
        assert!((n - Vec2::new(0.0, -1.0)).length() < 1e-3);
    }
}
