//! The player's paddle

use serde::{Deserialize, Serialize};

use super::geometry::{Rect, Shape};
use crate::clamp_low;
use crate::consts::*;

/// Horizontal paddle; its collision outline is the inscribed oval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
}

impl Paddle {
    /// Paddle centered horizontally near the bottom of `field`
    pub fn for_field(field: &Rect) -> Self {
        let width = (field.width() * PADDLE_WIDTH_FRACTION).max(0.0);
        let x = field.mid_x() - width / 2.0;
        Self {
            rect: Rect::new(x, top_for_field(field), width, PADDLE_HEIGHT),
        }
    }

    /// Move onto a relaid `field`, keeping width and horizontal position
    pub fn fit_to_field(&mut self, field: &Rect) {
        self.rect.origin.y = top_for_field(field);
        self.clamp_into(field);
    }

    /// Move horizontally by `dx`, keeping the paddle within the field
    pub fn move_by(&mut self, dx: f32, field: &Rect) {
        self.rect.origin.x += dx;
        self.clamp_into(field);
    }

    /// Lose a quarter of the width; the left edge stays put
    pub fn shrink(&mut self, field: &Rect) {
        self.rect.size.x -= self.rect.size.x * PADDLE_SHRINK_FRACTION;
        self.clamp_into(field);
    }

    /// Keep the paddle between the left and right field edges
    pub fn clamp_into(&mut self, field: &Rect) {
        let max_x = field.max_x() - self.rect.width();
        self.rect.origin.x = clamp_low(self.rect.origin.x, field.min_x(), max_x);
    }

    pub fn width(&self) -> f32 {
        self.rect.width()
    }

    pub fn top(&self) -> f32 {
        self.rect.min_y()
    }

    pub fn boundary_shape(&self) -> Shape {
        Shape::Oval(self.rect)
    }
}

/// Paddle top for `field`, pinned to the field top when it is too short
fn top_for_field(field: &Rect) -> f32 {
    let y = field.max_y() - PADDLE_HEIGHT - PADDLE_BOTTOM_INDENT;
    if y < field.min_y() {
        log::warn!(
            "field height {} too small for paddle indent, pinning paddle to top",
            field.height()
        );
        return field.min_y();
    }
    y
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> Rect {
        Rect::new(0.0, 0.0, 320.0, 519.0)
    }

    #[test]
    fn test_reset_geometry() {
        let paddle = Paddle::for_field(&field());
        assert_eq!(paddle.width(), 64.0);
        assert_eq!(paddle.rect.min_x(), 128.0);
        assert_eq!(paddle.top(), 519.0 - 10.0 - 75.0);
    }

    #[test]
    fn test_move_is_clamped() {
        let mut paddle = Paddle::for_field(&field());
        paddle.move_by(-1000.0, &field());
        assert_eq!(paddle.rect.min_x(), 0.0);
        paddle.move_by(1000.0, &field());
        assert_eq!(paddle.rect.max_x(), 320.0);
        paddle.move_by(-10.0, &field());
        assert_eq!(paddle.rect.max_x(), 310.0);
    }

    #[test]
    fn test_shrink_by_quarter() {
        let mut paddle = Paddle::for_field(&field());
        paddle.shrink(&field());
        assert_eq!(paddle.width(), 48.0);
        assert_eq!(paddle.rect.min_x(), 128.0);
        paddle.shrink(&field());
        assert_eq!(paddle.width(), 36.0);
    }

    #[test]
    fn test_tiny_field_pins_paddle() {
        let tiny = Rect::new(0.0, 0.0, 50.0, 20.0);
        let paddle = Paddle::for_field(&tiny);
        assert_eq!(paddle.top(), 0.0);
        assert!(paddle.width() <= 50.0);
    }

    #[test]
    fn test_fit_to_rotated_field() {
        let mut paddle = Paddle::for_field(&field());
        paddle.shrink(&field());
        paddle.move_by(200.0, &field());

        let rotated = Rect::new(0.0, 0.0, 519.0, 320.0);
        paddle.fit_to_field(&rotated);
        assert_eq!(paddle.width(), 48.0);
        assert_eq!(paddle.rect.max_x(), 320.0);
        assert_eq!(paddle.top(), 320.0 - 10.0 - 75.0);
        assert!(rotated.contains_rect(&paddle.rect));

        let narrow = Rect::new(0.0, 0.0, 200.0, 519.0);
        paddle.fit_to_field(&narrow);
        assert_eq!(paddle.rect.max_x(), 200.0);
    }
}
