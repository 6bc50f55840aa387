//! Brick field: level layouts, placement, hit rules and removal
//!
//! Bricks are indexed 1-based, row-major. A live brick always has a boundary
//! registered under `BoundaryId::Brick(index)`; destroying it removes the
//! boundary at once, while the brick itself lingers for the cosmetic removal
//! transition before it leaves the field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::boundary::{BoundaryId, BoundaryRegistry};
use super::geometry::{Rect, Shape};
use super::timeline::Timeline;
use crate::consts::*;

/// Brick types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BrickKind {
    #[default]
    Normal,
    /// Absorbs one hit, then becomes Normal
    Solid,
    /// Shrinks the paddle when destroyed
    ShortPaddleForce,
}

impl BrickKind {
    /// Layout rule: level 1 is all Normal; later levels put Solid on row 0
    /// and ShortPaddleForce on row 1
    pub fn for_level_row(level: u32, row: u32) -> Self {
        if level <= 1 {
            return BrickKind::Normal;
        }
        match row {
            0 => BrickKind::Solid,
            1 => BrickKind::ShortPaddleForce,
            _ => BrickKind::Normal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BrickKind::Normal => "Normal",
            BrickKind::Solid => "Solid",
            BrickKind::ShortPaddleForce => "ShortPaddleForce",
        }
    }
}

/// A brick entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub index: u32,
    pub kind: BrickKind,
    /// Hit for the last time; waiting for the removal transition
    pub destroyed: bool,
    pub rect: Rect,
}

impl Brick {
    /// Zero-based row
    pub fn row(&self) -> u32 {
        (self.index - 1) / BRICK_COLUMNS
    }

    /// Zero-based column
    pub fn column(&self) -> u32 {
        (self.index - 1) % BRICK_COLUMNS
    }
}

/// What a contact did to a brick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickHit {
    Destroyed,
    /// Solid brick downgraded to Normal
    Downgraded,
    /// ShortPaddleForce brick destroyed; the paddle must shrink
    DestroyedShrinkPaddle,
    /// Unknown or already destroyed brick
    Ignored,
}

/// Field notifications for the session
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEvent {
    /// Brick placed or restyled
    Placed { index: u32, rect: Rect, kind: BrickKind },
    /// Removal transition started
    Fading { index: u32 },
    /// Brick left the field
    Removed { index: u32 },
    /// Last brick removed
    Cleared,
}

/// Grid of bricks for the current level
#[derive(Debug, Clone)]
pub struct BrickField {
    bricks: BTreeMap<u32, Brick>,
    level: u32,
    removals: Timeline<u32>,
    cleared_reported: bool,
    events: Vec<FieldEvent>,
}

impl Default for BrickField {
    fn default() -> Self {
        Self::new()
    }
}

impl BrickField {
    pub fn new() -> Self {
        Self {
            bricks: BTreeMap::new(),
            level: 1,
            removals: Timeline::new(),
            cleared_reported: false,
            events: Vec::new(),
        }
    }

    /// Current level (1-based)
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn brick(&self, index: u32) -> Option<&Brick> {
        self.bricks.get(&index)
    }

    /// Every brick still on the field, including ones fading out
    pub fn bricks(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.values()
    }

    /// Indices of bricks that can still be hit
    pub fn live_indices(&self) -> Vec<u32> {
        self.bricks
            .values()
            .filter(|b| !b.destroyed)
            .map(|b| b.index)
            .collect()
    }

    pub fn live_count(&self) -> usize {
        self.bricks.values().filter(|b| !b.destroyed).count()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    /// Clear the field and populate the grid for `level` (clamped to 1..=MAX_LEVEL).
    /// Bricks stay unregistered until the next `place`.
    pub fn build_level(&mut self, level: u32, registry: &mut BoundaryRegistry) {
        self.clear(registry);
        self.level = level.clamp(1, MAX_LEVEL);

        for row in 0..BRICK_ROWS {
            let kind = BrickKind::for_level_row(self.level, row);
            for column in 0..BRICK_COLUMNS {
                let index = row * BRICK_COLUMNS + column + 1;
                self.bricks.insert(
                    index,
                    Brick {
                        index,
                        kind,
                        destroyed: false,
                        rect: Rect::ZERO,
                    },
                );
            }
        }
        log::info!(
            "built level {} with {} bricks",
            self.level,
            self.bricks.len()
        );
    }

    /// Rebuild the current level
    pub fn rebuild(&mut self, registry: &mut BoundaryRegistry) {
        self.build_level(self.level, registry);
    }

    /// Advance to the next level (saturating at the last layout)
    pub fn build_next_level(&mut self, registry: &mut BoundaryRegistry) {
        self.build_level(self.level.saturating_add(1), registry);
    }

    fn clear(&mut self, registry: &mut BoundaryRegistry) {
        for index in self.bricks.keys() {
            registry.remove_boundary(&BoundaryId::Brick(*index));
        }
        self.bricks.clear();
        self.removals.invalidate();
        self.cleared_reported = false;
    }

    /// Lay the grid out across `field` and re-register every live brick
    pub fn place(&mut self, field: &Rect, registry: &mut BoundaryRegistry) {
        let columns = BRICK_COLUMNS as f32;
        let total_spacing = (columns + 1.0) * BRICK_SPACING;
        let width = (field.width() - total_spacing) / columns;
        let width = if width < 0.0 {
            log::warn!(
                "field width {} cannot fit {} brick columns, collapsing bricks",
                field.width(),
                BRICK_COLUMNS
            );
            0.0
        } else {
            width
        };

        for brick in self.bricks.values_mut() {
            let x = field.min_x() + BRICK_SPACING + brick.column() as f32 * (width + BRICK_SPACING);
            let y = field.min_y()
                + BRICK_SPACING
                + brick.row() as f32 * (BRICK_HEIGHT + BRICK_SPACING);
            brick.rect = Rect::new(x, y, width, BRICK_HEIGHT);

            if !brick.destroyed {
                registry.set_boundary(BoundaryId::Brick(brick.index), Shape::Rect(brick.rect));
                self.events.push(FieldEvent::Placed {
                    index: brick.index,
                    rect: brick.rect,
                    kind: brick.kind,
                });
            }
        }
    }

    /// Apply the hit rule for the brick's kind
    pub fn on_brick_contacted(&mut self, index: u32, registry: &mut BoundaryRegistry) -> BrickHit {
        let Some(brick) = self.bricks.get_mut(&index).filter(|b| !b.destroyed) else {
            log::debug!("contact with missing brick {} ignored", index);
            return BrickHit::Ignored;
        };

        let kind = brick.kind;
        match kind {
            BrickKind::Normal => {
                self.destroy(index, registry);
                BrickHit::Destroyed
            }
            BrickKind::Solid => {
                brick.kind = BrickKind::Normal;
                self.events.push(FieldEvent::Placed {
                    index,
                    rect: brick.rect,
                    kind: brick.kind,
                });
                BrickHit::Downgraded
            }
            BrickKind::ShortPaddleForce => {
                self.destroy(index, registry);
                BrickHit::DestroyedShrinkPaddle
            }
        }
    }

    /// Remove the brick's boundary and start its removal transition.
    /// Returns false for unknown or already destroyed bricks.
    pub fn destroy(&mut self, index: u32, registry: &mut BoundaryRegistry) -> bool {
        let Some(brick) = self.bricks.get_mut(&index).filter(|b| !b.destroyed) else {
            return false;
        };
        brick.destroyed = true;
        registry.remove_boundary(&BoundaryId::Brick(index));
        self.events.push(FieldEvent::Fading { index });
        self.removals.schedule(BRICK_REMOVAL_DELAY_TICKS, index);
        true
    }

    /// Advance the removal timeline by one simulation tick
    pub fn advance(&mut self) {
        for index in self.removals.advance() {
            if self.bricks.remove(&index).is_none() {
                continue;
            }
            self.events.push(FieldEvent::Removed { index });

            if self.bricks.is_empty() && !self.cleared_reported {
                self.cleared_reported = true;
                log::info!("level {} cleared", self.level);
                self.events.push(FieldEvent::Cleared);
            }
        }
    }

    pub fn drain_events(&mut self) -> Vec<FieldEvent> {
        std::mem::take(&mut self.events)
    }
}
