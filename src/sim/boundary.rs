//! Boundary registry: named collision outlines the ball can bounce off
//!
//! Bricks register under their integer index, fixed obstacles under a string
//! tag. Iteration is ordered by id so collision processing is deterministic.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::geometry::Shape;

/// Tag of the paddle boundary
pub const PADDLE_BOUNDARY: &str = "Paddle";
/// Tag of the play-field walls
pub const GAME_VIEW_BOUNDARY: &str = "GameView";

/// Boundary identifier: a brick index or a named tag
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BoundaryId {
    Brick(u32),
    Named(String),
}

impl BoundaryId {
    pub fn paddle() -> Self {
        BoundaryId::Named(PADDLE_BOUNDARY.to_string())
    }

    pub fn game_view() -> Self {
        BoundaryId::Named(GAME_VIEW_BOUNDARY.to_string())
    }

    pub fn is_paddle(&self) -> bool {
        matches!(self, BoundaryId::Named(tag) if tag == PADDLE_BOUNDARY)
    }

    pub fn brick_index(&self) -> Option<u32> {
        match self {
            BoundaryId::Brick(index) => Some(*index),
            BoundaryId::Named(_) => None,
        }
    }
}

impl fmt::Display for BoundaryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryId::Brick(index) => write!(f, "brick#{index}"),
            BoundaryId::Named(tag) => f.write_str(tag),
        }
    }
}

/// A registered collision outline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    pub shape: Shape,
    /// Normal-velocity restitution (1.0 = perfectly elastic)
    pub restitution: f32,
}

/// Registry mutation, forwarded to the UI for the debug overlay
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryChange {
    Added(BoundaryId, Shape),
    Removed(BoundaryId),
}

/// Mapping from identifier to outline; at most one boundary per id
#[derive(Debug, Clone, Default)]
pub struct BoundaryRegistry {
    boundaries: BTreeMap<BoundaryId, Boundary>,
    changes: Vec<BoundaryChange>,
}

impl BoundaryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the outline for `id`, keeping a configured restitution
    pub fn set_boundary(&mut self, id: BoundaryId, shape: Shape) {
        self.changes
            .push(BoundaryChange::Added(id.clone(), shape.clone()));
        match self.boundaries.get_mut(&id) {
            Some(existing) => existing.shape = shape,
            None => {
                self.boundaries.insert(
                    id,
                    Boundary {
                        shape,
                        restitution: 1.0,
                    },
                );
            }
        }
    }

    /// Configure a boundary-specific restitution multiplier. No-op for unknown ids.
    pub fn set_restitution(&mut self, id: &BoundaryId, restitution: f32) {
        if let Some(boundary) = self.boundaries.get_mut(id) {
            boundary.restitution = restitution.max(0.0);
        }
    }

    /// Remove the boundary if present. Returns whether anything was removed.
    pub fn remove_boundary(&mut self, id: &BoundaryId) -> bool {
        if self.boundaries.remove(id).is_some() {
            self.changes.push(BoundaryChange::Removed(id.clone()));
            true
        } else {
            false
        }
    }

    pub fn get(&self, id: &BoundaryId) -> Option<&Boundary> {
        self.boundaries.get(id)
    }

    pub fn contains(&self, id: &BoundaryId) -> bool {
        self.boundaries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Current mapping, ordered by id (bricks first, then named tags)
    pub fn iter(&self) -> impl Iterator<Item = (&BoundaryId, &Boundary)> {
        self.boundaries.iter()
    }

    /// Indices of every registered brick boundary, ascending
    pub fn brick_indices(&self) -> Vec<u32> {
        self.boundaries
            .keys()
            .filter_map(BoundaryId::brick_index)
            .collect()
    }

    /// Take the recorded add/remove notifications
    pub fn drain_changes(&mut self) -> Vec<BoundaryChange> {
        std::mem::take(&mut self.changes)
    }
}
