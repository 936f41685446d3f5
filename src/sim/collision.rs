//! Collision detection
//!
//! Everything on screen is an axis-aligned box, so collision is a plain
//! rectangle overlap test. Touching edges count as a hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle from a top-left corner and a size
    #[inline]
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, pos.x + size.x, pos.y + size.y)
    }

    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        intersects(self, other)
    }
}

/// Two rectangles overlap unless one lies strictly beside, above or below the other
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    !(b.left > a.right || b.right < a.left || b.top > a.bottom || b.bottom < a.top)
}

/// A detected overlap between two entities (by id)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    EnemyLaser { laser: u32, enemy: u32 },
    EnemyHero { enemy: u32 },
}
