//! Axis-aligned motion body shared by every actor
//!
//! Position is the top-left corner of the box, velocity is in px/s.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A plain axis-aligned rectangle (goal zones, query boxes)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Position, velocity and box of a simulated actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionBody {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub alive: bool,
    pub on_ground: bool,
}

impl MotionBody {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            size: Vec2::new(w, h),
            alive: true,
            on_ground: false,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Strict AABB overlap (touching edges do not count)
    pub fn overlaps(&self, other: &MotionBody) -> bool {
        !(self.right() <= other.left()
            || self.left() >= other.right()
            || self.bottom() <= other.top()
            || self.top() >= other.bottom())
    }

    /// Inclusive test against a rectangle (touching counts)
    pub fn touches(&self, rect: &Rect) -> bool {
        !(self.right() < rect.pos.x
            || self.left() > rect.right()
            || self.bottom() < rect.pos.y
            || self.top() > rect.bottom())
    }

    /// Apply gravity to vertical velocity, clamped to the terminal fall speed
    pub fn apply_gravity(&mut self, gravity: f32, max_fall: f32, dt: f32) {
        self.vel.y = (self.vel.y + gravity * dt).min(max_fall);
    }
}
