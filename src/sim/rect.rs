//! Axis-aligned rectangles
//!
//! Every collision question in the game reduces to "do these two boxes
//! overlap". Overlap is strict: boxes that only share an edge do not touch.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box in world units (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap test
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        other.x < self.x + self.w
            && other.x + other.w > self.x
            && other.y < self.y + self.h
            && other.y + other.h > self.y
    }

    /// Horizontal spans overlap (ignores y)
    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.x + self.w > other.x && self.x < other.x + other.w
    }

    /// True if `other` lies entirely within `self`
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.right() <= self.right()
            && other.y >= self.y
            && other.bottom() <= self.bottom()
    }

    /// Shrink by independent amounts per edge
    pub fn inset(&self, left: f32, top: f32, right: f32, bottom: f32) -> Rect {
        Rect::new(
            self.x + left,
            self.y + top,
            self.w - left - right,
            self.h - top - bottom,
        )
    }

    pub fn translated(&self, delta: Vec2) -> Rect {
        Rect::new(self.x + delta.x, self.y + delta.y, self.w, self.h)
    }
}
