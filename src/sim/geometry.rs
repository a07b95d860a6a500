//! Axis-aligned rectangle geometry for the paddle, ball and blocks
//!
//! A rect is defined by its center and full size. The y axis points up and
//! the field origin is the bottom-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Center point
    pub center: Vec2,
    /// Full width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Build a rect from its bottom-left corner and size
    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self {
            center: min + size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn half_size(&self) -> Vec2 {
        self.size / 2.0
    }

    /// Bottom-left corner
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_size()
    }

    /// Top-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_size()
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Strict overlap test (touching edges do not count)
    pub fn intersects(&self, other: &Rect) -> bool {
        let d = (self.center - other.center).abs();
        let reach = self.half_size() + other.half_size();
        d.x < reach.x && d.y < reach.y
    }

    /// Minimum translation that moves `self` out of `other`.
    ///
    /// Returns `None` when the rects do not overlap. The vector is axis
    /// aligned, along whichever axis has the smaller penetration.
    pub fn separation_from(&self, other: &Rect) -> Option<Separation> {
        if !self.intersects(other) {
            return None;
        }
        let delta = self.center - other.center;
        let reach = self.half_size() + other.half_size();
        let overlap = reach - delta.abs();

        // Exactly concentric rects push upward
        let sign = |v: f32| if v < 0.0 { -1.0 } else { 1.0 };

        if overlap.x < overlap.y {
            Some(Separation {
                normal: Vec2::new(sign(delta.x), 0.0),
                depth: overlap.x,
            })
        } else {
            Some(Separation {
                normal: Vec2::new(0.0, sign(delta.y)),
                depth: overlap.y,
            })
        }
    }
}

/// Result of an overlap query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Separation {
    /// Unit axis pointing from the other rect toward this one
    pub normal: Vec2,
    /// Penetration depth along `normal`
    pub depth: f32,
}
