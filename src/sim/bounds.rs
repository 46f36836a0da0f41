//! World rectangle
//!
//! The visible world is one unit tall and centred on the origin, y pointing
//! up. Its width follows the viewport aspect ratio, so all gameplay tuning is
//! expressed in fractions of the screen height.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::WORLD_HEIGHT;

/// Axis-aligned world rectangle (centre + half extents)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub center: Vec2,
    pub half_size: Vec2,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self::from_aspect(9.0 / 16.0)
    }
}

impl WorldBounds {
    pub fn new(center: Vec2, half_size: Vec2) -> Self {
        Self { center, half_size }
    }

    /// World of unit height whose width is `aspect` (width / height)
    pub fn from_aspect(aspect: f32) -> Self {
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
        Self {
            center: Vec2::ZERO,
            half_size: Vec2::new(WORLD_HEIGHT * aspect / 2.0, WORLD_HEIGHT / 2.0),
        }
    }

    /// World matching a viewport in pixels
    pub fn from_viewport(width: u32, height: u32) -> Self {
        if height == 0 {
            return Self::default();
        }
        Self::from_aspect(width as f32 / height as f32)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.half_size.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.half_size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y + self.half_size.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y - self.half_size.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.half_size.x * 2.0
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.half_size.y * 2.0
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.bottom() && p.y <= self.top()
    }

    /// True when a circle has fully left the rectangle
    pub fn is_outside(&self, center: Vec2, radius: f32) -> bool {
        center.x + radius < self.left()
            || center.x - radius > self.right()
            || center.y + radius < self.bottom()
            || center.y - radius > self.top()
    }

    /// Convert a pixel position (origin top-left, y down) into world space
    pub fn screen_to_world(&self, x: f32, y: f32, viewport: (f32, f32)) -> Vec2 {
        let (w, h) = viewport;
        if w <= 0.0 || h <= 0.0 {
            return self.center;
        }
        Vec2::new(
            self.left() + x / w * self.width(),
            self.top() - y / h * self.height(),
        )
    }
}
