//! Pixel rectangle a camera renders into.

use crate::math::Vector2;
use serde::{Deserialize, Serialize};

/// Viewport in window pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// Left edge.
    pub x: i32,
    /// Bottom edge.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Create a new viewport.
    #[inline]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Viewport anchored at the origin.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// `width / height`, or 0 for a zero-height viewport.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            0.0
        } else {
            self.width as f64 / self.height as f64
        }
    }

    /// Size as a vector.
    #[inline]
    pub fn size(&self) -> Vector2 {
        Vector2::new(self.width as f64, self.height as f64)
    }

    /// True when the window point lies inside the viewport.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (x0, y0) = (self.x as f64, self.y as f64);
        x >= x0 && y >= y0 && x < x0 + self.width as f64 && y < y0 + self.height as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(Viewport::from_size(1920, 1080).aspect_ratio(), 1920.0 / 1080.0);
        assert_eq!(Viewport::from_size(640, 0).aspect_ratio(), 0.0);
    }

    #[test]
    fn test_contains() {
        let vp = Viewport::new(10, 20, 100, 50);
        assert!(vp.contains(10.0, 20.0));
        assert!(!vp.contains(110.0, 30.0));
        assert_eq!(vp.size(), Vector2::new(100.0, 50.0));
    }
}
