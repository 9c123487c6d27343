//! Byte RGBA color.

use super::Vector4;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Four 8-bit channels, the per-vertex color format.
///
/// Arithmetic wraps on overflow. Byte colors are kept out of the float
/// pipeline; convert with [`Rgba8::to_vector4`] when blending is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0, 255, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255, 255);

    /// Create a new color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from three channels.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Convert to an array.
    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Quantize a float color with channels in `[0, 1]`.
    pub fn from_vector4(c: &Vector4) -> Self {
        let q = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(q(c.x), q(c.y), q(c.z), q(c.w))
    }

    /// Channels as floats in `[0, 1]`.
    pub fn to_vector4(&self) -> Vector4 {
        Vector4::new(
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
            self.a as f64 / 255.0,
        )
    }
}

impl Add for Rgba8 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.r.wrapping_add(rhs.r),
            self.g.wrapping_add(rhs.g),
            self.b.wrapping_add(rhs.b),
            self.a.wrapping_add(rhs.a),
        )
    }
}

impl Sub for Rgba8 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.r.wrapping_sub(rhs.r),
            self.g.wrapping_sub(rhs.g),
            self.b.wrapping_sub(rhs.b),
            self.a.wrapping_sub(rhs.a),
        )
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from(a: [u8; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapping_add() {
        let c = Rgba8::new(250, 0, 0, 255) + Rgba8::new(10, 1, 0, 1);
        assert_eq!(c, Rgba8::new(4, 1, 0, 0));
    }

    #[test]
    fn test_quantize() {
        let c = Rgba8::from_vector4(&Vector4::new(1.0, 0.5, -1.0, 2.0));
        assert_eq!(c, Rgba8::new(255, 128, 0, 255));
        assert_eq!(Rgba8::default(), Rgba8::WHITE);
    }
}
