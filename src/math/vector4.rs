//! 4D Vector implementation.

use super::Vector3;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Index, IndexMut, Mul, Neg, Sub};

/// A 4D vector with x, y, z, and w components.
/// Used for homogeneous coordinates and RGBA colors.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Vector4 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
    /// W component.
    pub w: f64,
}

impl Vector4 {
    /// Zero vector (0, 0, 0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 0.0 };
    /// One vector (1, 1, 1, 1).
    pub const ONE: Self = Self { x: 1.0, y: 1.0, z: 1.0, w: 1.0 };

    /// Create a new Vector4.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Create from a Vector3 and a w component.
    #[inline]
    pub const fn from_vec3(v: Vector3, w: f64) -> Self {
        Self { x: v.x, y: v.y, z: v.z, w }
    }

    /// Create from an array.
    #[inline]
    pub const fn from_array(a: [f64; 4]) -> Self {
        Self { x: a[0], y: a[1], z: a[2], w: a[3] }
    }

    /// Convert to an array.
    #[inline]
    pub const fn to_array(self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Narrow to single precision.
    #[inline]
    pub fn to_f32_array(self) -> [f32; 4] {
        [self.x as f32, self.y as f32, self.z as f32, self.w as f32]
    }

    /// Get the xyz components.
    #[inline]
    pub const fn xyz(&self) -> Vector3 {
        Vector3 { x: self.x, y: self.y, z: self.z }
    }

    /// Project back from homogeneous coordinates (divide by w).
    /// Returns xyz unchanged when w is zero.
    #[inline]
    pub fn project(&self) -> Vector3 {
        if self.w == 0.0 {
            self.xyz()
        } else {
            self.xyz() / self.w
        }
    }

    /// Color alias for `x`.
    #[inline]
    pub const fn r(&self) -> f64 {
        self.x
    }

    /// Color alias for `y`.
    #[inline]
    pub const fn g(&self) -> f64 {
        self.y
    }

    /// Color alias for `z`.
    #[inline]
    pub const fn b(&self) -> f64 {
        self.z
    }

    /// Color alias for `w`.
    #[inline]
    pub const fn a(&self) -> f64 {
        self.w
    }

    /// Dot product.
    #[inline]
    pub fn dot(&self, other: &Vector4) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Get the length of the vector.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Get the squared length.
    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.dot(self)
    }

    /// Return a normalized copy. Zero vectors are returned unchanged.
    #[inline]
    pub fn normalized(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            *self * (1.0 / len)
        } else {
            *self
        }
    }

    /// Linear interpolation.
    #[inline]
    pub fn lerp(&self, other: &Vector4, t: f64) -> Self {
        *self + (*other - *self) * t
    }

    /// Check if approximately equal.
    #[inline]
    pub fn approx_eq(&self, other: &Vector4, epsilon: f64) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
            && (self.w - other.w).abs() < epsilon
    }
}

impl Add for Vector4 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl Sub for Vector4 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w - rhs.w)
    }
}

impl Mul<f64> for Vector4 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

impl Mul<Vector4> for f64 {
    type Output = Vector4;
    #[inline]
    fn mul(self, rhs: Vector4) -> Vector4 {
        rhs * self
    }
}

impl Neg for Vector4 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl Index<usize> for Vector4 {
    type Output = f64;
    fn index(&self, i: usize) -> &f64 {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("Vector4 index out of range: {i}"),
        }
    }
}

impl IndexMut<usize> for Vector4 {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        match i {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            3 => &mut self.w,
            _ => panic!("Vector4 index out of range: {i}"),
        }
    }
}

impl From<[f64; 4]> for Vector4 {
    fn from(a: [f64; 4]) -> Self {
        Self::from_array(a)
    }
}

impl From<glam::DVec4> for Vector4 {
    fn from(v: glam::DVec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Vector4> for glam::DVec4 {
    fn from(v: Vector4) -> Self {
        glam::DVec4::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Vector4> for glam::Vec4 {
    fn from(v: Vector4) -> Self {
        glam::Vec4::from_array(v.to_f32_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project() {
        let v = Vector4::new(2.0, 4.0, 6.0, 2.0);
        assert!(v.project().approx_eq(&Vector3::new(1.0, 2.0, 3.0), 1e-12));
    }
}
