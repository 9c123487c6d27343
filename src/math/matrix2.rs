//! 2x2 Matrix implementation.

use super::Vector2;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// A 2x2 matrix stored in column-major order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Matrix2 {
    /// Matrix elements in column-major order.
    /// [m00, m10, m01, m11]
    pub elements: [f64; 4],
}

impl Default for Matrix2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix2 {
    /// Identity matrix.
    pub const IDENTITY: Self = Self { elements: [1.0, 0.0, 0.0, 1.0] };

    /// Zero matrix.
    pub const ZERO: Self = Self { elements: [0.0; 4] };

    /// Create a new Matrix2 from elements in row-major order.
    #[inline]
    pub const fn new(m00: f64, m01: f64, m10: f64, m11: f64) -> Self {
        Self { elements: [m00, m10, m01, m11] }
    }

    /// Create from column-major array.
    #[inline]
    pub const fn from_cols_array(elements: [f64; 4]) -> Self {
        Self { elements }
    }

    /// Diagonal matrix.
    #[inline]
    pub const fn diagonal(d: Vector2) -> Self {
        Self { elements: [d.x, 0.0, 0.0, d.y] }
    }

    /// Scale matrix.
    #[inline]
    pub const fn scale(s: Vector2) -> Self {
        Self::diagonal(s)
    }

    /// Counter-clockwise rotation in the plane.
    pub fn rotate(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(c, -s, s, c)
    }

    /// Element at (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.elements[col * 2 + row]
    }

    /// Set element at (row, col).
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> &mut Self {
        self.elements[col * 2 + row] = value;
        self
    }

    /// Column as a vector.
    #[inline]
    pub fn column(&self, col: usize) -> Vector2 {
        Vector2::new(self.elements[col * 2], self.elements[col * 2 + 1])
    }

    /// Row as a vector.
    #[inline]
    pub fn row(&self, row: usize) -> Vector2 {
        Vector2::new(self.elements[row], self.elements[2 + row])
    }

    /// Calculate the determinant.
    #[inline]
    pub fn determinant(&self) -> f64 {
        let e = &self.elements;
        e[0] * e[3] - e[2] * e[1]
    }

    /// Return the inverse, or the zero matrix when the determinant is exactly zero.
    pub fn inverted(&self) -> Self {
        let det = self.determinant();
        if det == 0.0 {
            return Self::ZERO;
        }
        let inv = 1.0 / det;
        let e = &self.elements;
        Self { elements: [e[3] * inv, -e[1] * inv, -e[2] * inv, e[0] * inv] }
    }

    /// Return the transpose of this matrix.
    #[inline]
    pub fn transposed(&self) -> Self {
        let e = &self.elements;
        Self { elements: [e[0], e[2], e[1], e[3]] }
    }

    /// Multiply this matrix by another.
    pub fn multiply(&self, other: &Matrix2) -> Self {
        let a = &self.elements;
        let b = &other.elements;
        Self {
            elements: [
                a[0] * b[0] + a[2] * b[1],
                a[1] * b[0] + a[3] * b[1],
                a[0] * b[2] + a[2] * b[3],
                a[1] * b[2] + a[3] * b[3],
            ],
        }
    }

    /// Transform a vector.
    #[inline]
    pub fn transform(&self, v: &Vector2) -> Vector2 {
        let e = &self.elements;
        Vector2::new(e[0] * v.x + e[2] * v.y, e[1] * v.x + e[3] * v.y)
    }

    /// Check if approximately equal to another matrix.
    pub fn approx_eq(&self, other: &Matrix2, epsilon: f64) -> bool {
        self.elements.iter().zip(other.elements.iter()).all(|(a, b)| (a - b).abs() < epsilon)
    }

    /// Narrow to single precision, column-major.
    pub fn to_f32_array(&self) -> [f32; 4] {
        self.elements.map(|e| e as f32)
    }
}

impl Mul for Matrix2 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl Mul<Vector2> for Matrix2 {
    type Output = Vector2;
    fn mul(self, rhs: Vector2) -> Vector2 {
        self.transform(&rhs)
    }
}

impl From<glam::DMat2> for Matrix2 {
    fn from(m: glam::DMat2) -> Self {
        Self { elements: m.to_cols_array() }
    }
}

impl From<Matrix2> for glam::DMat2 {
    fn from(m: Matrix2) -> Self {
        glam::DMat2::from_cols_array(&m.elements)
    }
}

impl From<Matrix2> for glam::Mat2 {
    fn from(m: Matrix2) -> Self {
        glam::Mat2::from_cols_array(&m.to_f32_array())
    }
}
