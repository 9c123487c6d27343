//! 3x3 Matrix implementation.

use super::{Matrix4, Vector3};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// A 3x3 matrix stored in column-major order.
/// Used for rotations, normal transformations and Euler-angle conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Matrix3 {
    /// Matrix elements in column-major order.
    /// [m00, m10, m20, m01, m11, m21, m02, m12, m22]
    pub elements: [f64; 9],
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix3 {
    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        elements: [
            1.0, 0.0, 0.0,
            0.0, 1.0, 0.0,
            0.0, 0.0, 1.0,
        ],
    };

    /// Zero matrix.
    pub const ZERO: Self = Self {
        elements: [0.0; 9],
    };

    /// Create a new Matrix3 from elements in row-major order.
    #[inline]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        m00: f64, m01: f64, m02: f64,
        m10: f64, m11: f64, m12: f64,
        m20: f64, m21: f64, m22: f64,
    ) -> Self {
        Self {
            elements: [
                m00, m10, m20,
                m01, m11, m21,
                m02, m12, m22,
            ],
        }
    }

    /// Create from column-major array.
    #[inline]
    pub const fn from_cols_array(elements: [f64; 9]) -> Self {
        Self { elements }
    }

    /// Create from three column vectors.
    #[inline]
    pub const fn from_cols(c0: Vector3, c1: Vector3, c2: Vector3) -> Self {
        Self {
            elements: [c0.x, c0.y, c0.z, c1.x, c1.y, c1.z, c2.x, c2.y, c2.z],
        }
    }

    /// Diagonal matrix.
    #[inline]
    pub const fn diagonal(d: Vector3) -> Self {
        Self {
            elements: [
                d.x, 0.0, 0.0,
                0.0, d.y, 0.0,
                0.0, 0.0, d.z,
            ],
        }
    }

    /// Scale matrix.
    #[inline]
    pub const fn scale(s: Vector3) -> Self {
        Self::diagonal(s)
    }

    /// Rotation of `angle` radians around `axis`. The axis is normalized internally.
    pub fn rotate(angle: f64, axis: &Vector3) -> Self {
        let a = axis.normalized();
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        Self {
            elements: [
                t * a.x * a.x + c,
                t * a.x * a.y + s * a.z,
                t * a.x * a.z - s * a.y,
                t * a.x * a.y - s * a.z,
                t * a.y * a.y + c,
                t * a.y * a.z + s * a.x,
                t * a.x * a.z + s * a.y,
                t * a.y * a.z - s * a.x,
                t * a.z * a.z + c,
            ],
        }
    }

    /// Element at (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.elements[col * 3 + row]
    }

    /// Set element at (row, col).
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> &mut Self {
        self.elements[col * 3 + row] = value;
        self
    }

    /// Column as a vector.
    #[inline]
    pub fn column(&self, col: usize) -> Vector3 {
        let e = &self.elements;
        Vector3::new(e[col * 3], e[col * 3 + 1], e[col * 3 + 2])
    }

    /// Row as a vector.
    #[inline]
    pub fn row(&self, row: usize) -> Vector3 {
        let e = &self.elements;
        Vector3::new(e[row], e[3 + row], e[6 + row])
    }

    /// Replace a column.
    #[inline]
    pub fn set_column(&mut self, col: usize, v: &Vector3) -> &mut Self {
        self.elements[col * 3] = v.x;
        self.elements[col * 3 + 1] = v.y;
        self.elements[col * 3 + 2] = v.z;
        self
    }

    /// Replace a row.
    #[inline]
    pub fn set_row(&mut self, row: usize, v: &Vector3) -> &mut Self {
        self.elements[row] = v.x;
        self.elements[3 + row] = v.y;
        self.elements[6 + row] = v.z;
        self
    }

    /// Extract upper-left 3x3 from a Matrix4.
    pub fn from_matrix4(m: &Matrix4) -> Self {
        let me = &m.elements;
        Self {
            elements: [
                me[0], me[1], me[2],
                me[4], me[5], me[6],
                me[8], me[9], me[10],
            ],
        }
    }

    /// Normal matrix of a Matrix4 (inverse transpose of the upper-left 3x3).
    /// Falls back to the plain 3x3 block when it is singular.
    pub fn normal_matrix(m: &Matrix4) -> Self {
        let upper = Self::from_matrix4(m);
        if upper.determinant() == 0.0 {
            return upper;
        }
        upper.inverted().transposed()
    }

    /// Multiply this matrix by another.
    pub fn multiply(&self, other: &Matrix3) -> Self {
        let a = &self.elements;
        let b = &other.elements;

        Self {
            elements: [
                a[0] * b[0] + a[3] * b[1] + a[6] * b[2],
                a[1] * b[0] + a[4] * b[1] + a[7] * b[2],
                a[2] * b[0] + a[5] * b[1] + a[8] * b[2],

                a[0] * b[3] + a[3] * b[4] + a[6] * b[5],
                a[1] * b[3] + a[4] * b[4] + a[7] * b[5],
                a[2] * b[3] + a[5] * b[4] + a[8] * b[5],

                a[0] * b[6] + a[3] * b[7] + a[6] * b[8],
                a[1] * b[6] + a[4] * b[7] + a[7] * b[8],
                a[2] * b[6] + a[5] * b[7] + a[8] * b[8],
            ],
        }
    }

    /// Calculate the determinant.
    pub fn determinant(&self) -> f64 {
        let e = &self.elements;
        e[0] * (e[4] * e[8] - e[5] * e[7])
            - e[3] * (e[1] * e[8] - e[2] * e[7])
            + e[6] * (e[1] * e[5] - e[2] * e[4])
    }

    /// Return the inverse of this matrix, or the zero matrix when the
    /// determinant is exactly zero.
    pub fn inverted(&self) -> Self {
        let e = &self.elements;
        let a00 = e[0]; let a01 = e[3]; let a02 = e[6];
        let a10 = e[1]; let a11 = e[4]; let a12 = e[7];
        let a20 = e[2]; let a21 = e[5]; let a22 = e[8];

        let b01 = a22 * a11 - a12 * a21;
        let b11 = -a22 * a10 + a12 * a20;
        let b21 = a21 * a10 - a11 * a20;

        let det = a00 * b01 + a01 * b11 + a02 * b21;

        if det == 0.0 {
            return Self::ZERO;
        }

        let inv_det = 1.0 / det;

        Self {
            elements: [
                b01 * inv_det,
                b11 * inv_det,
                b21 * inv_det,
                (-a22 * a01 + a02 * a21) * inv_det,
                (a22 * a00 - a02 * a20) * inv_det,
                (-a21 * a00 + a01 * a20) * inv_det,
                (a12 * a01 - a02 * a11) * inv_det,
                (-a12 * a00 + a02 * a10) * inv_det,
                (a11 * a00 - a01 * a10) * inv_det,
            ],
        }
    }

    /// Return the transpose of this matrix.
    pub fn transposed(&self) -> Self {
        let mut m = *self;
        m.elements.swap(1, 3);
        m.elements.swap(2, 6);
        m.elements.swap(5, 7);
        m
    }

    /// Transform a Vector3 by this matrix.
    pub fn transform_vector(&self, v: &Vector3) -> Vector3 {
        let e = &self.elements;
        Vector3 {
            x: e[0] * v.x + e[3] * v.y + e[6] * v.z,
            y: e[1] * v.x + e[4] * v.y + e[7] * v.z,
            z: e[2] * v.x + e[5] * v.y + e[8] * v.z,
        }
    }

    /// Check if approximately equal to another matrix.
    pub fn approx_eq(&self, other: &Matrix3, epsilon: f64) -> bool {
        self.elements.iter()
            .zip(other.elements.iter())
            .all(|(a, b)| (a - b).abs() < epsilon)
    }

    /// Narrow to single precision, column-major.
    pub fn to_f32_array(&self) -> [f32; 9] {
        self.elements.map(|e| e as f32)
    }
}

impl std::ops::Mul for Matrix3 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl std::ops::Mul<Vector3> for Matrix3 {
    type Output = Vector3;
    fn mul(self, rhs: Vector3) -> Vector3 {
        self.transform_vector(&rhs)
    }
}

impl From<Matrix4> for Matrix3 {
    fn from(m: Matrix4) -> Self {
        Self::from_matrix4(&m)
    }
}

impl From<glam::DMat3> for Matrix3 {
    fn from(m: glam::DMat3) -> Self {
        Self { elements: m.to_cols_array() }
    }
}

impl From<Matrix3> for glam::DMat3 {
    fn from(m: Matrix3) -> Self {
        glam::DMat3::from_cols_array(&m.elements)
    }
}

impl From<Matrix3> for glam::Mat3 {
    fn from(m: Matrix3) -> Self {
        glam::Mat3::from_cols_array(&m.to_f32_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_roundtrip() {
        let m = Matrix3::new(2.0, 0.0, 1.0, 1.0, 3.0, 0.0, 0.0, 1.0, 4.0);
        assert!((m.inverted() * m).approx_eq(&Matrix3::IDENTITY, 1e-12));
    }

    #[test]
    fn test_singular_inverse_is_zero() {
        let m = Matrix3::new(1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 0.0, 1.0, 1.0);
        assert_eq!(m.inverted(), Matrix3::ZERO);
    }

    #[test]
    fn test_rotate_normalizes_axis() {
        let a = Matrix3::rotate(0.7, &Vector3::new(0.0, 0.0, 5.0));
        let b = Matrix3::rotate(0.7, &Vector3::UNIT_Z);
        assert!(a.approx_eq(&b, 1e-12));
    }

    #[test]
    fn test_row_column_views() {
        let m = Matrix3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0);
        assert_eq!(m.get(0, 2), 3.0);
        assert_eq!(m.row(1), Vector3::new(4.0, 5.0, 6.0));
        assert_eq!(m.column(0), Vector3::new(1.0, 4.0, 7.0));
        assert_eq!(m.transposed().transposed(), m);
    }
}
