//! 4x4 Matrix implementation.

use super::{Matrix3, Quaternion, Vector3, Vector4};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// A 4x4 matrix stored in column-major order.
/// Used for 3D transformations (model, view, projection matrices).
///
/// The layout matches what GPU uniforms expect, so the narrowed
/// [`Matrix4::to_f32_array`] can be uploaded without transposition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Matrix4 {
    /// Matrix elements in column-major order.
    /// [m00, m10, m20, m30, m01, m11, m21, m31, m02, m12, m22, m32, m03, m13, m23, m33]
    pub elements: [f64; 16],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4 {
    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        elements: [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Zero matrix. Also the sentinel returned by [`Matrix4::inverted`] for singular input.
    pub const ZERO: Self = Self {
        elements: [0.0; 16],
    };

    /// Create a new Matrix4 from elements in row-major order.
    #[inline]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        m00: f64, m01: f64, m02: f64, m03: f64,
        m10: f64, m11: f64, m12: f64, m13: f64,
        m20: f64, m21: f64, m22: f64, m23: f64,
        m30: f64, m31: f64, m32: f64, m33: f64,
    ) -> Self {
        Self {
            elements: [
                m00, m10, m20, m30,
                m01, m11, m21, m31,
                m02, m12, m22, m32,
                m03, m13, m23, m33,
            ],
        }
    }

    /// Create from column-major array.
    #[inline]
    pub const fn from_cols_array(elements: [f64; 16]) -> Self {
        Self { elements }
    }

    /// Diagonal matrix.
    #[inline]
    pub const fn diagonal(d: Vector4) -> Self {
        Self {
            elements: [
                d.x, 0.0, 0.0, 0.0,
                0.0, d.y, 0.0, 0.0,
                0.0, 0.0, d.z, 0.0,
                0.0, 0.0, 0.0, d.w,
            ],
        }
    }

    /// Create a scale matrix.
    pub const fn scale(v: Vector3) -> Self {
        Self::diagonal(Vector4::from_vec3(v, 1.0))
    }

    /// Create a translation matrix.
    pub const fn translate(v: Vector3) -> Self {
        Self {
            elements: [
                1.0, 0.0, 0.0, 0.0,
                0.0, 1.0, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                v.x, v.y, v.z, 1.0,
            ],
        }
    }

    /// Rotation of `angle` radians around `axis`. The axis is normalized internally.
    pub fn rotate(angle: f64, axis: &Vector3) -> Self {
        Self::from_matrix3(&Matrix3::rotate(angle, axis))
    }

    /// Embed a 3x3 matrix as the upper-left block of an otherwise identity matrix.
    pub fn from_matrix3(m: &Matrix3) -> Self {
        let e = &m.elements;
        Self {
            elements: [
                e[0], e[1], e[2], 0.0,
                e[3], e[4], e[5], 0.0,
                e[6], e[7], e[8], 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Create a rotation matrix from a quaternion.
    pub fn from_quaternion(q: &Quaternion) -> Self {
        Self::compose(&Vector3::ZERO, q, &Vector3::ONE)
    }

    /// Element at (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.elements[col * 4 + row]
    }

    /// Set element at (row, col).
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> &mut Self {
        self.elements[col * 4 + row] = value;
        self
    }

    /// Column as a vector.
    #[inline]
    pub fn column(&self, col: usize) -> Vector4 {
        let e = &self.elements;
        Vector4::new(e[col * 4], e[col * 4 + 1], e[col * 4 + 2], e[col * 4 + 3])
    }

    /// Row as a vector.
    #[inline]
    pub fn row(&self, row: usize) -> Vector4 {
        let e = &self.elements;
        Vector4::new(e[row], e[4 + row], e[8 + row], e[12 + row])
    }

    /// Replace a column.
    #[inline]
    pub fn set_column(&mut self, col: usize, v: &Vector4) -> &mut Self {
        for i in 0..4 {
            self.elements[col * 4 + i] = v[i];
        }
        self
    }

    /// Replace a row.
    #[inline]
    pub fn set_row(&mut self, row: usize, v: &Vector4) -> &mut Self {
        for i in 0..4 {
            self.elements[i * 4 + row] = v[i];
        }
        self
    }

    /// Upper-left 3x3 block (rotation and scale).
    #[inline]
    pub fn get3x3(&self) -> Matrix3 {
        Matrix3::from_matrix4(self)
    }

    /// Extract the position (translation) component.
    #[inline]
    pub fn get_position(&self) -> Vector3 {
        Vector3 {
            x: self.elements[12],
            y: self.elements[13],
            z: self.elements[14],
        }
    }

    /// Set the position (translation) component.
    #[inline]
    pub fn set_position(&mut self, v: &Vector3) -> &mut Self {
        self.elements[12] = v.x;
        self.elements[13] = v.y;
        self.elements[14] = v.z;
        self
    }

    /// Compose a transformation matrix `T * R * S` from position, quaternion, and scale.
    pub fn compose(position: &Vector3, quaternion: &Quaternion, scale: &Vector3) -> Self {
        let x2 = quaternion.x + quaternion.x;
        let y2 = quaternion.y + quaternion.y;
        let z2 = quaternion.z + quaternion.z;
        let xx = quaternion.x * x2;
        let xy = quaternion.x * y2;
        let xz = quaternion.x * z2;
        let yy = quaternion.y * y2;
        let yz = quaternion.y * z2;
        let zz = quaternion.z * z2;
        let wx = quaternion.w * x2;
        let wy = quaternion.w * y2;
        let wz = quaternion.w * z2;

        Self {
            elements: [
                (1.0 - (yy + zz)) * scale.x,
                (xy + wz) * scale.x,
                (xz - wy) * scale.x,
                0.0,
                (xy - wz) * scale.y,
                (1.0 - (xx + zz)) * scale.y,
                (yz + wx) * scale.y,
                0.0,
                (xz + wy) * scale.z,
                (yz - wx) * scale.z,
                (1.0 - (xx + yy)) * scale.z,
                0.0,
                position.x,
                position.y,
                position.z,
                1.0,
            ],
        }
    }

    /// Decompose the matrix into position, quaternion, and scale.
    pub fn decompose(&self) -> (Vector3, Quaternion, Vector3) {
        let e = &self.elements;

        let mut sx = Vector3::new(e[0], e[1], e[2]).length();
        let sy = Vector3::new(e[4], e[5], e[6]).length();
        let sz = Vector3::new(e[8], e[9], e[10]).length();

        // A mirrored basis shows up as a negative determinant
        if self.determinant() < 0.0 {
            sx = -sx;
        }

        let position = Vector3::new(e[12], e[13], e[14]);
        let scale = Vector3::new(sx, sy, sz);

        let inv = |s: f64| if s != 0.0 { 1.0 / s } else { 0.0 };
        let rotation = Matrix3::from_cols(
            Vector3::new(e[0], e[1], e[2]) * inv(sx),
            Vector3::new(e[4], e[5], e[6]) * inv(sy),
            Vector3::new(e[8], e[9], e[10]) * inv(sz),
        );

        (position, Quaternion::from_rotation_matrix(&rotation), scale)
    }

    /// Create a view matrix (look-at).
    ///
    /// Right-handed, looking down -Z. The result is undefined when
    /// `target - eye` is parallel to `up`.
    pub fn look_at(eye: &Vector3, target: &Vector3, up: &Vector3) -> Self {
        let f = (*target - *eye).normalized(); // forward
        let r = f.cross(up).normalized(); // right
        let u = r.cross(&f); // up

        Self {
            elements: [
                r.x, u.x, -f.x, 0.0,
                r.y, u.y, -f.y, 0.0,
                r.z, u.z, -f.z, 0.0,
                -r.dot(eye), -u.dot(eye), f.dot(eye), 1.0,
            ],
        }
    }

    /// Orthographic projection mapping the box to the OpenGL clip cube `[-1, 1]^3`.
    pub fn ortho(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Self {
        let w = 1.0 / (right - left);
        let h = 1.0 / (top - bottom);
        let d = 1.0 / (far - near);

        Self {
            elements: [
                2.0 * w, 0.0, 0.0, 0.0,
                0.0, 2.0 * h, 0.0, 0.0,
                0.0, 0.0, -2.0 * d, 0.0,
                -(right + left) * w, -(top + bottom) * h, -(far + near) * d, 1.0,
            ],
        }
    }

    /// Perspective projection from an off-center view volume (OpenGL convention).
    pub fn frustum(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Self {
        let w = 1.0 / (right - left);
        let h = 1.0 / (top - bottom);
        let d = 1.0 / (far - near);

        Self {
            elements: [
                2.0 * near * w, 0.0, 0.0, 0.0,
                0.0, 2.0 * near * h, 0.0, 0.0,
                (right + left) * w, (top + bottom) * h, -(far + near) * d, -1.0,
                0.0, 0.0, -2.0 * far * near * d, 0.0,
            ],
        }
    }

    /// Symmetric perspective projection with a vertical field of view in radians.
    pub fn perspective(v_fov: f64, aspect: f64, near: f64, far: f64) -> Self {
        let top = near * (v_fov * 0.5).tan();
        let right = top * aspect;
        Self::frustum(-right, right, -top, top, near, far)
    }

    /// Reverse-Z perspective with the far plane at infinity.
    ///
    /// Depth maps the near plane to 1 and infinity to `epsilon`. A positive
    /// `epsilon` keeps points at numerical infinity strictly inside the clip volume.
    pub fn perspective_infinite_reverse(v_fov: f64, aspect: f64, near: f64, epsilon: f64) -> Self {
        let f = 1.0 / (v_fov * 0.5).tan();
        Self {
            elements: [
                f / aspect, 0.0, 0.0, 0.0,
                0.0, f, 0.0, 0.0,
                0.0, 0.0, -epsilon, -1.0,
                0.0, 0.0, near * (1.0 - epsilon), 0.0,
            ],
        }
    }

    /// Multiply this matrix by another.
    pub fn multiply(&self, other: &Matrix4) -> Self {
        let a = &self.elements;
        let b = &other.elements;

        Self {
            elements: [
                a[0] * b[0] + a[4] * b[1] + a[8] * b[2] + a[12] * b[3],
                a[1] * b[0] + a[5] * b[1] + a[9] * b[2] + a[13] * b[3],
                a[2] * b[0] + a[6] * b[1] + a[10] * b[2] + a[14] * b[3],
                a[3] * b[0] + a[7] * b[1] + a[11] * b[2] + a[15] * b[3],

                a[0] * b[4] + a[4] * b[5] + a[8] * b[6] + a[12] * b[7],
                a[1] * b[4] + a[5] * b[5] + a[9] * b[6] + a[13] * b[7],
                a[2] * b[4] + a[6] * b[5] + a[10] * b[6] + a[14] * b[7],
                a[3] * b[4] + a[7] * b[5] + a[11] * b[6] + a[15] * b[7],

                a[0] * b[8] + a[4] * b[9] + a[8] * b[10] + a[12] * b[11],
                a[1] * b[8] + a[5] * b[9] + a[9] * b[10] + a[13] * b[11],
                a[2] * b[8] + a[6] * b[9] + a[10] * b[10] + a[14] * b[11],
                a[3] * b[8] + a[7] * b[9] + a[11] * b[10] + a[15] * b[11],

                a[0] * b[12] + a[4] * b[13] + a[8] * b[14] + a[12] * b[15],
                a[1] * b[12] + a[5] * b[13] + a[9] * b[14] + a[13] * b[15],
                a[2] * b[12] + a[6] * b[13] + a[10] * b[14] + a[14] * b[15],
                a[3] * b[12] + a[7] * b[13] + a[11] * b[14] + a[15] * b[15],
            ],
        }
    }

    /// Calculate the determinant.
    pub fn determinant(&self) -> f64 {
        let e = &self.elements;

        let n11 = e[0]; let n12 = e[4]; let n13 = e[8]; let n14 = e[12];
        let n21 = e[1]; let n22 = e[5]; let n23 = e[9]; let n24 = e[13];
        let n31 = e[2]; let n32 = e[6]; let n33 = e[10]; let n34 = e[14];
        let n41 = e[3]; let n42 = e[7]; let n43 = e[11]; let n44 = e[15];

        n41 * (n14 * n23 * n32 - n13 * n24 * n32 - n14 * n22 * n33 + n12 * n24 * n33 + n13 * n22 * n34 - n12 * n23 * n34)
            + n42 * (n11 * n23 * n34 - n11 * n24 * n33 + n14 * n21 * n33 - n13 * n21 * n34 + n13 * n24 * n31 - n14 * n23 * n31)
            + n43 * (n11 * n24 * n32 - n11 * n22 * n34 - n14 * n21 * n32 + n12 * n21 * n34 + n14 * n22 * n31 - n12 * n24 * n31)
            + n44 * (-n13 * n22 * n31 - n11 * n23 * n32 + n11 * n22 * n33 + n13 * n21 * n32 - n12 * n21 * n33 + n12 * n23 * n31)
    }

    /// Return the inverse of this matrix by cofactor expansion.
    ///
    /// When the determinant is exactly zero every entry is cleared and
    /// [`Matrix4::ZERO`] is returned; callers check for that sentinel.
    pub fn inverted(&self) -> Self {
        let e = &self.elements;

        let n11 = e[0]; let n12 = e[4]; let n13 = e[8]; let n14 = e[12];
        let n21 = e[1]; let n22 = e[5]; let n23 = e[9]; let n24 = e[13];
        let n31 = e[2]; let n32 = e[6]; let n33 = e[10]; let n34 = e[14];
        let n41 = e[3]; let n42 = e[7]; let n43 = e[11]; let n44 = e[15];

        let t11 = n23 * n34 * n42 - n24 * n33 * n42 + n24 * n32 * n43 - n22 * n34 * n43 - n23 * n32 * n44 + n22 * n33 * n44;
        let t12 = n14 * n33 * n42 - n13 * n34 * n42 - n14 * n32 * n43 + n12 * n34 * n43 + n13 * n32 * n44 - n12 * n33 * n44;
        let t13 = n13 * n24 * n42 - n14 * n23 * n42 + n14 * n22 * n43 - n12 * n24 * n43 - n13 * n22 * n44 + n12 * n23 * n44;
        let t14 = n14 * n23 * n32 - n13 * n24 * n32 - n14 * n22 * n33 + n12 * n24 * n33 + n13 * n22 * n34 - n12 * n23 * n34;

        let det = n11 * t11 + n21 * t12 + n31 * t13 + n41 * t14;

        if det == 0.0 {
            return Self::ZERO;
        }

        let det_inv = 1.0 / det;

        Self {
            elements: [
                t11 * det_inv,
                (n24 * n33 * n41 - n23 * n34 * n41 - n24 * n31 * n43 + n21 * n34 * n43 + n23 * n31 * n44 - n21 * n33 * n44) * det_inv,
                (n22 * n34 * n41 - n24 * n32 * n41 + n24 * n31 * n42 - n21 * n34 * n42 - n22 * n31 * n44 + n21 * n32 * n44) * det_inv,
                (n23 * n32 * n41 - n22 * n33 * n41 - n23 * n31 * n42 + n21 * n33 * n42 + n22 * n31 * n43 - n21 * n32 * n43) * det_inv,
                t12 * det_inv,
                (n13 * n34 * n41 - n14 * n33 * n41 + n14 * n31 * n43 - n11 * n34 * n43 - n13 * n31 * n44 + n11 * n33 * n44) * det_inv,
                (n14 * n32 * n41 - n12 * n34 * n41 - n14 * n31 * n42 + n11 * n34 * n42 + n12 * n31 * n44 - n11 * n32 * n44) * det_inv,
                (n12 * n33 * n41 - n13 * n32 * n41 + n13 * n31 * n42 - n11 * n33 * n42 - n12 * n31 * n43 + n11 * n32 * n43) * det_inv,
                t13 * det_inv,
                (n14 * n23 * n41 - n13 * n24 * n41 - n14 * n21 * n43 + n11 * n24 * n43 + n13 * n21 * n44 - n11 * n23 * n44) * det_inv,
                (n12 * n24 * n41 - n14 * n22 * n41 + n14 * n21 * n42 - n11 * n24 * n42 - n12 * n21 * n44 + n11 * n22 * n44) * det_inv,
                (n13 * n22 * n41 - n12 * n23 * n41 - n13 * n21 * n42 + n11 * n23 * n42 + n12 * n21 * n43 - n11 * n22 * n43) * det_inv,
                t14 * det_inv,
                (n13 * n24 * n31 - n14 * n23 * n31 + n14 * n21 * n33 - n11 * n24 * n33 - n13 * n21 * n34 + n11 * n23 * n34) * det_inv,
                (n14 * n22 * n31 - n12 * n24 * n31 - n14 * n21 * n32 + n11 * n24 * n32 + n12 * n21 * n34 - n11 * n22 * n34) * det_inv,
                (n12 * n23 * n31 - n13 * n22 * n31 + n13 * n21 * n32 - n11 * n23 * n32 - n12 * n21 * n33 + n11 * n22 * n33) * det_inv,
            ],
        }
    }

    /// Return the transpose of this matrix.
    pub fn transposed(&self) -> Self {
        let mut m = *self;
        m.elements.swap(1, 4);
        m.elements.swap(2, 8);
        m.elements.swap(3, 12);
        m.elements.swap(6, 9);
        m.elements.swap(7, 13);
        m.elements.swap(11, 14);
        m
    }

    /// Transform a Vector3 as a point (with translation and perspective divide).
    pub fn transform_point(&self, v: &Vector3) -> Vector3 {
        let e = &self.elements;
        let w = e[3] * v.x + e[7] * v.y + e[11] * v.z + e[15];
        let inv_w = if w != 0.0 { 1.0 / w } else { 1.0 };
        Vector3 {
            x: (e[0] * v.x + e[4] * v.y + e[8] * v.z + e[12]) * inv_w,
            y: (e[1] * v.x + e[5] * v.y + e[9] * v.z + e[13]) * inv_w,
            z: (e[2] * v.x + e[6] * v.y + e[10] * v.z + e[14]) * inv_w,
        }
    }

    /// Transform a Vector3 as a direction (without translation).
    pub fn transform_direction(&self, v: &Vector3) -> Vector3 {
        let e = &self.elements;
        Vector3 {
            x: e[0] * v.x + e[4] * v.y + e[8] * v.z,
            y: e[1] * v.x + e[5] * v.y + e[9] * v.z,
            z: e[2] * v.x + e[6] * v.y + e[10] * v.z,
        }
    }

    /// Transform a homogeneous vector.
    pub fn transform_vector4(&self, v: &Vector4) -> Vector4 {
        Vector4::new(
            self.row(0).dot(v),
            self.row(1).dot(v),
            self.row(2).dot(v),
            self.row(3).dot(v),
        )
    }

    /// Check if approximately equal to another matrix.
    pub fn approx_eq(&self, other: &Matrix4, epsilon: f64) -> bool {
        self.elements.iter()
            .zip(other.elements.iter())
            .all(|(a, b)| (a - b).abs() < epsilon)
    }

    /// Euclidean (Frobenius) distance to another matrix.
    pub fn distance_to(&self, other: &Matrix4) -> f64 {
        self.elements.iter()
            .zip(other.elements.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }

    /// Narrow to single precision, column-major (for GPU uniform buffers).
    pub fn to_f32_array(&self) -> [f32; 16] {
        self.elements.map(|e| e as f32)
    }

    /// Convert to column-major 2D array (for GPU uniform buffers).
    pub fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        let e = self.to_f32_array();
        [
            [e[0], e[1], e[2], e[3]],
            [e[4], e[5], e[6], e[7]],
            [e[8], e[9], e[10], e[11]],
            [e[12], e[13], e[14], e[15]],
        ]
    }
}

impl std::ops::Mul for Matrix4 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl std::ops::Mul<Vector3> for Matrix4 {
    type Output = Vector3;
    fn mul(self, rhs: Vector3) -> Vector3 {
        self.transform_point(&rhs)
    }
}

impl std::ops::Mul<Vector4> for Matrix4 {
    type Output = Vector4;
    fn mul(self, rhs: Vector4) -> Vector4 {
        self.transform_vector4(&rhs)
    }
}

impl From<Matrix3> for Matrix4 {
    fn from(m: Matrix3) -> Self {
        Self::from_matrix3(&m)
    }
}

impl From<glam::DMat4> for Matrix4 {
    fn from(m: glam::DMat4) -> Self {
        Self {
            elements: m.to_cols_array(),
        }
    }
}

impl From<Matrix4> for glam::DMat4 {
    fn from(m: Matrix4) -> Self {
        glam::DMat4::from_cols_array(&m.elements)
    }
}

impl From<Matrix4> for glam::Mat4 {
    fn from(m: Matrix4) -> Self {
        glam::Mat4::from_cols_array(&m.to_f32_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation() {
        let m = Matrix4::translate(Vector3::new(10.0, 20.0, 30.0));
        let result = m.transform_point(&Vector3::ZERO);
        assert!(result.approx_eq(&Vector3::new(10.0, 20.0, 30.0), 1e-12));
    }

    #[test]
    fn test_inverse() {
        let m = Matrix4::translate(Vector3::new(1.0, 2.0, 3.0))
            * Matrix4::rotate(0.4, &Vector3::new(1.0, 1.0, 0.0))
            * Matrix4::scale(Vector3::new(2.0, 3.0, 4.0));
        assert!((m.inverted() * m).approx_eq(&Matrix4::IDENTITY, 1e-12));
    }

    #[test]
    fn test_singular_inverse_is_zero() {
        let m = Matrix4::scale(Vector3::new(1.0, 0.0, 1.0));
        assert_eq!(m.inverted(), Matrix4::ZERO);
    }

    #[test]
    fn test_ortho_matches_reference() {
        let m = Matrix4::ortho(0.0, 1.0, 2.0, 3.0, 4.0, 5.0);
        assert_eq!(m.get(0, 0), 2.0);
        assert_eq!(m.get(1, 1), 2.0);
        assert_eq!(m.get(2, 2), -2.0);
        assert_eq!(m.column(3), Vector4::new(-1.0, -5.0, -9.0, 1.0));
    }

    #[test]
    fn test_perspective_entries() {
        let m = Matrix4::perspective(60.0_f64.to_radians(), 1.5, 1.0, 100.0);
        assert!((m.get(2, 2) + 101.0 / 99.0).abs() < 1e-12);
        assert_eq!(m.get(3, 2), -1.0);
        assert!((m.get(2, 3) + 200.0 / 99.0).abs() < 1e-12);
    }

    #[test]
    fn test_reverse_infinite_depth_range() {
        let m = Matrix4::perspective_infinite_reverse(1.0, 1.0, 0.5, 0.0);
        let near = m.transform_point(&Vector3::new(0.0, 0.0, -0.5));
        assert!((near.z - 1.0).abs() < 1e-12);
        let far = m.transform_point(&Vector3::new(0.0, 0.0, -1e12));
        assert!(far.z >= 0.0 && far.z < 1e-9);

        let tweaked = Matrix4::perspective_infinite_reverse(1.0, 1.0, 0.5, 1e-6);
        let far = tweaked.transform_point(&Vector3::new(0.0, 0.0, -1e300));
        assert!(far.z > 0.0);
    }

    #[test]
    fn test_compose_decompose() {
        let q = Quaternion::from_axis_angle(&Vector3::UNIT_Y, 0.3);
        let m = Matrix4::compose(&Vector3::new(1.0, 2.0, 3.0), &q, &Vector3::new(2.0, 2.0, 2.0));
        let (t, r, s) = m.decompose();
        assert!(t.approx_eq(&Vector3::new(1.0, 2.0, 3.0), 1e-12));
        assert!(r.approx_eq(&q, 1e-12));
        assert!(s.approx_eq(&Vector3::splat(2.0), 1e-12));
    }
}
