//! Quaternion implementation for rotations.

use super::consts::{AXIS_ANGLE_EPSILON, DIRECTION_EPSILON};
use super::{Matrix3, Matrix4, Vector3};
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::ops::{Mul, MulAssign, Neg};

/// A quaternion representing a rotation. The scalar part `w` is stored last.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Quaternion {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
    /// W component (scalar).
    pub w: f64,
}

/// A rotation expressed as an axis and an angle in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisAngle {
    /// Rotation axis. Unit length unless the rotation is close to zero.
    pub axis: Vector3,
    /// Angle in `[0, 2π]`.
    pub angle: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    /// Identity quaternion (no rotation).
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Create a new quaternion.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Create from an array [x, y, z, w].
    #[inline]
    pub const fn from_array(a: [f64; 4]) -> Self {
        Self { x: a[0], y: a[1], z: a[2], w: a[3] }
    }

    /// Convert to an array [x, y, z, w].
    #[inline]
    pub const fn to_array(&self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Narrow to single precision.
    #[inline]
    pub fn to_f32_array(&self) -> [f32; 4] {
        [self.x as f32, self.y as f32, self.z as f32, self.w as f32]
    }

    /// Set all components.
    #[inline]
    pub fn set(&mut self, x: f64, y: f64, z: f64, w: f64) -> &mut Self {
        self.x = x;
        self.y = y;
        self.z = z;
        self.w = w;
        self
    }

    /// Create a quaternion from axis-angle representation. `axis` must be unit length.
    pub fn from_axis_angle(axis: &Vector3, angle: f64) -> Self {
        let (s, c) = (angle * 0.5).sin_cos();
        Self {
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
            w: c,
        }
    }

    /// Create from a pure rotation matrix.
    ///
    /// The four squared components are computed from diagonal combinations
    /// and the largest one seeds the division.
    pub fn from_rotation_matrix(m: &Matrix3) -> Self {
        let m00 = m.get(0, 0);
        let m11 = m.get(1, 1);
        let m22 = m.get(2, 2);

        let four_w = 1.0 + m00 + m11 + m22;
        let four_x = 1.0 + m00 - m11 - m22;
        let four_y = 1.0 - m00 + m11 - m22;
        let four_z = 1.0 - m00 - m11 + m22;

        let mut biggest = 0;
        let mut biggest_value = four_w;
        for (i, v) in [four_x, four_y, four_z].into_iter().enumerate() {
            if v > biggest_value {
                biggest = i + 1;
                biggest_value = v;
            }
        }

        let big = biggest_value.max(0.0).sqrt() * 0.5;
        let mult = 0.25 / big;

        let (m01, m02) = (m.get(0, 1), m.get(0, 2));
        let (m10, m12) = (m.get(1, 0), m.get(1, 2));
        let (m20, m21) = (m.get(2, 0), m.get(2, 1));

        match biggest {
            0 => Self::new((m21 - m12) * mult, (m02 - m20) * mult, (m10 - m01) * mult, big),
            1 => Self::new(big, (m01 + m10) * mult, (m02 + m20) * mult, (m21 - m12) * mult),
            2 => Self::new((m01 + m10) * mult, big, (m12 + m21) * mult, (m02 - m20) * mult),
            _ => Self::new((m02 + m20) * mult, (m12 + m21) * mult, big, (m10 - m01) * mult),
        }
    }

    /// Create from a Matrix4, removing any scale from the upper-left block.
    pub fn from_matrix4(m: &Matrix4) -> Self {
        let (_, rotation, _) = m.decompose();
        rotation
    }

    /// Shortest rotation taking direction `from` to direction `to`.
    ///
    /// Parallel inputs give the identity; anti-parallel inputs give a half
    /// turn about an axis perpendicular to `from`.
    pub fn from_directions(from: &Vector3, to: &Vector3) -> Self {
        let a = from.normalized();
        let b = to.normalized();

        if (a - b).length() <= DIRECTION_EPSILON {
            return Self::IDENTITY;
        }
        if (a + b).length() <= DIRECTION_EPSILON {
            return Self::from_axis_angle(&a.any_perpendicular(), std::f64::consts::PI);
        }

        let d = a.dot(&b);
        let c = a.cross(&b);
        Self::new(c.x, c.y, c.z, 1.0 + d).normalized()
    }

    /// Convert to a 3x3 rotation matrix. Only meaningful for unit quaternions.
    pub fn to_matrix3(&self) -> Matrix3 {
        let (x, y, z, w) = (self.x, self.y, self.z, self.w);
        let x2 = x + x;
        let y2 = y + y;
        let z2 = z + z;
        let xx = x * x2;
        let xy = x * y2;
        let xz = x * z2;
        let yy = y * y2;
        let yz = y * z2;
        let zz = z * z2;
        let wx = w * x2;
        let wy = w * y2;
        let wz = w * z2;

        Matrix3::new(
            1.0 - (yy + zz), xy - wz, xz + wy,
            xy + wz, 1.0 - (xx + zz), yz - wx,
            xz - wy, yz + wx, 1.0 - (xx + yy),
        )
    }

    /// Convert to a 4x4 rotation matrix.
    pub fn to_matrix4(&self) -> Matrix4 {
        Matrix4::from_matrix3(&self.to_matrix3())
    }

    /// Axis-angle form. The angle lies in `[0, 2π]`; wrap if `[-π, π]` is wanted.
    pub fn to_axis_angle(&self) -> AxisAngle {
        let q = if self.w > 1.0 { self.normalized() } else { *self };
        let angle = 2.0 * q.w.clamp(-1.0, 1.0).acos();
        let s = (1.0 - q.w * q.w).max(0.0).sqrt();

        let axis = if s < AXIS_ANGLE_EPSILON {
            Vector3::new(q.x, q.y, q.z)
        } else {
            Vector3::new(q.x / s, q.y / s, q.z / s)
        };

        AxisAngle { axis, angle }
    }

    /// Angle of the rotation taking `self` to `other`.
    pub fn angle_abs(&self, other: &Quaternion) -> f64 {
        (self.inverse() * *other).to_axis_angle().angle
    }

    /// Get the length of the quaternion.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Get the squared length.
    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.dot(self)
    }

    /// Normalize the quaternion in place. Zero quaternions are left unchanged.
    #[inline]
    pub fn normalize(&mut self) -> &mut Self {
        let len = self.length();
        if len > 0.0 {
            let inv_len = 1.0 / len;
            self.x *= inv_len;
            self.y *= inv_len;
            self.z *= inv_len;
            self.w *= inv_len;
        }
        self
    }

    /// Return a normalized copy.
    #[inline]
    pub fn normalized(&self) -> Self {
        let mut q = *self;
        q.normalize();
        q
    }

    /// Conjugate (inverse for unit quaternions).
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: self.w,
        }
    }

    /// Multiplicative inverse. Zero quaternions are returned unchanged.
    #[inline]
    pub fn inverse(&self) -> Self {
        let len2 = self.length_squared();
        if len2 == 0.0 {
            return *self;
        }
        let c = self.conjugate();
        Self::new(c.x / len2, c.y / len2, c.z / len2, c.w / len2)
    }

    /// Dot product.
    #[inline]
    pub fn dot(&self, other: &Quaternion) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Hamilton product `self * other`: applies `other` first, then `self`.
    pub fn multiply(&self, other: &Quaternion) -> Self {
        Self {
            x: self.x * other.w + self.w * other.x + self.y * other.z - self.z * other.y,
            y: self.y * other.w + self.w * other.y + self.z * other.x - self.x * other.z,
            z: self.z * other.w + self.w * other.z + self.x * other.y - self.y * other.x,
            w: self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
        }
    }

    /// Spherical linear interpolation along the shortest arc.
    pub fn slerp(&self, other: &Quaternion, t: f64) -> Self {
        if t == 0.0 {
            return *self;
        }
        if t == 1.0 {
            return *other;
        }

        let mut cos_half_theta = self.dot(other);
        let mut other = *other;

        // Take shorter path
        if cos_half_theta < 0.0 {
            other = -other;
            cos_half_theta = -cos_half_theta;
        }

        if cos_half_theta >= 1.0 {
            return *self;
        }

        let half_theta = cos_half_theta.acos();
        let sin_half_theta = (1.0 - cos_half_theta * cos_half_theta).sqrt();

        // Nearly parallel: fall back to normalized lerp
        if sin_half_theta.abs() < 1e-6 {
            return Self {
                x: self.x + (other.x - self.x) * t,
                y: self.y + (other.y - self.y) * t,
                z: self.z + (other.z - self.z) * t,
                w: self.w + (other.w - self.w) * t,
            }
            .normalized();
        }

        let ratio_a = ((1.0 - t) * half_theta).sin() / sin_half_theta;
        let ratio_b = (t * half_theta).sin() / sin_half_theta;

        Self {
            x: self.x * ratio_a + other.x * ratio_b,
            y: self.y * ratio_a + other.y * ratio_b,
            z: self.z * ratio_a + other.z * ratio_b,
            w: self.w * ratio_a + other.w * ratio_b,
        }
    }

    /// Rotate a vector by this quaternion.
    pub fn rotate_vector(&self, v: &Vector3) -> Vector3 {
        v.apply_quaternion(self)
    }

    /// Check if approximately equal, component-wise.
    #[inline]
    pub fn approx_eq(&self, other: &Quaternion, epsilon: f64) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
            && (self.w - other.w).abs() < epsilon
    }

    /// True when both describe the same rotation (`q` and `-q` are equivalent).
    #[inline]
    pub fn same_rotation(&self, other: &Quaternion, epsilon: f64) -> bool {
        self.approx_eq(other, epsilon) || self.approx_eq(&-*other, epsilon)
    }
}

impl Mul for Quaternion {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl MulAssign for Quaternion {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(&rhs);
    }
}

impl Mul<Vector3> for Quaternion {
    type Output = Vector3;
    fn mul(self, rhs: Vector3) -> Vector3 {
        self.rotate_vector(&rhs)
    }
}

impl Neg for Quaternion {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl From<glam::DQuat> for Quaternion {
    fn from(q: glam::DQuat) -> Self {
        Self::new(q.x, q.y, q.z, q.w)
    }
}

impl From<Quaternion> for glam::DQuat {
    fn from(q: Quaternion) -> Self {
        glam::DQuat::from_xyzw(q.x, q.y, q.z, q.w)
    }
}

impl From<Quaternion> for glam::Quat {
    fn from(q: Quaternion) -> Self {
        glam::Quat::from_array(q.to_f32_array())
    }
}
