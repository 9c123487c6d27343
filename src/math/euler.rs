//! Euler angles in any of the twelve rotation orders.

use super::{Matrix3, Matrix4, Quaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Rotation order for Euler angles.
///
/// The three letters name the axes of the first, second and third
/// rotation. `to_matrix3` composes them left to right, so for `ZYX` the
/// matrix is `Rz(yaw) * Ry(pitch) * Rx(roll)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RotationOrder {
    // Tait-Bryan
    /// Z, then Y, then X.
    #[default]
    ZYX,
    /// Z, then X, then Y.
    ZXY,
    /// Y, then X, then Z.
    YXZ,
    /// Y, then Z, then X.
    YZX,
    /// X, then Y, then Z.
    XYZ,
    /// X, then Z, then Y.
    XZY,
    // Proper Euler
    /// Z, then Y, then Z.
    ZYZ,
    /// Z, then X, then Z.
    ZXZ,
    /// Y, then X, then Y.
    YXY,
    /// Y, then Z, then Y.
    YZY,
    /// X, then Y, then X.
    XYX,
    /// X, then Z, then X.
    XZX,
}

impl RotationOrder {
    /// Every order, Tait-Bryan first.
    pub const ALL: [RotationOrder; 12] = [
        Self::ZYX, Self::ZXY, Self::YXZ, Self::YZX, Self::XYZ, Self::XZY,
        Self::ZYZ, Self::ZXZ, Self::YXY, Self::YZY, Self::XYX, Self::XZX,
    ];

    /// Axis indices (0 = X, 1 = Y, 2 = Z) of the three rotations.
    pub const fn axes(self) -> [usize; 3] {
        match self {
            Self::ZYX => [2, 1, 0],
            Self::ZXY => [2, 0, 1],
            Self::YXZ => [1, 0, 2],
            Self::YZX => [1, 2, 0],
            Self::XYZ => [0, 1, 2],
            Self::XZY => [0, 2, 1],
            Self::ZYZ => [2, 1, 2],
            Self::ZXZ => [2, 0, 2],
            Self::YXY => [1, 0, 1],
            Self::YZY => [1, 2, 1],
            Self::XYX => [0, 1, 0],
            Self::XZX => [0, 2, 0],
        }
    }

    /// First and third axes coincide.
    pub const fn is_proper_euler(self) -> bool {
        let a = self.axes();
        a[0] == a[2]
    }
}

/// Three rotation angles (radians) tagged with the order they apply in.
///
/// `yaw` turns about the first axis of `order`, `pitch` about the second
/// and `roll` about the third.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EulerAngles {
    /// Rotation order.
    pub order: RotationOrder,
    /// Angle about the first axis.
    pub yaw: f64,
    /// Angle about the second axis.
    pub pitch: f64,
    /// Angle about the third axis.
    pub roll: f64,
}

fn unit_axis(i: usize) -> Vector3 {
    match i {
        0 => Vector3::UNIT_X,
        1 => Vector3::UNIT_Y,
        _ => Vector3::UNIT_Z,
    }
}

/// +1 when (i, j, k) is a cyclic permutation of (0, 1, 2), -1 otherwise.
fn parity(i: usize, j: usize, k: usize) -> f64 {
    if (i + 1) % 3 == j && (j + 1) % 3 == k {
        1.0
    } else {
        -1.0
    }
}

const GIMBAL_EPSILON: f64 = 1e-12;

impl EulerAngles {
    /// Create new Euler angles.
    pub const fn new(order: RotationOrder, yaw: f64, pitch: f64, roll: f64) -> Self {
        Self { order, yaw, pitch, roll }
    }

    /// Angles as a vector `(yaw, pitch, roll)`.
    pub const fn to_vector3(&self) -> Vector3 {
        Vector3::new(self.yaw, self.pitch, self.roll)
    }

    /// `R(axis1, yaw) * R(axis2, pitch) * R(axis3, roll)`.
    pub fn to_matrix3(&self) -> Matrix3 {
        let [a1, a2, a3] = self.order.axes();
        Matrix3::rotate(self.yaw, &unit_axis(a1))
            * Matrix3::rotate(self.pitch, &unit_axis(a2))
            * Matrix3::rotate(self.roll, &unit_axis(a3))
    }

    /// Rotation as a 4x4 matrix.
    pub fn to_matrix4(&self) -> Matrix4 {
        Matrix4::from_matrix3(&self.to_matrix3())
    }

    /// Rotation as a quaternion, built from the composed matrix.
    pub fn to_quaternion(&self) -> Quaternion {
        Quaternion::from_rotation_matrix(&self.to_matrix3())
    }

    /// Decompose a pure rotation matrix into angles of the given order.
    ///
    /// The middle term is clamped to `[-1, 1]` before `asin` / `acos`. At a
    /// gimbal singularity the third angle is set to zero and the first one
    /// absorbs the remaining rotation.
    pub fn from_matrix3(order: RotationOrder, m: &Matrix3) -> Self {
        let [i, j, k] = order.axes();

        if order.is_proper_euler() {
            let n = 3 - i - j;
            let s = parity(i, j, n);

            let pitch = m.get(i, i).clamp(-1.0, 1.0).acos();
            let sin_pitch = m.get(i, j).hypot(m.get(i, n));

            if sin_pitch > GIMBAL_EPSILON {
                let yaw = m.get(j, i).atan2(-s * m.get(n, i));
                let roll = m.get(i, j).atan2(s * m.get(i, n));
                Self::new(order, yaw, pitch, roll)
            } else {
                let yaw = (s * m.get(n, j)).atan2(m.get(j, j));
                Self::new(order, yaw, pitch, 0.0)
            }
        } else {
            let s = parity(i, j, k);

            let pitch = (s * m.get(i, k)).clamp(-1.0, 1.0).asin();
            let cos_pitch = m.get(i, i).hypot(m.get(i, j));

            if cos_pitch > GIMBAL_EPSILON {
                let yaw = (-s * m.get(j, k)).atan2(m.get(k, k));
                let roll = (-s * m.get(i, j)).atan2(m.get(i, i));
                Self::new(order, yaw, pitch, roll)
            } else {
                let yaw = (s * m.get(k, j)).atan2(m.get(j, j));
                Self::new(order, yaw, pitch, 0.0)
            }
        }
    }

    /// Decompose the rotation part of a 4x4 matrix.
    pub fn from_matrix4(order: RotationOrder, m: &Matrix4) -> Self {
        Self::from_matrix3(order, &m.get3x3())
    }

    /// Decompose a unit quaternion.
    pub fn from_quaternion(order: RotationOrder, q: &Quaternion) -> Self {
        Self::from_matrix3(order, &q.to_matrix3())
    }

    /// Same angles re-expressed in another order.
    pub fn reorder(&self, order: RotationOrder) -> Self {
        Self::from_matrix3(order, &self.to_matrix3())
    }

    /// Check if approximately equal (same order, close angles).
    pub fn approx_eq(&self, other: &EulerAngles, epsilon: f64) -> bool {
        self.order == other.order
            && (self.yaw - other.yaw).abs() < epsilon
            && (self.pitch - other.pitch).abs() < epsilon
            && (self.roll - other.roll).abs() < epsilon
    }
}

impl From<EulerAngles> for Quaternion {
    fn from(e: EulerAngles) -> Self {
        e.to_quaternion()
    }
}
