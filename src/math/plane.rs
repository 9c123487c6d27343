//! Oriented planes for frustum and triangle tests.

use super::{Matrix3, Matrix4, Vector3, Vector4};
use serde::{Deserialize, Serialize};

/// Plane `normal · p + constant = 0`. Frustum planes point inward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Plane {
    /// Normal vector of the plane (should be normalized).
    pub normal: Vector3,
    /// Distance from origin (d in ax + by + cz + d = 0).
    pub constant: f64,
}

impl Plane {
    /// Ground plane, normal +Y.
    pub const XZ: Self = Self { normal: Vector3::UNIT_Y, constant: 0.0 };

    /// Create a new plane.
    #[inline]
    pub const fn new(normal: Vector3, constant: f64) -> Self {
        Self { normal, constant }
    }

    /// Create from the coefficients (a, b, c, d) of ax + by + cz + d = 0.
    #[inline]
    pub const fn from_coefficients(v: Vector4) -> Self {
        Self {
            normal: Vector3 { x: v.x, y: v.y, z: v.z },
            constant: v.w,
        }
    }

    /// Plane through `point` with the given normal, normalized.
    #[inline]
    pub fn from_normal_and_point(normal: Vector3, point: &Vector3) -> Self {
        let n = normal.normalized();
        Self {
            normal: n,
            constant: -point.dot(&n),
        }
    }

    /// Create a plane from three points, normal following CCW winding.
    pub fn from_coplanar_points(a: &Vector3, b: &Vector3, c: &Vector3) -> Self {
        let normal = (*b - *a).cross(&(*c - *a)).normalized();
        Self::from_normal_and_point(normal, a)
    }

    /// Normalize the plane (ensure normal is unit length).
    /// A zero normal leaves the plane unchanged.
    pub fn normalize(&mut self) -> &mut Self {
        let len = self.normal.length();
        if len > 0.0 {
            let inv_len = 1.0 / len;
            self.normal = self.normal * inv_len;
            self.constant *= inv_len;
        }
        self
    }

    /// Return a normalized copy.
    pub fn normalized(&self) -> Self {
        let mut p = *self;
        p.normalize();
        p
    }

    /// Signed distance, positive on the normal side.
    #[inline]
    pub fn distance_to_point(&self, point: &Vector3) -> f64 {
        self.normal.dot(point) + self.constant
    }

    /// Transform by `m`. The normal goes through the inverse transpose.
    pub fn apply_matrix4(&self, m: &Matrix4) -> Self {
        let point_on_plane = self.normal * (-self.constant);
        let transformed_point = m.transform_point(&point_on_plane);
        let transformed_normal = Matrix3::normal_matrix(m).transform_vector(&self.normal);
        Self::from_normal_and_point(transformed_normal, &transformed_point)
    }

    /// Check if approximately equal.
    #[inline]
    pub fn approx_eq(&self, other: &Plane, epsilon: f64) -> bool {
        self.normal.approx_eq(&other.normal, epsilon)
            && (self.constant - other.constant).abs() < epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_point() {
        let plane = Plane::new(Vector3::UNIT_Y, 0.0);
        assert!((plane.distance_to_point(&Vector3::new(0.0, 5.0, 0.0)) - 5.0).abs() < 1e-12);
        assert!((plane.distance_to_point(&Vector3::new(0.0, -3.0, 0.0)) + 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_coplanar_points_ccw() {
        let p = Plane::from_coplanar_points(&Vector3::ZERO, &Vector3::UNIT_X, &Vector3::UNIT_Y);
        assert!(p.normal.approx_eq(&Vector3::UNIT_Z, 1e-12));
    }

    #[test]
    fn test_from_coefficients_keeps_scale() {
        let p = Plane::from_coefficients(Vector4::new(0.0, 2.0, 0.0, -4.0));
        assert!((p.distance_to_point(&Vector3::new(0.0, 3.0, 0.0)) - 2.0).abs() < 1e-12);
        assert!((p.normalized().distance_to_point(&Vector3::new(0.0, 3.0, 0.0)) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_apply_translation() {
        let p = Plane::XZ.apply_matrix4(&Matrix4::translate(Vector3::new(0.0, 2.0, 0.0)));
        assert!(p.approx_eq(&Plane::new(Vector3::UNIT_Y, -2.0), 1e-12));
    }
}
