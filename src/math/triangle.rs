//! Triangle implementation.

use super::{Box3, Plane, Vector3};
use serde::{Deserialize, Serialize};

/// A triangle defined by three vertices, CCW front face.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Triangle {
    /// First vertex.
    pub a: Vector3,
    /// Second vertex.
    pub b: Vector3,
    /// Third vertex.
    pub c: Vector3,
}

impl Triangle {
    /// Create a new triangle.
    #[inline]
    pub const fn new(a: Vector3, b: Vector3, c: Vector3) -> Self {
        Self { a, b, c }
    }

    /// Cross product of the two edges leaving `a`. Its length is twice the area.
    #[inline]
    pub fn scaled_normal(&self) -> Vector3 {
        (self.b - self.a).cross(&(self.c - self.a))
    }

    /// Get the area of the triangle.
    pub fn area(&self) -> f64 {
        self.scaled_normal().length() * 0.5
    }

    /// Get the centroid (center) of the triangle.
    #[inline]
    pub fn centroid(&self) -> Vector3 {
        (self.a + self.b + self.c) / 3.0
    }

    /// Unit normal; zero for a degenerate triangle.
    pub fn normal(&self) -> Vector3 {
        self.scaled_normal().normalized()
    }

    /// Get the plane containing this triangle.
    pub fn plane(&self) -> Plane {
        Plane::from_coplanar_points(&self.a, &self.b, &self.c)
    }

    /// Get the bounding box of this triangle.
    pub fn bounding_box(&self) -> Box3 {
        Box3::from_points(&[self.a, self.b, self.c])
    }

    /// Barycentric weights `(wa, wb, wc)` of a point in the triangle plane.
    /// Degenerate triangles return `None`.
    pub fn barycentric(&self, point: &Vector3) -> Option<(f64, f64, f64)> {
        let v0 = self.b - self.a;
        let v1 = self.c - self.a;
        let v2 = *point - self.a;

        let d00 = v0.dot(&v0);
        let d01 = v0.dot(&v1);
        let d11 = v1.dot(&v1);
        let d20 = v2.dot(&v0);
        let d21 = v2.dot(&v1);

        let denom = d00 * d11 - d01 * d01;
        if denom == 0.0 {
            return None;
        }

        let wb = (d11 * d20 - d01 * d21) / denom;
        let wc = (d00 * d21 - d01 * d20) / denom;
        Some((1.0 - wb - wc, wb, wc))
    }

    /// Check if a point in the triangle plane lies inside (edges included).
    pub fn contains_point(&self, point: &Vector3) -> bool {
        matches!(self.barycentric(point), Some((a, b, c)) if a >= 0.0 && b >= 0.0 && c >= 0.0)
    }

    /// Check if approximately equal.
    #[inline]
    pub fn approx_eq(&self, other: &Triangle, epsilon: f64) -> bool {
        self.a.approx_eq(&other.a, epsilon)
            && self.b.approx_eq(&other.b, epsilon)
            && self.c.approx_eq(&other.c, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_and_normal() {
        let t = Triangle::new(Vector3::ZERO, Vector3::new(2.0, 0.0, 0.0), Vector3::new(0.0, 2.0, 0.0));
        assert!((t.area() - 2.0).abs() < 1e-12);
        assert!(t.normal().approx_eq(&Vector3::UNIT_Z, 1e-12));
    }

    #[test]
    fn test_barycentric() {
        let t = Triangle::new(Vector3::ZERO, Vector3::UNIT_X, Vector3::UNIT_Y);
        let (a, b, c) = t.barycentric(&Vector3::new(0.25, 0.5, 0.0)).unwrap_or_default();
        assert!((a - 0.25).abs() < 1e-12 && (b - 0.25).abs() < 1e-12 && (c - 0.5).abs() < 1e-12);
        assert!(!t.contains_point(&Vector3::new(1.0, 1.0, 0.0)));
        let flat = Triangle::new(Vector3::ZERO, Vector3::UNIT_X, Vector3::new(2.0, 0.0, 0.0));
        assert!(flat.barycentric(&Vector3::ZERO).is_none());
    }
}
