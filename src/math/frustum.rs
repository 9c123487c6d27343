//! View frustum implementation for culling.

use super::{consts, Box3, Matrix4, Plane, Sphere, Vector3, Vector4};
use serde::{Deserialize, Serialize};

/// Classification of a shape against a frustum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Touch {
    /// Entirely outside at least one plane.
    Outside,
    /// Crosses at least one plane.
    Intersecting,
    /// On the positive side of all six planes.
    Inside,
}

/// A view frustum defined by 6 inward-facing planes.
/// Used for frustum culling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frustum {
    /// The six planes of the frustum.
    /// Order: right, left, far, near, top, bottom
    pub planes: [Plane; 6],
}

impl Default for Frustum {
    fn default() -> Self {
        Self {
            planes: [Plane::default(); 6],
        }
    }
}

impl Frustum {
    /// Create a new frustum from 6 planes.
    #[inline]
    pub const fn new(planes: [Plane; 6]) -> Self {
        Self { planes }
    }

    /// Extract the planes of a model-view-projection matrix.
    ///
    /// Each plane is a sum or difference of the fourth row with one of the
    /// other rows, normalized.
    pub fn from_matrix(m: &Matrix4) -> Self {
        let r0 = m.row(0);
        let r1 = m.row(1);
        let r2 = m.row(2);
        let r3 = m.row(3);

        let plane = |v: Vector4| Plane::from_coefficients(v).normalized();

        Self {
            planes: [
                plane(r3 - r0), // right
                plane(r3 + r0), // left
                plane(r3 - r2), // far
                plane(r3 + r2), // near
                plane(r3 - r1), // top
                plane(r3 + r1), // bottom
            ],
        }
    }

    /// Get the right plane.
    #[inline]
    pub fn right(&self) -> &Plane { &self.planes[0] }

    /// Get the left plane.
    #[inline]
    pub fn left(&self) -> &Plane { &self.planes[1] }

    /// Get the far plane.
    #[inline]
    pub fn far(&self) -> &Plane { &self.planes[2] }

    /// Get the near plane.
    #[inline]
    pub fn near(&self) -> &Plane { &self.planes[3] }

    /// Get the top plane.
    #[inline]
    pub fn top(&self) -> &Plane { &self.planes[4] }

    /// Get the bottom plane.
    #[inline]
    pub fn bottom(&self) -> &Plane { &self.planes[5] }

    /// `Inside` when the point is in front of or on every plane, else `Outside`.
    ///
    /// Points within [`consts::EPSILON`] of a plane count as on it.
    pub fn touches_point(&self, point: &Vector3) -> Touch {
        if self.planes.iter().all(|p| p.distance_to_point(point) >= -consts::EPSILON) {
            Touch::Inside
        } else {
            Touch::Outside
        }
    }

    /// Classify a sphere.
    pub fn touches_sphere(&self, sphere: &Sphere) -> Touch {
        let mut inside = 0;
        for plane in &self.planes {
            let distance = plane.distance_to_point(&sphere.center);
            if distance <= -sphere.radius {
                return Touch::Outside;
            }
            if distance > sphere.radius {
                inside += 1;
            }
        }
        if inside == self.planes.len() {
            Touch::Inside
        } else {
            Touch::Intersecting
        }
    }

    /// Classify a box through its eight corners.
    pub fn touches_box(&self, box3: &Box3) -> Touch {
        if !box3.initialized {
            return Touch::Outside;
        }
        self.touches_polygon(&box3.corners())
    }

    /// Classify a convex point set.
    ///
    /// A plane with no vertex in front rejects the whole set. The set is
    /// `Inside` only when every vertex is in front of all six planes.
    pub fn touches_polygon(&self, points: &[Vector3]) -> Touch {
        if points.is_empty() {
            return Touch::Outside;
        }
        let mut planes_inside = 0;
        for plane in &self.planes {
            let in_front = points.iter().filter(|p| plane.distance_to_point(p) > 0.0).count();
            if in_front == 0 {
                return Touch::Outside;
            }
            if in_front == points.len() {
                planes_inside += 1;
            }
        }
        if planes_inside == self.planes.len() {
            Touch::Inside
        } else {
            Touch::Intersecting
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_frustum() -> Frustum {
        Frustum::from_matrix(&Matrix4::perspective(std::f64::consts::FRAC_PI_2, 1.0, 1.0, 10.0))
    }

    #[test]
    fn test_point_classification() {
        let f = camera_frustum();
        assert_eq!(f.touches_point(&Vector3::new(0.0, 0.0, -5.0)), Touch::Inside);
        assert_eq!(f.touches_point(&Vector3::new(0.0, 0.0, 5.0)), Touch::Outside);
        assert_eq!(f.touches_point(&Vector3::new(0.0, 0.0, -20.0)), Touch::Outside);
    }

    #[test]
    fn test_plane_order() {
        let f = camera_frustum();
        assert!(f.near().normal.approx_eq(&-Vector3::UNIT_Z, 1e-12));
        assert!(f.far().normal.approx_eq(&Vector3::UNIT_Z, 1e-12));
        assert!((f.near().constant + 1.0).abs() < 1e-12);
        assert!((f.far().constant - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_sphere_classification() {
        let f = camera_frustum();
        assert_eq!(f.touches_sphere(&Sphere::new(Vector3::new(0.0, 0.0, -5.0), 0.5)), Touch::Inside);
        assert_eq!(f.touches_sphere(&Sphere::new(Vector3::new(0.0, 0.0, -10.0), 0.5)), Touch::Intersecting);
        assert_eq!(f.touches_sphere(&Sphere::new(Vector3::new(0.0, 0.0, 3.0), 0.5)), Touch::Outside);
    }

    #[test]
    fn test_box_classification() {
        let f = camera_frustum();
        let inside = Box3::new(Vector3::new(-0.5, -0.5, -5.5), Vector3::new(0.5, 0.5, -4.5));
        assert_eq!(f.touches_box(&inside), Touch::Inside);
        let straddling = Box3::new(Vector3::new(-0.5, -0.5, -11.0), Vector3::new(0.5, 0.5, -9.0));
        assert_eq!(f.touches_box(&straddling), Touch::Intersecting);
        let behind = Box3::new(Vector3::new(-0.5, -0.5, 1.0), Vector3::new(0.5, 0.5, 2.0));
        assert_eq!(f.touches_box(&behind), Touch::Outside);
    }
}
