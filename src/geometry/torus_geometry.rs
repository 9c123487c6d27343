//! Torus geometry.

use super::Mesh;
use crate::math::consts::TWO_PI;
use crate::math::{Quaternion, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// A torus around the Z axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TorusGeometry {
    /// Radius of the tube's centerline circle.
    pub radius: f64,
    /// Tube radius.
    pub tube: f64,
    /// Segments around the centerline.
    pub u_segments: u32,
    /// Segments around the tube.
    pub v_segments: u32,
}

impl Default for TorusGeometry {
    fn default() -> Self {
        Self::new(1.0, 0.4, 48, 16)
    }
}

impl TorusGeometry {
    /// Create a new torus geometry.
    pub fn new(radius: f64, tube: f64, u_segments: u32, v_segments: u32) -> Self {
        Self {
            radius,
            tube,
            u_segments: u_segments.max(3),
            v_segments: v_segments.max(3),
        }
    }

    /// Build `(u_segments + 1)(v_segments + 1)` vertices and `u_segments · v_segments` quads.
    pub fn build(&self) -> Mesh {
        let mut mesh = Mesh::with_name("torus");

        for iu in 0..=self.u_segments {
            let fu = iu as f64 / self.u_segments as f64;
            let spin = Quaternion::from_axis_angle(&Vector3::UNIT_Z, TWO_PI * fu);
            for iv in 0..=self.v_segments {
                let fv = iv as f64 / self.v_segments as f64;
                let (sin_phi, cos_phi) = (TWO_PI * fv).sin_cos();
                let normal = Vector3::new(cos_phi, 0.0, -sin_phi);
                let position = Vector3::new(self.radius, 0.0, 0.0) + normal * self.tube;
                mesh.add_vert_with(spin.rotate_vector(&position), spin.rotate_vector(&normal), Vector2::new(fu, fv));
            }
        }

        let column = self.v_segments + 1;
        for iu in 0..self.u_segments {
            for iv in 0..self.v_segments {
                let a = iu * column + iv;
                mesh.add_quad(a, a + 1, a + 1 + column, a + column);
            }
        }
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_extent() {
        let mesh = TorusGeometry::new(2.0, 0.5, 16, 8).build();
        assert_eq!(mesh.num_verts(), 17 * 9);
        assert_eq!(mesh.quads.len(), 128);
        let bounds = mesh.bounds();
        assert!((bounds.max.x - 2.5).abs() < 1e-12);
        assert!((bounds.max.z - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_normals_point_away_from_centerline() {
        let mesh = TorusGeometry::new(2.0, 0.5, 16, 8).build();
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            let ring = Vector3::new(p.x, p.y, 0.0).normalized() * 2.0;
            assert!(n.approx_eq(&(*p - ring).normalized(), 1e-9));
        }
    }

    #[test]
    fn test_winding_is_outward() {
        let mut mesh = TorusGeometry::new(2.0, 0.5, 24, 12).build();
        let authored = mesh.normals.clone();
        mesh.recalculate_vertex_normals();
        for (a, b) in authored.iter().zip(&mesh.normals) {
            assert!(a.dot(b) > 0.9);
        }
    }
}
