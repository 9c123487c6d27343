//! Latitude-longitude sphere geometry.

use super::Mesh;
use crate::math::consts::{PI, TWO_PI};
use crate::math::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// A UV sphere centered at the origin with poles on the Z axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereGeometry {
    /// Sphere radius.
    pub radius: f64,
    /// Segments around the Z axis.
    pub u_segments: u32,
    /// Segments from pole to pole.
    pub v_segments: u32,
}

impl Default for SphereGeometry {
    fn default() -> Self {
        Self::new(1.0, 32, 16)
    }
}

impl SphereGeometry {
    /// Create a new sphere geometry.
    pub fn new(radius: f64, u_segments: u32, v_segments: u32) -> Self {
        Self {
            radius,
            u_segments: u_segments.max(3),
            v_segments: v_segments.max(2),
        }
    }

    /// Build `(u_segments + 1)(v_segments + 1)` vertices and `u_segments · v_segments` quads.
    ///
    /// Rows run from the south pole (`v = 0`) to the north pole (`v = 1`).
    pub fn build(&self) -> Mesh {
        let mut mesh = Mesh::with_name("sphere");

        for iv in 0..=self.v_segments {
            let fv = iv as f64 / self.v_segments as f64;
            let (sin_phi, cos_phi) = (PI * fv).sin_cos();
            for iu in 0..=self.u_segments {
                let fu = iu as f64 / self.u_segments as f64;
                let (sin_theta, cos_theta) = (TWO_PI * fu).sin_cos();
                let normal = Vector3::new(sin_phi * cos_theta, sin_phi * sin_theta, -cos_phi);
                mesh.add_vert_with(normal * self.radius, normal, Vector2::new(fu, fv));
            }
        }

        let row = self.u_segments + 1;
        for iv in 0..self.v_segments {
            for iu in 0..self.u_segments {
                let a = iv * row + iu;
                mesh.add_quad(a, a + 1, a + 1 + row, a + row);
            }
        }
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mesh = SphereGeometry::new(1.0, 8, 4).build();
        assert_eq!(mesh.num_verts(), 9 * 5);
        assert_eq!(mesh.quads.len(), 32);
    }

    #[test]
    fn test_on_surface_with_radial_normals() {
        let mesh = SphereGeometry::new(3.0, 12, 6).build();
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            assert!((p.length() - 3.0).abs() < 1e-12);
            assert!(n.approx_eq(&(*p / 3.0), 1e-12));
        }
        assert!(mesh.positions[0].approx_eq(&Vector3::new(0.0, 0.0, -3.0), 1e-12));
    }
}
