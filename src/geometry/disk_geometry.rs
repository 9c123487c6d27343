//! Flat disk geometry.

use super::Mesh;
use crate::math::consts::TWO_PI;
use crate::math::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// A disk in the XY plane facing +Z, built as a triangle fan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiskGeometry {
    /// Disk radius.
    pub radius: f64,
    /// Segments around the rim.
    pub u_segments: u32,
}

impl Default for DiskGeometry {
    fn default() -> Self {
        Self::new(1.0, 32)
    }
}

impl DiskGeometry {
    /// Create a new disk geometry.
    pub fn new(radius: f64, u_segments: u32) -> Self {
        Self { radius, u_segments: u_segments.max(3) }
    }

    /// Build a center vertex plus `u_segments + 1` rim vertices.
    pub fn build(&self) -> Mesh {
        let mut mesh = Mesh::with_name("disk");
        let center = mesh.add_vert_with(Vector3::ZERO, Vector3::UNIT_Z, Vector2::splat(0.5));

        for i in 0..=self.u_segments {
            let theta = TWO_PI * i as f64 / self.u_segments as f64;
            let (sin, cos) = theta.sin_cos();
            mesh.add_vert_with(
                Vector3::new(self.radius * cos, self.radius * sin, 0.0),
                Vector3::UNIT_Z,
                Vector2::new(0.5 + 0.5 * cos, 0.5 + 0.5 * sin),
            );
        }

        for i in 0..self.u_segments {
            mesh.add_triangle(center, center + 1 + i, center + 2 + i);
        }
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fan_faces_up() {
        let mesh = DiskGeometry::new(2.0, 8).build();
        assert_eq!(mesh.num_verts(), 10);
        assert_eq!(mesh.triangles.len(), 8);
        let mut recomputed = mesh.clone();
        recomputed.recalculate_vertex_normals();
        for n in &recomputed.normals {
            assert!(n.approx_eq(&Vector3::UNIT_Z, 1e-12));
        }
        assert!((mesh.positions[1].length() - 2.0).abs() < 1e-12);
    }
}
