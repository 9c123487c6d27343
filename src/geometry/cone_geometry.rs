//! Cone geometry with a single apex vertex.

use super::{DiskGeometry, Mesh};
use crate::math::consts::{PI, TWO_PI};
use crate::math::{Matrix4, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// A cone with its base on the XY plane and its apex at `(0, 0, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConeGeometry {
    /// Base radius.
    pub radius: f64,
    /// Apex height.
    pub height: f64,
    /// Close the base with a disk.
    pub cap: bool,
    /// Segments around the axis.
    pub u_segments: u32,
}

impl Default for ConeGeometry {
    fn default() -> Self {
        Self::new(1.0, 1.0, true, 32)
    }
}

impl ConeGeometry {
    /// Create a new cone geometry.
    pub fn new(radius: f64, height: f64, cap: bool, u_segments: u32) -> Self {
        Self { radius, height, cap, u_segments: u_segments.max(3) }
    }

    /// Build `u_segments + 1` base vertices, one apex and the optional cap.
    pub fn build(&self) -> Mesh {
        let mut mesh = Mesh::with_name("cone");
        let alpha = self.radius.atan2(self.height);
        let (sin_alpha, cos_alpha) = alpha.sin_cos();

        for i in 0..=self.u_segments {
            let fu = i as f64 / self.u_segments as f64;
            let (sin, cos) = (TWO_PI * fu).sin_cos();
            mesh.add_vert_with(
                Vector3::new(self.radius * cos, self.radius * sin, 0.0),
                Vector3::new(cos * cos_alpha, sin * cos_alpha, sin_alpha),
                Vector2::new(fu, 0.0),
            );
        }
        let apex = mesh.add_vert_with(Vector3::new(0.0, 0.0, self.height), Vector3::UNIT_Z, Vector2::new(0.5, 1.0));

        for i in 0..self.u_segments {
            mesh.add_triangle(i, i + 1, apex);
        }

        if self.cap && self.radius > 0.0 {
            let mut cap = DiskGeometry::new(self.radius, self.u_segments).build();
            cap.transform(&Matrix4::rotate(PI, &Vector3::UNIT_X));
            mesh.merge(&cap);
        }
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_apex() {
        let mesh = ConeGeometry::new(1.0, 2.0, false, 12).build();
        assert_eq!(mesh.num_verts(), 14);
        assert_eq!(mesh.triangles.len(), 12);
        assert!(mesh.triangles.iter().all(|t| t[2] == 13));
    }

    #[test]
    fn test_faces_point_outward() {
        let mesh = ConeGeometry::new(1.0, 1.0, true, 16).build();
        let center = Vector3::new(0.0, 0.0, 0.25);
        for &[a, b, c] in &mesh.triangles {
            let (pa, pb, pc) = (mesh.positions[a as usize], mesh.positions[b as usize], mesh.positions[c as usize]);
            let n = (pb - pa).cross(&(pc - pa));
            let mid = (pa + pb + pc) / 3.0;
            assert!(n.dot(&(mid - center)) > 0.0);
        }
    }
}
