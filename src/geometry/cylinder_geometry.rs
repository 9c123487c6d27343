//! Cylinder and truncated cone geometry.

use super::{DiskGeometry, Mesh};
use crate::math::consts::{PI, TWO_PI};
use crate::math::{Matrix4, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// A cylinder standing on the XY plane with its axis along +Z.
///
/// Differing radii give a truncated cone; side normals lean along the slope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CylinderGeometry {
    /// Radius at z = 0.
    pub radius_bottom: f64,
    /// Radius at z = height.
    pub radius_top: f64,
    /// Height along Z.
    pub height: f64,
    /// Close the bottom with a disk.
    pub cap_bottom: bool,
    /// Close the top with a disk.
    pub cap_top: bool,
    /// Segments around the axis.
    pub u_segments: u32,
    /// Segments along the axis.
    pub v_segments: u32,
}

impl Default for CylinderGeometry {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

impl CylinderGeometry {
    /// Closed cylinder with 32 segments around and one along the axis.
    pub fn new(radius_bottom: f64, radius_top: f64, height: f64) -> Self {
        Self {
            radius_bottom,
            radius_top,
            height,
            cap_bottom: true,
            cap_top: true,
            u_segments: 32,
            v_segments: 1,
        }
    }

    /// Set the segment counts.
    pub fn with_segments(mut self, u_segments: u32, v_segments: u32) -> Self {
        self.u_segments = u_segments.max(3);
        self.v_segments = v_segments.max(1);
        self
    }

    /// Choose which ends are closed.
    pub fn with_caps(mut self, cap_bottom: bool, cap_top: bool) -> Self {
        self.cap_bottom = cap_bottom;
        self.cap_top = cap_top;
        self
    }

    /// Build `(u_segments + 1)(v_segments + 1)` side vertices plus the caps.
    pub fn build(&self) -> Mesh {
        let mut mesh = Mesh::with_name("cylinder");
        let (u_seg, v_seg) = (self.u_segments.max(3), self.v_segments.max(1));
        let alpha = (self.radius_bottom - self.radius_top).atan2(self.height);
        let (sin_alpha, cos_alpha) = alpha.sin_cos();

        for iv in 0..=v_seg {
            let fv = iv as f64 / v_seg as f64;
            let radius = self.radius_bottom + (self.radius_top - self.radius_bottom) * fv;
            for iu in 0..=u_seg {
                let fu = iu as f64 / u_seg as f64;
                let (sin, cos) = (TWO_PI * fu).sin_cos();
                mesh.add_vert_with(
                    Vector3::new(radius * cos, radius * sin, self.height * fv),
                    Vector3::new(cos * cos_alpha, sin * cos_alpha, sin_alpha),
                    Vector2::new(fu, fv),
                );
            }
        }

        let row = u_seg + 1;
        for iv in 0..v_seg {
            for iu in 0..u_seg {
                let a = iv * row + iu;
                mesh.add_quad(a, a + 1, a + 1 + row, a + row);
            }
        }

        if self.cap_top && self.radius_top > 0.0 {
            let mut cap = DiskGeometry::new(self.radius_top, u_seg).build();
            cap.translate(&Vector3::new(0.0, 0.0, self.height));
            mesh.merge(&cap);
        }
        if self.cap_bottom && self.radius_bottom > 0.0 {
            let mut cap = DiskGeometry::new(self.radius_bottom, u_seg).build();
            cap.transform(&Matrix4::rotate(PI, &Vector3::UNIT_X));
            mesh.merge(&cap);
        }

        mesh
    }
}
