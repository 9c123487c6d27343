//! Coordinate axes gizmo built from arrows.

use super::{ConeGeometry, CylinderGeometry, Mesh};
use crate::math::consts::HALF_PI;
use crate::math::{Matrix4, Rgba8, Vector3};
use serde::{Deserialize, Serialize};

/// Three arrows along +X, +Y and +Z colored red, green and blue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxesGeometry {
    /// Length of each arrow including its head.
    pub axis_length: f64,
    /// Segments around each arrow.
    pub u_segments: u32,
}

impl Default for AxesGeometry {
    fn default() -> Self {
        Self::new(1.0, 16)
    }
}

impl AxesGeometry {
    /// Create a new axes geometry.
    pub fn new(axis_length: f64, u_segments: u32) -> Self {
        Self { axis_length, u_segments: u_segments.max(3) }
    }

    /// One arrow along +Z: a shaft for 80% of the length and a cone head.
    fn arrow(&self) -> Mesh {
        let len = self.axis_length;
        let mut arrow = CylinderGeometry::new(0.02 * len, 0.02 * len, 0.8 * len)
            .with_caps(true, false)
            .with_segments(self.u_segments, 1)
            .build();

        let mut head = ConeGeometry::new(0.05 * len, 0.2 * len, true, self.u_segments).build();
        head.translate(&Vector3::new(0.0, 0.0, 0.8 * len));
        arrow.merge(&head);
        arrow
    }

    /// Build the merged mesh.
    pub fn build(&self) -> Mesh {
        let mut mesh = Mesh::with_name("axes");
        let axes = [
            (Matrix4::rotate(HALF_PI, &Vector3::UNIT_Y), Rgba8::RED),
            (Matrix4::rotate(-HALF_PI, &Vector3::UNIT_X), Rgba8::GREEN),
            (Matrix4::IDENTITY, Rgba8::BLUE),
        ];

        for (rotation, color) in axes {
            let mut arrow = self.arrow();
            arrow.transform(&rotation);
            arrow.set_color_all(color);
            mesh.merge(&arrow);
        }
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_tips_and_colors() {
        let axes = AxesGeometry::new(2.0, 8);
        let mesh = axes.build();
        let per_arrow = mesh.num_verts() / 3;
        let expected = [
            (Vector3::new(2.0, 0.0, 0.0), Rgba8::RED),
            (Vector3::new(0.0, 2.0, 0.0), Rgba8::GREEN),
            (Vector3::new(0.0, 0.0, 2.0), Rgba8::BLUE),
        ];

        for (k, (tip, color)) in expected.iter().enumerate() {
            let range = k * per_arrow..(k + 1) * per_arrow;
            assert!(mesh.positions[range.clone()].iter().any(|p| p.approx_eq(tip, 1e-9)));
            assert!(mesh.colors[range].iter().all(|c| c == color));
        }
        assert!(mesh.validate().is_ok());
    }
}
