//! Box geometry (rectangular cuboid).

use super::Mesh;
use crate::math::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// Corner offsets and texture coordinates of one face, CCW seen from outside.
const FACE_CORNERS: [(f64, f64, Vector2); 4] = [
    (-1.0, -1.0, Vector2::new(0.0, 0.0)),
    (1.0, -1.0, Vector2::new(1.0, 0.0)),
    (1.0, 1.0, Vector2::new(1.0, 1.0)),
    (-1.0, 1.0, Vector2::new(0.0, 1.0)),
];

/// A box centered at the origin with its own four vertices per face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxGeometry {
    /// Size along X.
    pub width: f64,
    /// Size along Y.
    pub depth: f64,
    /// Size along Z.
    pub height: f64,
}

impl Default for BoxGeometry {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

impl BoxGeometry {
    /// Create a new box geometry.
    pub fn new(width: f64, depth: f64, height: f64) -> Self {
        Self { width, depth, height }
    }

    /// Cube with edge length `size`.
    pub fn cube(size: f64) -> Self {
        Self::new(size, size, size)
    }

    /// Build 24 vertices and 6 quads.
    pub fn build(&self) -> Mesh {
        let half = Vector3::new(self.width, self.depth, self.height) * 0.5;
        let mut mesh = Mesh::with_name("box");

        // (normal, u, v) with u × v = normal
        let faces = [
            (Vector3::UNIT_X, -Vector3::UNIT_Z, Vector3::UNIT_Y),
            (-Vector3::UNIT_X, Vector3::UNIT_Z, Vector3::UNIT_Y),
            (Vector3::UNIT_Y, Vector3::UNIT_X, -Vector3::UNIT_Z),
            (-Vector3::UNIT_Y, Vector3::UNIT_X, Vector3::UNIT_Z),
            (Vector3::UNIT_Z, Vector3::UNIT_X, Vector3::UNIT_Y),
            (-Vector3::UNIT_Z, -Vector3::UNIT_X, Vector3::UNIT_Y),
        ];

        for (normal, u, v) in faces {
            let mut quad = [0u32; 4];
            for (slot, &(su, sv, uv)) in quad.iter_mut().zip(FACE_CORNERS.iter()) {
                let position = (normal + u * su + v * sv).multiply(&half);
                *slot = mesh.add_vert_with(position, normal, uv);
            }
            mesh.add_quad(quad[0], quad[1], quad[2], quad[3]);
        }

        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_bounds() {
        let mesh = BoxGeometry::new(2.0, 4.0, 6.0).build();
        assert_eq!(mesh.num_verts(), 24);
        assert_eq!(mesh.quads.len(), 6);
        let bounds = mesh.bounds();
        assert!(bounds.min.approx_eq(&Vector3::new(-1.0, -2.0, -3.0), 1e-12));
        assert!(bounds.max.approx_eq(&Vector3::new(1.0, 2.0, 3.0), 1e-12));
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_winding_matches_normals() {
        let mut mesh = BoxGeometry::cube(1.0).build();
        let authored = mesh.normals.clone();
        mesh.recalculate_vertex_normals();
        for (a, b) in authored.iter().zip(&mesh.normals) {
            assert!(a.approx_eq(b, 1e-12));
        }
    }

    #[test]
    fn test_uvs_cover_unit_square() {
        let mesh = BoxGeometry::default().build();
        for quad in &mesh.quads {
            let uvs: Vec<Vector2> = quad.iter().map(|&i| mesh.tex_coords[i as usize]).collect();
            assert_eq!(uvs[0], Vector2::new(0.0, 0.0));
            assert_eq!(uvs[2], Vector2::new(1.0, 1.0));
        }
    }
}
