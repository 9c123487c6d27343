//! Mesh authoring, procedural primitives and render data packing.

mod axes_geometry;
mod box_geometry;
mod cone_geometry;
mod cylinder_geometry;
mod disk_geometry;
mod mesh;
mod render_data;
mod sphere_geometry;
mod torus_geometry;

pub use axes_geometry::AxesGeometry;
pub use box_geometry::BoxGeometry;
pub use cone_geometry::ConeGeometry;
pub use cylinder_geometry::CylinderGeometry;
pub use disk_geometry::DiskGeometry;
pub use mesh::{Bone, BoneWeight, Mesh, MAX_BONE_INFLUENCES, MAX_RENDER_VERTS};
pub use render_data::{DataType, PrimitiveType, RenderData, Semantic, VertexAttribute};
pub use sphere_geometry::SphereGeometry;
pub use torus_geometry::TorusGeometry;
