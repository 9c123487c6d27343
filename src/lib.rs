//! # scenecore - scene authoring core
//!
//! Math, meshes, triangulation and animation sampling for 3D scene
//! authoring tools. Everything is computed on the CPU in double precision;
//! a GPU backend consumes the results through the narrow contract in
//! [`render`].
//!
//! ## Features
//!
//! - **Math**: vectors, column-major matrices, quaternions, Euler angles in
//!   all rotation orders, bounds, frustum tests
//! - **Geometry**: indexed meshes with bone weights, primitive generators,
//!   interleaved render data
//! - **Triangulation**: constrained Delaunay triangulation of polygons with holes
//! - **Animation**: keyframe clips sampled over a node hierarchy
//!
//! ## Example
//!
//! ```
//! use scenecore::prelude::*;
//!
//! let mut mesh = BoxGeometry::new(2.0, 1.0, 1.0).build();
//! mesh.convert_faces_to_wireframe_lines();
//! let data = mesh.render_data(&Vector3::ZERO);
//! assert_eq!(data.primitive_type(), PrimitiveType::Lines);
//! ```

#![warn(missing_docs)]

pub mod animation;
pub mod camera;
pub mod error;
pub mod geometry;
pub mod material;
pub mod math;
pub mod render;
pub mod resource;
pub mod scene;
pub mod triangulation;

pub use error::{Error, Result};

// Re-export commonly used types
pub mod prelude {
    //! Convenient re-exports of commonly used types.

    pub use crate::animation::*;
    pub use crate::camera::*;
    pub use crate::error::{Error, Result};
    pub use crate::geometry::*;
    pub use crate::material::*;
    pub use crate::math::*;
    pub use crate::render::{DrawState, ShaderProgram, UniformValue};
    pub use crate::resource::{Image, ImageDecoder, ResourceCache};
    pub use crate::scene::*;
    pub use crate::triangulation::*;
}

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
