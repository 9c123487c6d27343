//! Constrained Delaunay triangulation of planar polygon features.

mod half_edge;
mod polygon;
mod triangulator;

pub use polygon::{ring_signed_area, Polygon};
pub use triangulator::{Triangulation, TriangulationConfig, Triangulator};
