//! Error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by the validating entry points of the crate.
///
/// Numeric code does not use this type; it returns documented sentinels
/// (zero matrix, unchanged vector, `Touch::Outside`) instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A line, triangle or quad references a vertex that does not exist.
    #[error("vertex index {index} out of range ({count} vertices)")]
    VertexIndexOutOfRange {
        /// Offending index.
        index: u32,
        /// Number of vertices in the mesh.
        count: usize,
    },

    /// A per-vertex side array is neither empty nor one entry per vertex.
    #[error("attribute {name} has {len} entries, expected 0 or {expected}")]
    AttributeLengthMismatch {
        /// Attribute name.
        name: &'static str,
        /// Actual length.
        len: usize,
        /// Vertex count.
        expected: usize,
    },

    /// The mesh does not fit into 16-bit indices.
    #[error("{0} vertices exceed the 16-bit index range")]
    TooManyVertices(usize),

    /// Interleaved vertex layout is inconsistent.
    #[error("invalid vertex layout: {0}")]
    InvalidLayout(String),

    /// A resource file was not found.
    #[error("resource not found: {}", .0.display())]
    ResourceMissing(PathBuf),

    /// A resource was found but could not be decoded.
    #[error("failed to decode {}: {reason}", .path.display())]
    DecodeFailed {
        /// Resource path.
        path: PathBuf,
        /// Decoder message.
        reason: String,
    },

    /// Polygon input cannot be triangulated.
    #[error("degenerate polygon: {0}")]
    DegeneratePolygon(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
