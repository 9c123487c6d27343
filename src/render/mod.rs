//! Contract with the GPU backend.
//!
//! The core never talks to a graphics API. It hands [`RenderData`] blobs
//! and uniform values to a [`ShaderProgram`] implemented by the backend,
//! using the well-known names below.
//!
//! [`RenderData`]: crate::geometry::RenderData

mod draw_state;
mod program;

pub use draw_state::{bind_attributes, DrawState, DIFFUSE_TEXTURE_UNIT};
pub use program::{ShaderProgram, UniformValue};

/// Uniform names shared with shader sources.
pub mod uniforms {
    /// Object to camera matrix.
    pub const MODEL_VIEW: &str = "mtxModelView";
    /// Normal matrix.
    pub const NORMAL: &str = "mtxNormal";
    /// Projection matrix.
    pub const PROJECTION: &str = "mtxProjection";
    /// Skinning palette.
    pub const BONES: &str = "mtxBones";
    /// Skinning switch.
    pub const USE_BONES: &str = "useBones";
    /// Diffuse texture sampler.
    pub const TEXTURE: &str = "tex";
    /// Light direction.
    pub const LIGHT_DIR: &str = "lightDir";
    /// Material ambient color.
    pub const MTL_AMBIENT: &str = "mtlAmbient";
    /// Material diffuse color.
    pub const MTL_DIFFUSE: &str = "mtlDiffuse";
    /// Material specular color.
    pub const MTL_SPECULAR: &str = "mtlSpecular";
    /// Material emissive color.
    pub const MTL_EMISSIVE: &str = "mtlEmissive";
    /// Material shininess exponent.
    pub const MTL_SHININESS: &str = "mtlShininess";
    /// Material specular strength.
    pub const MTL_SHININESS_STRENGTH: &str = "mtlShininessStrength";
    /// Viewport size in pixels.
    pub const VIEWPORT_SIZE: &str = "viewportSize";
    /// Line width in pixels.
    pub const LINE_WIDTH: &str = "lineWidth";
}

/// Vertex attribute names shared with shader sources.
pub mod attributes {
    /// Position.
    pub const POSITION: &str = "vertPosition";
    /// Normal.
    pub const NORMAL: &str = "vertNormal";
    /// Texture coordinate.
    pub const TEX_COORD: &str = "vertTexCoord";
    /// RGBA8 color.
    pub const COLOR: &str = "vertColor";
    /// Up to four bone indices.
    pub const BONE_INDICES: &str = "vertBoneIndices";
    /// Up to four bone weights.
    pub const BONE_WEIGHTS: &str = "vertBoneWeights";
}
