//! Surface appearance consumed by the GPU backend.

use crate::math::Vector3;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Phong-style material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Material name.
    pub name: String,
    /// Diffuse color.
    pub diffuse: Vector3,
    /// Specular color.
    pub specular: Vector3,
    /// Ambient color.
    pub ambient: Vector3,
    /// Emissive color.
    pub emissive: Vector3,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Specular exponent.
    pub shininess: f64,
    /// Scale applied to the specular term.
    pub shininess_strength: f64,
    /// Line width in pixels for line primitives.
    pub line_width: f64,
    /// Draw faces as outlines.
    pub wireframe: bool,
    /// Disable back-face culling.
    pub two_sided: bool,
    /// Enable depth testing.
    pub depth_test: bool,
    /// Opaque texture handle owned by the GPU backend.
    pub texture: Option<u32>,
}

impl Default for Material {
    fn default() -> Self {
        Self::new("default")
    }
}

impl Material {
    /// Create a white, opaque material.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            diffuse: Vector3::splat(0.8),
            specular: Vector3::ZERO,
            ambient: Vector3::splat(0.2),
            emissive: Vector3::ZERO,
            opacity: 1.0,
            shininess: 0.0,
            shininess_strength: 1.0,
            line_width: 1.0,
            wireframe: false,
            two_sided: false,
            depth_test: true,
            texture: None,
        }
    }

    /// Set the diffuse color.
    pub fn with_diffuse(mut self, diffuse: Vector3) -> Self {
        self.diffuse = diffuse;
        self
    }

    /// Set the texture handle.
    pub fn with_texture(mut self, texture: u32) -> Self {
        self.texture = Some(texture);
        self
    }

    /// True when blending is needed.
    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }

    /// Pack the numeric fields for a uniform buffer.
    pub fn to_uniform(&self) -> MaterialUniform {
        let rgba = |c: &Vector3, a: f64| [c.x as f32, c.y as f32, c.z as f32, a as f32];
        MaterialUniform {
            ambient: rgba(&self.ambient, 1.0),
            diffuse: rgba(&self.diffuse, self.opacity),
            specular: rgba(&self.specular, 1.0),
            emissive: rgba(&self.emissive, 1.0),
            shininess: self.shininess as f32,
            shininess_strength: self.shininess_strength as f32,
            line_width: self.line_width as f32,
            use_texture: u32::from(self.texture.is_some()),
        }
    }
}

/// Material uniform block (std140 compatible).
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct MaterialUniform {
    /// Ambient color, alpha unused.
    pub ambient: [f32; 4],
    /// Diffuse color, opacity in w.
    pub diffuse: [f32; 4],
    /// Specular color, alpha unused.
    pub specular: [f32; 4],
    /// Emissive color, alpha unused.
    pub emissive: [f32; 4],
    /// Specular exponent.
    pub shininess: f32,
    /// Specular scale.
    pub shininess_strength: f32,
    /// Line width in pixels.
    pub line_width: f32,
    /// 1 when a texture is bound.
    pub use_texture: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let m = Material::default();
        assert!(m.depth_test);
        assert!(!m.is_transparent());
        assert_eq!(m.texture, None);
    }

    #[test]
    fn test_uniform_packing() {
        let mut m = Material::new("glass").with_diffuse(Vector3::new(0.1, 0.2, 0.3)).with_texture(7);
        m.opacity = 0.5;
        let u = m.to_uniform();
        assert_eq!(u.diffuse, [0.1, 0.2, 0.3, 0.5]);
        assert_eq!(u.use_texture, 1);
        assert_eq!(bytemuck::bytes_of(&u).len(), 80);
    }
}
