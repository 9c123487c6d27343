//! Interleaved vertex data handed to a GPU backend.

use crate::error::{Error, Result};
use crate::math::Vector3;
use serde::{Deserialize, Serialize};

/// Scalar type of one attribute element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum DataType {
    Float32,
    Float64,
    Int8,
    Int16,
    Int32,
    Uint8,
    Uint16,
    Uint32,
}

impl DataType {
    /// Size of one element in bytes.
    pub const fn size(self) -> usize {
        match self {
            Self::Int8 | Self::Uint8 => 1,
            Self::Int16 | Self::Uint16 => 2,
            Self::Float32 | Self::Int32 | Self::Uint32 => 4,
            Self::Float64 => 8,
        }
    }
}

/// How the index list is assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum PrimitiveType {
    #[default]
    Points,
    Lines,
    Triangles,
}

/// Meaning of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Semantic {
    Position,
    Normal,
    TexCoord,
    Color,
    BoneIndices,
    BoneWeights,
}

impl Semantic {
    /// Layout name of the attribute.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Position => "POSITION",
            Self::Normal => "NORMAL",
            Self::TexCoord => "TEXCOORD",
            Self::Color => "COLOR",
            Self::BoneIndices => "BONE_INDICES",
            Self::BoneWeights => "BONE_WEIGHTS",
        }
    }

    /// Shader input the attribute binds to.
    pub const fn shader_attribute(self) -> &'static str {
        use crate::render::attributes;
        match self {
            Self::Position => attributes::POSITION,
            Self::Normal => attributes::NORMAL,
            Self::TexCoord => attributes::TEX_COORD,
            Self::Color => attributes::COLOR,
            Self::BoneIndices => attributes::BONE_INDICES,
            Self::BoneWeights => attributes::BONE_WEIGHTS,
        }
    }
}

/// One attribute inside an interleaved vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VertexAttribute {
    /// What the attribute holds.
    pub semantic: Semantic,
    /// Element type.
    pub data_type: DataType,
    /// Elements per vertex (1 to 4).
    pub element_count: u32,
    /// Offset from the start of the vertex.
    pub byte_offset: u32,
}

impl VertexAttribute {
    /// Create a new attribute descriptor.
    pub const fn new(semantic: Semantic, data_type: DataType, element_count: u32, byte_offset: u32) -> Self {
        Self { semantic, data_type, element_count, byte_offset }
    }

    /// Layout name, e.g. `"POSITION"`.
    pub const fn name(&self) -> &'static str {
        self.semantic.as_str()
    }

    /// Bytes occupied by this attribute.
    pub const fn byte_size(&self) -> usize {
        self.data_type.size() * self.element_count as usize
    }

    /// One past the last byte of this attribute.
    pub const fn byte_end(&self) -> usize {
        self.byte_offset as usize + self.byte_size()
    }
}

/// Packed vertex bytes plus the description needed to draw them.
///
/// Read-only once built. Positions are stored relative to `anchor`, which
/// keeps single-precision vertices accurate far from the origin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderData {
    bytes: Vec<u8>,
    stride: usize,
    attributes: Vec<VertexAttribute>,
    primitive_type: PrimitiveType,
    indices: Vec<u16>,
    anchor: [f32; 3],
}

impl RenderData {
    /// Assemble and validate.
    pub fn from_parts(
        bytes: Vec<u8>,
        stride: usize,
        attributes: Vec<VertexAttribute>,
        primitive_type: PrimitiveType,
        indices: Vec<u16>,
        anchor: &Vector3,
    ) -> Result<Self> {
        let data = Self {
            bytes,
            stride,
            attributes,
            primitive_type,
            indices,
            anchor: anchor.to_f32_array(),
        };
        data.validate()?;
        Ok(data)
    }

    /// No vertices, no attributes.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check the layout and index invariants.
    pub fn validate(&self) -> Result<()> {
        if self.stride == 0 {
            if self.bytes.is_empty() && self.indices.is_empty() {
                return Ok(());
            }
            return Err(Error::InvalidLayout("zero stride with vertex data".into()));
        }
        if self.bytes.len() % self.stride != 0 {
            return Err(Error::InvalidLayout(format!(
                "{} bytes is not a multiple of stride {}",
                self.bytes.len(),
                self.stride
            )));
        }

        let mut end = 0;
        for attribute in &self.attributes {
            if (attribute.byte_offset as usize) < end {
                return Err(Error::InvalidLayout(format!(
                    "{} overlaps the previous attribute",
                    attribute.name()
                )));
            }
            end = attribute.byte_end();
        }
        if end > self.stride {
            return Err(Error::InvalidLayout(format!("attributes need {end} bytes, stride is {}", self.stride)));
        }

        let count = self.vert_count();
        if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= count) {
            return Err(Error::VertexIndexOutOfRange { index: bad as u32, count });
        }
        Ok(())
    }

    /// Interleaved vertex bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Bytes per vertex.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Attribute descriptors in offset order.
    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    /// Look up an attribute by meaning.
    pub fn attribute(&self, semantic: Semantic) -> Option<&VertexAttribute> {
        self.attributes.iter().find(|a| a.semantic == semantic)
    }

    /// Primitive assembly mode.
    pub fn primitive_type(&self) -> PrimitiveType {
        self.primitive_type
    }

    /// 16-bit index list.
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Offset added back to every position when drawing.
    pub fn anchor(&self) -> [f32; 3] {
        self.anchor
    }

    /// Number of vertices.
    pub fn vert_count(&self) -> usize {
        if self.stride == 0 {
            0
        } else {
            self.bytes.len() / self.stride
        }
    }

    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Bytes of one vertex.
    pub fn vertex_bytes(&self, index: usize) -> Option<&[u8]> {
        let start = index.checked_mul(self.stride)?;
        self.bytes.get(start..start + self.stride)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position_layout() -> Vec<VertexAttribute> {
        vec![
            VertexAttribute::new(Semantic::Position, DataType::Float32, 3, 0),
            VertexAttribute::new(Semantic::Color, DataType::Uint8, 4, 12),
        ]
    }

    #[test]
    fn test_valid_layout() {
        let data = RenderData::from_parts(vec![0; 32], 16, position_layout(), PrimitiveType::Points, vec![0, 1], &Vector3::ZERO);
        let data = data.unwrap_or_default();
        assert_eq!(data.vert_count(), 2);
        assert_eq!(data.attribute(Semantic::Color).map(|a| a.byte_offset), Some(12));
    }

    #[test]
    fn test_rejects_bad_layouts() {
        let short = RenderData::from_parts(vec![0; 30], 16, position_layout(), PrimitiveType::Points, vec![], &Vector3::ZERO);
        assert!(matches!(short, Err(Error::InvalidLayout(_))));

        let overlapping = vec![
            VertexAttribute::new(Semantic::Position, DataType::Float32, 3, 0),
            VertexAttribute::new(Semantic::Color, DataType::Uint8, 4, 8),
        ];
        let r = RenderData::from_parts(vec![0; 16], 16, overlapping, PrimitiveType::Points, vec![], &Vector3::ZERO);
        assert!(matches!(r, Err(Error::InvalidLayout(_))));

        let r = RenderData::from_parts(vec![0; 16], 16, position_layout(), PrimitiveType::Points, vec![1], &Vector3::ZERO);
        assert_eq!(r, Err(Error::VertexIndexOutOfRange { index: 1, count: 1 }));
    }

    #[test]
    fn test_data_type_sizes() {
        assert_eq!(DataType::Float64.size(), 8);
        assert_eq!(DataType::Uint16.size(), 2);
        assert_eq!(VertexAttribute::new(Semantic::TexCoord, DataType::Float32, 2, 24).byte_end(), 32);
    }
}
