//! Editable indexed mesh with per-vertex side arrays and skinning data.

use super::render_data::{DataType, PrimitiveType, RenderData, Semantic, VertexAttribute};
use crate::error::{Error, Result};
use crate::math::{Box3, Matrix4, Rgba8, Sphere, Vector2, Vector3};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

/// Largest vertex count addressable with 16-bit indices.
pub const MAX_RENDER_VERTS: usize = u16::MAX as usize + 1;

/// Influences kept per vertex for skinning.
pub const MAX_BONE_INFLUENCES: usize = 4;

/// Influence of one bone on one vertex.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoneWeight {
    /// Index into [`Mesh::bones`].
    pub bone_index: u32,
    /// Weight of the influence.
    pub weight: f64,
}

impl BoneWeight {
    /// Create a new bone weight.
    pub const fn new(bone_index: u32, weight: f64) -> Self {
        Self { bone_index, weight }
    }
}

/// A skinning bone.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Bone {
    /// Name of the scene node driving this bone.
    pub name: String,
    /// Transform from mesh space into the bone's rest space.
    pub mesh_to_bone: Matrix4,
}

impl Bone {
    /// Create a new bone.
    pub fn new(name: impl Into<String>, mesh_to_bone: Matrix4) -> Self {
        Self { name: name.into(), mesh_to_bone }
    }
}

/// An indexed mesh.
///
/// `positions` defines the vertex count. Every other per-vertex array is
/// either empty or exactly one entry per vertex; the setters grow them on
/// first use. Lines, triangles and quads index into the vertex arrays.
///
/// A `Mesh` is plain owned data. It is not synchronized: callers sharing
/// one across threads must serialize mutation themselves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Optional name.
    pub name: String,
    /// Vertex positions.
    pub positions: Vec<Vector3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// Vertex tangents.
    pub tangents: Vec<Vector3>,
    /// Texture coordinates.
    pub tex_coords: Vec<Vector2>,
    /// Vertex colors.
    pub colors: Vec<Rgba8>,
    /// Bone influences per vertex.
    pub bone_weights: Vec<Vec<BoneWeight>>,
    /// Line segments.
    pub lines: Vec<[u32; 2]>,
    /// Triangles, CCW front face.
    pub triangles: Vec<[u32; 3]>,
    /// Planar quads, CCW front face.
    pub quads: Vec<[u32; 4]>,
    /// Skinning bones.
    pub bones: Vec<Bone>,
    /// Index into the owning model's materials.
    pub material_index: Option<usize>,
}

/// Grow `v` to `n` entries when it is already in use or when `force` is set.
fn fit<T: Clone>(v: &mut Vec<T>, n: usize, fill: T, force: bool) {
    if force || !v.is_empty() {
        v.resize(n, fill);
    }
}

/// Four strongest influences, heaviest first, rescaled to unit ℓ² length.
fn strongest_influences(weights: &[BoneWeight]) -> Vec<BoneWeight> {
    let mut sorted = weights.to_vec();
    sorted.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    sorted.truncate(MAX_BONE_INFLUENCES);

    let norm = sorted.iter().map(|w| w.weight * w.weight).sum::<f64>().sqrt();
    if norm > 0.0 {
        for w in &mut sorted {
            w.weight /= norm;
        }
    }
    sorted
}

fn edge_key(a: u32, b: u32) -> (u32, u32) {
    (a.min(b), a.max(b))
}

impl Mesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mesh with a name.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Number of vertices.
    #[inline]
    pub fn num_verts(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles plus quads.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.triangles.len() + self.quads.len()
    }

    fn index_ok(&self, i: u32) -> bool {
        let ok = (i as usize) < self.num_verts();
        debug_assert!(ok, "vertex index {i} out of range ({} vertices)", self.num_verts());
        if !ok {
            log::warn!("vertex index {} out of range ({} vertices)", i, self.num_verts());
        }
        ok
    }

    fn face_in_range(&self, face: &[u32]) -> bool {
        face.iter().all(|&i| (i as usize) < self.num_verts())
    }

    fn warn_skipped(&self, operation: &str, skipped: usize) {
        if skipped > 0 {
            log::warn!(
                "mesh '{}': {} skipped {} faces with out-of-range indices ({} vertices)",
                self.name,
                operation,
                skipped,
                self.num_verts()
            );
        }
    }

    /// Append a vertex and return its index. Side arrays in use are padded
    /// with defaults so they stay aligned.
    pub fn add_vert(&mut self, position: Vector3) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        let n = self.positions.len();
        fit(&mut self.normals, n, Vector3::ZERO, false);
        fit(&mut self.tangents, n, Vector3::ZERO, false);
        fit(&mut self.tex_coords, n, Vector2::ZERO, false);
        fit(&mut self.colors, n, Rgba8::WHITE, false);
        fit(&mut self.bone_weights, n, Vec::new(), false);
        index
    }

    /// Append a vertex with normal and texture coordinate.
    pub fn add_vert_with(&mut self, position: Vector3, normal: Vector3, tex_coord: Vector2) -> u32 {
        let index = self.add_vert(position);
        self.set_normal(index, normal);
        self.set_tex_coord(index, tex_coord);
        index
    }

    /// Set the normal of a vertex.
    pub fn set_normal(&mut self, vert: u32, normal: Vector3) {
        if self.index_ok(vert) {
            let n = self.num_verts();
            fit(&mut self.normals, n, Vector3::ZERO, true);
            self.normals[vert as usize] = normal;
        }
    }

    /// Set the tangent of a vertex.
    pub fn set_tangent(&mut self, vert: u32, tangent: Vector3) {
        if self.index_ok(vert) {
            let n = self.num_verts();
            fit(&mut self.tangents, n, Vector3::ZERO, true);
            self.tangents[vert as usize] = tangent;
        }
    }

    /// Set the texture coordinate of a vertex.
    pub fn set_tex_coord(&mut self, vert: u32, tex_coord: Vector2) {
        if self.index_ok(vert) {
            let n = self.num_verts();
            fit(&mut self.tex_coords, n, Vector2::ZERO, true);
            self.tex_coords[vert as usize] = tex_coord;
        }
    }

    /// Set the color of a vertex. Unset vertices default to opaque white.
    pub fn set_color(&mut self, vert: u32, color: Rgba8) {
        if self.index_ok(vert) {
            let n = self.num_verts();
            fit(&mut self.colors, n, Rgba8::WHITE, true);
            self.colors[vert as usize] = color;
        }
    }

    /// Give every vertex the same color.
    pub fn set_color_all(&mut self, color: Rgba8) {
        self.colors = vec![color; self.num_verts()];
    }

    /// Append a line segment.
    pub fn add_line(&mut self, a: u32, b: u32) {
        if self.index_ok(a) && self.index_ok(b) {
            self.lines.push([a, b]);
        }
    }

    /// Append a triangle.
    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        if [a, b, c].into_iter().all(|i| self.index_ok(i)) {
            self.triangles.push([a, b, c]);
        }
    }

    /// Append a quad.
    pub fn add_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        if [a, b, c, d].into_iter().all(|i| self.index_ok(i)) {
            self.quads.push([a, b, c, d]);
        }
    }

    /// Append a bone and return its index.
    pub fn add_bone(&mut self, bone: Bone) -> u32 {
        self.bones.push(bone);
        (self.bones.len() - 1) as u32
    }

    /// Add an influence to a vertex.
    pub fn add_bone_weight(&mut self, vert: u32, weight: BoneWeight) {
        if self.index_ok(vert) {
            let n = self.num_verts();
            fit(&mut self.bone_weights, n, Vec::new(), true);
            self.bone_weights[vert as usize].push(weight);
        }
    }

    /// Recompute normals from the faces.
    ///
    /// Each face adds its area-weighted normal to its vertices; the sums
    /// are then normalized. Vertices without a face contribution end up
    /// as the zero vector.
    pub fn recalculate_vertex_normals(&mut self) {
        let mut sums = vec![Vector3::ZERO; self.num_verts()];
        let p = &self.positions;
        let mut skipped = 0;

        for &[a, b, c] in &self.triangles {
            if !self.face_in_range(&[a, b, c]) {
                skipped += 1;
                continue;
            }
            let (pa, pb, pc) = (p[a as usize], p[b as usize], p[c as usize]);
            let n = (pb - pa).cross(&(pc - pa));
            for i in [a, b, c] {
                sums[i as usize] += n;
            }
        }

        for quad in &self.quads {
            if !self.face_in_range(quad) {
                skipped += 1;
                continue;
            }
            let mut n = Vector3::ZERO;
            for k in 0..4 {
                let here = p[quad[k] as usize];
                let next = p[quad[(k + 1) % 4] as usize];
                let prev = p[quad[(k + 3) % 4] as usize];
                n += (next - here).cross(&(prev - here));
            }
            for &i in quad {
                sums[i as usize] += n;
            }
        }
        self.warn_skipped("normals", skipped);

        for n in &mut sums {
            n.normalize();
        }
        self.normals = sums;
    }

    /// Keep the four heaviest influences of each vertex and rescale them
    /// to unit ℓ² length.
    pub fn normalize_bone_weights(&mut self) {
        for weights in &mut self.bone_weights {
            *weights = strongest_influences(weights);
        }
    }

    /// Replace every quad `(a, b, c, d)` by triangles `(a, b, c)` and `(a, c, d)`.
    pub fn triangulate_quads(&mut self) {
        for [a, b, c, d] in std::mem::take(&mut self.quads) {
            self.triangles.push([a, b, c]);
            self.triangles.push([a, c, d]);
        }
    }

    /// Turn all face edges into line segments and drop the faces.
    ///
    /// Vertices at identical positions are treated as one, so an edge
    /// shared by two faces appears once even when the faces carry their
    /// own copies of the vertices. Existing lines are kept.
    pub fn convert_faces_to_wireframe_lines(&mut self) {
        let mut welded: HashMap<[u64; 3], u32> = HashMap::new();
        let canonical: Vec<u32> = self
            .positions
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let key = [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()];
                *welded.entry(key).or_insert(i as u32)
            })
            .collect();

        let mut seen: HashSet<(u32, u32)> = self
            .lines
            .iter()
            .filter(|line| self.face_in_range(line.as_slice()))
            .map(|&[a, b]| edge_key(canonical[a as usize], canonical[b as usize]))
            .collect();

        let faces = self
            .triangles
            .iter()
            .map(|t| t.as_slice())
            .chain(self.quads.iter().map(|q| q.as_slice()));

        let mut new_lines = Vec::new();
        let mut skipped = 0;
        for face in faces {
            if !self.face_in_range(face) {
                skipped += 1;
                continue;
            }
            for k in 0..face.len() {
                let a = canonical[face[k] as usize];
                let b = canonical[face[(k + 1) % face.len()] as usize];
                if a != b && seen.insert(edge_key(a, b)) {
                    new_lines.push([a, b]);
                }
            }
        }

        self.warn_skipped("wireframe", skipped);

        self.lines.extend(new_lines);
        self.triangles.clear();
        self.quads.clear();
    }

    /// Move every position by `delta`.
    pub fn translate(&mut self, delta: &Vector3) {
        for p in &mut self.positions {
            *p += *delta;
        }
    }

    /// Transform positions by `m` and normals and tangents by its 3x3 block.
    ///
    /// Directions stay correct only for rotations and uniform scale; a
    /// non-uniform scale needs the inverse transpose instead.
    pub fn transform(&mut self, m: &Matrix4) {
        let basis = m.get3x3();
        for p in &mut self.positions {
            *p = m.transform_point(p);
        }
        for n in self.normals.iter_mut().chain(self.tangents.iter_mut()) {
            *n = basis.transform_vector(n).normalized();
        }
    }

    /// Append another mesh. Its vertex and bone indices are offset past ours.
    pub fn merge(&mut self, other: &Mesh) {
        let vert_offset = self.num_verts() as u32;
        let bone_offset = self.bones.len() as u32;
        let ours = self.num_verts();
        let total = ours + other.num_verts();

        macro_rules! merge_side {
            ($field:ident, $fill:expr) => {
                if !self.$field.is_empty() || !other.$field.is_empty() {
                    self.$field.resize(ours, $fill);
                    if other.$field.is_empty() {
                        self.$field.resize(total, $fill);
                    } else {
                        self.$field.extend(other.$field.iter().cloned());
                    }
                }
            };
        }

        self.positions.extend_from_slice(&other.positions);
        merge_side!(normals, Vector3::ZERO);
        merge_side!(tangents, Vector3::ZERO);
        merge_side!(tex_coords, Vector2::ZERO);
        merge_side!(colors, Rgba8::WHITE);

        if !self.bone_weights.is_empty() || !other.bone_weights.is_empty() {
            self.bone_weights.resize(ours, Vec::new());
            if other.bone_weights.is_empty() {
                self.bone_weights.resize(total, Vec::new());
            } else {
                self.bone_weights.extend(other.bone_weights.iter().map(|ws| {
                    ws.iter()
                        .map(|w| BoneWeight::new(w.bone_index + bone_offset, w.weight))
                        .collect()
                }));
            }
        }

        self.lines.extend(other.lines.iter().map(|l| l.map(|i| i + vert_offset)));
        self.triangles.extend(other.triangles.iter().map(|t| t.map(|i| i + vert_offset)));
        self.quads.extend(other.quads.iter().map(|q| q.map(|i| i + vert_offset)));
        self.bones.extend(other.bones.iter().cloned());
    }

    /// Axis-aligned bounds of the positions.
    pub fn bounds(&self) -> Box3 {
        Box3::from_points(&self.positions)
    }

    /// Sphere around the bounds center enclosing every position.
    pub fn bounding_sphere(&self) -> Sphere {
        Sphere::from_points(&self.positions)
    }

    /// Check index ranges and side-array lengths.
    pub fn validate(&self) -> Result<()> {
        let count = self.num_verts();
        let check_len = |name: &'static str, len: usize| {
            if len == 0 || len == count {
                Ok(())
            } else {
                Err(Error::AttributeLengthMismatch { name, len, expected: count })
            }
        };
        check_len("normals", self.normals.len())?;
        check_len("tangents", self.tangents.len())?;
        check_len("tex_coords", self.tex_coords.len())?;
        check_len("colors", self.colors.len())?;
        check_len("bone_weights", self.bone_weights.len())?;

        let indices = self
            .lines
            .iter()
            .flatten()
            .chain(self.triangles.iter().flatten())
            .chain(self.quads.iter().flatten());
        for &index in indices {
            if index as usize >= count {
                return Err(Error::VertexIndexOutOfRange { index, count });
            }
        }

        for weights in &self.bone_weights {
            if let Some(w) = weights.iter().find(|w| w.bone_index as usize >= self.bones.len()) {
                return Err(Error::InvalidLayout(format!(
                    "bone index {} out of range ({} bones)",
                    w.bone_index,
                    self.bones.len()
                )));
            }
        }
        Ok(())
    }

    /// Pack the mesh into interleaved render data.
    ///
    /// Faces win over lines, lines over points. Quads are split on the fly.
    /// Positions are written relative to `anchor`. Meshes larger than
    /// 65 536 vertices cannot be indexed with 16 bits and yield an empty
    /// result.
    pub fn render_data(&self, anchor: &Vector3) -> RenderData {
        let n = self.num_verts();
        if let Err(e) = check_vertex_count(n) {
            debug_assert!(n <= MAX_RENDER_VERTS, "{n} vertices exceed 16-bit indices");
            log::warn!("{}", e);
            return RenderData::empty();
        }
        if let Err(e) = self.validate() {
            log::warn!("mesh '{}' not renderable: {}", self.name, e);
            return RenderData::empty();
        }

        let (primitive_type, indices) = self.primitive_indices();

        let has_normals = !self.normals.is_empty();
        let has_tex_coords = !self.tex_coords.is_empty();
        let has_bones = !self.bone_weights.is_empty();

        let mut attributes = Vec::new();
        let mut stride = 0u32;
        let mut push = |semantic, data_type, count| {
            let attribute = VertexAttribute::new(semantic, data_type, count, stride);
            stride += attribute.byte_size() as u32;
            attributes.push(attribute);
        };
        push(Semantic::Position, DataType::Float32, 3);
        push(Semantic::Color, DataType::Uint8, 4);
        if has_normals {
            push(Semantic::Normal, DataType::Float32, 3);
        }
        if has_tex_coords {
            push(Semantic::TexCoord, DataType::Float32, 2);
        }
        if has_bones {
            push(Semantic::BoneIndices, DataType::Uint8, 4);
            push(Semantic::BoneWeights, DataType::Uint8, 4);
        }

        let mut bytes = Vec::with_capacity(n * stride as usize);
        for i in 0..n {
            let local = self.positions[i] - *anchor;
            bytes.extend_from_slice(bytemuck::bytes_of(&local.to_f32_array()));
            let color = self.colors.get(i).copied().unwrap_or(Rgba8::WHITE);
            bytes.extend_from_slice(bytemuck::bytes_of(&color));
            if has_normals {
                bytes.extend_from_slice(bytemuck::bytes_of(&self.normals[i].to_f32_array()));
            }
            if has_tex_coords {
                bytes.extend_from_slice(bytemuck::bytes_of(&self.tex_coords[i].to_f32_array()));
            }
            if has_bones {
                let (bone_indices, bone_weights) = pack_influences(&self.bone_weights[i]);
                bytes.extend_from_slice(&bone_indices);
                bytes.extend_from_slice(&bone_weights);
            }
        }

        match RenderData::from_parts(bytes, stride as usize, attributes, primitive_type, indices, anchor) {
            Ok(data) => data,
            Err(e) => {
                log::warn!("mesh '{}' produced invalid render data: {}", self.name, e);
                RenderData::empty()
            }
        }
    }

    fn primitive_indices(&self) -> (PrimitiveType, Vec<u16>) {
        if self.num_faces() > 0 {
            if !self.lines.is_empty() {
                warn_faces_and_lines_once(&self.name, self.lines.len());
            }
            let mut indices = Vec::with_capacity(self.triangles.len() * 3 + self.quads.len() * 6);
            for t in &self.triangles {
                indices.extend(t.iter().map(|&i| i as u16));
            }
            for &[a, b, c, d] in &self.quads {
                indices.extend([a, b, c, a, c, d].map(|i| i as u16));
            }
            (PrimitiveType::Triangles, indices)
        } else if !self.lines.is_empty() {
            let indices = self.lines.iter().flatten().map(|&i| i as u16).collect();
            (PrimitiveType::Lines, indices)
        } else {
            (PrimitiveType::Points, (0..self.num_verts()).map(|i| i as u16).collect())
        }
    }
}

fn check_vertex_count(n: usize) -> Result<()> {
    if n > MAX_RENDER_VERTS {
        Err(Error::TooManyVertices(n))
    } else {
        Ok(())
    }
}

/// Report a mesh carrying both faces and lines, once per process.
/// Returns true when this call logged.
fn warn_faces_and_lines_once(name: &str, lines: usize) -> bool {
    static WARNED: AtomicBool = AtomicBool::new(false);
    if WARNED.swap(true, Ordering::Relaxed) {
        return false;
    }
    log::warn!("mesh '{}' has both faces and {} lines; drawing faces only", name, lines);
    true
}

/// Bone indices and weights as bytes, strongest first, weights as 8-bit fractions.
fn pack_influences(weights: &[BoneWeight]) -> ([u8; 4], [u8; 4]) {
    let mut indices = [0u8; 4];
    let mut bytes = [0u8; 4];
    for (k, w) in strongest_influences(weights).iter().enumerate() {
        if w.bone_index > u8::MAX as u32 {
            log::warn!("bone index {} does not fit the byte layout", w.bone_index);
        }
        indices[k] = w.bone_index.min(u8::MAX as u32) as u8;
        bytes[k] = (w.weight.clamp(0.0, 1.0) * 255.0).round() as u8;
    }
    (indices, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_mesh() -> Mesh {
        let mut m = Mesh::new();
        let a = m.add_vert(Vector3::new(0.0, 0.0, 0.0));
        let b = m.add_vert(Vector3::new(1.0, 0.0, 0.0));
        let c = m.add_vert(Vector3::new(1.0, 1.0, 0.0));
        let d = m.add_vert(Vector3::new(0.0, 1.0, 0.0));
        m.add_quad(a, b, c, d);
        m
    }

    #[test]
    fn test_side_arrays_stay_aligned() {
        let mut m = Mesh::new();
        m.add_vert(Vector3::ZERO);
        m.add_vert(Vector3::UNIT_X);
        m.set_color(1, Rgba8::RED);
        assert_eq!(m.colors, vec![Rgba8::WHITE, Rgba8::RED]);
        m.add_vert(Vector3::UNIT_Y);
        assert_eq!(m.colors.len(), 3);
        assert!(m.normals.is_empty());
        assert!(m.validate().is_ok());
    }

    #[test]
    fn test_triangulate_quads_order() {
        let mut m = quad_mesh();
        m.triangulate_quads();
        assert!(m.quads.is_empty());
        assert_eq!(m.triangles, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn test_quad_normals() {
        let mut m = quad_mesh();
        m.recalculate_vertex_normals();
        for n in &m.normals {
            assert!(n.approx_eq(&Vector3::UNIT_Z, 1e-12));
        }
    }

    #[test]
    fn test_isolated_vertex_normal_is_zero() {
        let mut m = quad_mesh();
        m.add_vert(Vector3::new(5.0, 5.0, 5.0));
        m.recalculate_vertex_normals();
        assert_eq!(m.normals[4], Vector3::ZERO);
    }

    #[test]
    fn test_bone_weights_sorted_before_truncation() {
        let mut m = Mesh::new();
        m.add_vert(Vector3::ZERO);
        for (bone, weight) in [(0, 0.1), (1, 0.5), (2, 0.05), (3, 0.3), (4, 0.4)] {
            m.add_bone_weight(0, BoneWeight::new(bone, weight));
        }
        m.normalize_bone_weights();
        let kept: Vec<u32> = m.bone_weights[0].iter().map(|w| w.bone_index).collect();
        assert_eq!(kept, vec![1, 4, 3, 0]);
        let norm: f64 = m.bone_weights[0].iter().map(|w| w.weight * w.weight).sum();
        assert!((norm - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_wireframe_dedups_shared_edge() {
        let mut m = quad_mesh();
        m.triangulate_quads();
        m.convert_faces_to_wireframe_lines();
        assert_eq!(m.lines.len(), 5);
        assert_eq!(m.num_faces(), 0);
    }

    #[test]
    fn test_merge_offsets_indices_and_bones() {
        let mut a = quad_mesh();
        a.add_bone(Bone::new("root", Matrix4::IDENTITY));
        let mut b = quad_mesh();
        b.add_bone(Bone::new("tip", Matrix4::IDENTITY));
        b.add_bone_weight(2, BoneWeight::new(0, 1.0));
        a.merge(&b);
        assert_eq!(a.num_verts(), 8);
        assert_eq!(a.quads[1], [4, 5, 6, 7]);
        assert_eq!(a.bone_weights.len(), 8);
        assert_eq!(a.bone_weights[6], vec![BoneWeight::new(1, 1.0)]);
        assert!(a.validate().is_ok());
    }

    #[test]
    fn test_validate_reports_bad_index() {
        let mut m = quad_mesh();
        m.triangles.push([0, 1, 9]);
        assert_eq!(m.validate(), Err(Error::VertexIndexOutOfRange { index: 9, count: 4 }));
    }

    #[test]
    fn test_render_data_layout() {
        let mut m = quad_mesh();
        m.recalculate_vertex_normals();
        m.lines.push([0, 2]);
        let data = m.render_data(&Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(data.primitive_type(), PrimitiveType::Triangles);
        assert_eq!(data.indices(), &[0, 1, 2, 0, 2, 3]);
        assert_eq!(data.stride(), 12 + 4 + 12);
        assert_eq!(data.vert_count(), 4);

        let first = data.vertex_bytes(0).unwrap_or_default();
        let x: f32 = bytemuck::pod_read_unaligned(&first[0..4]);
        assert_eq!(x, -1.0);
        assert_eq!(&first[12..16], &[255, 255, 255, 255]);
    }

    #[test]
    fn test_render_data_lines_then_points() {
        let mut m = Mesh::new();
        m.add_vert(Vector3::ZERO);
        m.add_vert(Vector3::UNIT_X);
        assert_eq!(m.render_data(&Vector3::ZERO).primitive_type(), PrimitiveType::Points);
        m.add_line(0, 1);
        let data = m.render_data(&Vector3::ZERO);
        assert_eq!(data.primitive_type(), PrimitiveType::Lines);
        assert_eq!(data.indices(), &[0, 1]);
    }

    #[test]
    fn test_vertex_count_limit() {
        assert!(check_vertex_count(MAX_RENDER_VERTS).is_ok());
        assert!(matches!(
            check_vertex_count(MAX_RENDER_VERTS + 1),
            Err(Error::TooManyVertices(n)) if n == MAX_RENDER_VERTS + 1
        ));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "exceed 16-bit indices")]
    fn test_render_data_too_many_vertices_asserts() {
        let mut m = Mesh::new();
        m.positions = vec![Vector3::ZERO; MAX_RENDER_VERTS + 1];
        m.render_data(&Vector3::ZERO);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_render_data_too_many_vertices_is_empty() {
        let mut m = Mesh::new();
        m.positions = vec![Vector3::ZERO; MAX_RENDER_VERTS + 1];
        assert!(m.render_data(&Vector3::ZERO).is_empty());
    }

    #[test]
    fn test_faces_and_lines_warn_once() {
        warn_faces_and_lines_once("first", 1);
        assert!(!warn_faces_and_lines_once("second", 2));
    }

    fn triangle_with_bad_index() -> Mesh {
        let mut m = Mesh::new();
        m.add_vert(Vector3::ZERO);
        m.add_vert(Vector3::UNIT_X);
        m.add_vert(Vector3::UNIT_Y);
        m.triangles.push([0, 1, 2]);
        m.triangles.push([0, 1, 7]);
        m
    }

    #[test]
    fn test_normals_skip_out_of_range_faces() {
        let mut m = triangle_with_bad_index();
        m.recalculate_vertex_normals();
        assert_eq!(m.normals.len(), 3);
        for n in &m.normals {
            assert!(n.approx_eq(&Vector3::UNIT_Z, 1e-12));
        }
    }

    #[test]
    fn test_wireframe_skips_out_of_range_faces() {
        let mut m = triangle_with_bad_index();
        m.lines.push([2, 9]);
        m.convert_faces_to_wireframe_lines();
        assert_eq!(m.num_faces(), 0);
        assert_eq!(m.lines.len(), 4);
        assert!(m.lines[1..].iter().flatten().all(|&i| i < 3));
    }
}
