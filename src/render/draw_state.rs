//! Per-draw uniform state pushed to a shader program.

use super::{uniforms, ShaderProgram, UniformValue};
use crate::camera::{Camera, Viewport};
use crate::geometry::{RenderData, VertexAttribute};
use crate::material::Material;
use crate::math::{Matrix3, Matrix4, Vector3};

/// Texture unit the diffuse texture is bound to.
pub const DIFFUSE_TEXTURE_UNIT: i32 = 0;

/// Everything a draw call binds besides vertex data.
#[derive(Debug, Clone)]
pub struct DrawState<'a> {
    /// Object to camera transform.
    pub model_view: Matrix4,
    /// Camera projection.
    pub projection: Matrix4,
    /// Skinning palette; empty disables skinning.
    pub bones: &'a [Matrix4],
    /// Surface material.
    pub material: &'a Material,
    /// Light direction in camera space.
    pub light_dir: Vector3,
    /// Target viewport.
    pub viewport: Viewport,
}

impl<'a> DrawState<'a> {
    /// State for drawing `model` through `camera` with default lighting.
    pub fn new(camera: &Camera, model: &Matrix4, material: &'a Material, viewport: Viewport) -> Self {
        Self {
            model_view: *camera.view_matrix() * *model,
            projection: *camera.projection_matrix(),
            bones: &[],
            material,
            light_dir: Vector3::new(0.0, 0.0, 1.0),
            viewport,
        }
    }

    /// Attach a skinning palette.
    pub fn with_bones(mut self, bones: &'a [Matrix4]) -> Self {
        self.bones = bones;
        self
    }

    /// Set the camera-space light direction.
    pub fn with_light_dir(mut self, light_dir: Vector3) -> Self {
        self.light_dir = light_dir.normalized();
        self
    }

    /// Inverse transpose of the model-view rotation.
    pub fn normal_matrix(&self) -> Matrix3 {
        Matrix3::normal_matrix(&self.model_view)
    }

    /// Push every uniform the program exposes. Returns how many were set.
    pub fn apply(&self, program: &mut dyn ShaderProgram) -> usize {
        let m = self.material;
        let use_bones = !self.bones.is_empty();

        let mut values: Vec<(&str, UniformValue)> = vec![
            (uniforms::MODEL_VIEW, (&self.model_view).into()),
            (uniforms::NORMAL, (&self.normal_matrix()).into()),
            (uniforms::PROJECTION, (&self.projection).into()),
            (uniforms::USE_BONES, use_bones.into()),
            (uniforms::LIGHT_DIR, self.light_dir.into()),
            (uniforms::MTL_AMBIENT, m.ambient.into()),
            (uniforms::MTL_DIFFUSE, m.diffuse.into()),
            (uniforms::MTL_SPECULAR, m.specular.into()),
            (uniforms::MTL_EMISSIVE, m.emissive.into()),
            (uniforms::MTL_SHININESS, m.shininess.into()),
            (uniforms::MTL_SHININESS_STRENGTH, m.shininess_strength.into()),
            (uniforms::VIEWPORT_SIZE, self.viewport.size().into()),
            (uniforms::LINE_WIDTH, m.line_width.into()),
        ];
        if use_bones {
            values.push((uniforms::BONES, self.bones.into()));
        }
        if m.texture.is_some() {
            values.push((uniforms::TEXTURE, UniformValue::Int(DIFFUSE_TEXTURE_UNIT)));
        }

        let mut set = 0;
        for (name, value) in values {
            if program.set_named(name, value) {
                set += 1;
            } else {
                log::trace!("program has no uniform '{}'", name);
            }
        }
        set
    }
}

/// Resolve the attribute locations of `data` in `program`.
///
/// Attributes the program does not consume are left out.
pub fn bind_attributes<'d>(program: &dyn ShaderProgram, data: &'d RenderData) -> Vec<(i32, &'d VertexAttribute)> {
    data.attributes()
        .iter()
        .filter_map(|attr| {
            let name = attr.semantic.shader_attribute();
            let location = program.attribute_location(name);
            if location.is_none() {
                log::trace!("program has no attribute '{}'", name);
            }
            location.map(|loc| (loc, attr))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoxGeometry;
    use crate::render::attributes;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MockProgram {
        uniforms: HashMap<String, i32>,
        attributes: HashMap<String, i32>,
        values: HashMap<i32, UniformValue>,
    }

    impl MockProgram {
        fn with_uniforms(names: &[&str]) -> Self {
            let mut program = Self::default();
            for (i, name) in names.iter().enumerate() {
                program.uniforms.insert(name.to_string(), i as i32);
            }
            program
        }

        fn value(&self, name: &str) -> Option<&UniformValue> {
            self.uniforms.get(name).and_then(|loc| self.values.get(loc))
        }
    }

    impl ShaderProgram for MockProgram {
        fn uniform_location(&self, name: &str) -> Option<i32> {
            self.uniforms.get(name).copied()
        }

        fn attribute_location(&self, name: &str) -> Option<i32> {
            self.attributes.get(name).copied()
        }

        fn set_uniform(&mut self, location: i32, value: UniformValue) {
            self.values.insert(location, value);
        }
    }

    #[test]
    fn test_apply_skips_missing_uniforms() {
        let material = Material::default();
        let camera = Camera::default();
        let state = DrawState::new(&camera, &Matrix4::IDENTITY, &material, Viewport::from_size(640, 480));
        let mut program = MockProgram::with_uniforms(&[uniforms::MODEL_VIEW, uniforms::VIEWPORT_SIZE, uniforms::BONES]);

        assert_eq!(state.apply(&mut program), 2);
        assert_eq!(program.value(uniforms::VIEWPORT_SIZE), Some(&UniformValue::Vec2([640.0, 480.0])));
        assert!(program.value(uniforms::BONES).is_none());
    }

    #[test]
    fn test_bones_and_texture() {
        let material = Material::default().with_texture(7);
        let camera = Camera::default();
        let bones = [Matrix4::IDENTITY, Matrix4::translate(Vector3::UNIT_X)];
        let state = DrawState::new(&camera, &Matrix4::IDENTITY, &material, Viewport::default()).with_bones(&bones);
        let mut program = MockProgram::with_uniforms(&[uniforms::BONES, uniforms::USE_BONES, uniforms::TEXTURE]);

        assert_eq!(state.apply(&mut program), 3);
        assert_eq!(program.value(uniforms::USE_BONES), Some(&UniformValue::Int(1)));
        assert_eq!(program.value(uniforms::TEXTURE), Some(&UniformValue::Int(DIFFUSE_TEXTURE_UNIT)));
        match program.value(uniforms::BONES) {
            Some(UniformValue::Mat4Array(palette)) => assert_eq!(palette.len(), 2),
            other => panic!("unexpected bones value {:?}", other),
        }
    }

    #[test]
    fn test_bind_attributes() {
        let data = BoxGeometry::cube(1.0).build().render_data(&Vector3::ZERO);
        let mut program = MockProgram::default();
        program.attributes.insert(attributes::POSITION.to_string(), 0);
        program.attributes.insert(attributes::NORMAL.to_string(), 1);

        let bound = bind_attributes(&program, &data);
        let locations: Vec<i32> = bound.iter().map(|(loc, _)| *loc).collect();
        assert_eq!(locations, vec![0, 1]);
    }
}
