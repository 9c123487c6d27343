//! Backend shader program contract.

use crate::math::{Matrix3, Matrix4, Vector2, Vector3};

/// A uniform value in GPU-ready single precision.
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    /// `int` or `bool` uniform, also used for sampler units.
    Int(i32),
    /// `float` uniform.
    Float(f32),
    /// `vec2` uniform.
    Vec2([f32; 2]),
    /// `vec3` uniform.
    Vec3([f32; 3]),
    /// `vec4` uniform.
    Vec4([f32; 4]),
    /// Column-major `mat3` uniform.
    Mat3([f32; 9]),
    /// Column-major `mat4` uniform.
    Mat4([f32; 16]),
    /// Array of column-major `mat4`.
    Mat4Array(Vec<[f32; 16]>),
}

impl From<bool> for UniformValue {
    fn from(v: bool) -> Self {
        Self::Int(v as i32)
    }
}

impl From<f64> for UniformValue {
    fn from(v: f64) -> Self {
        Self::Float(v as f32)
    }
}

impl From<Vector2> for UniformValue {
    fn from(v: Vector2) -> Self {
        Self::Vec2(v.to_f32_array())
    }
}

impl From<Vector3> for UniformValue {
    fn from(v: Vector3) -> Self {
        Self::Vec3(v.to_f32_array())
    }
}

impl From<&Matrix3> for UniformValue {
    fn from(m: &Matrix3) -> Self {
        Self::Mat3(m.to_f32_array())
    }
}

impl From<&Matrix4> for UniformValue {
    fn from(m: &Matrix4) -> Self {
        Self::Mat4(m.to_f32_array())
    }
}

impl From<&[Matrix4]> for UniformValue {
    fn from(ms: &[Matrix4]) -> Self {
        Self::Mat4Array(ms.iter().map(Matrix4::to_f32_array).collect())
    }
}

/// A linked shader program on the GPU backend.
///
/// Lookups return `None` for names the program does not use; callers
/// skip those uniforms and attributes.
pub trait ShaderProgram {
    /// Location of a uniform.
    fn uniform_location(&self, name: &str) -> Option<i32>;

    /// Location of a vertex attribute.
    fn attribute_location(&self, name: &str) -> Option<i32>;

    /// Upload a uniform value.
    fn set_uniform(&mut self, location: i32, value: UniformValue);

    /// Look up `name` and upload `value` when the program uses it.
    ///
    /// Returns true when the uniform was set.
    fn set_named(&mut self, name: &str, value: UniformValue) -> bool {
        match self.uniform_location(name) {
            Some(location) => {
                self.set_uniform(location, value);
                true
            }
            None => false,
        }
    }
}
