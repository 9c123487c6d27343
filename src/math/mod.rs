//! # Math Module
//!
//! Double-precision linear algebra for the scene core.
//! Provides vectors, matrices, quaternions, Euler angles, bounds and
//! intersection tests.
//!
//! All types store `f64`. Single precision is a narrowing conversion into
//! `[f32; N]` arrays or the matching `glam` types, which is what GPU uploads use.

mod vector2;
mod vector3;
mod vector4;
mod matrix2;
mod matrix3;
mod matrix4;
mod quaternion;
mod euler;
mod color;
mod plane;
mod sphere;
mod box3;
mod frustum;
mod triangle;
mod line3;
mod random;

pub use vector2::Vector2;
pub use vector3::Vector3;
pub use vector4::Vector4;
pub use matrix2::Matrix2;
pub use matrix3::Matrix3;
pub use matrix4::Matrix4;
pub use quaternion::{AxisAngle, Quaternion};
pub use euler::{EulerAngles, RotationOrder};
pub use color::Rgba8;
pub use plane::Plane;
pub use sphere::Sphere;
pub use box3::Box3;
pub use frustum::{Frustum, Touch};
pub use triangle::Triangle;
pub use line3::{BoxHits, Line3};
pub use random::Random;

/// Common math constants and tolerances.
pub mod consts {
    /// Pi constant.
    pub const PI: f64 = std::f64::consts::PI;
    /// Two times Pi.
    pub const TWO_PI: f64 = PI * 2.0;
    /// Half of Pi.
    pub const HALF_PI: f64 = PI / 2.0;
    /// Degrees to radians conversion factor.
    pub const DEG2RAD: f64 = PI / 180.0;
    /// Radians to degrees conversion factor.
    pub const RAD2DEG: f64 = 180.0 / PI;
    /// Small epsilon for floating point comparisons.
    pub const EPSILON: f64 = 1e-9;
    /// Tolerance under which two unit directions count as parallel.
    pub const DIRECTION_EPSILON: f64 = 1e-7;
    /// Below this `sin(angle / 2)` the axis of a quaternion is returned undivided.
    pub const AXIS_ANGLE_EPSILON: f64 = 1e-3;
}

/// Convert degrees to radians.
#[inline]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * consts::DEG2RAD
}

/// Convert radians to degrees.
#[inline]
pub fn rad_to_deg(radians: f64) -> f64 {
    radians * consts::RAD2DEG
}

/// Clamp a value between min and max.
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Linear interpolation between two values.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
