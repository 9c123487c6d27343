//! Interpolation between keyframe values.

use crate::math::{lerp, Quaternion, Vector3};
use serde::{Deserialize, Serialize};

/// How a track fills the gap between two keyframes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterpolationMode {
    /// Linear for vectors, spherical for rotations.
    #[default]
    Linear,
    /// Hold the earlier keyframe until the next one.
    Step,
}

/// Values that can be blended between keyframes.
pub trait Interpolate: Copy {
    /// Value at `t` in `[0, 1]` between `self` and `other`.
    fn interpolate(&self, other: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    #[inline]
    fn interpolate(&self, other: &Self, t: f64) -> Self {
        lerp(*self, *other, t)
    }
}

impl Interpolate for Vector3 {
    #[inline]
    fn interpolate(&self, other: &Self, t: f64) -> Self {
        self.lerp(other, t)
    }
}

impl Interpolate for Quaternion {
    /// Shortest-arc slerp.
    #[inline]
    fn interpolate(&self, other: &Self, t: f64) -> Self {
        self.slerp(other, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::consts::HALF_PI;

    #[test]
    fn test_scalar() {
        assert_eq!(2.0f64.interpolate(&4.0, 0.25), 2.5);
        assert_eq!(1.0f64.interpolate(&3.0, 0.5), 2.0);
    }

    #[test]
    fn test_quaternion_midpoint() {
        let a = Quaternion::IDENTITY;
        let b = Quaternion::from_axis_angle(&Vector3::UNIT_Z, HALF_PI);
        let mid = a.interpolate(&b, 0.5);
        let expected = Quaternion::from_axis_angle(&Vector3::UNIT_Z, HALF_PI / 2.0);
        assert!(mid.same_rotation(&expected, 1e-12));
    }
}
