//! Axis-aligned bounding box implementation.

use super::{Matrix4, Sphere, Vector3};
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box (AABB).
///
/// Starts uninitialized; the first [`Box3::expand`] sets both corners to
/// the point and later calls grow it component-wise.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Box3 {
    /// False until the box holds at least one point.
    pub initialized: bool,
    /// Minimum corner.
    pub min: Vector3,
    /// Maximum corner.
    pub max: Vector3,
}

impl Box3 {
    /// Create an initialized box.
    #[inline]
    pub const fn new(min: Vector3, max: Vector3) -> Self {
        Self { initialized: true, min, max }
    }

    /// Create a box from center and size.
    pub fn from_center_size(center: Vector3, size: Vector3) -> Self {
        let half = size * 0.5;
        Self::new(center - half, center + half)
    }

    /// Create a box from an array of points.
    pub fn from_points(points: &[Vector3]) -> Self {
        let mut result = Self::default();
        for p in points {
            result.expand(p);
        }
        result
    }

    /// Grow to include a point.
    pub fn expand(&mut self, point: &Vector3) -> &mut Self {
        if self.initialized {
            self.min = self.min.min(point);
            self.max = self.max.max(point);
        } else {
            self.initialized = true;
            self.min = *point;
            self.max = *point;
        }
        self
    }

    /// Grow to include the axis-aligned box of a sphere.
    pub fn expand_sphere(&mut self, sphere: &Sphere) -> &mut Self {
        if sphere.initialized {
            let r = Vector3::splat(sphere.radius);
            self.expand(&(sphere.center - r));
            self.expand(&(sphere.center + r));
        }
        self
    }

    /// Grow to include another box.
    pub fn expand_box(&mut self, other: &Box3) -> &mut Self {
        if other.initialized {
            self.expand(&other.min);
            self.expand(&other.max);
        }
        self
    }

    /// Get the center of the box.
    #[inline]
    pub fn center(&self) -> Vector3 {
        (self.min + self.max) * 0.5
    }

    /// Get the size of the box.
    #[inline]
    pub fn size(&self) -> Vector3 {
        self.max - self.min
    }

    /// Distance from the center to the farthest corner.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.size().length() * 0.5
    }

    /// Product of the extents, zero when uninitialized.
    pub fn volume(&self) -> f64 {
        if !self.initialized {
            return 0.0;
        }
        let s = self.size();
        s.x * s.y * s.z
    }

    /// Check if a point is inside the box (boundary included).
    pub fn contains(&self, point: &Vector3) -> bool {
        self.initialized
            && point.x >= self.min.x && point.x <= self.max.x
            && point.y >= self.min.y && point.y <= self.max.y
            && point.z >= self.min.z && point.z <= self.max.z
    }

    /// Check if this box overlaps another box.
    pub fn intersects_box(&self, other: &Box3) -> bool {
        self.initialized && other.initialized
            && other.max.x >= self.min.x && other.min.x <= self.max.x
            && other.max.y >= self.min.y && other.min.y <= self.max.y
            && other.max.z >= self.min.z && other.min.z <= self.max.z
    }

    /// Get the 8 corners of the box. Bit 0 of the index selects max x,
    /// bit 1 max y, bit 2 max z.
    pub fn corners(&self) -> [Vector3; 8] {
        let (lo, hi) = (self.min, self.max);
        std::array::from_fn(|i| {
            Vector3::new(
                if i & 1 == 0 { lo.x } else { hi.x },
                if i & 2 == 0 { lo.y } else { hi.y },
                if i & 4 == 0 { lo.z } else { hi.z },
            )
        })
    }

    /// Bounding box of this box after a transformation.
    pub fn apply_matrix4(&self, m: &Matrix4) -> Self {
        if !self.initialized {
            return *self;
        }
        let mut result = Self::default();
        for corner in self.corners() {
            result.expand(&m.transform_point(&corner));
        }
        result
    }

    /// Translate the box by an offset.
    #[inline]
    pub fn translate(&self, offset: &Vector3) -> Self {
        Self {
            initialized: self.initialized,
            min: self.min + *offset,
            max: self.max + *offset,
        }
    }

    /// Check if approximately equal.
    #[inline]
    pub fn approx_eq(&self, other: &Box3, epsilon: f64) -> bool {
        self.initialized == other.initialized
            && self.min.approx_eq(&other.min, epsilon)
            && self.max.approx_eq(&other.max, epsilon)
    }
}
