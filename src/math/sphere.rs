//! Bounding sphere implementation.

use super::{Box3, Vector3};
use serde::{Deserialize, Serialize};

/// A bounding sphere that starts uninitialized and grows by expansion.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Sphere {
    /// Set by the first expansion; radius and center are meaningless before.
    pub initialized: bool,
    /// Center point.
    pub center: Vector3,
    /// Radius.
    pub radius: f64,
}

impl Sphere {
    /// Create an initialized sphere.
    #[inline]
    pub const fn new(center: Vector3, radius: f64) -> Self {
        Self { initialized: true, center, radius }
    }

    /// Smallest sphere around a box, centered on it.
    pub fn from_box(box3: &Box3) -> Self {
        if !box3.initialized {
            return Self::default();
        }
        Self::new(box3.center(), box3.radius())
    }

    /// Sphere centered on the bounding box of `points` that encloses all of them.
    pub fn from_points(points: &[Vector3]) -> Self {
        let bounds = Box3::from_points(points);
        if !bounds.initialized {
            return Self::default();
        }
        let mut sphere = Self::new(bounds.center(), 0.0);
        for p in points {
            sphere.expand(p);
        }
        sphere
    }

    /// Grow the radius to enclose `point`. The first call only sets the center.
    pub fn expand(&mut self, point: &Vector3) -> &mut Self {
        if !self.initialized {
            self.initialized = true;
            self.center = *point;
            self.radius = 0.0;
        } else {
            let dist2 = self.center.distance_to_squared(point);
            if dist2 > self.radius * self.radius {
                self.radius = dist2.sqrt();
            }
        }
        self
    }

    /// Grow the radius to enclose another sphere.
    pub fn expand_sphere(&mut self, other: &Sphere) -> &mut Self {
        if !other.initialized {
            return self;
        }
        if !self.initialized {
            *self = *other;
            return self;
        }
        let reach = self.center.distance_to(&other.center) + other.radius;
        if reach > self.radius {
            self.radius = reach;
        }
        self
    }

    /// Volume, zero when uninitialized.
    pub fn volume(&self) -> f64 {
        if !self.initialized {
            return 0.0;
        }
        4.0 / 3.0 * std::f64::consts::PI * self.radius * self.radius * self.radius
    }

    /// Check if a point is inside the sphere (boundary included).
    pub fn contains(&self, point: &Vector3) -> bool {
        self.initialized && self.center.distance_to_squared(point) <= self.radius * self.radius
    }

    /// Signed distance from the surface; negative inside.
    pub fn distance_to_point(&self, point: &Vector3) -> f64 {
        self.center.distance_to(point) - self.radius
    }

    /// Axis-aligned box around the sphere.
    pub fn bounding_box(&self) -> Box3 {
        if !self.initialized {
            return Box3::default();
        }
        let r = Vector3::splat(self.radius);
        Box3::new(self.center - r, self.center + r)
    }

    /// Check if approximately equal.
    #[inline]
    pub fn approx_eq(&self, other: &Sphere, epsilon: f64) -> bool {
        self.initialized == other.initialized
            && self.center.approx_eq(&other.center, epsilon)
            && (self.radius - other.radius).abs() < epsilon
    }
}
