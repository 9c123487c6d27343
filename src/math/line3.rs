//! Infinite line (origin plus direction) and its intersection tests.

use super::{Box3, Plane, Sphere, Vector3};
use serde::{Deserialize, Serialize};

/// Up to two parameters where a line crosses a box, ordered so `|t[0]| <= |t[1]|`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxHits {
    /// Number of valid entries in `t` (0, 1 or 2).
    pub count: usize,
    /// Hit parameters along the line.
    pub t: [f64; 2],
}

/// A line through `origin` along `direction`, extending both ways.
///
/// The intersection predicates return `1` when the hit lies at `t >= 0`,
/// `-1` when it lies behind the origin and `0` for a miss; the parameter
/// is written to `t` for hits.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Line3 {
    /// A point on the line.
    pub origin: Vector3,
    /// Direction; need not be unit length, `t` is measured in its units.
    pub direction: Vector3,
}

fn side(t: f64) -> i32 {
    if t >= 0.0 {
        1
    } else {
        -1
    }
}

impl Line3 {
    /// Create a new line.
    #[inline]
    pub const fn new(origin: Vector3, direction: Vector3) -> Self {
        Self { origin, direction }
    }

    /// Line through two points, `t = 0` at `a` and `t = 1` at `b`.
    #[inline]
    pub fn from_points(a: &Vector3, b: &Vector3) -> Self {
        Self::new(*a, *b - *a)
    }

    /// Point at parameter `t`.
    #[inline]
    pub fn point_at(&self, t: f64) -> Vector3 {
        self.origin + self.direction * t
    }

    /// Parameter of the point on the line closest to `point`.
    pub fn closest_parameter(&self, point: &Vector3) -> f64 {
        let len2 = self.direction.length_squared();
        if len2 == 0.0 {
            return 0.0;
        }
        (*point - self.origin).dot(&self.direction) / len2
    }

    /// Point on the line closest to `point`.
    pub fn closest_point(&self, point: &Vector3) -> Vector3 {
        self.point_at(self.closest_parameter(point))
    }

    /// Distance from `point` to the line.
    pub fn distance_to_point(&self, point: &Vector3) -> f64 {
        self.closest_point(point).distance_to(point)
    }

    /// Intersect with a plane. Parallel lines miss.
    pub fn intersect_plane(&self, plane: &Plane, t: &mut f64) -> i32 {
        let denom = plane.normal.dot(&self.direction);
        if denom == 0.0 {
            return 0;
        }
        *t = -plane.distance_to_point(&self.origin) / denom;
        side(*t)
    }

    /// Intersect with triangle `(a, b, c)`, edges included. Degenerate
    /// triangles and lines parallel to the triangle plane miss.
    pub fn intersect_triangle(&self, a: &Vector3, b: &Vector3, c: &Vector3, t: &mut f64) -> i32 {
        let u = *b - *a;
        let v = *c - *a;
        let n = u.cross(&v);
        if n.length_squared() == 0.0 {
            return 0;
        }

        let denom = n.dot(&self.direction);
        if denom == 0.0 {
            return 0;
        }

        let r = n.dot(&(*a - self.origin)) / denom;
        let w = self.point_at(r) - *a;

        let uu = u.dot(&u);
        let uv = u.dot(&v);
        let vv = v.dot(&v);
        let wu = w.dot(&u);
        let wv = w.dot(&v);
        let d = uv * uv - uu * vv;

        let s = (uv * wv - vv * wu) / d;
        if !(0.0..=1.0).contains(&s) {
            return 0;
        }
        let q = (uv * wu - uu * wv) / d;
        if q < 0.0 || s + q > 1.0 {
            return 0;
        }

        *t = r;
        side(r)
    }

    /// Intersect with planar quad `(a, b, c, d)` split into `(a, b, c)` and `(a, c, d)`.
    pub fn intersect_quad(&self, a: &Vector3, b: &Vector3, c: &Vector3, d: &Vector3, t: &mut f64) -> i32 {
        match self.intersect_triangle(a, b, c, t) {
            0 => self.intersect_triangle(a, c, d, t),
            hit => hit,
        }
    }

    /// Intersect with the six faces of a box.
    pub fn intersect_box(&self, box3: &Box3) -> BoxHits {
        let mut hits = BoxHits::default();
        if !box3.initialized {
            return hits;
        }

        let p = box3.corners();
        // Corner index bits: 1 = max x, 2 = max y, 4 = max z
        const FACES: [[usize; 4]; 6] = [
            [0, 2, 6, 4], // -x
            [1, 5, 7, 3], // +x
            [0, 4, 5, 1], // -y
            [2, 3, 7, 6], // +y
            [0, 1, 3, 2], // -z
            [4, 6, 7, 5], // +z
        ];

        let mut found: Vec<f64> = Vec::with_capacity(6);
        for [a, b, c, d] in FACES {
            let mut t = 0.0;
            if self.intersect_quad(&p[a], &p[b], &p[c], &p[d], &mut t) != 0
                && !found.iter().any(|f| (f - t).abs() <= 1e-12 * (1.0 + t.abs()))
            {
                found.push(t);
            }
        }

        found.sort_by(|a, b| a.abs().total_cmp(&b.abs()));
        hits.count = found.len().min(2);
        for (slot, t) in hits.t.iter_mut().zip(found) {
            *slot = t;
        }
        hits
    }

    /// Both roots of the line-sphere quadratic, smaller first, or `None` on a miss.
    pub fn intersect_sphere(&self, sphere: &Sphere) -> Option<(f64, f64)> {
        let oc = self.origin - sphere.center;
        let a = self.direction.length_squared();
        if a == 0.0 {
            return None;
        }
        let b = 2.0 * oc.dot(&self.direction);
        let c = oc.length_squared() - sphere.radius * sphere.radius;
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return None;
        }
        let root = disc.sqrt();
        Some(((-b - root) / (2.0 * a), (-b + root) / (2.0 * a)))
    }
}
