//! Planar polygon features made of one or more closed rings.

use crate::math::Vector2;
use serde::{Deserialize, Serialize};

/// Signed area of a closed ring, positive when counter-clockwise.
pub fn ring_signed_area(ring: &[Vector2]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    0.5 * (0..n).map(|i| ring[i].cross(&ring[(i + 1) % n])).sum::<f64>()
}

/// Crossing-number test of `p` against one closed ring.
fn ring_crossings(ring: &[Vector2], p: &Vector2) -> bool {
    let n = ring.len();
    let mut inside = false;
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let (a, b) = (ring[i], ring[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// A polygon with an outer boundary and any number of holes.
///
/// Rings are implicitly closed and may be wound either way; inside and
/// outside follow the even-odd rule over all rings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    rings: Vec<Vec<Vector2>>,
}

impl Polygon {
    /// Create an empty polygon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Polygon with a single ring.
    pub fn from_ring(ring: Vec<Vector2>) -> Self {
        Self::new().with_ring(ring)
    }

    /// Add a ring, builder style.
    pub fn with_ring(mut self, ring: Vec<Vector2>) -> Self {
        self.add_ring(ring);
        self
    }

    /// Add a ring. Rings with fewer than three points are ignored.
    pub fn add_ring(&mut self, ring: Vec<Vector2>) {
        if ring.len() < 3 {
            log::warn!("ignoring polygon ring with {} points", ring.len());
            return;
        }
        self.rings.push(ring);
    }

    /// All rings.
    pub fn rings(&self) -> &[Vec<Vector2>] {
        &self.rings
    }

    /// Total number of ring vertices.
    pub fn num_points(&self) -> usize {
        self.rings.iter().map(Vec::len).sum()
    }

    /// Every ring vertex in ring order.
    pub fn points(&self) -> impl Iterator<Item = &Vector2> + '_ {
        self.rings.iter().flatten()
    }

    /// Axis-aligned bounding rectangle as `(min, max)`.
    pub fn bounds(&self) -> Option<(Vector2, Vector2)> {
        let mut points = self.points();
        let first = *points.next()?;
        Some(points.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }

    /// Even-odd containment.
    pub fn contains(&self, p: &Vector2) -> bool {
        self.rings.iter().filter(|ring| ring_crossings(ring, p)).count() % 2 == 1
    }

    /// Enclosed area under the even-odd rule, assuming rings do not cross.
    pub fn area(&self) -> f64 {
        self.rings
            .iter()
            .enumerate()
            .map(|(i, ring)| {
                let depth = self
                    .rings
                    .iter()
                    .enumerate()
                    .filter(|&(j, other)| j != i && ring_crossings(other, &ring[0]))
                    .count();
                let area = ring_signed_area(ring).abs();
                if depth % 2 == 0 {
                    area
                } else {
                    -area
                }
            })
            .sum()
    }
}
