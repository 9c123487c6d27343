//! Half-edge triangle mesh used during incremental insertion.

use crate::math::Vector2;
use std::collections::VecDeque;

/// A directed edge of one triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HalfEdge {
    /// Vertex the edge starts at.
    pub origin: usize,
    /// Next edge of the same triangle, counter-clockwise.
    pub next: usize,
    /// Opposite edge in the neighbor triangle, `None` on the hull.
    pub twin: Option<usize>,
    /// Owning triangle.
    pub triangle: usize,
    /// Edge may not be flipped.
    pub constrained: bool,
}

/// Twice the signed area of `(a, b, c)`; positive when counter-clockwise.
pub(crate) fn orient(a: &Vector2, b: &Vector2, c: &Vector2) -> f64 {
    (*b - *a).cross(&(*c - *a))
}

/// True when `d` lies strictly inside the circumcircle of counter-clockwise `(a, b, c)`.
pub(crate) fn in_circle(a: &Vector2, b: &Vector2, c: &Vector2, d: &Vector2) -> bool {
    let (ad, bd, cd) = (*a - *d, *b - *d, *c - *d);
    let det = ad.length_squared() * bd.cross(&cd) - bd.length_squared() * ad.cross(&cd)
        + cd.length_squared() * ad.cross(&bd);
    det > 0.0
}

/// Triangulation stored as half-edges. Triangles list their edges in
/// counter-clockwise order; vertices 0 to 2 form the enclosing triangle.
#[derive(Debug, Clone, Default)]
pub(crate) struct HalfEdgeMesh {
    pub vertices: Vec<Vector2>,
    pub edges: Vec<HalfEdge>,
    pub triangles: Vec<[usize; 3]>,
}

impl HalfEdgeMesh {
    /// Seed with a single counter-clockwise triangle.
    pub fn new(a: Vector2, b: Vector2, c: Vector2) -> Self {
        let mut mesh = Self { vertices: vec![a, b, c], ..Self::default() };
        for origin in 0..3 {
            mesh.edges.push(HalfEdge { origin, next: 0, twin: None, triangle: 0, constrained: false });
        }
        mesh.triangles.push([0; 3]);
        mesh.link(0, [0, 1, 2]);
        mesh
    }

    fn link(&mut self, triangle: usize, edges: [usize; 3]) {
        for k in 0..3 {
            let edge = &mut self.edges[edges[k]];
            edge.next = edges[(k + 1) % 3];
            edge.triangle = triangle;
        }
        self.triangles[triangle] = edges;
    }

    /// Append a vertex and return its index.
    pub fn add_vertex(&mut self, p: Vector2) -> usize {
        self.vertices.push(p);
        self.vertices.len() - 1
    }

    #[inline]
    pub fn origin(&self, h: usize) -> usize {
        self.edges[h].origin
    }

    #[inline]
    pub fn dest(&self, h: usize) -> usize {
        self.edges[self.edges[h].next].origin
    }

    /// Vertex indices of a triangle.
    pub fn triangle_vertices(&self, t: usize) -> [usize; 3] {
        self.triangles[t].map(|h| self.origin(h))
    }

    /// Signed distance of `p` from edge `h`, positive on the outside.
    pub fn edge_distance(&self, h: usize, p: &Vector2) -> f64 {
        let a = self.vertices[self.origin(h)];
        let b = self.vertices[self.dest(h)];
        (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
    }

    /// Walk from `start` towards the triangle containing `p`, edges included.
    pub fn locate(&self, p: &Vector2, start: usize) -> Option<usize> {
        let mut t = start.min(self.triangles.len().saturating_sub(1));
        for _ in 0..=self.triangles.len() {
            let exit = self.triangles[t].into_iter().find(|&h| self.edge_distance(h, p) > 0.0);
            match exit {
                None => return Some(t),
                Some(h) => t = self.edges[self.edges[h].twin?].triangle,
            }
        }

        log::trace!("walk did not converge, scanning {} triangles", self.triangles.len());
        (0..self.triangles.len())
            .find(|&t| self.triangles[t].into_iter().all(|h| self.edge_distance(h, p) <= 0.0))
    }

    /// Split triangle `t` at new vertex `v` into three. The first keeps
    /// slot `t`, the other two are appended. Returns the three outer edges.
    pub fn split(&mut self, t: usize, v: usize) -> [usize; 3] {
        let [e0, e1, e2] = self.triangles[t];
        let (a, b, c) = (self.origin(e0), self.origin(e1), self.origin(e2));

        let base = self.edges.len();
        let t1 = self.triangles.len();
        let t2 = t1 + 1;
        // b→v, v→a, c→v, v→b, a→v, v→c
        let spokes = [(b, 3), (v, 4), (c, 5), (v, 0), (a, 1), (v, 2)];
        for (origin, twin) in spokes {
            self.edges.push(HalfEdge {
                origin,
                next: 0,
                twin: Some(base + twin),
                triangle: t,
                constrained: false,
            });
        }

        self.triangles.push([0; 3]);
        self.triangles.push([0; 3]);
        self.link(t, [e0, base, base + 1]);
        self.link(t1, [e1, base + 2, base + 3]);
        self.link(t2, [e2, base + 4, base + 5]);
        [e0, e1, e2]
    }

    /// Vertices `(a, b, p, d)` around edge `h`: `h` runs a→b, `p` is
    /// opposite in its own triangle and `d` opposite in the twin.
    fn quad(&self, h: usize) -> Option<[usize; 4]> {
        let twin = self.edges[h].twin?;
        let p = self.origin(self.edges[self.edges[h].next].next);
        let d = self.origin(self.edges[self.edges[twin].next].next);
        Some([self.origin(h), self.dest(h), p, d])
    }

    /// True when replacing edge `h` by the other diagonal keeps both triangles valid.
    pub fn can_flip(&self, h: usize) -> bool {
        match self.quad(h) {
            Some([a, b, p, d]) => {
                let v = &self.vertices;
                orient(&v[p], &v[d], &v[b]) > 0.0 && orient(&v[d], &v[p], &v[a]) > 0.0
            }
            None => false,
        }
    }

    /// Replace edge `h` by the other diagonal of its quad. `h` and its twin
    /// keep their indices and become the new diagonal.
    pub fn flip(&mut self, e: usize) {
        let Some(f) = self.edges[e].twin else {
            return;
        };
        let e1 = self.edges[e].next;
        let e2 = self.edges[e1].next;
        let f1 = self.edges[f].next;
        let f2 = self.edges[f1].next;
        let (t1, t2) = (self.edges[e].triangle, self.edges[f].triangle);

        self.edges[e].origin = self.origin(e2);
        self.edges[f].origin = self.origin(f2);
        self.link(t1, [e, f2, e1]);
        self.link(t2, [f, e2, f1]);
    }

    /// Lawson flips until every unconstrained edge on the stack is locally
    /// Delaunay. Returns the number of flips.
    pub fn legalize(&mut self, mut stack: Vec<usize>) -> usize {
        let mut flips = 0;
        let mut budget = 64 * self.edges.len() + stack.len() + 64;

        while let Some(h) = stack.pop() {
            if budget == 0 {
                log::debug!("legalization stopped after {} flips", flips);
                break;
            }
            budget -= 1;

            if self.edges[h].constrained {
                continue;
            }
            let Some([a, b, p, d]) = self.quad(h) else {
                continue;
            };
            let v = &self.vertices;
            if !in_circle(&v[a], &v[b], &v[p], &v[d]) || !self.can_flip(h) {
                continue;
            }

            let e1 = self.edges[h].next;
            let e2 = self.edges[e1].next;
            let f = self.edges[h].twin.unwrap_or(h);
            let f1 = self.edges[f].next;
            let f2 = self.edges[f1].next;
            self.flip(h);
            flips += 1;
            stack.extend([e1, e2, f1, f2]);
        }
        flips
    }

    /// Half-edge running from `u` to `v`.
    pub fn find_edge(&self, u: usize, v: usize) -> Option<usize> {
        (0..self.edges.len()).find(|&h| self.origin(h) == u && self.dest(h) == v)
    }

    fn set_constrained(&mut self, h: usize) {
        self.edges[h].constrained = true;
        if let Some(twin) = self.edges[h].twin {
            self.edges[twin].constrained = true;
        }
    }

    /// True when edge `h` properly crosses segment `u`-`v`.
    fn crosses(&self, h: usize, u: usize, v: usize) -> bool {
        let (a, b) = (self.origin(h), self.dest(h));
        if a == u || a == v || b == u || b == v {
            return false;
        }
        let p = &self.vertices;
        orient(&p[u], &p[v], &p[a]) * orient(&p[u], &p[v], &p[b]) < 0.0
            && orient(&p[a], &p[b], &p[u]) * orient(&p[a], &p[b], &p[v]) < 0.0
    }

    /// Force edge `u`-`v` into the triangulation by flipping the edges it
    /// crosses, then mark it constrained. Returns false when it could not
    /// be recovered.
    pub fn recover_constraint(&mut self, u: usize, v: usize) -> bool {
        if let Some(h) = self.find_edge(u, v) {
            self.set_constrained(h);
            return true;
        }

        let mut queue: VecDeque<usize> = (0..self.edges.len())
            .filter(|&h| self.edges[h].twin.is_some_and(|t| h < t) && self.crosses(h, u, v))
            .collect();
        let mut budget = 16 * (queue.len() + 1) * (queue.len() + 1);

        while let Some(h) = queue.pop_front() {
            if budget == 0 {
                break;
            }
            budget -= 1;

            if !self.crosses(h, u, v) {
                continue;
            }
            if self.edges[h].constrained {
                log::warn!("constraint {}-{} crosses another constraint", u, v);
                return false;
            }
            if self.can_flip(h) {
                self.flip(h);
                if self.crosses(h, u, v) {
                    queue.push_back(h);
                }
            } else {
                queue.push_back(h);
            }
        }

        match self.find_edge(u, v) {
            Some(h) => {
                self.set_constrained(h);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> HalfEdgeMesh {
        HalfEdgeMesh::new(Vector2::new(0.0, 0.0), Vector2::new(4.0, 0.0), Vector2::new(0.0, 4.0))
    }

    fn check_consistency(mesh: &HalfEdgeMesh) {
        for (t, edges) in mesh.triangles.iter().enumerate() {
            let [a, b, c] = mesh.triangle_vertices(t);
            let v = &mesh.vertices;
            assert!(orient(&v[a], &v[b], &v[c]) > 0.0);
            for k in 0..3 {
                let h = edges[k];
                assert_eq!(mesh.edges[h].triangle, t);
                assert_eq!(mesh.edges[h].next, edges[(k + 1) % 3]);
                if let Some(twin) = mesh.edges[h].twin {
                    assert_eq!(mesh.edges[twin].twin, Some(h));
                    assert_eq!(mesh.origin(twin), mesh.dest(h));
                }
            }
        }
    }

    #[test]
    fn test_split_reuses_slot() {
        let mut mesh = seed();
        let v = mesh.add_vertex(Vector2::new(1.0, 1.0));
        let outer = mesh.split(0, v);
        assert_eq!(outer, [0, 1, 2]);
        assert_eq!(mesh.triangles.len(), 3);
        assert_eq!(mesh.edges.len(), 9);
        assert_eq!(mesh.triangle_vertices(0), [0, 1, 3]);
        check_consistency(&mesh);
    }

    #[test]
    fn test_locate_walks_across() {
        let mut mesh = seed();
        let v = mesh.add_vertex(Vector2::new(1.0, 1.0));
        mesh.split(0, v);
        let p = Vector2::new(0.2, 2.0);
        let t = mesh.locate(&p, 0).unwrap_or(usize::MAX);
        assert!(mesh.triangles[t].iter().all(|&h| mesh.edge_distance(h, &p) <= 0.0));
    }

    #[test]
    fn test_flip_and_legalize() {
        let mut mesh = seed();
        let v = mesh.add_vertex(Vector2::new(1.0, 1.0));
        mesh.split(0, v);
        let w = mesh.add_vertex(Vector2::new(2.0, 1.9));
        let t = mesh.locate(&mesh.vertices[w].clone(), 0).unwrap_or(0);
        let outer = mesh.split(t, w);
        mesh.legalize(outer.to_vec());
        check_consistency(&mesh);

        for h in 0..mesh.edges.len() {
            if let Some([a, b, p, d]) = mesh.quad(h) {
                let vs = &mesh.vertices;
                assert!(!in_circle(&vs[a], &vs[b], &vs[p], &vs[d]) || !mesh.can_flip(h));
            }
        }
    }

    #[test]
    fn test_in_circle() {
        let a = Vector2::new(0.0, 0.0);
        let b = Vector2::new(1.0, 0.0);
        let c = Vector2::new(0.0, 1.0);
        assert!(in_circle(&a, &b, &c, &Vector2::new(0.5, 0.5)));
        assert!(!in_circle(&a, &b, &c, &Vector2::new(2.0, 2.0)));
        assert!(!in_circle(&a, &b, &c, &Vector2::new(1.0, 1.0)));
    }
}
