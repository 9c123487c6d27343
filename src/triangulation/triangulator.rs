//! Constrained Delaunay triangulation of planar polygons.

use super::half_edge::{orient, HalfEdgeMesh};
use super::Polygon;
use crate::error::{Error, Result};
use crate::geometry::Mesh;
use crate::math::{Vector2, Vector3};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Triangulator settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriangulationConfig {
    /// Gap between the unit square holding the normalized input and the
    /// enclosing triangle, in normalized units.
    pub epsilon: f64,
    /// Edge distance below which an inserted point counts as lying on an edge.
    pub on_edge_tolerance: f64,
    /// Force ring edges into the triangulation.
    pub recover_constraints: bool,
    /// Drop triangles whose centroid is outside the polygon.
    pub clip_to_polygon: bool,
}

impl Default for TriangulationConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-9,
            on_edge_tolerance: 1e-9,
            recover_constraints: true,
            clip_to_polygon: true,
        }
    }
}

/// Triangles over a vertex list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Triangulation {
    /// Distinct input points in input order.
    pub vertices: Vec<Vector2>,
    /// Counter-clockwise index triples into `vertices`.
    pub triangles: Vec<[u32; 3]>,
}

impl Triangulation {
    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Area of one triangle.
    pub fn triangle_area(&self, index: usize) -> f64 {
        let [a, b, c] = self.triangles[index].map(|i| self.vertices[i as usize]);
        0.5 * orient(&a, &b, &c)
    }

    /// Sum of all triangle areas.
    pub fn area(&self) -> f64 {
        (0..self.triangles.len()).map(|i| self.triangle_area(i)).sum()
    }

    /// Flat mesh in the plane `z`, facing +Z.
    pub fn to_mesh(&self, z: f64) -> Mesh {
        let mut mesh = Mesh::with_name("polygon");
        for p in &self.vertices {
            mesh.add_vert_with(Vector3::from_vec2(*p, z), Vector3::UNIT_Z, *p);
        }
        for &[a, b, c] in &self.triangles {
            mesh.add_triangle(a, b, c);
        }
        mesh
    }
}

/// Sloan-style incremental constrained Delaunay triangulator.
///
/// Points are normalized into the unit square, inserted in bin order by
/// walking the half-edge mesh and legalized with Lawson flips. Ring edges
/// are then recovered by flipping and the result is clipped to the polygon.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Triangulator {
    /// Settings.
    pub config: TriangulationConfig,
}

impl Triangulator {
    /// Create a triangulator with the given settings.
    pub fn new(config: TriangulationConfig) -> Self {
        Self { config }
    }

    /// Triangulate a polygon, honoring its ring edges and holes.
    pub fn triangulate(&self, polygon: &Polygon) -> Result<Triangulation> {
        let points: Vec<Vector2> = polygon.points().copied().collect();

        let mut constraints = Vec::new();
        let mut start = 0;
        for ring in polygon.rings() {
            for i in 0..ring.len() {
                constraints.push((start + i, start + (i + 1) % ring.len()));
            }
            start += ring.len();
        }

        let clip = self.config.clip_to_polygon.then_some(polygon);
        self.run(&points, &constraints, clip)
    }

    /// Unconstrained Delaunay triangulation of a point set.
    pub fn triangulate_points(&self, points: &[Vector2]) -> Result<Triangulation> {
        self.run(points, &[], None)
    }

    fn run(&self, points: &[Vector2], constraints: &[(usize, usize)], clip: Option<&Polygon>) -> Result<Triangulation> {
        if let Some(i) = points.iter().position(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(Error::DegeneratePolygon(format!("point {i} is not finite")));
        }

        // Exact duplicates collapse onto their first occurrence
        let mut seen: HashMap<[u64; 2], usize> = HashMap::new();
        let mut unique: Vec<Vector2> = Vec::with_capacity(points.len());
        let remap: Vec<usize> = points
            .iter()
            .map(|p| {
                *seen.entry([p.x.to_bits(), p.y.to_bits()]).or_insert_with(|| {
                    unique.push(*p);
                    unique.len() - 1
                })
            })
            .collect();
        if unique.len() < points.len() {
            log::debug!("skipped {} duplicate points", points.len() - unique.len());
        }
        if unique.len() < 3 {
            return Err(Error::DegeneratePolygon(format!("{} distinct points", unique.len())));
        }

        let (lo, hi) = unique
            .iter()
            .skip(1)
            .fold((unique[0], unique[0]), |(lo, hi), p| (lo.min(p), hi.max(p)));
        let extent = hi - lo;
        let span = extent.x.max(extent.y);
        if span <= 0.0 {
            return Err(Error::DegeneratePolygon("zero extent".into()));
        }
        let normalized: Vec<Vector2> = unique.iter().map(|p| (*p - lo) / span).collect();

        let m = self.config.epsilon.max(0.0);
        let mut mesh = HalfEdgeMesh::new(
            Vector2::new(-m, -m),
            Vector2::new(2.0 + 4.0 * m, -m),
            Vector2::new(-m, 2.0 + 4.0 * m),
        );

        let mut vertex_of = vec![0usize; unique.len()];
        let mut last = 0;
        let mut flips = 0;
        let mut on_edge = 0;

        for i in bin_order(&normalized) {
            let p = normalized[i];
            let t = mesh.locate(&p, last).ok_or_else(|| {
                Error::DegeneratePolygon(format!("point {i} is outside the enclosing triangle"))
            })?;

            if let Some(v) = mesh.triangle_vertices(t).into_iter().find(|&v| mesh.vertices[v] == p) {
                log::debug!("point {} coincides with vertex {} after normalization", i, v);
                vertex_of[i] = v;
                continue;
            }

            if mesh.triangles[t]
                .iter()
                .any(|&h| mesh.edge_distance(h, &p).abs() < self.config.on_edge_tolerance)
            {
                on_edge += 1;
            }

            let v = mesh.add_vertex(p);
            vertex_of[i] = v;
            let outer = mesh.split(t, v);
            last = mesh.triangles.len() - 1;
            flips += mesh.legalize(outer.to_vec());
        }

        let mut failed = 0;
        if self.config.recover_constraints && !constraints.is_empty() {
            for &(a, b) in constraints {
                let (u, v) = (vertex_of[remap[a]], vertex_of[remap[b]]);
                if u == v {
                    continue;
                }
                for (u, v) in self.split_at_collinear(&mesh, u, v) {
                    if !mesh.recover_constraint(u, v) {
                        failed += 1;
                    }
                }
            }
            flips += mesh.legalize((0..mesh.edges.len()).collect());
        }
        if failed > 0 {
            log::warn!("{} polygon edges could not be recovered", failed);
        }

        let mut output_of: Vec<Option<u32>> = vec![None; mesh.vertices.len()];
        for (j, &v) in vertex_of.iter().enumerate() {
            output_of[v].get_or_insert(j as u32);
        }

        let mut triangles = Vec::new();
        for t in 0..mesh.triangles.len() {
            let [a, b, c] = mesh.triangle_vertices(t);
            let (Some(a), Some(b), Some(c)) = (output_of[a], output_of[b], output_of[c]) else {
                continue;
            };
            if let Some(polygon) = clip {
                let centroid = (unique[a as usize] + unique[b as usize] + unique[c as usize]) / 3.0;
                if !polygon.contains(&centroid) {
                    continue;
                }
            }
            triangles.push([a, b, c]);
        }

        log::debug!(
            "triangulated {} points into {} triangles ({} flips, {} on edges)",
            unique.len(),
            triangles.len(),
            flips,
            on_edge
        );

        if triangles.is_empty() {
            log::warn!("triangulation of {} points produced no triangles", unique.len());
            return Err(Error::DegeneratePolygon("no triangles".into()));
        }

        Ok(Triangulation { vertices: unique, triangles })
    }

    /// Break `u`-`v` at every vertex lying on it, nearest `u` first.
    fn split_at_collinear(&self, mesh: &HalfEdgeMesh, u: usize, v: usize) -> Vec<(usize, usize)> {
        let (pu, pv) = (mesh.vertices[u], mesh.vertices[v]);
        let dir = pv - pu;
        let len2 = dir.length_squared();

        let mut between: Vec<(f64, usize)> = (3..mesh.vertices.len())
            .filter(|&w| w != u && w != v)
            .filter_map(|w| {
                let pw = mesh.vertices[w];
                let t = (pw - pu).dot(&dir) / len2;
                let off = orient(&pu, &pv, &pw).abs() / len2.sqrt();
                (t > 0.0 && t < 1.0 && off < self.config.on_edge_tolerance).then_some((t, w))
            })
            .collect();
        between.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut chain = vec![u];
        chain.extend(between.into_iter().map(|(_, w)| w));
        chain.push(v);
        chain.windows(2).map(|w| (w[0], w[1])).collect()
    }
}

/// Insertion order: bins of `⌊√n⌋` per axis by `(bin x, bin y)`, ties by `x` then `y`.
fn bin_order(points: &[Vector2]) -> Vec<usize> {
    let bins = ((points.len() as f64).sqrt() as usize).max(1);
    let bin = |c: f64| ((c * bins as f64) as usize).min(bins - 1);
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| {
        let (pa, pb) = (points[a], points[b]);
        (bin(pa.x), bin(pa.y))
            .cmp(&(bin(pb.x), bin(pb.y)))
            .then(pa.x.total_cmp(&pb.x))
            .then(pa.y.total_cmp(&pb.y))
    });
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Polygon {
        Polygon::from_ring(vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(1.0, 1.0),
            Vector2::new(0.0, 1.0),
        ])
    }

    #[test]
    fn test_unit_square() {
        let result = Triangulator::default().triangulate(&unit_square()).unwrap_or_default();
        assert_eq!(result.num_triangles(), 2);
        for i in 0..2 {
            assert!((result.triangle_area(i) - 0.5).abs() < 1e-12);
        }
        assert!(result.triangles.iter().flatten().all(|&i| i < 4));
    }

    #[test]
    fn test_concave_outline() {
        let l_shape = Polygon::from_ring(vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(2.0, 0.0),
            Vector2::new(2.0, 1.0),
            Vector2::new(1.0, 1.0),
            Vector2::new(1.0, 2.0),
            Vector2::new(0.0, 2.0),
        ]);
        let result = Triangulator::default().triangulate(&l_shape).unwrap_or_default();
        assert_eq!(result.num_triangles(), 4);
        assert!((result.area() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_hole_is_empty() {
        let outer = vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(4.0, 0.0),
            Vector2::new(4.0, 4.0),
            Vector2::new(0.0, 4.0),
        ];
        let hole = vec![
            Vector2::new(1.0, 1.0),
            Vector2::new(1.0, 3.0),
            Vector2::new(3.0, 3.0),
            Vector2::new(3.0, 1.0),
        ];
        let polygon = Polygon::from_ring(outer).with_ring(hole);
        let result = Triangulator::default().triangulate(&polygon).unwrap_or_default();
        assert_eq!(result.num_triangles(), 8);
        assert!((result.area() - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_duplicates_skipped() {
        let points = [
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(0.0, 1.0),
        ];
        let result = Triangulator::default().triangulate_points(&points).unwrap_or_default();
        assert_eq!(result.vertices.len(), 3);
        assert_eq!(result.num_triangles(), 1);
    }

    #[test]
    fn test_delaunay_property() {
        let points: Vec<Vector2> = (0..40)
            .map(|i| {
                let a = i as f64 * 2.399963;
                let r = (i as f64 + 0.5).sqrt();
                Vector2::new(r * a.cos(), r * a.sin())
            })
            .collect();
        let result = Triangulator::default().triangulate_points(&points).unwrap_or_default();
        assert!(!result.triangles.is_empty());
        for &[a, b, c] in &result.triangles {
            let [pa, pb, pc] = [a, b, c].map(|i| result.vertices[i as usize]);
            assert!(orient(&pa, &pb, &pc) > 0.0);
            for (k, p) in result.vertices.iter().enumerate() {
                if [a, b, c].contains(&(k as u32)) {
                    continue;
                }
                assert!(!super::super::half_edge::in_circle(&pa, &pb, &pc, p));
            }
        }
    }

    #[test]
    fn test_degenerate_input() {
        let t = Triangulator::default();
        assert!(matches!(t.triangulate(&Polygon::new()), Err(Error::DegeneratePolygon(_))));
        let collinear = [Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0), Vector2::new(2.0, 0.0)];
        assert!(t.triangulate_points(&collinear).is_err());
        let nan = [Vector2::new(f64::NAN, 0.0), Vector2::new(1.0, 0.0), Vector2::new(2.0, 1.0)];
        assert!(t.triangulate_points(&nan).is_err());
    }

    #[test]
    fn test_to_mesh() {
        let result = Triangulator::default().triangulate(&unit_square()).unwrap_or_default();
        let mesh = result.to_mesh(2.0);
        assert_eq!(mesh.num_verts(), 4);
        assert_eq!(mesh.triangles.len(), 2);
        assert!(mesh.positions.iter().all(|p| p.z == 2.0));
    }
}
