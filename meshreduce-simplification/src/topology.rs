//! Index-based mesh topology for edge collapse
//!
//! Vertices and triangles live in two arenas and refer to each other only by
//! index. Nothing is ever removed from either arena during simplification:
//! collapsed vertices are flagged dead and degenerate triangles flagged
//! invalid, so every stored index stays meaningful until [`Mesh::export`]
//! compacts the survivors.

use crate::quadric::Quadric;
use itertools::Itertools;
use meshreduce_core::{triangle_plane, Error, Point3d, Result, TriangleMesh};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// A vertex record.
#[derive(Debug, Clone)]
pub struct Vertex {
    pub(crate) position: Point3d,
    pub(crate) quadric: Quadric,
    /// Valid triangles containing this vertex
    pub(crate) incident: BTreeSet<usize>,
    pub(crate) alive: bool,
    /// Bumped whenever position or quadric change
    pub(crate) version: u32,
}

impl Vertex {
    pub fn position(&self) -> &Point3d {
        &self.position
    }

    pub fn quadric(&self) -> &Quadric {
        &self.quadric
    }

    pub fn incident_triangles(&self) -> &BTreeSet<usize> {
        &self.incident
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn version(&self) -> u32 {
        self.version
    }
}

/// A triangle record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub(crate) indices: [usize; 3],
    pub(crate) valid: bool,
}

impl Triangle {
    pub fn indices(&self) -> [usize; 3] {
        self.indices
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    fn contains(&self, v: usize) -> bool {
        self.indices.contains(&v)
    }

    fn is_degenerate(&self) -> bool {
        let [a, b, c] = self.indices;
        a == b || b == c || a == c
    }

    /// The three edges in winding order.
    fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.indices.iter().copied().circular_tuple_windows()
    }
}

/// Outcome of a single applied collapse.
#[derive(Debug, Clone, PartialEq)]
pub struct CollapseOutcome {
    /// Triangles invalidated because they degenerated
    pub removed_triangles: Vec<usize>,
    /// Vertices, the survivor included, left without any valid triangle
    pub orphaned_vertices: Vec<usize>,
}

/// Triangle mesh with validity flags, adjacency and per-vertex quadrics.
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    triangles: Vec<Triangle>,
    valid_triangles: usize,
}

impl Mesh {
    /// Build the topology from raw positions and index triples.
    ///
    /// Fails with [`Error::InvalidMesh`] on fewer than 3 vertices, a
    /// non-finite coordinate, an out-of-range index or a triangle repeating a
    /// vertex. Nothing is built on failure.
    pub fn import(positions: Vec<Point3d>, triangles: Vec<[usize; 3]>) -> Result<Self> {
        if positions.len() < 3 {
            return Err(Error::InvalidMesh(format!(
                "mesh needs at least 3 vertices, got {}",
                positions.len()
            )));
        }
        if let Some(i) = positions.iter().position(|p| !p.iter().all(|c| c.is_finite())) {
            return Err(Error::InvalidMesh(format!("vertex {i} has a non-finite coordinate")));
        }
        for (ti, tri) in triangles.iter().enumerate() {
            if let Some(&v) = tri.iter().find(|&&v| v >= positions.len()) {
                return Err(Error::InvalidMesh(format!(
                    "triangle {ti} references vertex {v}, but the mesh has {} vertices",
                    positions.len()
                )));
            }
            let [a, b, c] = *tri;
            if a == b || b == c || a == c {
                return Err(Error::InvalidMesh(format!(
                    "triangle {ti} is degenerate: {tri:?}"
                )));
            }
        }

        let mut vertices: Vec<Vertex> = positions
            .into_iter()
            .map(|position| Vertex {
                position,
                quadric: Quadric::zero(),
                incident: BTreeSet::new(),
                alive: true,
                version: 0,
            })
            .collect();

        for (ti, tri) in triangles.iter().enumerate() {
            // Zero-area triangles add adjacency but no plane
            let plane = triangle_plane(
                &vertices[tri[0]].position,
                &vertices[tri[1]].position,
                &vertices[tri[2]].position,
            );
            let q = plane
                .map(|(n, d)| Quadric::from_plane(&n, d))
                .unwrap_or_default();
            for &v in tri {
                vertices[v].incident.insert(ti);
                vertices[v].quadric += q;
            }
        }

        let valid_triangles = triangles.len();
        Ok(Self {
            vertices,
            triangles: triangles
                .into_iter()
                .map(|indices| Triangle { indices, valid: true })
                .collect(),
            valid_triangles,
        })
    }

    /// Build the topology from a plain [`TriangleMesh`].
    pub fn from_triangle_mesh(mesh: &TriangleMesh) -> Result<Self> {
        Self::import(mesh.vertices.clone(), mesh.faces.clone())
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn vertex(&self, v: usize) -> &Vertex {
        &self.vertices[v]
    }

    pub fn triangle(&self, t: usize) -> &Triangle {
        &self.triangles[t]
    }

    /// Number of vertex slots, live or not.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn live_vertex_count(&self) -> usize {
        self.vertices.iter().filter(|v| v.alive).count()
    }

    /// Number of triangle slots, valid or not.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn valid_triangle_count(&self) -> usize {
        self.valid_triangles
    }

    pub fn is_alive(&self, v: usize) -> bool {
        self.vertices[v].alive
    }

    /// Every edge of a valid triangle once, as `(min, max)`, in the order the
    /// edges are first met walking the triangle array.
    pub fn unique_edges(&self) -> Vec<(usize, usize)> {
        let mut seen = HashSet::new();
        let mut edges = Vec::new();
        for tri in self.triangles.iter().filter(|t| t.valid) {
            for (a, b) in tri.edges() {
                let key = (a.min(b), a.max(b));
                if seen.insert(key) {
                    edges.push(key);
                }
            }
        }
        edges
    }

    /// Vertices sharing a valid triangle with `v`, ascending.
    pub fn neighbors(&self, v: usize) -> BTreeSet<usize> {
        self.vertices[v]
            .incident
            .iter()
            .flat_map(|&t| self.triangles[t].indices)
            .filter(|&w| w != v)
            .collect()
    }

    /// Whether some valid triangle still contains both `a` and `b`.
    pub fn edge_exists(&self, a: usize, b: usize) -> bool {
        let (ia, ib) = (&self.vertices[a].incident, &self.vertices[b].incident);
        let (small, large) = if ia.len() <= ib.len() { (ia, ib) } else { (ib, ia) };
        small.iter().any(|t| large.contains(t))
    }

    /// Number of valid triangles containing the edge `(a, b)`.
    pub fn edge_valence(&self, a: usize, b: usize) -> usize {
        self.vertices[a]
            .incident
            .iter()
            .filter(|&&t| self.triangles[t].contains(b))
            .count()
    }

    /// A vertex is on the boundary when one of its edges belongs to exactly
    /// one valid triangle.
    pub fn is_boundary_vertex(&self, v: usize) -> bool {
        let mut valence: BTreeMap<usize, usize> = BTreeMap::new();
        for &t in &self.vertices[v].incident {
            for w in self.triangles[t].indices {
                if w != v {
                    *valence.entry(w).or_insert(0) += 1;
                }
            }
        }
        valence.values().any(|&n| n == 1)
    }

    /// Merge `removed` into `survivor`, moving the survivor to `target`.
    ///
    /// The caller guarantees both vertices are live and share a valid
    /// triangle.
    pub fn collapse(&mut self, survivor: usize, removed: usize, target: Point3d) -> CollapseOutcome {
        debug_assert!(survivor != removed);
        debug_assert!(self.vertices[survivor].alive && self.vertices[removed].alive);

        self.vertices[survivor].position = target;

        let mut removed_triangles = Vec::new();
        let mut touched = BTreeSet::new();
        let moved = std::mem::take(&mut self.vertices[removed].incident);
        let mut kept = BTreeSet::new();

        for t in moved {
            let tri = &mut self.triangles[t];
            for idx in tri.indices.iter_mut() {
                if *idx == removed {
                    *idx = survivor;
                }
            }
            if tri.is_degenerate() {
                tri.valid = false;
                self.valid_triangles -= 1;
                removed_triangles.push(t);
                let indices = tri.indices;
                for w in indices {
                    self.vertices[w].incident.remove(&t);
                    touched.insert(w);
                }
            } else {
                kept.insert(t);
            }
        }

        let removed_quadric = self.vertices[removed].quadric;
        let dead = &mut self.vertices[removed];
        dead.alive = false;

        let s = &mut self.vertices[survivor];
        s.incident.extend(kept);
        s.quadric += removed_quadric;
        s.version = s.version.wrapping_add(1);

        let mut orphaned_vertices = Vec::new();
        for w in touched {
            let vertex = &mut self.vertices[w];
            if vertex.alive && vertex.incident.is_empty() {
                vertex.alive = false;
                orphaned_vertices.push(w);
            }
        }

        CollapseOutcome {
            removed_triangles,
            orphaned_vertices,
        }
    }

    /// Compact the live vertices and valid triangles into a plain mesh.
    ///
    /// Vertices keep their relative order, as do triangles.
    pub fn export(&self) -> TriangleMesh {
        let mut remap = vec![None; self.vertices.len()];
        let mut out = TriangleMesh::with_capacity(self.live_vertex_count(), self.valid_triangles);

        for (i, vertex) in self.vertices.iter().enumerate() {
            if vertex.alive {
                remap[i] = Some(out.add_vertex(vertex.position));
            }
        }

        for tri in self.triangles.iter().filter(|t| t.valid) {
            let [a, b, c] = tri.indices;
            if let (Some(na), Some(nb), Some(nc)) = (remap[a], remap[b], remap[c]) {
                out.add_face([na, nb, nc]);
            }
        }

        out
    }

    #[cfg(test)]
    pub(crate) fn set_quadric(&mut self, v: usize, quadric: Quadric) {
        self.vertices[v].quadric = quadric;
    }

    /// Check the adjacency invariants. Test helper.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let mut valid = 0;
        for (ti, tri) in self.triangles.iter().enumerate() {
            if !tri.valid {
                continue;
            }
            valid += 1;
            assert!(!tri.is_degenerate(), "valid triangle {ti} is degenerate");
            for v in tri.indices {
                assert!(self.vertices[v].alive, "valid triangle {ti} uses dead vertex {v}");
                assert!(self.vertices[v].incident.contains(&ti));
            }
        }
        assert_eq!(valid, self.valid_triangles);
        for (vi, vertex) in self.vertices.iter().enumerate() {
            for &t in &vertex.incident {
                assert!(vertex.alive, "dead vertex {vi} still has triangles");
                assert!(self.triangles[t].valid && self.triangles[t].contains(vi));
            }
        }
    }
}
