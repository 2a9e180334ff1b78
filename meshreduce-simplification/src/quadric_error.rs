//! Quadric error decimation
//!
//! The two boundary operations offered to callers: [`import_mesh`] builds the
//! working topology, [`simplify`] runs the collapse driver on it and returns
//! the compacted mesh with its counters.

use crate::edge_collapse::EdgeCollapseDriver;
use crate::params::{SimplifyParams, DEFAULT_BOUNDARY_PENALTY};
use crate::report::{SimplificationReport, SimplificationResult};
use crate::topology::Mesh;
use crate::MeshSimplifier;
use meshreduce_core::{Point3d, Result, TriangleMesh};
use rayon::prelude::*;
use tracing::info;

/// Build the working mesh from positions and index triples.
///
/// Fails with [`meshreduce_core::Error::InvalidMesh`] on a dangling index, a
/// triangle repeating a vertex, or fewer than 3 vertices.
pub fn import_mesh(positions: Vec<Point3d>, triangles: Vec<[usize; 3]>) -> Result<Mesh> {
    Mesh::import(positions, triangles)
}

/// Simplify `mesh` towards `round(triangles * (1 - ratio))` triangles.
pub fn simplify(mesh: Mesh, params: &SimplifyParams) -> Result<SimplificationResult> {
    params.validate()?;

    let original_triangles = mesh.valid_triangle_count();
    let original_vertices = mesh.live_vertex_count();
    let target = params.target_triangle_count(original_triangles);

    info!(
        original = original_triangles,
        target,
        threshold = params.quality_threshold,
        "Starting mesh simplification"
    );

    let mut driver = EdgeCollapseDriver::new(mesh, params);
    let stop_reason = driver.run_until(target, params.quality_threshold);
    let out = driver.export();

    let report = SimplificationReport {
        original_triangles,
        final_triangles: out.face_count(),
        original_vertices,
        final_vertices: out.vertex_count(),
        collapses_performed: driver.collapses_performed(),
        stale_candidates_discarded: driver.stale_discarded(),
        stop_reason,
    };

    info!(
        final_triangles = report.final_triangles,
        collapses = report.collapses_performed,
        reason = ?report.stop_reason,
        "Simplification complete"
    );

    Ok(SimplificationResult { mesh: out, report })
}

/// Simplify independent meshes in parallel, one driver per mesh.
///
/// Results come back in input order.
pub fn simplify_batch(
    meshes: &[TriangleMesh],
    params: &SimplifyParams,
) -> Vec<Result<SimplificationResult>> {
    meshes
        .par_iter()
        .map(|mesh| simplify(Mesh::from_triangle_mesh(mesh)?, params))
        .collect()
}

/// Quadric error decimation simplifier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadricErrorSimplifier {
    /// Stop when the cheapest collapse costs more than this
    pub quality_threshold: f64,
    /// Cost multiplier for edges touching a boundary vertex
    pub boundary_penalty: f64,
}

impl Default for QuadricErrorSimplifier {
    fn default() -> Self {
        Self {
            quality_threshold: f64::INFINITY,
            boundary_penalty: DEFAULT_BOUNDARY_PENALTY,
        }
    }
}

impl QuadricErrorSimplifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(quality_threshold: f64, boundary_penalty: f64) -> Self {
        Self {
            quality_threshold,
            boundary_penalty,
        }
    }

    fn params(&self, reduction_ratio: f64) -> SimplifyParams {
        SimplifyParams::new(reduction_ratio, self.quality_threshold)
            .with_boundary_penalty(self.boundary_penalty)
    }

    /// Like [`MeshSimplifier::simplify`], keeping the run counters.
    pub fn simplify_with_report(
        &self,
        mesh: &TriangleMesh,
        reduction_ratio: f64,
    ) -> Result<SimplificationResult> {
        simplify(Mesh::from_triangle_mesh(mesh)?, &self.params(reduction_ratio))
    }
}

impl MeshSimplifier for QuadricErrorSimplifier {
    fn simplify(&self, mesh: &TriangleMesh, reduction_ratio: f64) -> Result<TriangleMesh> {
        Ok(self.simplify_with_report(mesh, reduction_ratio)?.mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge_collapse::StopReason;
    use crate::topology::fixtures::*;
    use meshreduce_core::Error;

    #[test]
    fn test_creation() {
        let s = QuadricErrorSimplifier::new();
        assert!(s.quality_threshold.is_infinite());
        assert_eq!(s.boundary_penalty, 10.0);

        let s = QuadricErrorSimplifier::with_params(0.01, 5.0);
        assert_eq!(s.quality_threshold, 0.01);
        assert_eq!(s.boundary_penalty, 5.0);
    }

    #[test]
    fn test_invalid_reduction_ratio() {
        let s = QuadricErrorSimplifier::new();
        let mesh = make_cube();
        assert!(matches!(s.simplify(&mesh, -0.1), Err(Error::InvalidParameter(_))));
        assert!(matches!(s.simplify(&mesh, 1.1), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_invalid_mesh() {
        let s = QuadricErrorSimplifier::new();
        let mesh = TriangleMesh::from_vertices_and_faces(
            vec![Point3d::origin(), Point3d::new(1.0, 0.0, 0.0), Point3d::new(0.0, 1.0, 0.0)],
            vec![[0, 1, 7]],
        );
        assert!(matches!(s.simplify(&mesh, 0.5), Err(Error::InvalidMesh(_))));
        assert!(matches!(s.simplify(&TriangleMesh::new(), 0.5), Err(Error::InvalidMesh(_))));
    }

    #[test]
    fn test_cube_report() {
        let mesh = import_mesh(make_cube().vertices, make_cube().faces).unwrap();
        let result = simplify(mesh, &SimplifyParams::new(0.5, f64::INFINITY)).unwrap();
        let report = &result.report;
        assert_eq!(report.original_triangles, 12);
        assert_eq!(report.final_triangles, 6);
        assert_eq!(report.original_vertices, 8);
        assert_eq!(report.final_vertices, result.mesh.vertex_count());
        assert_eq!(report.stop_reason, StopReason::TargetReached);
        assert!((report.reduction_percent() - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_reduction() {
        let s = QuadricErrorSimplifier::new();
        let mesh = make_sphere(6, 8);
        let result = s.simplify_with_report(&mesh, 0.0).unwrap();
        assert_eq!(result.mesh, mesh);
        assert_eq!(result.report.collapses_performed, 0);
    }

    #[test]
    fn test_planar_grid_simplification() {
        let s = QuadricErrorSimplifier::new();
        let mesh = make_grid(6, |_, _| 0.0);
        assert_eq!(mesh.face_count(), 50);

        let result = s.simplify(&mesh, 0.5).unwrap();
        assert!(result.face_count() <= 25);
        assert!(result.face_count() > 0);
        // A flat grid stays flat
        assert!(result.vertices.iter().all(|p| p.z.abs() < 1e-9));
    }

    #[test]
    fn test_batch_matches_sequential() {
        let meshes = vec![make_cube(), make_sphere(6, 8), make_grid(5, |x, y| (x * y).sin())];
        let params = SimplifyParams::new(0.4, f64::INFINITY);
        let batch = simplify_batch(&meshes, &params);
        assert_eq!(batch.len(), 3);
        for (mesh, result) in meshes.iter().zip(batch) {
            let sequential = simplify(Mesh::from_triangle_mesh(mesh).unwrap(), &params).unwrap();
            let result = result.unwrap();
            assert_eq!(result.mesh, sequential.mesh);
            assert_eq!(result.report, sequential.report);
        }
    }

    #[test]
    fn test_batch_reports_invalid_mesh_per_entry() {
        let bad = TriangleMesh::from_vertices_and_faces(
            vec![Point3d::origin(), Point3d::new(1.0, 0.0, 0.0), Point3d::new(0.0, 1.0, 0.0)],
            vec![[0, 0, 1]],
        );
        let results = simplify_batch(&[make_cube(), bad], &SimplifyParams::default());
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(Error::InvalidMesh(_))));
    }
}
