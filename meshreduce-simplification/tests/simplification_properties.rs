//! Integration tests for meshreduce-simplification
//!
//! These exercise the public import / simplify / export surface end to end.

use approx::assert_relative_eq;
use meshreduce_core::{Error, Point3d, TriangleMesh};
use meshreduce_simplification::*;
use std::collections::HashSet;

/// Unit cube, 8 vertices and 12 triangles
fn create_unit_cube() -> TriangleMesh {
    TriangleMesh::from_vertices_and_faces(
        vec![
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(1.0, 0.0, 0.0),
            Point3d::new(1.0, 1.0, 0.0),
            Point3d::new(0.0, 1.0, 0.0),
            Point3d::new(0.0, 0.0, 1.0),
            Point3d::new(1.0, 0.0, 1.0),
            Point3d::new(1.0, 1.0, 1.0),
            Point3d::new(0.0, 1.0, 1.0),
        ],
        vec![
            [0, 2, 1],
            [0, 3, 2],
            [4, 5, 6],
            [4, 6, 7],
            [0, 1, 5],
            [0, 5, 4],
            [1, 2, 6],
            [1, 6, 5],
            [2, 3, 7],
            [2, 7, 6],
            [3, 0, 4],
            [3, 4, 7],
        ],
    )
}

/// Open heightfield with a wavy surface
fn create_wavy_grid(size: usize) -> TriangleMesh {
    let mut vertices = Vec::new();
    for y in 0..size {
        for x in 0..size {
            let (fx, fy) = (x as f64, y as f64);
            vertices.push(Point3d::new(fx, fy, (fx * 0.8).sin() * (fy * 0.5).cos()));
        }
    }
    let mut faces = Vec::new();
    for y in 0..(size - 1) {
        for x in 0..(size - 1) {
            let tl = y * size + x;
            let tr = tl + 1;
            let bl = (y + 1) * size + x;
            let br = bl + 1;
            faces.push([tl, bl, tr]);
            faces.push([tr, bl, br]);
        }
    }
    TriangleMesh::from_vertices_and_faces(vertices, faces)
}

fn run(mesh: &TriangleMesh, ratio: f64, threshold: f64) -> SimplificationResult {
    let imported = import_mesh(mesh.vertices.clone(), mesh.faces.clone()).unwrap();
    simplify(imported, &SimplifyParams::new(ratio, threshold)).unwrap()
}

fn assert_well_formed(mesh: &TriangleMesh) {
    let mut referenced = HashSet::new();
    for face in &mesh.faces {
        assert!(face.iter().all(|&i| i < mesh.vertex_count()), "dangling index in {face:?}");
        assert!(face[0] != face[1] && face[1] != face[2] && face[0] != face[2], "degenerate {face:?}");
        referenced.extend(face.iter().copied());
    }
    assert_eq!(referenced.len(), mesh.vertex_count(), "unreferenced vertices exported");
}

#[test]
fn test_unit_cube_halved() {
    let result = run(&create_unit_cube(), 0.5, f64::INFINITY);

    assert_eq!(result.mesh.face_count(), 6);
    assert_well_formed(&result.mesh);
    assert_eq!(result.report.original_triangles, 12);
    assert_eq!(result.report.final_triangles, 6);
    assert_relative_eq!(result.report.reduction_percent(), 50.0, epsilon = 1e-12);
    assert_eq!(result.report.to_string(), "12 → 6 triangles (50.0% reduction, 3 collapses)");
}

#[test]
fn test_triangle_count_never_exceeds_target() {
    let mesh = create_wavy_grid(9);
    let original = mesh.face_count();
    for ratio in [0.1, 0.25, 0.5, 0.75, 0.9] {
        let result = run(&mesh, ratio, f64::INFINITY);
        let target = SimplifyParams::new(ratio, f64::INFINITY).target_triangle_count(original);
        assert!(result.mesh.face_count() <= original);
        if result.report.stop_reason == StopReason::TargetReached {
            assert!(result.mesh.face_count() <= target, "ratio {ratio}");
        }
        assert_well_formed(&result.mesh);
    }
}

#[test]
fn test_zero_ratio_is_identity() {
    let mesh = create_wavy_grid(6);
    let result = run(&mesh, 0.0, f64::INFINITY);
    assert_eq!(result.mesh, mesh);
    assert_eq!(result.report.collapses_performed, 0);
    assert_eq!(result.report.reduction_percent(), 0.0);
}

#[test]
fn test_quality_threshold_keeps_floor() {
    let mesh = create_wavy_grid(8);
    let strict = run(&mesh, 0.9, 1e-6);
    let loose = run(&mesh, 0.9, f64::INFINITY);

    assert_eq!(strict.report.stop_reason, StopReason::QualityThreshold);
    assert!(strict.mesh.face_count() > loose.mesh.face_count());
    assert_well_formed(&strict.mesh);
}

#[test]
fn test_applied_costs_non_decreasing() {
    let mesh = create_unit_cube();
    let imported = import_mesh(mesh.vertices, mesh.faces).unwrap();
    let mut driver = EdgeCollapseDriver::new(imported, &SimplifyParams::default());
    let mut last = 0.0;
    while let Some(applied) = driver.step() {
        assert!(applied.cost >= last - 1e-9);
        last = applied.cost;
    }
    assert_eq!(driver.applied_costs().len(), driver.collapses_performed());
}

#[test]
fn test_out_of_range_index_rejected() {
    let err = import_mesh(
        vec![
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(1.0, 0.0, 0.0),
            Point3d::new(0.0, 1.0, 0.0),
        ],
        vec![[0, 1, 3]],
    )
    .unwrap_err();
    assert!(matches!(err, Error::InvalidMesh(_)));
}

#[test]
fn test_export_is_idempotent() {
    let mesh = create_wavy_grid(7);
    let imported = import_mesh(mesh.vertices, mesh.faces).unwrap();
    let mut driver = EdgeCollapseDriver::new(imported, &SimplifyParams::default());
    driver.run_until(30, f64::INFINITY);

    let first = driver.export();
    let second = driver.export();
    assert_eq!(first, second);
    let bits = |m: &TriangleMesh| -> Vec<u64> {
        m.vertices.iter().flat_map(|p| p.iter().map(|c| c.to_bits()).collect::<Vec<_>>()).collect()
    };
    assert_eq!(bits(&first), bits(&second));
}

#[test]
fn test_simplifier_trait() {
    let simplifier: Box<dyn MeshSimplifier> = Box::new(QuadricErrorSimplifier::new());
    let out = simplifier.simplify(&create_wavy_grid(6), 0.5).unwrap();
    assert!(out.face_count() <= 25);
    assert_well_formed(&out);
}
