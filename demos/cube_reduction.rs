//! Cube reduction example
//!
//! Halves the triangle count of a unit cube and prints what was removed.

use meshreduce_core::{Point3d, TriangleMesh};
use meshreduce_simplification::{import_mesh, simplify, SimplifyParams};

fn main() -> anyhow::Result<()> {
    println!("meshreduce Cube Reduction Example");
    println!("=================================");

    let vertices = vec![
        Point3d::new(0.0, 0.0, 0.0),
        Point3d::new(1.0, 0.0, 0.0),
        Point3d::new(1.0, 1.0, 0.0),
        Point3d::new(0.0, 1.0, 0.0),
        Point3d::new(0.0, 0.0, 1.0),
        Point3d::new(1.0, 0.0, 1.0),
        Point3d::new(1.0, 1.0, 1.0),
        Point3d::new(0.0, 1.0, 1.0),
    ];
    let faces = vec![
        // Bottom and top
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        // Sides
        [0, 1, 5],
        [0, 5, 4],
        [1, 2, 6],
        [1, 6, 5],
        [2, 3, 7],
        [2, 7, 6],
        [3, 0, 4],
        [3, 4, 7],
    ];
    let cube = TriangleMesh::from_vertices_and_faces(vertices, faces);
    println!("Input: {} vertices, {} faces", cube.vertex_count(), cube.face_count());

    let mesh = import_mesh(cube.vertices, cube.faces)?;
    let result = simplify(mesh, &SimplifyParams::new(0.5, f64::INFINITY))?;

    println!("\n{}", result.report);
    println!("Stopped because: {:?}", result.report.stop_reason);
    println!("\nRemaining vertices:");
    for (i, v) in result.mesh.vertices.iter().enumerate() {
        println!("  {i}: ({:.3}, {:.3}, {:.3})", v.x, v.y, v.z);
    }
    println!("Remaining faces:");
    for face in &result.mesh.faces {
        println!("  {face:?}");
    }

    Ok(())
}
