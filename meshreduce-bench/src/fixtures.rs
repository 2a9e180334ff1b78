//! Generated benchmark meshes

use meshreduce_core::{Point3d, TriangleMesh};
use std::f64::consts::PI;

/// `size` x `size` vertex heightfield of a single sine bump.
pub fn bump_grid(size: usize) -> TriangleMesh {
    let mut vertices = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let fx = x as f64 / (size - 1) as f64 * PI;
            let fy = y as f64 / (size - 1) as f64 * PI;
            vertices.push(Point3d::new(x as f64, y as f64, (fx.sin() * fy.sin()) * 2.0));
        }
    }
    let mut faces = Vec::with_capacity((size - 1) * (size - 1) * 2);
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

/// Closed unit UV sphere.
pub fn uv_sphere(stacks: usize, slices: usize) -> TriangleMesh {
    let mut mesh = TriangleMesh::with_capacity((stacks - 1) * slices + 2, 2 * stacks * slices);
    let north = mesh.add_vertex(Point3d::new(0.0, 0.0, 1.0));
    for i in 1..stacks {
        let theta = PI * i as f64 / stacks as f64;
        for j in 0..slices {
            let phi = 2.0 * PI * j as f64 / slices as f64;
            mesh.add_vertex(Point3d::new(theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos()));
        }
    }
    let south = mesh.add_vertex(Point3d::new(0.0, 0.0, -1.0));

    let ring = |i: usize, j: usize| 1 + i * slices + j % slices;
    for j in 0..slices {
        mesh.add_face([north, ring(0, j), ring(0, j + 1)]);
    }
    for i in 0..(stacks - 2) {
        for j in 0..slices {
            mesh.add_face([ring(i, j), ring(i + 1, j), ring(i + 1, j + 1)]);
            mesh.add_face([ring(i, j), ring(i + 1, j + 1), ring(i, j + 1)]);
        }
    }
    for j in 0..slices {
        mesh.add_face([south, ring(stacks - 2, j + 1), ring(stacks - 2, j)]);
    }
    mesh
}
