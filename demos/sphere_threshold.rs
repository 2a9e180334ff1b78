//! Quality threshold example
//!
//! Decimates a UV sphere aggressively under a series of error thresholds.
//! A tight threshold stops early and keeps the silhouette; an unbounded one
//! goes all the way to the target.

use meshreduce_bench::fixtures::uv_sphere;
use meshreduce_simplification::{import_mesh, simplify, SimplifyParams};

fn main() -> anyhow::Result<()> {
    println!("meshreduce Quality Threshold Example");
    println!("====================================");

    let sphere = uv_sphere(16, 32);
    println!("Input: {} vertices, {} faces", sphere.vertex_count(), sphere.face_count());

    for threshold in [1e-6, 1e-4, 1e-2, f64::INFINITY] {
        let mesh = import_mesh(sphere.vertices.clone(), sphere.faces.clone())?;
        let result = simplify(mesh, &SimplifyParams::new(0.9, threshold))?;
        println!(
            "threshold {threshold:>8.0e}: {} ({:?}, {} stale candidates skipped)",
            result.report, result.report.stop_reason, result.report.stale_candidates_discarded
        );
    }

    Ok(())
}
