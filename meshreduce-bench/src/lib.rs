//! Benchmark support for meshreduce
//!
//! Criterion measurements backed by an instrumented allocator, and
//! generated meshes so benchmarks need no asset files.

pub mod fixtures;
pub mod mem;

use criterion::measurement::Measurement;

/// A criterion measurement with a display name for benchmark groups.
pub trait MeshreduceMeasurement: Measurement + 'static {
    const NAME: &'static str;
}
