//! Mesh simplification by quadric error edge collapse
//!
//! Given an indexed triangle mesh, edges are collapsed greedily in order of
//! increasing quadric error until a target triangle count or a quality
//! threshold is reached:
//! - Quadric error metric accumulation and evaluation
//! - Index-based mesh topology with lazy validity flags
//! - A candidate collapse set with lazy invalidation
//! - The collapse driver and the compacting export

pub mod quadric;
pub mod topology;
pub mod candidates;
pub mod edge_collapse;
pub mod params;
pub mod report;
pub mod quadric_error;

pub use quadric::*;
pub use topology::*;
pub use candidates::*;
pub use edge_collapse::*;
pub use params::*;
pub use report::*;
pub use quadric_error::*;

use meshreduce_core::{Result, TriangleMesh};

/// Simplify a mesh by reducing the number of faces/vertices
pub trait MeshSimplifier {
    /// Simplify mesh with target reduction ratio (0.0 = no reduction, 1.0 = maximum reduction)
    fn simplify(&self, mesh: &TriangleMesh, reduction_ratio: f64) -> Result<TriangleMesh>;
}
