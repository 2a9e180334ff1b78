//! Edge collapse driver
//!
//! Repeatedly pops the cheapest candidate, discards it if stale, and
//! otherwise merges its higher-indexed endpoint into the lower one and
//! rescores the edges around the survivor. The loop is single-threaded and
//! order-dependent; callers may stop it between any two [`step`] calls.
//!
//! [`step`]: EdgeCollapseDriver::step

use crate::candidates::{Candidate, CandidateSet};
use crate::params::SimplifyParams;
use crate::topology::Mesh;
use meshreduce_core::{Point3d, TriangleMesh};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Why [`EdgeCollapseDriver::run_until`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// The valid triangle count dropped to the target
    TargetReached,
    /// The cheapest remaining collapse was above the quality threshold
    QualityThreshold,
    /// No applicable candidate was left
    CandidatesExhausted,
    /// Fewer than 4 vertices or 2 triangles; nothing was attempted
    MeshTooSmall,
}

/// A collapse the driver applied.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedCollapse {
    pub survivor: usize,
    pub removed: usize,
    pub position: Point3d,
    pub cost: f64,
    pub removed_triangles: usize,
}

/// Owns a mesh and its candidate set for the duration of a run.
pub struct EdgeCollapseDriver {
    mesh: Mesh,
    candidates: CandidateSet,
    applied_costs: Vec<f64>,
    stale_discarded: usize,
}

impl EdgeCollapseDriver {
    pub fn new(mesh: Mesh, params: &SimplifyParams) -> Self {
        let candidates = CandidateSet::build(&mesh, params);
        debug!(
            vertices = mesh.vertex_count(),
            triangles = mesh.valid_triangle_count(),
            candidates = candidates.len(),
            "Built collapse candidates"
        );
        Self {
            mesh,
            candidates,
            applied_costs: Vec::new(),
            stale_discarded: 0,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn into_mesh(self) -> Mesh {
        self.mesh
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    /// Costs of the applied collapses, in application order.
    pub fn applied_costs(&self) -> &[f64] {
        &self.applied_costs
    }

    pub fn collapses_performed(&self) -> usize {
        self.applied_costs.len()
    }

    pub fn stale_discarded(&self) -> usize {
        self.stale_discarded
    }

    /// Pop until a fresh candidate surfaces.
    fn next_fresh(&mut self) -> Option<Candidate> {
        while let Some(candidate) = self.candidates.pop_cheapest() {
            if candidate.is_fresh(&self.mesh) {
                return Some(candidate);
            }
            trace!(v1 = candidate.v1, v2 = candidate.v2, "discarding stale candidate");
            self.stale_discarded += 1;
        }
        None
    }

    fn apply(&mut self, candidate: Candidate) -> AppliedCollapse {
        let (survivor, removed) = (candidate.v1, candidate.v2);
        let outcome = self.mesh.collapse(survivor, removed, candidate.target);
        self.candidates.invalidate_and_rescore_around(&self.mesh, survivor);
        self.applied_costs.push(candidate.cost);

        trace!(
            survivor,
            removed,
            cost = candidate.cost,
            removed_triangles = outcome.removed_triangles.len(),
            "collapsed edge"
        );

        AppliedCollapse {
            survivor,
            removed,
            position: candidate.target,
            cost: candidate.cost,
            removed_triangles: outcome.removed_triangles.len(),
        }
    }

    /// Apply the cheapest fresh collapse, if any is left.
    pub fn step(&mut self) -> Option<AppliedCollapse> {
        let candidate = self.next_fresh()?;
        Some(self.apply(candidate))
    }

    /// Collapse while more than `target_triangles` valid triangles remain and
    /// the next collapse costs at most `quality_threshold`.
    ///
    /// A candidate rejected by the threshold is put back, so a later call
    /// with a looser threshold resumes where this one stopped.
    pub fn run_until(&mut self, target_triangles: usize, quality_threshold: f64) -> StopReason {
        if self.mesh.vertex_count() < 4 || self.mesh.triangle_count() < 2 {
            return StopReason::MeshTooSmall;
        }

        loop {
            if self.mesh.valid_triangle_count() <= target_triangles {
                return StopReason::TargetReached;
            }
            let Some(candidate) = self.next_fresh() else {
                debug!(
                    triangles = self.mesh.valid_triangle_count(),
                    "No collapse candidates left"
                );
                return StopReason::CandidatesExhausted;
            };
            if candidate.cost > quality_threshold {
                debug!(
                    cost = candidate.cost,
                    threshold = quality_threshold,
                    "Next collapse exceeds quality threshold"
                );
                self.candidates.restore(candidate);
                return StopReason::QualityThreshold;
            }
            self.apply(candidate);
        }
    }

    /// Compacted copy of the current mesh.
    pub fn export(&self) -> TriangleMesh {
        self.mesh.export()
    }
}
