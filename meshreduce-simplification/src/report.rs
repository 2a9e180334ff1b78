//! Result types for simplification runs

use crate::edge_collapse::StopReason;
use meshreduce_core::TriangleMesh;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Counters describing one simplification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplificationReport {
    pub original_triangles: usize,
    pub final_triangles: usize,
    pub original_vertices: usize,
    pub final_vertices: usize,
    pub collapses_performed: usize,
    pub stale_candidates_discarded: usize,
    pub stop_reason: StopReason,
}

impl SimplificationReport {
    /// Percentage of the original triangles removed.
    pub fn reduction_percent(&self) -> f64 {
        if self.original_triangles == 0 {
            return 0.0;
        }
        (1.0 - self.final_triangles as f64 / self.original_triangles as f64) * 100.0
    }
}

impl fmt::Display for SimplificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} → {} triangles ({:.1}% reduction, {} collapses)",
            self.original_triangles,
            self.final_triangles,
            self.reduction_percent(),
            self.collapses_performed
        )
    }
}

/// A compacted mesh together with the counters of the run that produced it.
#[derive(Debug, Clone)]
pub struct SimplificationResult {
    pub mesh: TriangleMesh,
    pub report: SimplificationReport,
}
