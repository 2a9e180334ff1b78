//! Parameters for quadric error simplification

use meshreduce_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Cost multiplier for edges touching a boundary vertex.
pub const DEFAULT_BOUNDARY_PENALTY: f64 = 10.0;

/// Below this `|det A|` the optimal-position solve falls back to the midpoint.
pub const DEFAULT_DETERMINANT_EPSILON: f64 = 1e-10;

/// Parameters for a simplification run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifyParams {
    /// Fraction of triangles to remove (0.0 = none, 1.0 = as many as possible).
    pub target_reduction_ratio: f64,
    /// Stop as soon as the cheapest remaining collapse costs more than this.
    pub quality_threshold: f64,
    /// Multiplier applied to the cost of edges touching a boundary vertex.
    pub boundary_penalty: f64,
    /// Singular-solve cutoff for the optimal merge position.
    pub determinant_epsilon: f64,
}

impl Default for SimplifyParams {
    fn default() -> Self {
        Self {
            target_reduction_ratio: 0.5,
            quality_threshold: f64::INFINITY,
            boundary_penalty: DEFAULT_BOUNDARY_PENALTY,
            determinant_epsilon: DEFAULT_DETERMINANT_EPSILON,
        }
    }
}

impl SimplifyParams {
    pub fn new(target_reduction_ratio: f64, quality_threshold: f64) -> Self {
        Self {
            target_reduction_ratio,
            quality_threshold,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_reduction_ratio(mut self, ratio: f64) -> Self {
        self.target_reduction_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_quality_threshold(mut self, threshold: f64) -> Self {
        self.quality_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_boundary_penalty(mut self, penalty: f64) -> Self {
        self.boundary_penalty = penalty;
        self
    }

    #[must_use]
    pub fn with_determinant_epsilon(mut self, epsilon: f64) -> Self {
        self.determinant_epsilon = epsilon;
        self
    }

    /// Reject values the driver cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.target_reduction_ratio) {
            return Err(Error::InvalidParameter(format!(
                "reduction ratio must be between 0.0 and 1.0, got {}",
                self.target_reduction_ratio
            )));
        }
        // NaN fails this comparison too
        if !(self.quality_threshold >= 0.0) {
            return Err(Error::InvalidParameter(format!(
                "quality threshold must be non-negative, got {}",
                self.quality_threshold
            )));
        }
        if !(self.boundary_penalty.is_finite() && self.boundary_penalty > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "boundary penalty must be positive and finite, got {}",
                self.boundary_penalty
            )));
        }
        if !(self.determinant_epsilon.is_finite() && self.determinant_epsilon >= 0.0) {
            return Err(Error::InvalidParameter(format!(
                "determinant epsilon must be non-negative and finite, got {}",
                self.determinant_epsilon
            )));
        }
        Ok(())
    }

    /// Triangle count the driver aims for: `round(original * (1 - ratio))`.
    pub fn target_triangle_count(&self, original_triangles: usize) -> usize {
        let keep = 1.0 - self.target_reduction_ratio.clamp(0.0, 1.0);
        (original_triangles as f64 * keep).round() as usize
    }
}
