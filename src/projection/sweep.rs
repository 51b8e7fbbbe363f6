//! Parallel projections across many interest rates

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::schedule::{ProjectionConfig, ProjectionSummary, RateProjection};
use crate::error::VaultError;

/// Outcome for one rate of a sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepResult {
    pub rate_bps: u32,
    pub summary: ProjectionSummary,
}

/// Runs the same projection at different rates
///
/// # Example
/// ```ignore
/// let sweep = RateSweep::new(ProjectionConfig::default());
/// let results = sweep.run(&[300, 500, 700])?;
/// ```
#[derive(Debug, Clone)]
pub struct RateSweep {
    base: ProjectionConfig,
}

impl RateSweep {
    pub fn new(base: ProjectionConfig) -> Self {
        Self { base }
    }

    /// Rates from `start_bps` to `end_bps` inclusive, `step_bps` apart
    pub fn rate_range(start_bps: u32, end_bps: u32, step_bps: u32) -> Vec<u32> {
        let step = step_bps.max(1) as usize;
        (start_bps..=end_bps).step_by(step).collect()
    }

    /// Project every rate in parallel, preserving input order
    pub fn run(&self, rates: &[u32]) -> Result<Vec<SweepResult>, VaultError> {
        rates
            .par_iter()
            .map(|&rate_bps| -> Result<SweepResult, VaultError> {
                let config = ProjectionConfig {
                    rate_bps,
                    ..self.base.clone()
                };
                let result = RateProjection::run(&config)?;
                Ok(SweepResult {
                    rate_bps,
                    summary: result.summary(),
                })
            })
            .collect()
    }
}
