//! Exchange-rate projections for single rates and rate sweeps

mod schedule;
mod sweep;

pub use schedule::{
    effective_annual_yield, ProjectionConfig, ProjectionResult, ProjectionRow, ProjectionSummary,
    RateProjection,
};
pub use sweep::{RateSweep, SweepResult};
