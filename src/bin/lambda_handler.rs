//! AWS Lambda handler for exchange-rate projections
//!
//! Accepts a projection request as JSON and returns the schedule plus a
//! summary.

use accrual_vault::projection::{
    ProjectionConfig, ProjectionRow, ProjectionSummary, RateProjection,
};
use accrual_vault::{SCALE, SECONDS_PER_YEAR};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};

/// Input configuration for the projection
#[derive(Debug, Deserialize)]
pub struct ProjectionRequest {
    /// Annual rate in basis points (default: 700)
    #[serde(default = "default_rate_bps")]
    pub rate_bps: u32,

    /// Horizon in seconds (default: three 365-day years)
    #[serde(default = "default_horizon_secs")]
    pub horizon_secs: u64,

    /// Seconds between rows (default: one twelfth of a year)
    #[serde(default = "default_step_secs")]
    pub step_secs: u64,

    /// Derived units to value, 18 decimals (default: 100 tokens)
    #[serde(default = "default_principal")]
    pub principal: u128,

    /// Unix seconds of the first row
    #[serde(default)]
    pub start_timestamp: i64,

    /// Omit per-row output
    #[serde(default)]
    pub summary_only: bool,
}

fn default_rate_bps() -> u32 {
    700
}

fn default_horizon_secs() -> u64 {
    3 * SECONDS_PER_YEAR
}

fn default_step_secs() -> u64 {
    SECONDS_PER_YEAR / 12
}

fn default_principal() -> u128 {
    100 * SCALE
}

#[derive(Debug, Serialize)]
pub struct ProjectionResponse {
    pub summary: ProjectionSummary,
    pub rows: Vec<ProjectionRow>,
    pub execution_time_ms: u64,
}

async fn handler(event: LambdaEvent<ProjectionRequest>) -> Result<ProjectionResponse, Error> {
    let start = std::time::Instant::now();
    let request = event.payload;
    log::info!("Projection request: {:?}", request);

    let config = ProjectionConfig {
        rate_bps: request.rate_bps,
        horizon_secs: request.horizon_secs,
        step_secs: request.step_secs,
        principal: request.principal,
        start_rate: SCALE,
        start_timestamp: request.start_timestamp,
    };

    let result = RateProjection::run(&config)?;
    let summary = result.summary();
    let rows = if request.summary_only { Vec::new() } else { result.rows };

    Ok(ProjectionResponse {
        summary,
        rows,
        execution_time_ms: start.elapsed().as_millis() as u64,
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
