//! Project a range of interest rates in parallel
//!
//! Supports JSON output for API integration via --json flag
//! Accepts config via environment variables:
//!   SWEEP_START_BPS, SWEEP_END_BPS, SWEEP_STEP_BPS, SWEEP_YEARS

use accrual_vault::projection::{ProjectionConfig, RateSweep, SweepResult};
use accrual_vault::{SCALE, SECONDS_PER_YEAR};
use anyhow::{Context, Result};
use serde::Serialize;
use std::env;
use std::time::Instant;

#[derive(Serialize)]
struct SweepResponse {
    rates: usize,
    horizon_secs: u64,
    principal: u128,
    results: Vec<SweepResult>,
    execution_time_ms: u64,
}

fn env_or<T: std::str::FromStr>(var: &str, default: T) -> Result<T> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .ok()
            .with_context(|| format!("invalid value for {}: '{}'", var, value)),
        Err(_) => Ok(default),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let json_output = env::args().any(|arg| arg == "--json");
    let start = Instant::now();

    let start_bps: u32 = env_or("SWEEP_START_BPS", 0)?;
    let end_bps: u32 = env_or("SWEEP_END_BPS", 1_500)?;
    let step_bps: u32 = env_or("SWEEP_STEP_BPS", 100)?;
    let years: u64 = env_or("SWEEP_YEARS", 3)?;

    let base = ProjectionConfig {
        horizon_secs: years
            .checked_mul(SECONDS_PER_YEAR)
            .with_context(|| format!("SWEEP_YEARS {} is too large", years))?,
        step_secs: SECONDS_PER_YEAR / 12,
        ..Default::default()
    };

    let rates = RateSweep::rate_range(start_bps, end_bps, step_bps);
    log::info!("Sweeping {} rates over {} years", rates.len(), years);

    let sweep = RateSweep::new(base.clone());
    let results = sweep.run(&rates)?;

    if json_output {
        let response = SweepResponse {
            rates: results.len(),
            horizon_secs: base.horizon_secs,
            principal: base.principal,
            results,
            execution_time_ms: start.elapsed().as_millis() as u64,
        };
        println!("{}", serde_json::to_string(&response)?);
        return Ok(());
    }

    println!("{:>8} {:>26} {:>14} {:>12}", "Rate", "Final Exchange Rate", "Value/Unit", "Eff. Yield");
    println!("{}", "-".repeat(64));
    for result in &results {
        let summary = &result.summary;
        println!(
            "{:>6}bp {:>26} {:>14.8} {:>11.4}%",
            result.rate_bps,
            summary.final_exchange_rate,
            summary.final_exchange_rate as f64 / SCALE as f64,
            summary.effective_annual_yield * 100.0,
        );
    }
    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
