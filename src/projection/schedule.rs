//! Exchange-rate schedules over a fixed horizon

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::VaultError;
use crate::math::{accrue, mul_div_floor, BPS_DENOMINATOR, SCALE, SECONDS_PER_YEAR};

/// Largest number of rows a single projection may produce
pub const MAX_PROJECTION_ROWS: u64 = 1_000_000;

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Annual rate in basis points
    pub rate_bps: u32,

    /// Total time to project, in seconds
    pub horizon_secs: u64,

    /// Spacing between output rows, in seconds
    pub step_secs: u64,

    /// Derived units whose reference value is tracked
    pub principal: u128,

    /// Exchange rate at the start of the projection (18 decimals)
    pub start_rate: u128,

    /// Unix seconds of the first row
    pub start_timestamp: i64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            rate_bps: 700,
            horizon_secs: 3 * SECONDS_PER_YEAR,
            step_secs: SECONDS_PER_YEAR / 12,
            principal: 100 * SCALE,
            start_rate: SCALE,
            start_timestamp: 0,
        }
    }
}

impl ProjectionConfig {
    pub fn validate(&self) -> Result<(), VaultError> {
        if self.step_secs == 0 {
            return Err(VaultError::InvalidConfig("step_secs must be positive".to_string()));
        }
        if self.rate_bps as u128 > BPS_DENOMINATOR {
            return Err(VaultError::InterestRateOutOfBounds {
                rate_bps: self.rate_bps,
                max_bps: BPS_DENOMINATOR as u32,
            });
        }
        if self.start_rate == 0 {
            return Err(VaultError::InvalidConfig("start_rate must be positive".to_string()));
        }
        let rows = self.row_count();
        if rows > MAX_PROJECTION_ROWS {
            return Err(VaultError::InvalidConfig(format!(
                "projection would produce {} rows (limit {})",
                rows, MAX_PROJECTION_ROWS
            )));
        }
        Ok(())
    }

    /// Rows a run produces: the start, every full step, and a final partial step
    pub fn row_count(&self) -> u64 {
        let step = self.step_secs.max(1);
        let partial = u64::from(self.horizon_secs % step != 0);
        (self.horizon_secs / step).saturating_add(1).saturating_add(partial)
    }
}

/// One point of the schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRow {
    pub step: u32,
    pub elapsed_secs: u64,
    pub as_of: DateTime<Utc>,
    pub exchange_rate: u128,
    /// Reference value of the configured principal
    pub reference_value: u128,
    /// Annualized growth since the start, as a decimal
    pub effective_annual_yield: f64,
}

/// Rows of a completed projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub rate_bps: u32,
    pub principal: u128,
    pub rows: Vec<ProjectionRow>,
}

/// Headline numbers of a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub rate_bps: u32,
    pub horizon_secs: u64,
    pub final_exchange_rate: u128,
    pub final_reference_value: u128,
    /// final reference value / principal - 1
    pub total_growth: f64,
    pub effective_annual_yield: f64,
}

impl ProjectionResult {
    pub fn summary(&self) -> ProjectionSummary {
        let last = self.rows.last();
        let final_reference_value = last.map(|r| r.reference_value).unwrap_or(self.principal);
        let total_growth = if self.principal == 0 {
            0.0
        } else {
            final_reference_value as f64 / self.principal as f64 - 1.0
        };

        ProjectionSummary {
            rate_bps: self.rate_bps,
            horizon_secs: last.map(|r| r.elapsed_secs).unwrap_or(0),
            final_exchange_rate: last.map(|r| r.exchange_rate).unwrap_or(SCALE),
            final_reference_value,
            total_growth,
            effective_annual_yield: last.map(|r| r.effective_annual_yield).unwrap_or(0.0),
        }
    }

    /// Write rows as CSV to any writer
    pub fn write_csv_to<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for row in &self.rows {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Write rows as CSV to a file
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), csv::Error> {
        let file = std::fs::File::create(path)?;
        self.write_csv_to(file)
    }
}

/// Projects the exchange rate forward using the vault's accrual rule
pub struct RateProjection;

impl RateProjection {
    /// Produce a row every `step_secs` up to and including the horizon
    pub fn run(config: &ProjectionConfig) -> Result<ProjectionResult, VaultError> {
        config.validate()?;

        let mut rows = Vec::new();
        let mut elapsed = 0u64;
        let mut step = 0u32;

        loop {
            rows.push(Self::row_at(config, step, elapsed)?);
            if elapsed >= config.horizon_secs {
                break;
            }
            elapsed = elapsed.saturating_add(config.step_secs).min(config.horizon_secs);
            step += 1;
        }

        Ok(ProjectionResult {
            rate_bps: config.rate_bps,
            principal: config.principal,
            rows,
        })
    }

    fn row_at(config: &ProjectionConfig, step: u32, elapsed_secs: u64) -> Result<ProjectionRow, VaultError> {
        let exchange_rate = accrue(config.start_rate, config.rate_bps, elapsed_secs)?;
        let reference_value = mul_div_floor(config.principal, exchange_rate, SCALE)?;

        let timestamp = config.start_timestamp.saturating_add(elapsed_secs as i64);
        let as_of = DateTime::from_timestamp(timestamp, 0).unwrap_or_default();

        Ok(ProjectionRow {
            step,
            elapsed_secs,
            as_of,
            exchange_rate,
            reference_value,
            effective_annual_yield: effective_annual_yield(config.start_rate, exchange_rate, elapsed_secs),
        })
    }
}

/// Annualized growth between two exchange rates `elapsed_secs` apart
pub fn effective_annual_yield(start_rate: u128, end_rate: u128, elapsed_secs: u64) -> f64 {
    if elapsed_secs == 0 || start_rate == 0 {
        return 0.0;
    }
    let growth = end_rate as f64 / start_rate as f64;
    let years = elapsed_secs as f64 / SECONDS_PER_YEAR as f64;
    growth.powf(1.0 / years) - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_projection_rows() {
        let result = RateProjection::run(&ProjectionConfig::default()).unwrap();

        // Month 0 through month 36
        assert_eq!(result.rows.len(), 37);
        assert_eq!(result.rows[0].exchange_rate, SCALE);
        assert_eq!(result.rows[36].exchange_rate, 1_225_043_000_000_000_000);
        assert_eq!(result.rows[36].reference_value, 122_504_300_000_000_000_000);

        for pair in result.rows.windows(2) {
            assert!(pair[1].exchange_rate >= pair[0].exchange_rate);
        }
    }

    #[test]
    fn test_uneven_horizon_ends_on_horizon() {
        let config = ProjectionConfig {
            horizon_secs: 100,
            step_secs: 30,
            ..Default::default()
        };
        let result = RateProjection::run(&config).unwrap();
        let elapsed: Vec<u64> = result.rows.iter().map(|r| r.elapsed_secs).collect();
        assert_eq!(elapsed, vec![0, 30, 60, 90, 100]);
    }

    #[test]
    fn test_effective_yield_whole_years() {
        let result = RateProjection::run(&ProjectionConfig::default()).unwrap();
        let summary = result.summary();

        assert_relative_eq!(summary.effective_annual_yield, 0.07, epsilon = 1e-12);
        assert_relative_eq!(summary.total_growth, 0.225043, epsilon = 1e-12);
        assert_eq!(summary.horizon_secs, 3 * SECONDS_PER_YEAR);
    }

    #[test]
    fn test_zero_step_rejected() {
        let config = ProjectionConfig {
            step_secs: 0,
            ..Default::default()
        };
        assert!(RateProjection::run(&config).is_err());
    }

    #[test]
    fn test_row_count_matches_run() {
        let config = ProjectionConfig {
            horizon_secs: 100,
            step_secs: 30,
            ..Default::default()
        };
        assert_eq!(config.row_count(), 5);
        assert_eq!(ProjectionConfig::default().row_count(), 37);
    }

    #[test]
    fn test_oversized_projection_rejected() {
        let config = ProjectionConfig {
            horizon_secs: 1_000_000_000_000_000_000,
            step_secs: 1,
            ..Default::default()
        };
        assert!(matches!(RateProjection::run(&config), Err(VaultError::InvalidConfig(_))));

        let at_limit = ProjectionConfig {
            horizon_secs: MAX_PROJECTION_ROWS - 1,
            step_secs: 1,
            rate_bps: 0,
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());
        let over_limit = ProjectionConfig {
            horizon_secs: MAX_PROJECTION_ROWS,
            ..at_limit
        };
        assert!(over_limit.validate().is_err());
    }

    #[test]
    fn test_csv_output() {
        let config = ProjectionConfig {
            horizon_secs: SECONDS_PER_YEAR,
            step_secs: SECONDS_PER_YEAR,
            ..Default::default()
        };
        let result = RateProjection::run(&config).unwrap();

        let mut buffer = Vec::new();
        result.write_csv_to(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some("step,elapsed_secs,as_of,exchange_rate,reference_value,effective_annual_yield")
        );
        assert!(lines.next().unwrap().starts_with("0,0,1970-01-01T00:00:00Z,1000000000000000000,"));
        assert!(lines.next().unwrap().contains(",1070000000000000000,107000000000000000000,"));
    }
}
