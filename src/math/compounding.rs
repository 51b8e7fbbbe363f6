//! Exchange-rate accrual
//!
//! Interest compounds once per whole 365-day year. Inside a partial year the
//! rate grows linearly, so the live rate never jumps at a year boundary.

use super::fixed::{mul_div_floor, pow_scaled, BPS_DENOMINATOR, SCALE};
use crate::error::VaultError;

/// 365 days of seconds
pub const SECONDS_PER_YEAR: u64 = 365 * 24 * 60 * 60;

/// Scaled growth factor for one full year at `rate_bps`
pub fn annual_growth_factor(rate_bps: u32) -> u128 {
    SCALE + rate_bps as u128 * SCALE / BPS_DENOMINATOR
}

/// Grow `stored_rate` by `rate_bps` annual interest over `elapsed_secs`.
///
/// Rounds down at every step. Returns `stored_rate` unchanged when either
/// the rate or the elapsed time is zero.
pub fn accrue(stored_rate: u128, rate_bps: u32, elapsed_secs: u64) -> Result<u128, VaultError> {
    if rate_bps == 0 || elapsed_secs == 0 {
        return Ok(stored_rate);
    }

    let years = elapsed_secs / SECONDS_PER_YEAR;
    let remainder = elapsed_secs % SECONDS_PER_YEAR;

    let compounded = if years > 0 {
        let factor = pow_scaled(annual_growth_factor(rate_bps), years)?;
        mul_div_floor(stored_rate, factor, SCALE)?
    } else {
        stored_rate
    };

    if remainder == 0 {
        return Ok(compounded);
    }

    let partial_interest = mul_div_floor(
        rate_bps as u128 * SCALE,
        remainder as u128,
        BPS_DENOMINATOR * SECONDS_PER_YEAR as u128,
    )?;

    mul_div_floor(compounded, SCALE + partial_interest, SCALE)
}
