//! Fixed-point arithmetic and interest compounding
//!
//! All monetary values are unsigned integers scaled by 10^18, matching the
//! precision of the reference asset.

mod fixed;
mod compounding;

pub use fixed::{mul_div_floor, pow_scaled, BPS_DENOMINATOR, SCALE};
pub use compounding::{accrue, annual_growth_factor, SECONDS_PER_YEAR};
