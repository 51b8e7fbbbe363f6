//! Scaled-integer helpers
//!
//! Values are stored as `u128` multiplied by [`SCALE`]. Multiplication and
//! division go through [`mul_div_floor`], which forms the full 256-bit
//! product, so the result is exact whenever it fits in 128 bits.

use crate::error::VaultError;

/// 1.0 in 18-decimal fixed point
pub const SCALE: u128 = 1_000_000_000_000_000_000;

/// Basis points in 100%
pub const BPS_DENOMINATOR: u128 = 10_000;

const LOW_MASK: u128 = (1 << 64) - 1;

/// 256-bit intermediate for products of two `u128`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct U256 {
    low: u128,
    high: u128,
}

impl U256 {
    /// Full product of `a * b` from four 64-bit partial products
    fn widening_mul(a: u128, b: u128) -> Self {
        let (a_hi, a_lo) = (a >> 64, a & LOW_MASK);
        let (b_hi, b_lo) = (b >> 64, b & LOW_MASK);

        let lo_lo = a_lo * b_lo;
        let hi_lo = a_hi * b_lo;
        let lo_hi = a_lo * b_hi;
        let hi_hi = a_hi * b_hi;

        // At most 3 * (2^64 - 1), fits comfortably
        let mid = (lo_lo >> 64) + (hi_lo & LOW_MASK) + (lo_hi & LOW_MASK);

        Self {
            low: (lo_lo & LOW_MASK) | (mid << 64),
            high: hi_hi + (hi_lo >> 64) + (lo_hi >> 64) + (mid >> 64),
        }
    }

    /// Floor division by a `u128`, or `None` if the quotient needs more
    /// than 128 bits
    fn checked_div_u128(self, divisor: u128) -> Option<u128> {
        if self.high >= divisor {
            return None;
        }

        // Restoring long division; the remainder always stays below `divisor`
        let mut remainder = self.high;
        let mut quotient = 0u128;
        for bit in (0..128).rev() {
            let carry = remainder >> 127;
            remainder = (remainder << 1) | ((self.low >> bit) & 1);
            quotient <<= 1;
            if carry == 1 || remainder >= divisor {
                remainder = remainder.wrapping_sub(divisor);
                quotient |= 1;
            }
        }
        Some(quotient)
    }
}

/// Compute `floor(a * b / d)` through a 256-bit intermediate
pub fn mul_div_floor(a: u128, b: u128, d: u128) -> Result<u128, VaultError> {
    if d == 0 {
        return Err(VaultError::DivisionByZero);
    }

    if let Some(product) = a.checked_mul(b) {
        return Ok(product / d);
    }

    U256::widening_mul(a, b)
        .checked_div_u128(d)
        .ok_or(VaultError::ArithmeticOverflow)
}

/// Raise a scaled value to an integer power by repeated squaring.
///
/// Each multiplication floors, so results can sit a few wei below the exact
/// value for large exponents.
pub fn pow_scaled(base: u128, mut exp: u64) -> Result<u128, VaultError> {
    let mut result = SCALE;
    let mut base = base;

    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_div_floor(result, base, SCALE)?;
        }
        exp >>= 1;
        if exp > 0 {
            base = mul_div_floor(base, base, SCALE)?;
        }
    }

    Ok(result)
}
