//! Error types for vault operations

use crate::token::Address;
use thiserror::Error;

/// Errors returned by vault operations
///
/// Every failing operation leaves the vault and the token ledger untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VaultError {
    #[error("caller {caller} is not the vault administrator")]
    Unauthorized { caller: Address },

    #[error("interest rate {rate_bps} bps exceeds the maximum of {max_bps} bps")]
    InterestRateOutOfBounds { rate_bps: u32, max_bps: u32 },

    #[error("deposit amount must be greater than zero")]
    ZeroDeposit,

    #[error("insufficient allowance: required {required}, approved {approved}")]
    InsufficientAllowance { required: u128, approved: u128 },

    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: u128, available: u128 },

    #[error("arithmetic overflow")]
    ArithmeticOverflow,

    #[error("division by zero")]
    DivisionByZero,

    #[error("unsupported vault state version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("invalid vault configuration: {0}")]
    InvalidConfig(String),
}

/// Broad classification of a [`VaultError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller lacks the administrator capability
    Authorization,
    /// Rate out of bounds, zero amount, bad configuration
    InvalidParameter,
    /// Depositor has not approved enough reference asset
    InsufficientAllowance,
    /// Depositor does not hold enough reference asset
    InsufficientBalance,
    /// Fixed-point arithmetic could not represent the result
    Arithmetic,
    /// Persisted state cannot be restored
    State,
}

impl VaultError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VaultError::Unauthorized { .. } => ErrorKind::Authorization,
            VaultError::InterestRateOutOfBounds { .. }
            | VaultError::ZeroDeposit
            | VaultError::InvalidConfig(_) => ErrorKind::InvalidParameter,
            VaultError::InsufficientAllowance { .. } => ErrorKind::InsufficientAllowance,
            VaultError::InsufficientBalance { .. } => ErrorKind::InsufficientBalance,
            VaultError::ArithmeticOverflow | VaultError::DivisionByZero => ErrorKind::Arithmetic,
            VaultError::UnsupportedVersion { .. } => ErrorKind::State,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let caller = Address::from_low_u64(7);
        assert_eq!(VaultError::Unauthorized { caller }.kind(), ErrorKind::Authorization);
        assert_eq!(VaultError::ZeroDeposit.kind(), ErrorKind::InvalidParameter);
        assert_eq!(
            VaultError::InsufficientAllowance { required: 2, approved: 1 }.kind(),
            ErrorKind::InsufficientAllowance
        );
    }

    #[test]
    fn test_error_messages() {
        let err = VaultError::InterestRateOutOfBounds { rate_bps: 12_000, max_bps: 10_000 };
        assert_eq!(
            err.to_string(),
            "interest rate 12000 bps exceeds the maximum of 10000 bps"
        );
    }
}
