//! Accrual Vault - interest-bearing vault engine with fixed-point exchange rates
//!
//! This library provides:
//! - An accrual vault that credits derived units for reference-asset deposits
//! - 18-decimal fixed-point arithmetic with annual compounding
//! - Injectable clocks and a reference-token ledger interface
//! - Exchange-rate projections and parallel rate sweeps

pub mod clock;
pub mod config;
pub mod error;
pub mod math;
pub mod projection;
pub mod token;
pub mod vault;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, VaultConfig};
pub use error::{ErrorKind, VaultError};
pub use math::{SCALE, SECONDS_PER_YEAR};
pub use projection::{ProjectionConfig, RateProjection, RateSweep};
pub use token::{Address, MockToken, ReferenceToken};
pub use vault::{Vault, VaultEvent, VaultState};
