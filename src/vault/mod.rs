//! Interest-bearing vault
//!
//! Depositors hand reference asset to the vault and receive derived units.
//! The derived unit appreciates against the reference asset at the
//! administrator's annual rate:
//!
//! - `exchange_rate` is the last checkpoint, written only when the rate changes
//! - `current_exchange_rate` projects that checkpoint forward to "now"
//! - `get_move` converts derived units back to reference asset at the live rate
//!
//! # Example
//!
//! ```rust
//! use accrual_vault::{Address, ManualClock, MockToken, ReferenceToken, Vault, VaultConfig, SCALE};
//!
//! let owner = Address::from_low_u64(1);
//! let vault_address = Address::from_low_u64(2);
//! let clock = ManualClock::new(0);
//! let mut token = MockToken::new("Mock MOVE", "MOVE", owner, 1_000 * SCALE);
//! token.approve(owner, vault_address, 1_000 * SCALE);
//!
//! let mut vault = Vault::initialize(vault_address, owner, token, clock.clone(), VaultConfig::default())?;
//! vault.set_interest_rate(&owner, 500)?;
//! vault.deposit(&owner, 100 * SCALE)?;
//!
//! clock.advance(365 * 24 * 60 * 60);
//! assert_eq!(vault.get_move(100 * SCALE)?, 105 * SCALE);
//! # Ok::<(), accrual_vault::VaultError>(())
//! ```

mod engine;
mod events;
mod state;

pub use engine::Vault;
pub use events::VaultEvent;
pub use state::{VaultState, VAULT_STATE_VERSION};
