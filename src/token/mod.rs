//! Reference-asset ledger interface
//!
//! The vault only ever moves reference asset through [`ReferenceToken`],
//! using the approve / transfer-on-behalf pattern of fungible tokens.

mod address;
mod mock;

pub use address::{Address, ParseAddressError};
pub use mock::MockToken;

use crate::error::VaultError;

/// Fungible token with pre-authorized transfers
pub trait ReferenceToken {
    /// Balance held by `owner`
    fn balance_of(&self, owner: &Address) -> u128;

    /// Amount `spender` may still move on behalf of `owner`
    fn allowance(&self, owner: &Address, spender: &Address) -> u128;

    /// Authorize `spender` to move up to `amount` of `owner`'s balance
    fn approve(&mut self, owner: Address, spender: Address, amount: u128);

    /// Move `amount` from `from` to `to`, consuming `spender`'s allowance.
    ///
    /// Must either fully succeed or leave the ledger unchanged.
    fn transfer_from(
        &mut self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<(), VaultError>;
}
