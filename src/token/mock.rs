//! In-memory reference token

use std::collections::HashMap;

use super::{Address, ReferenceToken};
use crate::error::VaultError;

/// Simple ledger with mint, approve and transfer_from
#[derive(Debug, Clone)]
pub struct MockToken {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    total_supply: u128,
    balances: HashMap<Address, u128>,
    allowances: HashMap<(Address, Address), u128>,
}

impl MockToken {
    /// Create a token and mint `initial_supply` to `holder`
    pub fn new(name: &str, symbol: &str, holder: Address, initial_supply: u128) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            decimals: 18,
            total_supply: initial_supply,
            balances: HashMap::from([(holder, initial_supply)]),
            allowances: HashMap::new(),
        }
    }

    /// Credit `amount` new tokens to `to`
    pub fn mint(&mut self, to: Address, amount: u128) -> Result<(), VaultError> {
        let total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(VaultError::ArithmeticOverflow)?;
        // Balances never exceed total supply, so this cannot overflow
        let balance = self.balance_of(&to) + amount;

        self.total_supply = total_supply;
        self.balances.insert(to, balance);
        Ok(())
    }

    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }
}

impl ReferenceToken for MockToken {
    fn balance_of(&self, owner: &Address) -> u128 {
        self.balances.get(owner).copied().unwrap_or(0)
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> u128 {
        self.allowances.get(&(*owner, *spender)).copied().unwrap_or(0)
    }

    fn approve(&mut self, owner: Address, spender: Address, amount: u128) {
        self.allowances.insert((owner, spender), amount);
    }

    fn transfer_from(
        &mut self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<(), VaultError> {
        let approved = self.allowance(from, spender);
        if approved < amount {
            return Err(VaultError::InsufficientAllowance { required: amount, approved });
        }

        let available = self.balance_of(from);
        if available < amount {
            return Err(VaultError::InsufficientBalance { required: amount, available });
        }

        if from == to {
            self.allowances.insert((*from, *spender), approved - amount);
            return Ok(());
        }

        let credited = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(VaultError::ArithmeticOverflow)?;

        self.allowances.insert((*from, *spender), approved - amount);
        self.balances.insert(*from, available - amount);
        self.balances.insert(*to, credited);

        Ok(())
    }
}
