//! Persisted vault state

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::events::VaultEvent;
use crate::math::SCALE;
use crate::token::Address;

/// Current layout version of [`VaultState`]
pub const VAULT_STATE_VERSION: u32 = 1;

/// Everything the vault stores between operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultState {
    /// Layout version, checked on restore
    pub version: u32,

    /// The vault's own account on the reference token
    pub address: Address,

    /// Holder of the administrator capability
    pub admin: Address,

    /// Reference asset received through deposits (18 decimals)
    pub total_deposited: u128,

    /// Annual rate in basis points
    pub interest_rate_bps: u32,

    /// Last checkpointed exchange rate (18 decimals)
    pub exchange_rate: u128,

    /// Unix seconds at which `exchange_rate` was checkpointed
    pub last_accrual_timestamp: u64,

    /// Derived units outstanding
    pub total_supply: u128,

    /// Derived units per depositor
    pub balances: BTreeMap<Address, u128>,

    pub events: Vec<VaultEvent>,
}

impl VaultState {
    /// State at genesis: rate 1.0, nothing deposited
    pub fn genesis(address: Address, admin: Address, interest_rate_bps: u32, timestamp: u64) -> Self {
        Self {
            version: VAULT_STATE_VERSION,
            address,
            admin,
            total_deposited: 0,
            interest_rate_bps,
            exchange_rate: SCALE,
            last_accrual_timestamp: timestamp,
            total_supply: 0,
            balances: BTreeMap::new(),
            events: vec![VaultEvent::Initialized {
                admin,
                interest_rate_bps,
                timestamp,
            }],
        }
    }

    pub fn balance_of(&self, owner: &Address) -> u128 {
        self.balances.get(owner).copied().unwrap_or(0)
    }
}
