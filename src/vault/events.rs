//! Vault event log entries

use serde::{Deserialize, Serialize};

use crate::token::Address;

/// Record of a state change, appended in execution order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VaultEvent {
    Initialized {
        admin: Address,
        interest_rate_bps: u32,
        timestamp: u64,
    },
    InterestRateChanged {
        previous_bps: u32,
        new_bps: u32,
        /// Exchange rate checkpointed at the moment of the change
        exchange_rate: u128,
        timestamp: u64,
    },
    Deposited {
        depositor: Address,
        amount: u128,
        credited: u128,
        exchange_rate: u128,
        timestamp: u64,
    },
    AdminTransferred {
        previous: Address,
        new: Address,
        timestamp: u64,
    },
}

impl VaultEvent {
    pub fn timestamp(&self) -> u64 {
        match self {
            VaultEvent::Initialized { timestamp, .. }
            | VaultEvent::InterestRateChanged { timestamp, .. }
            | VaultEvent::Deposited { timestamp, .. }
            | VaultEvent::AdminTransferred { timestamp, .. } => *timestamp,
        }
    }
}
