//! Vault operations

use log::{debug, info, warn};

use super::events::VaultEvent;
use super::state::{VaultState, VAULT_STATE_VERSION};
use crate::clock::Clock;
use crate::config::VaultConfig;
use crate::error::VaultError;
use crate::math::{accrue, mul_div_floor, SCALE};
use crate::token::{Address, ReferenceToken};

/// Interest-bearing vault over a reference token `T`, timed by clock `C`
///
/// Mutations take `&mut self` and either complete or return an error with
/// no state change. Queries take `&self` and never mutate.
#[derive(Debug)]
pub struct Vault<T: ReferenceToken, C: Clock> {
    state: VaultState,
    config: VaultConfig,
    token: T,
    clock: C,
}

impl<T: ReferenceToken, C: Clock> Vault<T, C> {
    /// Create a vault at genesis with exchange rate 1.0
    pub fn initialize(
        address: Address,
        admin: Address,
        token: T,
        clock: C,
        config: VaultConfig,
    ) -> Result<Self, VaultError> {
        config.validate()?;

        let now = clock.now();
        let state = VaultState::genesis(address, admin, config.initial_interest_rate_bps, now);

        info!(
            "Vault {} initialized: admin={}, rate={} bps, max={} bps",
            address, admin, config.initial_interest_rate_bps, config.max_interest_rate_bps
        );

        Ok(Self { state, config, token, clock })
    }

    /// Rebuild a vault from a previously taken [`snapshot`](Self::snapshot)
    pub fn restore(state: VaultState, token: T, clock: C, config: VaultConfig) -> Result<Self, VaultError> {
        if state.version != VAULT_STATE_VERSION {
            return Err(VaultError::UnsupportedVersion {
                found: state.version,
                expected: VAULT_STATE_VERSION,
            });
        }
        config.validate()?;
        if state.interest_rate_bps > config.max_interest_rate_bps {
            return Err(VaultError::InterestRateOutOfBounds {
                rate_bps: state.interest_rate_bps,
                max_bps: config.max_interest_rate_bps,
            });
        }

        debug!("Vault {} restored at checkpoint {}", state.address, state.last_accrual_timestamp);
        Ok(Self { state, config, token, clock })
    }

    // ---- Mutations ----

    /// Change the annual rate. Administrator only.
    ///
    /// Accrual up to now is checkpointed at the old rate first; the new rate
    /// applies from this moment on.
    pub fn set_interest_rate(&mut self, caller: &Address, rate_bps: u32) -> Result<(), VaultError> {
        self.ensure_admin(caller)?;

        if rate_bps > self.config.max_interest_rate_bps {
            return Err(VaultError::InterestRateOutOfBounds {
                rate_bps,
                max_bps: self.config.max_interest_rate_bps,
            });
        }

        let now = self.clock.now();
        let checkpoint = self.current_exchange_rate_at(now)?;
        let previous_bps = self.state.interest_rate_bps;

        self.state.exchange_rate = checkpoint;
        self.state.last_accrual_timestamp = now;
        self.state.interest_rate_bps = rate_bps;
        self.state.events.push(VaultEvent::InterestRateChanged {
            previous_bps,
            new_bps: rate_bps,
            exchange_rate: checkpoint,
            timestamp: now,
        });

        info!(
            "Interest rate changed {} -> {} bps, checkpoint rate {}",
            previous_bps, rate_bps, checkpoint
        );
        Ok(())
    }

    /// Pull `amount` reference asset from `caller` and credit derived units.
    ///
    /// Returns the number of derived units credited, rounded down.
    pub fn deposit(&mut self, caller: &Address, amount: u128) -> Result<u128, VaultError> {
        if amount == 0 {
            return Err(VaultError::ZeroDeposit);
        }

        let vault_address = self.state.address;
        let approved = self.token.allowance(caller, &vault_address);
        if approved < amount {
            return Err(VaultError::InsufficientAllowance { required: amount, approved });
        }
        let available = self.token.balance_of(caller);
        if available < amount {
            return Err(VaultError::InsufficientBalance { required: amount, available });
        }

        let now = self.clock.now();
        let rate = self.current_exchange_rate_at(now)?;
        let credited = mul_div_floor(amount, SCALE, rate)?;

        let new_balance = self
            .state
            .balance_of(caller)
            .checked_add(credited)
            .ok_or(VaultError::ArithmeticOverflow)?;
        let new_supply = self
            .state
            .total_supply
            .checked_add(credited)
            .ok_or(VaultError::ArithmeticOverflow)?;
        let new_deposited = self
            .state
            .total_deposited
            .checked_add(amount)
            .ok_or(VaultError::ArithmeticOverflow)?;

        self.token.transfer_from(&vault_address, caller, &vault_address, amount)?;

        self.state.balances.insert(*caller, new_balance);
        self.state.total_supply = new_supply;
        self.state.total_deposited = new_deposited;
        self.state.events.push(VaultEvent::Deposited {
            depositor: *caller,
            amount,
            credited,
            exchange_rate: rate,
            timestamp: now,
        });

        if credited == 0 {
            warn!("Deposit of {} from {} credited zero derived units at rate {}", amount, caller, rate);
        }
        debug!("Deposit {} from {} at rate {} -> {} derived", amount, caller, rate, credited);

        Ok(credited)
    }

    /// Hand the administrator capability to `new_admin`
    pub fn transfer_admin(&mut self, caller: &Address, new_admin: Address) -> Result<(), VaultError> {
        self.ensure_admin(caller)?;

        let previous = self.state.admin;
        self.state.admin = new_admin;
        self.state.events.push(VaultEvent::AdminTransferred {
            previous,
            new: new_admin,
            timestamp: self.clock.now(),
        });

        info!("Vault admin transferred {} -> {}", previous, new_admin);
        Ok(())
    }

    // ---- Queries ----

    /// Last checkpointed exchange rate, not adjusted for elapsed time
    pub fn exchange_rate(&self) -> u128 {
        self.state.exchange_rate
    }

    /// Exchange rate as of the clock's current time
    pub fn current_exchange_rate(&self) -> Result<u128, VaultError> {
        self.current_exchange_rate_at(self.clock.now())
    }

    /// Reference asset worth of `derived_amount` at the live exchange rate
    pub fn get_move(&self, derived_amount: u128) -> Result<u128, VaultError> {
        let rate = self.current_exchange_rate()?;
        mul_div_floor(derived_amount, rate, SCALE)
    }

    /// Derived units a deposit of `amount` would credit right now
    pub fn preview_deposit(&self, amount: u128) -> Result<u128, VaultError> {
        let rate = self.current_exchange_rate()?;
        mul_div_floor(amount, SCALE, rate)
    }

    pub fn interest_rate(&self) -> u32 {
        self.state.interest_rate_bps
    }

    pub fn total_deposited(&self) -> u128 {
        self.state.total_deposited
    }

    pub fn total_supply(&self) -> u128 {
        self.state.total_supply
    }

    pub fn balance_of(&self, owner: &Address) -> u128 {
        self.state.balance_of(owner)
    }

    pub fn admin(&self) -> Address {
        self.state.admin
    }

    pub fn address(&self) -> Address {
        self.state.address
    }

    pub fn last_accrual_timestamp(&self) -> u64 {
        self.state.last_accrual_timestamp
    }

    pub fn events(&self) -> &[VaultEvent] {
        &self.state.events
    }

    /// Copy of the persisted state
    pub fn snapshot(&self) -> VaultState {
        self.state.clone()
    }

    pub fn token(&self) -> &T {
        &self.token
    }

    /// Mutable access to the token ledger, e.g. for approvals
    pub fn token_mut(&mut self) -> &mut T {
        &mut self.token
    }

    // ---- Internals ----

    fn ensure_admin(&self, caller: &Address) -> Result<(), VaultError> {
        if *caller != self.state.admin {
            return Err(VaultError::Unauthorized { caller: *caller });
        }
        Ok(())
    }

    fn current_exchange_rate_at(&self, now: u64) -> Result<u128, VaultError> {
        // A clock that reads earlier than the checkpoint accrues nothing
        let elapsed = now.saturating_sub(self.state.last_accrual_timestamp);
        accrue(self.state.exchange_rate, self.state.interest_rate_bps, elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::ErrorKind;
    use crate::math::SECONDS_PER_YEAR;
    use crate::token::MockToken;

    const START: u64 = 1_700_000_000;

    fn owner() -> Address {
        Address::from_low_u64(1)
    }

    fn vault_address() -> Address {
        Address::from_low_u64(0xfeed)
    }

    fn setup() -> (Vault<MockToken, ManualClock>, ManualClock) {
        let clock = ManualClock::new(START);
        let mut token = MockToken::new("Mock MOVE", "MOVE", owner(), 1_000_000_000 * SCALE);
        token.approve(owner(), vault_address(), 1_000_000_000 * SCALE);
        let vault = Vault::initialize(vault_address(), owner(), token, clock.clone(), VaultConfig::default())
            .unwrap();
        (vault, clock)
    }

    #[test]
    fn test_genesis_exchange_rate() {
        let (vault, _) = setup();
        assert_eq!(vault.exchange_rate(), SCALE);
        assert_eq!(vault.current_exchange_rate().unwrap(), SCALE);
        assert_eq!(vault.interest_rate(), 0);
        assert_eq!(vault.last_accrual_timestamp(), START);
    }

    #[test]
    fn test_set_interest_rate() {
        let (mut vault, _) = setup();
        vault.set_interest_rate(&owner(), 500).unwrap();
        assert_eq!(vault.interest_rate(), 500);

        vault.set_interest_rate(&owner(), 10_000).unwrap();
        assert_eq!(vault.interest_rate(), 10_000);

        vault.set_interest_rate(&owner(), 0).unwrap();
        assert_eq!(vault.interest_rate(), 0);
    }

    #[test]
    fn test_set_interest_rate_requires_admin() {
        let (mut vault, _) = setup();
        let stranger = Address::from_low_u64(99);

        let err = vault.set_interest_rate(&stranger, 500).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert_eq!(vault.interest_rate(), 0);
    }

    #[test]
    fn test_set_interest_rate_bounds() {
        let clock = ManualClock::new(START);
        let token = MockToken::new("Mock MOVE", "MOVE", owner(), SCALE);
        let config = VaultConfig {
            max_interest_rate_bps: 2_000,
            initial_interest_rate_bps: 100,
        };
        let mut vault = Vault::initialize(vault_address(), owner(), token, clock, config).unwrap();

        let err = vault.set_interest_rate(&owner(), 2_001).unwrap_err();
        assert_eq!(err, VaultError::InterestRateOutOfBounds { rate_bps: 2_001, max_bps: 2_000 });
        assert_eq!(vault.interest_rate(), 100);
    }

    #[test]
    fn test_rate_change_checkpoints_old_rate() {
        let (mut vault, clock) = setup();
        vault.set_interest_rate(&owner(), 1_000).unwrap();

        clock.advance(SECONDS_PER_YEAR);
        vault.set_interest_rate(&owner(), 0).unwrap();
        assert_eq!(vault.exchange_rate(), 1_100_000_000_000_000_000);
        assert_eq!(vault.last_accrual_timestamp(), START + SECONDS_PER_YEAR);

        // Zero rate freezes the live rate at the checkpoint
        clock.advance(5 * SECONDS_PER_YEAR);
        assert_eq!(vault.current_exchange_rate().unwrap(), 1_100_000_000_000_000_000);
    }

    #[test]
    fn test_deposit_credits_derived_units() {
        let (mut vault, _) = setup();
        let credited = vault.deposit(&owner(), 100 * SCALE).unwrap();

        assert_eq!(credited, 100 * SCALE);
        assert_eq!(vault.balance_of(&owner()), 100 * SCALE);
        assert_eq!(vault.total_supply(), 100 * SCALE);
        assert_eq!(vault.total_deposited(), 100 * SCALE);
        assert_eq!(vault.token().balance_of(&vault_address()), 100 * SCALE);
    }

    #[test]
    fn test_deposit_after_accrual_rounds_down() {
        let (mut vault, clock) = setup();
        vault.set_interest_rate(&owner(), 700).unwrap();
        clock.advance(3 * SECONDS_PER_YEAR);

        let credited = vault.deposit(&owner(), 100 * SCALE).unwrap();
        // 100 / 1.225043
        assert_eq!(credited, 81_629_787_689_085_199_458);
        assert!(vault.get_move(credited).unwrap() <= 100 * SCALE);
        // Deposits do not move the checkpoint
        assert_eq!(vault.exchange_rate(), SCALE);
    }

    #[test]
    fn test_deposit_at_very_high_exchange_rate() {
        let (mut vault, clock) = setup();
        vault.set_interest_rate(&owner(), 9_999).unwrap();
        clock.advance(9 * SECONDS_PER_YEAR + 17);
        assert_eq!(vault.current_exchange_rate().unwrap(), 511_769_921_924_889_968_252);

        let amount = 1_000 * SCALE + 3 * SCALE / 10;
        assert_eq!(vault.preview_deposit(amount).unwrap(), 1_954_589_273_706_494_346);

        let credited = vault.deposit(&owner(), amount).unwrap();
        assert_eq!(credited, 1_954_589_273_706_494_346);
        assert_eq!(vault.get_move(credited).unwrap(), 1_000_299_999_999_999_999_943);
        assert_eq!(vault.total_deposited(), amount);
    }

    #[test]
    fn test_deposit_rejects_zero() {
        let (mut vault, _) = setup();
        assert_eq!(vault.deposit(&owner(), 0), Err(VaultError::ZeroDeposit));
    }

    #[test]
    fn test_failed_deposit_leaves_state_untouched() {
        let (mut vault, _) = setup();
        let depositor = Address::from_low_u64(5);
        vault.token_mut().approve(depositor, vault_address(), 10 * SCALE);
        let before = vault.snapshot();

        let err = vault.deposit(&depositor, 50 * SCALE).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientAllowance);

        let err = vault.deposit(&depositor, 5 * SCALE).unwrap_err();
        assert_eq!(err, VaultError::InsufficientBalance { required: 5 * SCALE, available: 0 });

        assert_eq!(vault.snapshot(), before);
        assert_eq!(vault.token().allowance(&depositor, &vault_address()), 10 * SCALE);
    }

    #[test]
    fn test_get_move_matches_live_rate() {
        let (mut vault, clock) = setup();
        vault.set_interest_rate(&owner(), 425).unwrap();
        clock.advance(SECONDS_PER_YEAR + 12_345);

        let rate = vault.current_exchange_rate().unwrap();
        let amount = 37 * SCALE + 123;
        assert_eq!(vault.get_move(amount).unwrap(), amount * rate / SCALE);
    }

    #[test]
    fn test_clock_behind_checkpoint_accrues_nothing() {
        let (mut vault, clock) = setup();
        vault.set_interest_rate(&owner(), 700).unwrap();
        clock.set(START - 1_000);
        assert_eq!(vault.current_exchange_rate().unwrap(), SCALE);
    }

    #[test]
    fn test_transfer_admin() {
        let (mut vault, _) = setup();
        let successor = Address::from_low_u64(2);

        vault.transfer_admin(&owner(), successor).unwrap();
        assert_eq!(vault.admin(), successor);
        assert!(vault.set_interest_rate(&owner(), 100).is_err());
        vault.set_interest_rate(&successor, 100).unwrap();

        assert!(matches!(
            vault.events().last(),
            Some(VaultEvent::InterestRateChanged { new_bps: 100, .. })
        ));
    }

    #[test]
    fn test_snapshot_restore() {
        let (mut vault, clock) = setup();
        vault.set_interest_rate(&owner(), 700).unwrap();
        vault.deposit(&owner(), 100 * SCALE).unwrap();
        clock.advance(SECONDS_PER_YEAR);

        let live = vault.current_exchange_rate().unwrap();
        let state = vault.snapshot();
        let token = vault.token().clone();

        let restored = Vault::restore(state, token, clock, VaultConfig::default()).unwrap();
        assert_eq!(restored.current_exchange_rate().unwrap(), live);
        assert_eq!(restored.balance_of(&owner()), 100 * SCALE);
    }

    #[test]
    fn test_restore_rejects_unknown_version() {
        let (vault, clock) = setup();
        let mut state = vault.snapshot();
        state.version = 7;

        let err = Vault::restore(state, vault.token().clone(), clock, VaultConfig::default()).unwrap_err();
        assert_eq!(err, VaultError::UnsupportedVersion { found: 7, expected: VAULT_STATE_VERSION });
    }
}
