use anchor_lang::prelude::*;

use crate::curve::CompoundCurve;
use crate::error::ErrorCode;
use crate::states::StakePosition;

pub const STAKING_CONFIG_SEED: &str = "staking_config";

/// Global staking ledger state.
///
/// All position mutation is funneled through `deposit` / `withdraw` below so
/// the `total_principal == sum of live principals` invariant holds after every
/// operation. Handlers never write principal or totals directly.
#[account]
#[derive(Default, Debug)]
pub struct StakingConfig {
    pub bump: u8,
    pub auth_bump: u8,
    pub admin: Pubkey,
    pub stake_mint: Pubkey,
    pub stake_vault: Pubkey,
    /// Sum of all live positions' principal.
    pub total_principal: u64,
    /// Unix timestamp after which deposits are rejected and accrual freezes.
    /// Zero while unset.
    pub finish_time: u64,
}

impl StakingConfig {
    pub const LEN: usize = 8 + 1 + 1 + 32 * 3 + 8 * 2;

    /// Deposits are accepted while the finish time is unset or in the future.
    pub fn is_open(&self, now: u64) -> bool {
        self.finish_time == 0 || now < self.finish_time
    }

    /// The instant up to which interest accrues: `now`, capped at
    /// `finish_time` once one is set. The cap applies to every position,
    /// regardless of when it started.
    pub fn accrual_cap(&self, now: u64) -> u64 {
        if self.finish_time == 0 {
            now
        } else {
            now.min(self.finish_time)
        }
    }

    /// Interest accrued on `position` as of `now`, never realized in state.
    pub fn accrued(&self, position: &StakePosition, now: u64) -> Result<u64> {
        if position.principal == 0 {
            return Ok(0);
        }
        let elapsed = self.accrual_cap(now).saturating_sub(position.start_time);
        let accrued = CompoundCurve::accrued(u128::from(position.principal), elapsed)?;
        u64::try_from(accrued).map_err(|_| error!(ErrorCode::MathOverflow))
    }

    /// Principal plus accrued interest as of `now`.
    pub fn claimable(&self, position: &StakePosition, now: u64) -> Result<u64> {
        position
            .principal
            .checked_add(self.accrued(position, now)?)
            .ok_or_else(|| error!(ErrorCode::MathOverflow))
    }

    /// Folds pending interest into `position`, adds `amount`, and restarts the
    /// accrual clock. Returns the interest that was folded in.
    pub fn deposit(
        &mut self,
        position: &mut StakePosition,
        amount: u64,
        now: u64,
    ) -> Result<u64> {
        require!(self.is_open(now), ErrorCode::StakingClosed);
        require!(amount > 0, ErrorCode::ZeroAmount);

        let pending = self.accrued(position, now)?;
        position.principal = position
            .principal
            .checked_add(pending)
            .and_then(|p| p.checked_add(amount))
            .ok_or(ErrorCode::MathOverflow)?;
        position.start_time = now;
        self.total_principal = self
            .total_principal
            .checked_add(pending)
            .and_then(|t| t.checked_add(amount))
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(pending)
    }

    /// Realizes `amount` out of the claimable balance. A non-zero remainder is
    /// restaked at `now` (fresh accrual period); a zero remainder clears the
    /// position. Returns the restaked remainder.
    pub fn withdraw(
        &mut self,
        position: &mut StakePosition,
        amount: u64,
        now: u64,
    ) -> Result<u64> {
        require!(amount > 0, ErrorCode::ZeroAmount);

        let claimable = self.claimable(position, now)?;
        require!(amount <= claimable, ErrorCode::InsufficientClaimable);

        let remainder = claimable - amount;
        let old_principal = position.principal;
        position.principal = remainder;
        if remainder > 0 {
            position.start_time = now;
        }
        self.total_principal = self
            .total_principal
            .checked_sub(old_principal)
            .and_then(|t| t.checked_add(remainder))
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(remainder)
    }

    /// Staking-token balance recoverable by the admin: whatever the vault
    /// holds beyond live principal. Accrued-but-unclaimed interest is not
    /// reserved.
    pub fn recoverable_surplus(&self, held_balance: u64) -> Result<u64> {
        held_balance
            .checked_sub(self.total_principal)
            .ok_or_else(|| error!(ErrorCode::ReserveProtected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SECONDS_PER_YEAR;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const T0: u64 = 1_700_000_000;

    fn fresh() -> (StakingConfig, StakePosition) {
        (StakingConfig::default(), StakePosition::default())
    }

    #[test]
    fn first_deposit_has_no_pending_interest() {
        let (mut config, mut position) = fresh();
        let pending = config.deposit(&mut position, 1_000_000, T0).unwrap();
        assert_eq!(pending, 0);
        assert_eq!(position.principal, 1_000_000);
        assert_eq!(position.start_time, T0);
        assert_eq!(config.total_principal, 1_000_000);
    }

    #[test]
    fn zero_deposit_is_rejected() {
        let (mut config, mut position) = fresh();
        assert_eq!(
            config.deposit(&mut position, 0, T0).unwrap_err(),
            ErrorCode::ZeroAmount.into()
        );
    }

    #[test]
    fn second_deposit_compounds_pending_interest() {
        let (mut config, mut position) = fresh();
        config.deposit(&mut position, 1_000_000_000_000, T0).unwrap();

        let later = T0 + SECONDS_PER_YEAR;
        let pending = config.accrued(&position, later).unwrap();
        assert!(pending > 0);

        let folded = config.deposit(&mut position, 500, later).unwrap();
        assert_eq!(folded, pending);
        assert_eq!(position.principal, 1_000_000_000_000 + pending + 500);
        assert_eq!(position.start_time, later);
        assert_eq!(config.total_principal, position.principal);
        // The fold realized everything accrued so far.
        assert_eq!(config.accrued(&position, later).unwrap(), 0);
    }

    #[test]
    fn deposits_rejected_after_finish() {
        let (mut config, mut position) = fresh();
        config.finish_time = T0;
        assert_eq!(
            config.deposit(&mut position, 100, T0).unwrap_err(),
            ErrorCode::StakingClosed.into()
        );
        // Still open one second before the boundary.
        assert!(config.deposit(&mut position, 100, T0 - 1).is_ok());
    }

    #[test]
    fn accrual_freezes_at_finish_time() {
        let (mut config, mut position) = fresh();
        config.deposit(&mut position, 1_000_000_000_000, T0).unwrap();
        config.finish_time = T0 + SECONDS_PER_YEAR;

        let at_finish = config.accrued(&position, T0 + SECONDS_PER_YEAR).unwrap();
        let long_after = config
            .accrued(&position, T0 + 20 * SECONDS_PER_YEAR)
            .unwrap();
        assert!(at_finish > 0);
        assert_eq!(at_finish, long_after);
    }

    #[test]
    fn accrual_is_monotone_before_finish() {
        let (mut config, mut position) = fresh();
        config.deposit(&mut position, 777_777_777, T0).unwrap();
        let mut prev = 0;
        for dt in (0..SECONDS_PER_YEAR).step_by(500_000) {
            let accrued = config.accrued(&position, T0 + dt).unwrap();
            assert!(accrued >= prev);
            prev = accrued;
        }
    }

    #[test]
    fn partial_withdraw_restakes_remainder() {
        let (mut config, mut position) = fresh();
        config.deposit(&mut position, 1_000_000_000_000, T0).unwrap();

        let later = T0 + SECONDS_PER_YEAR / 2;
        let claimable = config.claimable(&position, later).unwrap();
        let remainder = config
            .withdraw(&mut position, claimable - 1_000, later)
            .unwrap();

        assert_eq!(remainder, 1_000);
        assert_eq!(position.principal, 1_000);
        assert_eq!(position.start_time, later);
        assert_eq!(config.total_principal, 1_000);
        // Accrual starts over from the restake instant.
        assert_eq!(config.accrued(&position, later).unwrap(), 0);
    }

    #[test]
    fn full_withdraw_clears_position() {
        let (mut config, mut position) = fresh();
        config.deposit(&mut position, 5_000_000, T0).unwrap();

        let later = T0 + SECONDS_PER_YEAR;
        let claimable = config.claimable(&position, later).unwrap();
        let remainder = config.withdraw(&mut position, claimable, later).unwrap();

        assert_eq!(remainder, 0);
        assert_eq!(position.principal, 0);
        assert_eq!(config.total_principal, 0);
        assert_eq!(config.claimable(&position, later + 12345).unwrap(), 0);

        // A later stake behaves as a fresh first deposit.
        let restart = later + 100;
        let pending = config.deposit(&mut position, 42, restart).unwrap();
        assert_eq!(pending, 0);
        assert_eq!(position.principal, 42);
        assert_eq!(position.start_time, restart);
    }

    #[test]
    fn remainder_is_zero_only_on_full_withdrawal() {
        // The withdraw handler announces a restake (`Staked`) exactly when the
        // returned remainder is non-zero, so pin that boundary here.
        let (mut config, mut position) = fresh();
        config.deposit(&mut position, 9_000_000, T0).unwrap();

        let later = T0 + SECONDS_PER_YEAR / 3;
        let claimable = config.claimable(&position, later).unwrap();
        let remainder = config
            .withdraw(&mut position, claimable - 1, later)
            .unwrap();
        assert_eq!(remainder, 1);

        let claimable = config.claimable(&position, later).unwrap();
        let remainder = config.withdraw(&mut position, claimable, later).unwrap();
        assert_eq!(remainder, 0);
    }

    #[test]
    fn overdraw_is_rejected() {
        let (mut config, mut position) = fresh();
        config.deposit(&mut position, 1_000, T0).unwrap();
        let claimable = config.claimable(&position, T0).unwrap();
        assert_eq!(
            config
                .withdraw(&mut position, claimable + 1, T0)
                .unwrap_err(),
            ErrorCode::InsufficientClaimable.into()
        );
        // State untouched by the failed attempt.
        assert_eq!(position.principal, 1_000);
        assert_eq!(config.total_principal, 1_000);
    }

    #[test]
    fn total_principal_tracks_sum_across_accounts() {
        let mut config = StakingConfig::default();
        let mut alice = StakePosition::default();
        let mut bob = StakePosition::default();

        config.deposit(&mut alice, 300_000, T0).unwrap();
        config.deposit(&mut bob, 700_000, T0 + 100).unwrap();
        assert_eq!(config.total_principal, alice.principal + bob.principal);

        let later = T0 + SECONDS_PER_YEAR / 4;
        let claimable = config.claimable(&alice, later).unwrap();
        config.withdraw(&mut alice, claimable / 2, later).unwrap();
        assert_eq!(config.total_principal, alice.principal + bob.principal);

        let claimable = config.claimable(&bob, later).unwrap();
        config.withdraw(&mut bob, claimable, later).unwrap();
        assert_eq!(config.total_principal, alice.principal + bob.principal);
    }

    #[test]
    fn random_operation_sequences_preserve_the_ledger_invariant() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut config = StakingConfig::default();
        let mut positions = vec![StakePosition::default(); 4];
        let mut now = T0;

        for _ in 0..500 {
            now += rng.random_range(1..=86_400);
            let i = rng.random_range(0..positions.len());
            if rng.random_bool(0.6) {
                let amount = rng.random_range(1..=1_000_000_000u64);
                config.deposit(&mut positions[i], amount, now).unwrap();
            } else {
                let claimable = config.claimable(&positions[i], now).unwrap();
                if claimable > 0 {
                    let amount = rng.random_range(1..=claimable);
                    config.withdraw(&mut positions[i], amount, now).unwrap();
                }
            }
            let sum: u64 = positions.iter().map(|p| p.principal).sum();
            assert_eq!(config.total_principal, sum);
        }
    }

    #[test]
    fn surplus_protects_live_principal() {
        let mut config = StakingConfig::default();
        let mut position = StakePosition::default();
        config.deposit(&mut position, 1_000_000, T0).unwrap();

        assert_eq!(config.recoverable_surplus(1_500_000).unwrap(), 500_000);
        assert_eq!(config.recoverable_surplus(1_000_000).unwrap(), 0);
        assert_eq!(
            config.recoverable_surplus(999_999).unwrap_err(),
            ErrorCode::ReserveProtected.into()
        );
    }
}
