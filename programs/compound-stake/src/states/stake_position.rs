use anchor_lang::prelude::*;

pub const STAKE_POSITION_SEED: &str = "stake_position";

/// Per-account staking record. One position per owner, compounded in place.
#[account]
#[derive(Default, Debug)]
pub struct StakePosition {
    pub bump: u8,
    pub owner: Pubkey,
    /// Staked amount in the token's smallest unit, excluding unrealized
    /// interest.
    pub principal: u64,
    /// Unix timestamp the current accrual period started. Meaningless while
    /// `principal == 0`.
    pub start_time: u64,
}

impl StakePosition {
    pub const LEN: usize = 8 + 1 + 32 + 8 * 2;
}
