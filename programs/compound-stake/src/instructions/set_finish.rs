use crate::error::ErrorCode;
use crate::states::*;
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct SetFinish<'info> {
    #[account(
        constraint = owner.key() == staking_config.admin @ ErrorCode::InvalidOwner
    )]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKING_CONFIG_SEED.as_bytes()],
        bump = staking_config.bump,
    )]
    pub staking_config: Account<'info, StakingConfig>,
}

/// Sets the staking expiry. Deposits stop and accrual freezes once the cluster
/// clock passes `finish_time`. Overwriting a previously set value is allowed.
pub fn set_finish(ctx: Context<SetFinish>, finish_time: u64) -> Result<()> {
    require!(finish_time > 0, ErrorCode::InvalidTimestamp);

    let staking_config = &mut ctx.accounts.staking_config;
    staking_config.finish_time = finish_time;

    emit!(StakingEnds { finish_time });

    Ok(())
}
