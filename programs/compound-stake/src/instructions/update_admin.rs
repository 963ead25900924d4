use crate::error::ErrorCode;
use crate::states::*;
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct UpdateAdmin<'info> {
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

/// Hands the administrative role to `new_admin`.
pub fn update_admin(ctx: Context<UpdateAdmin>, new_admin: Pubkey) -> Result<()> {
    let staking_config = &mut ctx.accounts.staking_config;
    let previous_admin = staking_config.admin;
    staking_config.admin = new_admin;

    msg!("Admin updated: {} -> {}", previous_admin, new_admin);
    emit!(OwnershipTransferred {
        previous_admin,
        new_admin,
    });

    Ok(())
}
