use crate::error::ErrorCode;
use crate::states::*;
use crate::utils::{current_timestamp, transfer_from_vault_to_user};
use crate::AUTH_SEED;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKING_CONFIG_SEED.as_bytes()],
        bump = staking_config.bump,
    )]
    pub staking_config: Account<'info, StakingConfig>,

    #[account(
        mut,
        seeds = [
            STAKE_POSITION_SEED.as_bytes(),
            owner.key().as_ref()
        ],
        bump = stake_position.bump,
    )]
    pub stake_position: Account<'info, StakePosition>,

    /// Program authority PDA, signs the vault payout.
    ///
    /// CHECK: PDA derivation enforced by seeds.
    #[account(
        seeds = [AUTH_SEED.as_bytes()],
        bump = staking_config.auth_bump,
    )]
    pub authority: UncheckedAccount<'info>,

    #[account(
        address = staking_config.stake_mint @ ErrorCode::InvalidMint,
        mint::token_program = token_program,
    )]
    pub stake_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        address = staking_config.stake_vault @ ErrorCode::InvalidVault,
    )]
    pub stake_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = stake_mint,
        token::authority = owner,
        token::token_program = token_program,
    )]
    pub owner_stake_token: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program (interface)
    pub token_program: Interface<'info, TokenInterface>,
}

/// Pays out `amount` of the claimable balance (principal + accrued interest).
///
/// A partial withdrawal realizes the compounded value and restakes the
/// remainder at the current instant, restarting the accrual clock for what
/// stays behind; the restaked remainder is announced through `Staked`. A full
/// withdrawal clears the position.
pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
    let now = current_timestamp()?;

    let stake_position = &mut ctx.accounts.stake_position;
    let staking_config = &mut ctx.accounts.staking_config;
    let remainder = staking_config.withdraw(stake_position, amount, now)?;

    pay_out(&ctx, amount)?;

    if remainder > 0 {
        emit!(Staked {
            staker: ctx.accounts.owner.key(),
            amount: remainder,
        });
    }
    emit!(Withdrawn {
        staker: ctx.accounts.owner.key(),
        amount,
    });

    Ok(())
}

/// Withdraws the entire claimable balance. Never restakes, so no `Staked`
/// event fires and the position always ends cleared.
pub fn withdraw_all(ctx: Context<Withdraw>) -> Result<()> {
    let now = current_timestamp()?;

    let stake_position = &mut ctx.accounts.stake_position;
    let staking_config = &mut ctx.accounts.staking_config;
    let claimable = staking_config.claimable(stake_position, now)?;
    staking_config.withdraw(stake_position, claimable, now)?;

    pay_out(&ctx, claimable)?;

    emit!(Withdrawn {
        staker: ctx.accounts.owner.key(),
        amount: claimable,
    });

    Ok(())
}

fn pay_out(ctx: &Context<Withdraw>, amount: u64) -> Result<()> {
    transfer_from_vault_to_user(
        ctx.accounts.authority.to_account_info(),
        ctx.accounts.stake_vault.to_account_info(),
        ctx.accounts.owner_stake_token.to_account_info(),
        ctx.accounts.stake_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount,
        ctx.accounts.stake_mint.decimals,
        &[&[AUTH_SEED.as_bytes(), &[ctx.accounts.staking_config.auth_bump]]],
    )
}
