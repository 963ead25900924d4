use crate::error::ErrorCode;
use crate::states::*;
use crate::utils::{current_timestamp, transfer_from_user_to_vault};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

#[derive(Accounts)]
pub struct Stake<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKING_CONFIG_SEED.as_bytes()],
        bump = staking_config.bump,
    )]
    pub staking_config: Account<'info, StakingConfig>,

    #[account(
        init_if_needed,
        seeds = [
            STAKE_POSITION_SEED.as_bytes(),
            owner.key().as_ref()
        ],
        bump,
        payer = owner,
        space = StakePosition::LEN
    )]
    pub stake_position: Account<'info, StakePosition>,

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

    pub system_program: Program<'info, System>,
}

/// Deposits `amount` of the staking token. Any interest accrued so far is
/// folded into principal first, so the position keeps compounding from a
/// single record.
///
/// Ledger state is fully written before the token pull; the emitted `Staked`
/// amount is the fresh deposit only.
pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
    let now = current_timestamp()?;

    let stake_position = &mut ctx.accounts.stake_position;
    if stake_position.owner == Pubkey::default() {
        stake_position.owner = ctx.accounts.owner.key();
        stake_position.bump = ctx.bumps.stake_position;
    }

    let staking_config = &mut ctx.accounts.staking_config;
    staking_config.deposit(stake_position, amount, now)?;

    transfer_from_user_to_vault(
        ctx.accounts.owner.to_account_info(),
        ctx.accounts.owner_stake_token.to_account_info(),
        ctx.accounts.stake_vault.to_account_info(),
        ctx.accounts.stake_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount,
        ctx.accounts.stake_mint.decimals,
    )?;

    emit!(Staked {
        staker: ctx.accounts.owner.key(),
        amount,
    });

    Ok(())
}
