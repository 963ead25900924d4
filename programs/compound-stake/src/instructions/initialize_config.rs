use crate::error::ErrorCode;
use crate::states::*;
use crate::{AUTH_SEED, STAKE_VAULT_SEED};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use std::ops::DerefMut;

/// Initializes the staking config PDA and the program-owned vault that holds
/// all staked tokens. Callable once, by the program deployer.
#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    /// Deployer signer (must match the program-level admin id).
    #[account(
        mut,
        constraint = owner.key() == crate::admin::id() @ ErrorCode::InvalidOwner
    )]
    pub owner: Signer<'info>,

    /// Program authority PDA, the vault's token authority.
    ///
    /// CHECK: PDA derivation is enforced by seeds; used only as a Pubkey.
    #[account(
        seeds = [AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    /// Global staking config account.
    #[account(
        init,
        seeds = [STAKING_CONFIG_SEED.as_bytes()],
        bump,
        payer = owner,
        space = StakingConfig::LEN
    )]
    pub staking_config: Account<'info, StakingConfig>,

    /// The mint of the token being staked.
    #[account(mint::token_program = token_program)]
    pub stake_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Program-owned vault for the staking token.
    #[account(
        init,
        seeds = [STAKE_VAULT_SEED.as_bytes()],
        bump,
        payer = owner,
        token::mint = stake_mint,
        token::authority = authority,
        token::token_program = token_program,
    )]
    pub stake_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program (interface)
    pub token_program: Interface<'info, TokenInterface>,

    /// System program
    pub system_program: Program<'info, System>,
}

pub fn initialize_config(ctx: Context<InitializeConfig>, admin: Pubkey) -> Result<()> {
    let staking_config = ctx.accounts.staking_config.deref_mut();
    staking_config.bump = ctx.bumps.staking_config;
    staking_config.auth_bump = ctx.bumps.authority;
    staking_config.admin = admin;
    staking_config.stake_mint = ctx.accounts.stake_mint.key();
    staking_config.stake_vault = ctx.accounts.stake_vault.key();
    staking_config.total_principal = 0;
    staking_config.finish_time = 0;
    msg!("Staking config initialized");
    Ok(())
}
