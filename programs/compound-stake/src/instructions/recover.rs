use crate::error::ErrorCode;
use crate::states::*;
use crate::AUTH_SEED;
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Administrative recovery of tokens held by the program.
///
/// The staking token is only recoverable up to the vault surplus above
/// `total_principal`, so live staker principal can never be drained. Interest
/// accrued but not yet claimed is *not* reserved; honoring future payouts is
/// the admin's responsibility. Any other token the authority PDA happens to
/// hold is unconstrained.
///
/// Staking-mint recovery is only accepted from the canonical stake vault,
/// where the surplus check is meaningful. Stake-mint tokens sent to any other
/// authority-owned token account stay out of reach of this instruction.
#[derive(Accounts)]
pub struct Recover<'info> {
    /// Admin (must match `staking_config.admin`).
    #[account(
        mut,
        constraint = owner.key() == staking_config.admin @ ErrorCode::InvalidOwner
    )]
    pub owner: Signer<'info>,

    #[account(
        seeds = [STAKING_CONFIG_SEED.as_bytes()],
        bump = staking_config.bump,
    )]
    pub staking_config: Account<'info, StakingConfig>,

    /// Program authority PDA (vault token authority).
    ///
    /// CHECK: PDA derivation enforced by seeds; used only as CPI signer.
    #[account(
        seeds = [AUTH_SEED.as_bytes()],
        bump = staking_config.auth_bump,
    )]
    pub authority: UncheckedAccount<'info>,

    /// Source of the recovery: any token account owned by the program
    /// authority, including the stake vault itself.
    #[account(
        mut,
        token::authority = authority,
        token::token_program = token_program,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        constraint = mint.key() == vault.mint @ ErrorCode::InvalidMint,
        mint::token_program = token_program,
    )]
    pub mint: Box<InterfaceAccount<'info, Mint>>,

    /// Admin's receiving ATA. Created on demand.
    #[account(
        init_if_needed,
        payer = owner,
        associated_token::mint = mint,
        associated_token::authority = owner,
        associated_token::token_program = token_program,
    )]
    pub owner_token: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program (interface)
    pub token_program: Interface<'info, TokenInterface>,

    /// Associated Token Program (for the ATA creation above).
    pub associated_token_program: Program<'info, AssociatedToken>,

    /// System program (payer/rent).
    pub system_program: Program<'info, System>,
}

pub fn recover(ctx: Context<Recover>, amount: u64) -> Result<()> {
    require!(amount > 0, ErrorCode::ZeroAmount);

    let staking_config = &ctx.accounts.staking_config;
    if ctx.accounts.mint.key() == staking_config.stake_mint {
        // The staking token lives in exactly one vault; recovery of it is
        // capped at the surplus above live principal.
        require!(
            ctx.accounts.vault.key() == staking_config.stake_vault,
            ErrorCode::InvalidVault
        );
        let surplus = staking_config.recoverable_surplus(ctx.accounts.vault.amount)?;
        require!(amount <= surplus, ErrorCode::ReserveProtected);
    }

    crate::utils::transfer_from_vault_to_user(
        ctx.accounts.authority.to_account_info(),
        ctx.accounts.vault.to_account_info(),
        ctx.accounts.owner_token.to_account_info(),
        ctx.accounts.mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount,
        ctx.accounts.mint.decimals,
        &[&[AUTH_SEED.as_bytes(), &[ctx.accounts.staking_config.auth_bump]]],
    )?;

    emit!(Recovered {
        mint: ctx.accounts.mint.key(),
        amount,
    });

    Ok(())
}
