use anchor_lang::prelude::*;

declare_id!("4TL2JRSBNHHaVBkJeQiswM135YnHVYy6VK3mrjXzMYHC");

pub mod admin {
    use anchor_lang::prelude::declare_id;
    declare_id!("Ar44spG6qWz6S6xgDt8bex6m316ALuGuU8kywxEgGd6S");
}

#[cfg(not(feature = "no-entrypoint"))]
solana_security_txt::security_txt! {
    name: "Compound Stake",
    project_url: "https://github.com/compound-stake",
    contacts: "email:security@compound-stake.io",
    policy: "https://github.com/compound-stake/security/blob/master/SECURITY.md"
}

pub const AUTH_SEED: &str = "staking_auth";
pub const STAKE_VAULT_SEED: &str = "stake_vault";

/// Seconds in a 365-day year, the accrual denominator.
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Per-second interest rate at 1e18 scale: 20% APR / SECONDS_PER_YEAR,
/// rounded to the nearest integer. Fixed for the life of the program.
pub const RATE_PER_SECOND_WAD: u128 = 6_341_958_397;

pub mod curve;
pub mod error;
pub mod instructions;
pub mod states;
pub mod utils;

use instructions::*;

#[program]
pub mod compound_stake {

    use super::*;

    pub fn initialize_config(ctx: Context<InitializeConfig>, admin: Pubkey) -> Result<()> {
        instructions::initialize_config(ctx, admin)
    }

    pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
        instructions::stake(ctx, amount)
    }

    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        instructions::withdraw(ctx, amount)
    }

    pub fn withdraw_all(ctx: Context<Withdraw>) -> Result<()> {
        instructions::withdraw_all(ctx)
    }

    pub fn set_finish(ctx: Context<SetFinish>, finish_time: u64) -> Result<()> {
        instructions::set_finish(ctx, finish_time)
    }

    pub fn recover(ctx: Context<Recover>, amount: u64) -> Result<()> {
        instructions::recover(ctx, amount)
    }

    pub fn update_admin(ctx: Context<UpdateAdmin>, new_admin: Pubkey) -> Result<()> {
        instructions::update_admin(ctx, new_admin)
    }
}
