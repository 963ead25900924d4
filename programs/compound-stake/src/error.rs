use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Staking period has ended")]
    StakingClosed,

    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Withdrawal amount exceeds principal plus accrued rewards")]
    InsufficientClaimable,

    #[msg("Recovery would dip into staked principal")]
    ReserveProtected,

    #[msg("Input account owner is not the program admin")]
    InvalidOwner,

    #[msg("Math operation overflowed or underflowed")]
    MathOverflow,

    #[msg("Invalid timestamp conversion")]
    InvalidTimestamp,

    #[msg("Invalid stake mint account")]
    InvalidMint,

    #[msg("Invalid vault account")]
    InvalidVault,
}
