use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// Events: Emitted for off-chain indexers/clients to track ledger state changes
// ──────────────────────────────────────────────────────────────────────────────
//

/// Emitted whenever principal is added to a position: a fresh deposit, or the
/// remainder restaked by a partial withdrawal.
///
/// `amount` is the newly added principal only. Interest folded into principal
/// by a deposit is visible through the updated balance, not a separate event.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct Staked {
    /// Position owner.
    pub staker: Pubkey,
    /// Principal newly added (base units).
    pub amount: u64,
}

/// Emitted on every withdrawal with the amount paid out.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct Withdrawn {
    /// Position owner.
    pub staker: Pubkey,
    /// Amount paid out (base units).
    pub amount: u64,
}

/// Emitted when the admin sets the staking expiry.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct StakingEnds {
    /// Unix timestamp after which deposits stop and accrual freezes.
    pub finish_time: u64,
}

/// Emitted on administrative token recovery.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct Recovered {
    /// Mint of the recovered token.
    pub mint: Pubkey,
    /// Amount transferred to the admin (base units).
    pub amount: u64,
}

/// Emitted when the program admin changes.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct OwnershipTransferred {
    pub previous_admin: Pubkey,
    pub new_admin: Pubkey,
}
