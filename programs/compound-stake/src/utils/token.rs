use anchor_lang::prelude::*;
use anchor_spl::token_interface::{transfer_checked, TransferChecked};

/// Pulls `amount` of the staking token from a user account into a
/// program-owned vault. The user signs the outer transaction.
pub fn transfer_from_user_to_vault<'info>(
    authority: AccountInfo<'info>,
    from: AccountInfo<'info>,
    to_vault: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    token_program: AccountInfo<'info>,
    amount: u64,
    mint_decimals: u8,
) -> Result<()> {
    transfer_checked(
        CpiContext::new(
            token_program,
            TransferChecked {
                from,
                mint,
                to: to_vault,
                authority,
            },
        ),
        amount,
        mint_decimals,
    )
}

/// Pays `amount` out of a program-owned vault, signed by the program
/// authority PDA via `signer_seeds`.
pub fn transfer_from_vault_to_user<'info>(
    authority: AccountInfo<'info>,
    from_vault: AccountInfo<'info>,
    to: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    token_program: AccountInfo<'info>,
    amount: u64,
    mint_decimals: u8,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    transfer_checked(
        CpiContext::new_with_signer(
            token_program,
            TransferChecked {
                from: from_vault,
                mint,
                to,
                authority,
            },
            signer_seeds,
        ),
        amount,
        mint_decimals,
    )
}
