use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, Approve, Burn, MintTo, TransferChecked};
use crate::constants::PROGRAM_AUTHORITY_SEED;

/// Move collateral between token accounts. `signer_seeds` is empty when the
/// owner of `from` signs the transaction itself.
#[allow(clippy::too_many_arguments)]
pub fn transfer_collateral<'info>(
    token_program: AccountInfo<'info>,
    from: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    to: AccountInfo<'info>,
    authority: AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
    amount: u64,
    decimals: u8,
) -> Result<()> {
    let transfer_accounts = TransferChecked {
        from,
        mint,
        to,
        authority,
    };

    let cpi_ctx = CpiContext::new_with_signer(token_program, transfer_accounts, signer_seeds);
    token_interface::transfer_checked(cpi_ctx, amount, decimals)
}

/// Issue credit tokens, signed by the program authority PDA.
pub fn mint_credit<'info>(
    token_program: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    to: AccountInfo<'info>,
    program_authority: AccountInfo<'info>,
    authority_bump: u8,
    amount: u64,
) -> Result<()> {
    let bump = [authority_bump];
    let signer_seeds: &[&[&[u8]]] = &[&[PROGRAM_AUTHORITY_SEED, &bump]];

    let cpi_ctx = CpiContext::new_with_signer(
        token_program,
        MintTo {
            mint,
            to,
            authority: program_authority,
        },
        signer_seeds,
    );
    token_interface::mint_to(cpi_ctx, amount)
}

/// Retire credit tokens from a borrower account on which the program
/// authority PDA holds a delegate allowance.
pub fn burn_credit<'info>(
    token_program: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    from: AccountInfo<'info>,
    program_authority: AccountInfo<'info>,
    authority_bump: u8,
    amount: u64,
) -> Result<()> {
    let bump = [authority_bump];
    let signer_seeds: &[&[&[u8]]] = &[&[PROGRAM_AUTHORITY_SEED, &bump]];

    let cpi_ctx = CpiContext::new_with_signer(
        token_program,
        Burn {
            mint,
            from,
            authority: program_authority,
        },
        signer_seeds,
    );
    token_interface::burn(cpi_ctx, amount)
}

/// Let the program authority burn up to `amount` from the owner's account.
/// Replaces any previous allowance.
pub fn approve_credit_delegate<'info>(
    token_program: AccountInfo<'info>,
    account: AccountInfo<'info>,
    program_authority: AccountInfo<'info>,
    owner: AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    let cpi_ctx = CpiContext::new(
        token_program,
        Approve {
            to: account,
            delegate: program_authority,
            authority: owner,
        },
    );
    token_interface::approve(cpi_ctx, amount)
}
