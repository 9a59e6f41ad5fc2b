use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::state::{CollateralVault, LoanAccount};
use crate::errors::ProtocolError;
use crate::events::CollateralDeposited;
use crate::utils::{balance_delta, transfer_collateral};

#[derive(Accounts)]
pub struct DepositCollateral<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        seeds = [CollateralVault::SEED_PREFIX, user.key().as_ref()],
        bump = collateral_vault.bump,
    )]
    pub collateral_vault: Account<'info, CollateralVault>,

    #[account(
        mut,
        seeds = [LoanAccount::SEED_PREFIX, user.key().as_ref(), collateral_vault.key().as_ref()],
        bump = loan_account.bump,
        constraint = loan_account.user == user.key() @ ProtocolError::InvalidOwner,
    )]
    pub loan_account: Account<'info, LoanAccount>,

    #[account(
        address = collateral_vault.mint @ ProtocolError::InvalidCollateralMint,
        mint::token_program = token_program,
    )]
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = collateral_vault,
        associated_token::token_program = token_program,
    )]
    pub vault_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        token::mint = collateral_mint,
        token::authority = user,
        token::token_program = token_program,
    )]
    pub user_collateral_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> DepositCollateral<'info> {
    pub fn deposit_collateral(&mut self, amount: u64) -> Result<()> {
        require!(amount > 0, ProtocolError::InvalidAmount);
        let balance_before = self.vault_token_account.amount;

        transfer_collateral(
            self.token_program.to_account_info(),
            self.user_collateral_account.to_account_info(),
            self.collateral_mint.to_account_info(),
            self.vault_token_account.to_account_info(),
            self.user.to_account_info(),
            &[],
            amount,
            self.collateral_mint.decimals,
        )?;

        // Transfer-fee mints deliver less than was sent
        self.vault_token_account.reload()?;
        let received = balance_delta(balance_before, self.vault_token_account.amount)?;
        self.loan_account.record_deposit(received)?;

        emit!(CollateralDeposited {
            user: self.user.key(),
            amount: received,
            collateral_amount: self.loan_account.collateral_amount,
        });

        Ok(())
    }
}
