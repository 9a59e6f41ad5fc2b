use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::state::{CollateralVault, LoanAccount};
use crate::errors::ProtocolError;
use crate::events::CollateralWithdrawn;
use crate::utils::transfer_collateral;

#[derive(Accounts)]
pub struct WithdrawCollateral<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        seeds = [CollateralVault::SEED_PREFIX, user.key().as_ref()],
        bump = collateral_vault.bump,
    )]
    pub collateral_vault: Account<'info, CollateralVault>,

    /// Debt must be fully repaid before collateral can be reclaimed.
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
        init_if_needed,
        payer = user,
        associated_token::mint = collateral_mint,
        associated_token::authority = user,
        associated_token::token_program = token_program,
    )]
    pub user_collateral_account: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> WithdrawCollateral<'info> {
    pub fn withdraw_collateral(&mut self) -> Result<()> {
        let vault_balance = self
            .loan_account
            .ensure_withdrawable(self.vault_token_account.amount)?;
        self.loan_account.record_withdrawal()?;

        let user_key = self.user.key();
        let vault_bump = [self.collateral_vault.bump];
        let vault_seeds: &[&[&[u8]]] = &[&[
            CollateralVault::SEED_PREFIX,
            user_key.as_ref(),
            &vault_bump,
        ]];

        transfer_collateral(
            self.token_program.to_account_info(),
            self.vault_token_account.to_account_info(),
            self.collateral_mint.to_account_info(),
            self.user_collateral_account.to_account_info(),
            self.collateral_vault.to_account_info(),
            vault_seeds,
            vault_balance,
            self.collateral_mint.decimals,
        )?;

        msg!("Withdrew {} collateral to {}", vault_balance, user_key);

        emit!(CollateralWithdrawn {
            user: user_key,
            amount: vault_balance,
        });

        Ok(())
    }
}
