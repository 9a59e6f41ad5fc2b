use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::state::{CollateralVault, LoanAccount, ProtocolState};
use crate::errors::ProtocolError;
use crate::events::LoanInitialized;

#[derive(Accounts)]
pub struct InitializeLoan<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        seeds = [ProtocolState::SEED_PREFIX, protocol.admin.as_ref()],
        bump = protocol.bump,
    )]
    pub protocol: Account<'info, ProtocolState>,

    #[account(
        mint::token_program = token_program,
        constraint = collateral_mint.key() != protocol.credit_mint @ ProtocolError::InvalidCollateralMint,
    )]
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    #[account(
        init_if_needed,
        payer = user,
        space = CollateralVault::DISCRIMINATOR.len() + CollateralVault::INIT_SPACE,
        seeds = [CollateralVault::SEED_PREFIX, user.key().as_ref()],
        bump
    )]
    pub collateral_vault: Account<'info, CollateralVault>,

    /// Token account holding the collateral, owned by the vault PDA
    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = collateral_mint,
        associated_token::authority = collateral_vault,
        associated_token::token_program = token_program,
    )]
    pub vault_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(
        init_if_needed,
        payer = user,
        space = LoanAccount::DISCRIMINATOR.len() + LoanAccount::INIT_SPACE,
        seeds = [LoanAccount::SEED_PREFIX, user.key().as_ref(), collateral_vault.key().as_ref()],
        bump
    )]
    pub loan_account: Account<'info, LoanAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> InitializeLoan<'info> {
    pub fn initialize_loan(&mut self, bumps: &InitializeLoanBumps) -> Result<()> {
        require!(
            !self.loan_account.is_initialized(),
            ProtocolError::AlreadyExists
        );

        self.collateral_vault.set_inner(CollateralVault {
            user: self.user.key(),
            mint: self.collateral_mint.key(),
            decimals: self.collateral_mint.decimals,
            bump: bumps.collateral_vault,
        });

        self.loan_account.set_inner(LoanAccount {
            user: self.user.key(),
            protocol: self.protocol.key(),
            collateral_vault: self.collateral_vault.key(),
            collateral_mint: self.collateral_mint.key(),
            collateral_amount: 0,
            remaining_debt: 0,
            yield_earned: 0,
            last_repayment_at: 0,
            bump: bumps.loan_account,
        });

        emit!(LoanInitialized {
            user: self.user.key(),
            loan: self.loan_account.key(),
            collateral_vault: self.collateral_vault.key(),
            collateral_mint: self.collateral_mint.key(),
        });

        Ok(())
    }
}
