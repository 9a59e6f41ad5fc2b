use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::constants::PROGRAM_AUTHORITY_SEED;
use crate::state::{CollateralVault, LoanAccount, ProtocolState};
use crate::errors::ProtocolError;
use crate::events::CreditIssued;
use crate::utils::{approve_credit_delegate, mint_credit, read_price};

#[derive(Accounts)]
pub struct LendCreditToken<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        seeds = [ProtocolState::SEED_PREFIX, protocol.admin.as_ref()],
        bump = protocol.bump,
    )]
    pub protocol: Account<'info, ProtocolState>,

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
        constraint = loan_account.protocol == protocol.key() @ ProtocolError::ProtocolMismatch,
    )]
    pub loan_account: Account<'info, LoanAccount>,

    #[account(
        mut,
        address = protocol.credit_mint @ ProtocolError::InvalidCreditMint,
        mint::token_program = token_program,
    )]
    pub credit_mint: InterfaceAccount<'info, Mint>,

    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = credit_mint,
        associated_token::authority = user,
        associated_token::token_program = token_program,
    )]
    pub user_credit_account: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: PDA used only as mint authority and burn delegate
    #[account(seeds = [PROGRAM_AUTHORITY_SEED], bump)]
    pub program_authority: UncheckedAccount<'info>,

    /// CHECK: owner, discriminator and mint verified by read_price
    #[account(
        constraint = price_reading.key() == protocol.price_reading @ ProtocolError::InvalidOracleAccount,
    )]
    pub price_reading: UncheckedAccount<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> LendCreditToken<'info> {
    pub fn lend_credit_token(&mut self, bumps: &LendCreditTokenBumps) -> Result<()> {
        self.protocol.ensure_can_borrow()?;

        let now = Clock::get()?.unix_timestamp;
        let (price, _) = read_price(
            &self.price_reading.to_account_info(),
            &self.collateral_vault.mint,
            now,
            self.protocol.max_price_age,
        )?;

        let amount = self.loan_account.record_borrow(
            price,
            self.collateral_vault.decimals,
            self.protocol.ltv_ratio_bps,
        )?;

        mint_credit(
            self.token_program.to_account_info(),
            self.credit_mint.to_account_info(),
            self.user_credit_account.to_account_info(),
            self.program_authority.to_account_info(),
            bumps.program_authority,
            amount,
        )?;

        // Allowance tracks the outstanding debt; repayments burn against it.
        approve_credit_delegate(
            self.token_program.to_account_info(),
            self.user_credit_account.to_account_info(),
            self.program_authority.to_account_info(),
            self.user.to_account_info(),
            self.loan_account.remaining_debt,
        )?;

        msg!(
            "Lent {} credit tokens to {}, remaining debt: {}",
            amount,
            self.user.key(),
            self.loan_account.remaining_debt
        );

        emit!(CreditIssued {
            user: self.user.key(),
            amount,
            price,
            remaining_debt: self.loan_account.remaining_debt,
        });

        Ok(())
    }
}
