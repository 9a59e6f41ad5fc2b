use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::constants::PROGRAM_AUTHORITY_SEED;
use crate::state::{CollateralVault, CreditAllowance, LoanAccount, ProtocolState, RepaymentPlan};
use crate::errors::ProtocolError;
use crate::events::{RepaymentSkipped, YieldRepaid};
use crate::utils::{burn_credit, read_price};

/// Permissionless: any signer may trigger it. Nothing the caller passes
/// influences the repayment amount.
#[derive(Accounts)]
pub struct CronRepayment<'info> {
    pub caller: Signer<'info>,

    #[account(
        seeds = [ProtocolState::SEED_PREFIX, protocol.admin.as_ref()],
        bump = protocol.bump,
    )]
    pub protocol: Account<'info, ProtocolState>,

    #[account(
        seeds = [CollateralVault::SEED_PREFIX, loan_account.user.as_ref()],
        bump = collateral_vault.bump,
    )]
    pub collateral_vault: Account<'info, CollateralVault>,

    #[account(
        mut,
        seeds = [LoanAccount::SEED_PREFIX, loan_account.user.as_ref(), collateral_vault.key().as_ref()],
        bump = loan_account.bump,
        constraint = loan_account.protocol == protocol.key() @ ProtocolError::ProtocolMismatch,
    )]
    pub loan_account: Account<'info, LoanAccount>,

    #[account(
        associated_token::mint = collateral_vault.mint,
        associated_token::authority = collateral_vault,
        associated_token::token_program = token_program,
    )]
    pub vault_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(
        mut,
        address = protocol.credit_mint @ ProtocolError::InvalidCreditMint,
        mint::token_program = token_program,
    )]
    pub credit_mint: InterfaceAccount<'info, Mint>,

    /// Only needed when debt is repaid; loans without debt may omit it.
    #[account(
        mut,
        associated_token::mint = credit_mint,
        associated_token::authority = loan_account.user,
        associated_token::token_program = token_program,
    )]
    pub borrower_credit_account: Option<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: PDA used only as burn delegate
    #[account(seeds = [PROGRAM_AUTHORITY_SEED], bump)]
    pub program_authority: UncheckedAccount<'info>,

    /// CHECK: owner, discriminator and mint verified by read_price
    #[account(
        constraint = price_reading.key() == protocol.price_reading @ ProtocolError::InvalidOracleAccount,
    )]
    pub price_reading: UncheckedAccount<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> CronRepayment<'info> {
    fn credit_allowance(&self) -> Option<CreditAllowance> {
        self.borrower_credit_account.as_ref().map(|account| CreditAllowance {
            balance: account.amount,
            delegated: if account.delegate == COption::Some(self.program_authority.key()) {
                account.delegated_amount
            } else {
                0
            },
        })
    }

    fn skip(&self, vault_balance: u64) {
        msg!("No yield available for repayment");
        emit!(RepaymentSkipped {
            user: self.loan_account.user,
            caller: self.caller.key(),
            vault_balance,
            collateral_amount: self.loan_account.collateral_amount,
        });
    }

    pub fn cron_repayment(&mut self, bumps: &CronRepaymentBumps) -> Result<()> {
        let vault_balance = self.vault_token_account.amount;

        // No yield is not a failure: succeed without touching state.
        if !self.loan_account.has_pending_yield(vault_balance) {
            self.skip(vault_balance);
            return Ok(());
        }

        let now = Clock::get()?.unix_timestamp;
        let (price, _) = read_price(
            &self.price_reading.to_account_info(),
            &self.collateral_vault.mint,
            now,
            self.protocol.max_price_age,
        )?;

        let plan = self.loan_account.plan_repayment(
            vault_balance,
            price,
            self.collateral_vault.decimals,
            self.credit_allowance(),
        )?;
        let reconciliation = match plan {
            RepaymentPlan::Apply(reconciliation) => reconciliation,
            RepaymentPlan::Skip => {
                self.skip(vault_balance);
                return Ok(());
            }
        };

        if reconciliation.repaid > 0 {
            let borrower_credit_account = self
                .borrower_credit_account
                .as_ref()
                .ok_or(ProtocolError::InsufficientCreditTokens)?;

            burn_credit(
                self.token_program.to_account_info(),
                self.credit_mint.to_account_info(),
                borrower_credit_account.to_account_info(),
                self.program_authority.to_account_info(),
                bumps.program_authority,
                reconciliation.repaid,
            )?;
        }

        self.loan_account.apply_reconciliation(&reconciliation, now)?;

        msg!(
            "Repaid {} credit tokens for user: {}, remaining debt: {}",
            reconciliation.repaid,
            self.loan_account.user,
            self.loan_account.remaining_debt
        );

        emit!(YieldRepaid {
            user: self.loan_account.user,
            caller: self.caller.key(),
            applied_yield: reconciliation.applied_yield,
            repaid: reconciliation.repaid,
            price,
            remaining_debt: self.loan_account.remaining_debt,
            yield_earned: self.loan_account.yield_earned,
            timestamp: now,
        });

        Ok(())
    }
}
