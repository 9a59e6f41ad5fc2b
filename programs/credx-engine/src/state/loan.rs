use anchor_lang::prelude::*;
use crate::errors::ProtocolError;
use crate::utils::math::{self, Reconciliation};

/// Borrower credit account as seen by the program authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreditAllowance {
    pub balance: u64,
    /// Amount delegated to the program authority, 0 if delegated elsewhere
    pub delegated: u64,
}

impl CreditAllowance {
    pub fn covers(&self, amount: u64) -> bool {
        self.balance >= amount && self.delegated >= amount
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepaymentPlan {
    /// Nothing to reconcile; the call is a no-op
    Skip,
    Apply(Reconciliation),
}

/// One loan per user. `collateral_amount` is the recorded snapshot of the
/// vault; the vault's live balance may be larger until the next repayment
/// reconciles it.
#[account]
#[derive(InitSpace)]
pub struct LoanAccount {
    /// Loan owner
    pub user: Pubkey,

    /// Protocol the loan borrows against
    pub protocol: Pubkey,

    /// Vault holding this loan's collateral
    pub collateral_vault: Pubkey,

    /// Collateral token mint
    pub collateral_mint: Pubkey,

    /// Recorded collateral (in native collateral units, 9 decimals)
    pub collateral_amount: u64,

    /// Outstanding debt (in credit token units, 6 decimals)
    pub remaining_debt: u64,

    /// Cumulative collateral yield captured by repayments
    pub yield_earned: u64,

    /// Unix timestamp of the last applied repayment, 0 if none
    pub last_repayment_at: i64,

    /// Bump seed for PDA
    pub bump: u8,
}

impl LoanAccount {
    pub const SEED_PREFIX: &'static [u8] = b"loan";

    pub fn is_initialized(&self) -> bool {
        self.user != Pubkey::default()
    }

    pub fn has_debt(&self) -> bool {
        self.remaining_debt > 0
    }

    pub fn record_deposit(&mut self, amount: u64) -> std::result::Result<(), ProtocolError> {
        if amount == 0 {
            return Err(ProtocolError::InvalidAmount);
        }
        self.collateral_amount = self
            .collateral_amount
            .checked_add(amount)
            .ok_or(ProtocolError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Headroom left under the LTV limit at `price`.
    pub fn borrowable(
        &self,
        price: u64,
        collateral_decimals: u8,
        ltv_ratio_bps: u16,
    ) -> std::result::Result<u64, ProtocolError> {
        let limit = math::max_borrow(self.collateral_amount, price, collateral_decimals, ltv_ratio_bps)?;
        math::borrowable(limit, self.remaining_debt)
    }

    /// Take the whole headroom as new debt. Returns the amount to mint.
    pub fn record_borrow(
        &mut self,
        price: u64,
        collateral_decimals: u8,
        ltv_ratio_bps: u16,
    ) -> std::result::Result<u64, ProtocolError> {
        let amount = self.borrowable(price, collateral_decimals, ltv_ratio_bps)?;
        let remaining_debt = self
            .remaining_debt
            .checked_add(amount)
            .ok_or(ProtocolError::ArithmeticOverflow)?;

        if !math::is_solvent(
            self.collateral_amount,
            remaining_debt,
            price,
            collateral_decimals,
            ltv_ratio_bps,
        )? {
            return Err(ProtocolError::ExceedsLTV);
        }

        self.remaining_debt = remaining_debt;
        Ok(amount)
    }

    /// Reconcile against the live vault balance without mutating the loan.
    pub fn reconcile(
        &self,
        vault_balance: u64,
        price: u64,
        collateral_decimals: u8,
    ) -> std::result::Result<Reconciliation, ProtocolError> {
        math::reconcile_yield(
            vault_balance,
            self.collateral_amount,
            price,
            collateral_decimals,
            self.remaining_debt,
        )
    }

    pub fn has_pending_yield(&self, vault_balance: u64) -> bool {
        math::unrecorded_yield(vault_balance, self.collateral_amount) > 0
    }

    /// Decide what a repayment call does. `allowance` is only needed when debt
    /// is actually repaid.
    pub fn plan_repayment(
        &self,
        vault_balance: u64,
        price: u64,
        collateral_decimals: u8,
        allowance: Option<CreditAllowance>,
    ) -> std::result::Result<RepaymentPlan, ProtocolError> {
        let reconciliation = match self.reconcile(vault_balance, price, collateral_decimals) {
            Ok(reconciliation) => reconciliation,
            Err(ProtocolError::NoYield) => return Ok(RepaymentPlan::Skip),
            Err(err) => return Err(err),
        };

        if reconciliation.repaid > 0 {
            match allowance {
                Some(allowance) if allowance.covers(reconciliation.repaid) => {}
                _ => return Err(ProtocolError::InsufficientCreditTokens),
            }
        }

        Ok(RepaymentPlan::Apply(reconciliation))
    }

    pub fn apply_reconciliation(
        &mut self,
        reconciliation: &Reconciliation,
        now: i64,
    ) -> std::result::Result<(), ProtocolError> {
        let yield_earned = self
            .yield_earned
            .checked_add(reconciliation.applied_yield)
            .ok_or(ProtocolError::ArithmeticOverflow)?;

        self.collateral_amount = reconciliation.new_collateral;
        self.remaining_debt = reconciliation.new_debt;
        self.yield_earned = yield_earned;
        self.last_repayment_at = now;
        Ok(())
    }

    /// Amount to send back on withdrawal: the whole vault balance.
    pub fn ensure_withdrawable(&self, vault_balance: u64) -> std::result::Result<u64, ProtocolError> {
        if self.has_debt() {
            return Err(ProtocolError::OutstandingDebt);
        }
        if vault_balance == 0 {
            return Err(ProtocolError::NoCollateral);
        }
        Ok(vault_balance)
    }

    /// Zero the recorded collateral once the vault has been drained to the user.
    pub fn record_withdrawal(&mut self) -> std::result::Result<(), ProtocolError> {
        if self.has_debt() {
            return Err(ProtocolError::OutstandingDebt);
        }
        self.collateral_amount = 0;
        Ok(())
    }
}
