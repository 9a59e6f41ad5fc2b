use anchor_lang::prelude::*;

#[event]
pub struct ProtocolInitialized {
    pub protocol: Pubkey,
    pub admin: Pubkey,
    pub credit_mint: Pubkey,
    pub price_reading: Pubkey,
    pub ltv_ratio_bps: u16,
    pub max_price_age: u64,
}

#[event]
pub struct ProtocolConfigUpdated {
    pub protocol: Pubkey,
    pub is_locked: bool,
    pub max_price_age: u64,
    pub price_reading: Pubkey,
}

#[event]
pub struct PriceReadingUpdated {
    pub price_reading: Pubkey,
    pub mint: Pubkey,
    pub price: u64,
    pub timestamp: i64,
}

#[event]
pub struct LoanInitialized {
    pub user: Pubkey,
    pub loan: Pubkey,
    pub collateral_vault: Pubkey,
    pub collateral_mint: Pubkey,
}

#[event]
pub struct CollateralDeposited {
    pub user: Pubkey,
    pub amount: u64,
    pub collateral_amount: u64,
}

#[event]
pub struct CreditIssued {
    pub user: Pubkey,
    pub amount: u64,
    pub price: u64,
    pub remaining_debt: u64,
}

#[event]
pub struct YieldRepaid {
    pub user: Pubkey,
    pub caller: Pubkey,
    pub applied_yield: u64,
    pub repaid: u64,
    pub price: u64,
    pub remaining_debt: u64,
    pub yield_earned: u64,
    pub timestamp: i64,
}

/// Repayment trigger found nothing to reconcile. Informational, not a failure.
#[event]
pub struct RepaymentSkipped {
    pub user: Pubkey,
    pub caller: Pubkey,
    pub vault_balance: u64,
    pub collateral_amount: u64,
}

#[event]
pub struct CollateralWithdrawn {
    pub user: Pubkey,
    pub amount: u64,
}
