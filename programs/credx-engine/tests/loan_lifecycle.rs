use anchor_lang::prelude::Pubkey;
use credx_engine::constants::{DEFAULT_LTV_RATIO_BPS, DEFAULT_MAX_PRICE_AGE};
use credx_engine::errors::ProtocolError;
use credx_engine::state::{CreditAllowance, LoanAccount, ProtocolState, RepaymentPlan};
use credx_engine::utils::{balance_delta, is_solvent, max_borrow, validate_price};

const COLLATERAL_DECIMALS: u8 = 9;
const NOW: i64 = 1_700_000_000;

/// Loan plus the live vault balance it is reconciled against.
struct Harness {
    protocol: ProtocolState,
    loan: LoanAccount,
    vault_balance: u64,
    user_collateral: u64,
    user_credit: u64,
    now: i64,
}

impl Harness {
    fn new(user_collateral: u64) -> Self {
        Self {
            protocol: ProtocolState {
                admin: Pubkey::new_unique(),
                credit_mint: Pubkey::new_unique(),
                price_reading: Pubkey::new_unique(),
                ltv_ratio_bps: DEFAULT_LTV_RATIO_BPS,
                max_price_age: DEFAULT_MAX_PRICE_AGE,
                is_locked: false,
                bump: 255,
            },
            loan: LoanAccount {
                user: Pubkey::new_unique(),
                protocol: Pubkey::new_unique(),
                collateral_vault: Pubkey::new_unique(),
                collateral_mint: Pubkey::new_unique(),
                collateral_amount: 0,
                remaining_debt: 0,
                yield_earned: 0,
                last_repayment_at: 0,
                bump: 255,
            },
            vault_balance: 0,
            user_collateral,
            user_credit: 0,
            now: NOW,
        }
    }

    fn deposit(&mut self, amount: u64) -> Result<(), ProtocolError> {
        self.deposit_with_fee(amount, 0)
    }

    /// `fee` is withheld by the token program before reaching the vault.
    fn deposit_with_fee(&mut self, amount: u64, fee: u64) -> Result<(), ProtocolError> {
        if amount == 0 {
            return Err(ProtocolError::InvalidAmount);
        }
        let before = self.vault_balance;
        self.user_collateral -= amount;
        self.vault_balance += amount - fee;
        self.loan
            .record_deposit(balance_delta(before, self.vault_balance)?)
    }

    fn borrow(&mut self, price: u64) -> Result<u64, ProtocolError> {
        self.protocol.ensure_can_borrow()?;
        let price = validate_price(price, self.now, self.now, self.protocol.max_price_age)?;
        let minted = self
            .loan
            .record_borrow(price, COLLATERAL_DECIMALS, self.protocol.ltv_ratio_bps)?;
        self.user_credit += minted;
        Ok(minted)
    }

    /// The borrower keeps the full balance delegated for the outstanding debt.
    fn allowance(&self) -> CreditAllowance {
        CreditAllowance {
            balance: self.user_credit,
            delegated: self.loan.remaining_debt,
        }
    }

    fn cron(&mut self, price: u64) -> Result<u64, ProtocolError> {
        let allowance = self.allowance();
        self.cron_with(price, Some(allowance))
    }

    fn cron_with(&mut self, price: u64, allowance: Option<CreditAllowance>) -> Result<u64, ProtocolError> {
        if !self.loan.has_pending_yield(self.vault_balance) {
            return Ok(0);
        }
        let price = validate_price(price, self.now, self.now, self.protocol.max_price_age)?;
        let plan = self
            .loan
            .plan_repayment(self.vault_balance, price, COLLATERAL_DECIMALS, allowance)?;
        match plan {
            RepaymentPlan::Skip => Ok(0),
            RepaymentPlan::Apply(rec) => {
                self.user_credit -= rec.repaid;
                self.loan.apply_reconciliation(&rec, self.now)?;
                Ok(rec.repaid)
            }
        }
    }

    fn withdraw(&mut self) -> Result<u64, ProtocolError> {
        let amount = self.loan.ensure_withdrawable(self.vault_balance)?;
        self.loan.record_withdrawal()?;
        self.vault_balance = 0;
        self.user_collateral += amount;
        Ok(amount)
    }

    fn accrue(&mut self, amount: u64) {
        self.vault_balance += amount;
    }

    fn assert_solvent(&self, price: u64) {
        assert!(is_solvent(
            self.loan.collateral_amount,
            self.loan.remaining_debt,
            price,
            COLLATERAL_DECIMALS,
            DEFAULT_LTV_RATIO_BPS,
        )
        .unwrap());
    }
}

#[test]
fn test_borrow_grants_full_headroom() {
    let mut h = Harness::new(10_000_000_000);
    h.deposit(2_000_000_000).unwrap();

    let expected = max_borrow(2_000_000_000, 150_000_000, COLLATERAL_DECIMALS, 6000).unwrap();
    assert_eq!(expected, 180_000_000);

    let minted = h.borrow(150_000_000).unwrap();
    assert_eq!(minted, expected);
    assert_eq!(h.loan.remaining_debt, minted);
    assert_eq!(h.user_credit, minted);
    h.assert_solvent(150_000_000);
}

#[test]
fn test_yield_reduces_debt_once() {
    let mut h = Harness::new(10_000_000_000);
    h.deposit(5_000_000_000).unwrap();
    h.borrow(150_000_000).unwrap();
    let debt_before = h.loan.remaining_debt;

    // ~30 days at 6% APY on 5 tokens
    h.accrue(30_000_000);
    let repaid = h.cron(150_000_000).unwrap();

    assert_eq!(repaid, 4_500_000);
    assert_eq!(h.loan.remaining_debt, debt_before - repaid);
    assert_eq!(h.loan.yield_earned, 30_000_000);
    assert_eq!(h.loan.collateral_amount, 5_030_000_000);
    assert_eq!(h.loan.last_repayment_at, NOW);
    h.assert_solvent(150_000_000);

    // Re-calling without new yield changes nothing
    let snapshot = (h.loan.remaining_debt, h.loan.yield_earned, h.loan.collateral_amount);
    assert_eq!(h.cron(150_000_000).unwrap(), 0);
    assert_eq!(h.cron(150_000_000).unwrap(), 0);
    assert_eq!(
        snapshot,
        (h.loan.remaining_debt, h.loan.yield_earned, h.loan.collateral_amount)
    );
}

#[test]
fn test_three_cycles_with_moving_price() {
    let mut h = Harness::new(10_000_000_000);
    h.deposit(5_000_000_000).unwrap();
    h.borrow(150_000_000).unwrap();

    let cycles = [
        (30_000_000, 155_000_000),
        (31_000_000, 148_000_000),
        (29_500_000, 160_000_000),
    ];

    let mut debts = vec![h.loan.remaining_debt];
    let mut yields = vec![h.loan.yield_earned];
    for (accrued, price) in cycles {
        h.now += 30 * 24 * 3600;
        h.accrue(accrued);
        let repaid = h.cron(price).unwrap();

        let expected = (accrued as u128 * price as u128 / 1_000_000 / 1_000) as u64;
        assert_eq!(repaid, expected);

        debts.push(h.loan.remaining_debt);
        yields.push(h.loan.yield_earned);
        h.assert_solvent(price);
    }

    assert!(debts.windows(2).all(|w| w[1] < w[0]));
    assert!(yields.windows(2).all(|w| w[1] > w[0]));
    assert_eq!(h.loan.yield_earned, 90_500_000);
}

#[test]
fn test_large_yield_clears_debt_and_stops() {
    let mut h = Harness::new(10_000_000_000);
    h.deposit(2_000_000_000).unwrap();
    h.borrow(150_000_000).unwrap();

    // 2 tokens of yield at $150 = 300 credit, more than the 180 owed
    h.accrue(2_000_000_000);
    let repaid = h.cron(150_000_000).unwrap();
    assert_eq!(repaid, 180_000_000);
    assert_eq!(h.loan.remaining_debt, 0);
    assert_eq!(h.user_credit, 0);

    // Further yield is absorbed without repaying anything
    h.accrue(10_000_000);
    assert_eq!(h.cron(150_000_000).unwrap(), 0);
    assert_eq!(h.loan.remaining_debt, 0);
    assert_eq!(h.loan.yield_earned, 2_010_000_000);
}

#[test]
fn test_withdraw_requires_zero_debt() {
    let mut h = Harness::new(10_000_000_000);
    h.deposit(2_000_000_000).unwrap();
    h.borrow(150_000_000).unwrap();

    assert!(matches!(h.withdraw(), Err(ProtocolError::OutstandingDebt)));
    assert_eq!(h.loan.collateral_amount, 2_000_000_000);
    assert_eq!(h.vault_balance, 2_000_000_000);
}

#[test]
fn test_withdraw_resets_loan_for_reuse() {
    let mut h = Harness::new(10_000_000_000);
    h.deposit(2_000_000_000).unwrap();
    h.borrow(150_000_000).unwrap();
    h.accrue(2_000_000_000);
    h.cron(150_000_000).unwrap();

    let before = h.user_collateral;
    let returned = h.withdraw().unwrap();
    assert_eq!(returned, 4_000_000_000);
    assert!(h.user_collateral > before);
    assert_eq!(h.loan.collateral_amount, 0);
    assert_eq!(h.vault_balance, 0);

    // Empty vault cannot be withdrawn again
    assert!(matches!(h.withdraw(), Err(ProtocolError::NoCollateral)));

    // Same loan starts a new cycle
    h.deposit(1_000_000_000).unwrap();
    assert_eq!(h.borrow(150_000_000).unwrap(), 90_000_000);
}

#[test]
fn test_stale_price_blocks_borrow() {
    let mut h = Harness::new(10_000_000_000);
    h.deposit(2_000_000_000).unwrap();

    let err = validate_price(150_000_000, NOW - 301, NOW, DEFAULT_MAX_PRICE_AGE).unwrap_err();
    assert!(matches!(err, ProtocolError::StalePrice));
    assert_eq!(h.loan.remaining_debt, 0);
}

#[test]
fn test_price_drop_leaves_no_headroom() {
    let mut h = Harness::new(10_000_000_000);
    h.deposit(2_000_000_000).unwrap();
    h.borrow(150_000_000).unwrap();

    assert!(matches!(h.borrow(120_000_000), Err(ProtocolError::ExceedsLTV)));
    assert_eq!(h.loan.remaining_debt, 180_000_000);
}

#[test]
fn test_locked_protocol_still_repays_and_withdraws() {
    let mut h = Harness::new(10_000_000_000);
    h.deposit(2_000_000_000).unwrap();
    h.borrow(150_000_000).unwrap();
    h.protocol.is_locked = true;

    h.accrue(1_000_000_000);
    assert!(matches!(h.borrow(300_000_000), Err(ProtocolError::ProtocolLocked)));

    // 1 token at $150 covers the 150 of 180 owed
    assert_eq!(h.cron(150_000_000).unwrap(), 150_000_000);
    h.accrue(1_000_000_000);
    assert_eq!(h.cron(150_000_000).unwrap(), 30_000_000);
    assert_eq!(h.loan.remaining_debt, 0);

    assert_eq!(h.withdraw().unwrap(), 4_000_000_000);
}

#[test]
fn test_repayment_fails_when_credit_moved_away() {
    let mut h = Harness::new(10_000_000_000);
    h.deposit(5_000_000_000).unwrap();
    h.borrow(150_000_000).unwrap();
    h.accrue(30_000_000);

    let moved = CreditAllowance {
        balance: 0,
        delegated: h.loan.remaining_debt,
    };
    assert!(matches!(
        h.cron_with(150_000_000, Some(moved)),
        Err(ProtocolError::InsufficientCreditTokens)
    ));
    assert!(matches!(
        h.cron_with(150_000_000, None),
        Err(ProtocolError::InsufficientCreditTokens)
    ));

    // Nothing was committed; the yield is still there for the next call
    assert_eq!(h.loan.collateral_amount, 5_000_000_000);
    assert_eq!(h.cron(150_000_000).unwrap(), 4_500_000);
}

#[test]
fn test_dust_yield_accumulates_until_it_repays() {
    let mut h = Harness::new(10_000_000_000);
    h.deposit(5_000_000_000).unwrap();
    h.borrow(150_000_000).unwrap();
    let debt = h.loan.remaining_debt;

    for _ in 0..2 {
        h.accrue(3);
        assert_eq!(h.cron(150_000_000).unwrap(), 0);
    }
    assert_eq!(h.loan.collateral_amount, 5_000_000_000);
    assert_eq!(h.loan.yield_earned, 0);

    h.accrue(3);
    // 9 units at $150 are worth 1.35 credit base units
    assert_eq!(h.vault_balance - h.loan.collateral_amount, 9);
    assert_eq!(h.cron(150_000_000).unwrap(), 1);
    assert_eq!(h.loan.remaining_debt, debt - 1);
    assert_eq!(h.loan.yield_earned, 9);
}

#[test]
fn test_fee_on_transfer_deposit_records_received() {
    let mut h = Harness::new(10_000_000_000);
    h.deposit_with_fee(1_000, 10).unwrap();
    assert_eq!(h.loan.collateral_amount, 990);
    assert_eq!(h.vault_balance, 990);

    // The fee shortfall is never mistaken for yield or missing collateral
    assert_eq!(h.cron(150_000_000).unwrap(), 0);
    assert_eq!(h.loan.yield_earned, 0);
}
