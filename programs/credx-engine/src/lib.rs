#![allow(unexpected_cfgs)]
use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

use instructions::*;

declare_id!("Ces2ZsycAiQy79EKb9JPcCVosr3FzvrzWEpEy9XRZif5");

#[program]
pub mod credx_engine {
    use super::*;

    /// `ltv_ratio_bps` defaults to 6000 and `max_price_age` to 300 seconds.
    pub fn initialize_protocol(
        ctx: Context<InitializeProtocol>,
        price_reading: Pubkey,
        ltv_ratio_bps: Option<u16>,
        max_price_age: Option<u64>,
    ) -> Result<()> {
        ctx.accounts.initialize_protocol(&ctx.bumps, price_reading, ltv_ratio_bps, max_price_age)
    }

    pub fn set_lock(ctx: Context<UpdateConfig>, locked: bool) -> Result<()> {
        ctx.accounts.set_lock(locked)
    }

    pub fn update_max_price_age(ctx: Context<UpdateConfig>, max_price_age: u64) -> Result<()> {
        ctx.accounts.update_max_price_age(max_price_age)
    }

    pub fn update_price_reading_ref(
        ctx: Context<UpdateConfig>,
        price_reading: Pubkey,
    ) -> Result<()> {
        ctx.accounts.update_price_reading_ref(price_reading)
    }

    pub fn create_price_reading(ctx: Context<CreatePriceReading>, price: u64) -> Result<()> {
        ctx.accounts.create_price_reading(&ctx.bumps, price)
    }

    pub fn update_price_reading(ctx: Context<UpdatePriceReading>, price: u64) -> Result<()> {
        ctx.accounts.update_price_reading(price)
    }

    pub fn initialize_loan(ctx: Context<InitializeLoan>) -> Result<()> {
        ctx.accounts.initialize_loan(&ctx.bumps)
    }

    pub fn deposit_collateral(ctx: Context<DepositCollateral>, amount: u64) -> Result<()> {
        ctx.accounts.deposit_collateral(amount)
    }

    /// Borrows the entire headroom under the LTV limit.
    pub fn lend_credit_token(ctx: Context<LendCreditToken>) -> Result<()> {
        ctx.accounts.lend_credit_token(&ctx.bumps)
    }

    /// Permissionless. Applies unrecorded vault yield to the loan's debt.
    pub fn cron_repayment(ctx: Context<CronRepayment>) -> Result<()> {
        ctx.accounts.cron_repayment(&ctx.bumps)
    }

    pub fn withdraw_collateral(ctx: Context<WithdrawCollateral>) -> Result<()> {
        ctx.accounts.withdraw_collateral()
    }
}
