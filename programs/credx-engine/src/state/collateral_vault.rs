use anchor_lang::prelude::*;

/// Program-owned holder of a loan's collateral. The tokens themselves sit in
/// the vault's associated token account; its live balance is ground truth and
/// may exceed the loan's recorded collateral once yield accrues.
#[account]
#[derive(InitSpace)]
pub struct CollateralVault {
    pub user: Pubkey,

    /// Collateral token mint
    pub mint: Pubkey,

    /// Decimals of the collateral mint (9 for the yield-bearing asset)
    pub decimals: u8,

    pub bump: u8,
}

impl CollateralVault {
    pub const SEED_PREFIX: &'static [u8] = b"collateral_vault";
}
