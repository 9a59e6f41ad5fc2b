use anchor_lang::prelude::*;

/// Externally maintained price of a collateral mint. The engine only reads it.
#[account(zero_copy)]
pub struct PriceReading {
    /// Only signer allowed to update the price
    pub authority: Pubkey,

    /// Collateral mint this price values
    pub mint: Pubkey,

    /// Price with 6 decimals (150_000_000 = $150)
    pub price: u64,

    /// Unix timestamp of the last write
    pub timestamp: i64,

    pub bump: u8,
    pub _padding: [u8; 7],
}

impl PriceReading {
    pub const SEED_PREFIX: &'static [u8] = b"price_reading";
    pub const LEN: usize = std::mem::size_of::<PriceReading>();
}
