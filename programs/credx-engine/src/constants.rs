/// Oracle prices are fixed-point with 6 decimals (150_000_000 = $150).
pub const PRICE_SCALE: u128 = 1_000_000;

pub const BPS_DENOMINATOR: u128 = 10_000;

/// Decimals of the synthetic credit token.
pub const CREDIT_DECIMALS: u8 = 6;

/// 6000 = 60%
pub const DEFAULT_LTV_RATIO_BPS: u16 = 6000;

/// Oracle freshness bound in seconds applied to borrow and repayment.
pub const DEFAULT_MAX_PRICE_AGE: u64 = 300;

pub const PROGRAM_AUTHORITY_SEED: &[u8] = b"program_authority";
pub const CREDIT_MINT_SEED: &[u8] = b"credit";
