use anchor_lang::prelude::*;
use crate::constants::BPS_DENOMINATOR;
use crate::errors::ProtocolError;

#[account]
#[derive(InitSpace)]
pub struct ProtocolState {
    /// Only identity allowed to change configuration
    pub admin: Pubkey,

    /// Synthetic credit token mint (6 decimals, minted by the program authority PDA)
    pub credit_mint: Pubkey,

    /// Price reading trusted for valuing collateral
    pub price_reading: Pubkey,

    /// Maximum loan-to-value ratio (basis points, 6000 = 60%)
    pub ltv_ratio_bps: u16,

    /// Maximum oracle staleness in seconds
    pub max_price_age: u64,

    /// When set, new borrows are rejected. Repayment and withdrawal still work.
    pub is_locked: bool,

    pub bump: u8,
}

impl ProtocolState {
    pub const SEED_PREFIX: &'static [u8] = b"protocol";

    pub fn is_initialized(&self) -> bool {
        self.admin != Pubkey::default()
    }

    /// Only borrowing is gated by the lock.
    pub fn ensure_can_borrow(&self) -> std::result::Result<(), ProtocolError> {
        if self.is_locked {
            return Err(ProtocolError::ProtocolLocked);
        }
        Ok(())
    }

    pub fn validate_price_reading(price_reading: &Pubkey) -> std::result::Result<(), ProtocolError> {
        if *price_reading == Pubkey::default() {
            return Err(ProtocolError::InvalidParameter);
        }
        Ok(())
    }

    pub fn validate_ltv(ltv_ratio_bps: u16) -> std::result::Result<(), ProtocolError> {
        if ltv_ratio_bps == 0 || ltv_ratio_bps as u128 > BPS_DENOMINATOR {
            return Err(ProtocolError::InvalidParameter);
        }
        Ok(())
    }

    pub fn validate_max_price_age(max_price_age: u64) -> std::result::Result<(), ProtocolError> {
        if max_price_age == 0 {
            return Err(ProtocolError::InvalidParameter);
        }
        Ok(())
    }
}
