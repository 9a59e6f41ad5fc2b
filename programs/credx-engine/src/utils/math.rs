use crate::constants::{BPS_DENOMINATOR, CREDIT_DECIMALS, PRICE_SCALE};
use crate::errors::ProtocolError;

type MathResult<T> = std::result::Result<T, ProtocolError>;

fn pow10(exp: u8) -> MathResult<u128> {
    10u128
        .checked_pow(exp as u32)
        .ok_or(ProtocolError::ArithmeticOverflow)
}

/// Value `amount` of collateral in credit-token base units, scaled by
/// `ratio_bps / 10000`.
///
/// value = amount * price * ratio_bps * 10^credit_decimals
///         / (PRICE_SCALE * 10000 * 10^collateral_decimals)
///
/// Every multiplication happens in u128 before the single division so that
/// nothing is floored twice.
pub fn scaled_value(
    amount: u64,
    price: u64,
    collateral_decimals: u8,
    ratio_bps: u16,
) -> MathResult<u64> {
    let mut numerator = (amount as u128)
        .checked_mul(price as u128)
        .and_then(|v| v.checked_mul(ratio_bps as u128))
        .ok_or(ProtocolError::ArithmeticOverflow)?;
    let mut denominator = PRICE_SCALE
        .checked_mul(BPS_DENOMINATOR)
        .ok_or(ProtocolError::ArithmeticOverflow)?;

    if collateral_decimals >= CREDIT_DECIMALS {
        denominator = denominator
            .checked_mul(pow10(collateral_decimals - CREDIT_DECIMALS)?)
            .ok_or(ProtocolError::ArithmeticOverflow)?;
    } else {
        numerator = numerator
            .checked_mul(pow10(CREDIT_DECIMALS - collateral_decimals)?)
            .ok_or(ProtocolError::ArithmeticOverflow)?;
    }

    u64::try_from(numerator / denominator).map_err(|_| ProtocolError::ArithmeticOverflow)
}

/// Full value of `amount` collateral in credit-token base units.
pub fn collateral_value(amount: u64, price: u64, collateral_decimals: u8) -> MathResult<u64> {
    scaled_value(amount, price, collateral_decimals, BPS_DENOMINATOR as u16)
}

/// Largest debt the collateral supports at `price`.
pub fn max_borrow(
    collateral_amount: u64,
    price: u64,
    collateral_decimals: u8,
    ltv_ratio_bps: u16,
) -> MathResult<u64> {
    scaled_value(collateral_amount, price, collateral_decimals, ltv_ratio_bps)
}

/// Remaining headroom under the LTV limit. Zero headroom is an error.
pub fn borrowable(max_borrow: u64, remaining_debt: u64) -> MathResult<u64> {
    match max_borrow.checked_sub(remaining_debt) {
        Some(headroom) if headroom > 0 => Ok(headroom),
        _ => Err(ProtocolError::ExceedsLTV),
    }
}

pub fn is_solvent(
    collateral_amount: u64,
    remaining_debt: u64,
    price: u64,
    collateral_decimals: u8,
    ltv_ratio_bps: u16,
) -> MathResult<bool> {
    let limit = max_borrow(collateral_amount, price, collateral_decimals, ltv_ratio_bps)?;
    Ok(limit >= remaining_debt)
}

/// Collateral sitting in the vault that the loan has not recorded yet.
pub fn unrecorded_yield(vault_balance: u64, recorded_collateral: u64) -> u64 {
    vault_balance.saturating_sub(recorded_collateral)
}

/// Amount a token account actually received between two balance reads.
pub fn balance_delta(before: u64, after: u64) -> MathResult<u64> {
    after
        .checked_sub(before)
        .ok_or(ProtocolError::ArithmeticOverflow)
}

/// Outcome of reconciling a vault balance against recorded collateral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciliation {
    pub new_collateral: u64,
    pub new_debt: u64,
    /// Collateral units absorbed into the recorded amount
    pub applied_yield: u64,
    /// Credit units of debt retired
    pub repaid: u64,
}

/// Diff the vault against the recorded collateral and turn the surplus into
/// debt reduction at `price`. Debt never drops by more than the surplus is
/// worth and never below zero. While debt is outstanding, a surplus worth
/// less than one credit unit is left unrecorded for a later call.
pub fn reconcile_yield(
    vault_balance: u64,
    recorded_collateral: u64,
    price: u64,
    collateral_decimals: u8,
    remaining_debt: u64,
) -> MathResult<Reconciliation> {
    let applied_yield = unrecorded_yield(vault_balance, recorded_collateral);
    if applied_yield == 0 {
        return Err(ProtocolError::NoYield);
    }

    let yield_value = collateral_value(applied_yield, price, collateral_decimals)?;
    let repaid = yield_value.min(remaining_debt);
    if repaid == 0 && remaining_debt > 0 {
        return Err(ProtocolError::NoYield);
    }

    Ok(Reconciliation {
        new_collateral: recorded_collateral
            .checked_add(applied_yield)
            .ok_or(ProtocolError::ArithmeticOverflow)?,
        new_debt: remaining_debt - repaid,
        applied_yield,
        repaid,
    })
}
