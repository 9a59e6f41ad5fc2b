use anchor_lang::prelude::*;
use crate::errors::ProtocolError;
use crate::state::PriceReading;

/// Seconds since the reading was written. Timestamps in the future count as fresh.
pub fn price_age(timestamp: i64, now: i64) -> u64 {
    now.saturating_sub(timestamp).max(0) as u64
}

/// Check if oracle price data is stale
pub fn is_price_stale(timestamp: i64, now: i64, max_age: u64) -> bool {
    price_age(timestamp, now) > max_age
}

/// Validate a price read from the oracle. Returns the price on success.
pub fn validate_price(
    price: u64,
    timestamp: i64,
    now: i64,
    max_age: u64,
) -> std::result::Result<u64, ProtocolError> {
    if price == 0 {
        return Err(ProtocolError::InvalidPrice);
    }
    if is_price_stale(timestamp, now, max_age) {
        return Err(ProtocolError::StalePrice);
    }
    Ok(price)
}

/// Decode a `PriceReading` from raw account data (discriminator + Pod body).
pub fn parse_price_reading(data: &[u8]) -> std::result::Result<PriceReading, ProtocolError> {
    let disc_len = PriceReading::DISCRIMINATOR.len();
    if data.len() < disc_len + PriceReading::LEN || &data[..disc_len] != PriceReading::DISCRIMINATOR {
        return Err(ProtocolError::InvalidOracleAccount);
    }

    bytemuck::try_pod_read_unaligned::<PriceReading>(&data[disc_len..disc_len + PriceReading::LEN])
        .map_err(|_| ProtocolError::InvalidOracleAccount)
}

/// Price and timestamp of a fresh reading for `mint`.
pub fn read_price(
    oracle_account: &AccountInfo,
    mint: &Pubkey,
    now: i64,
    max_age: u64,
) -> Result<(u64, i64)> {
    require_keys_eq!(*oracle_account.owner, crate::ID, ProtocolError::InvalidOracleAccount);

    let data = oracle_account.try_borrow_data()?;
    let reading = parse_price_reading(&data)?;
    require_keys_eq!(reading.mint, *mint, ProtocolError::InvalidOracleAccount);

    let price = validate_price(reading.price, reading.timestamp, now, max_age)?;
    Ok((price, reading.timestamp))
}
