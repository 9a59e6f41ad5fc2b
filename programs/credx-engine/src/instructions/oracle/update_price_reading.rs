use anchor_lang::prelude::*;
use crate::state::PriceReading;
use crate::errors::ProtocolError;
use crate::events::PriceReadingUpdated;

#[derive(Accounts)]
pub struct UpdatePriceReading<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        constraint = price_reading.load()?.authority == authority.key() @ ProtocolError::Unauthorized,
    )]
    pub price_reading: AccountLoader<'info, PriceReading>,
}

impl<'info> UpdatePriceReading<'info> {
    pub fn update_price_reading(&mut self, price: u64) -> Result<()> {
        require!(price > 0, ProtocolError::InvalidPrice);

        let timestamp = Clock::get()?.unix_timestamp;
        let mut reading = self.price_reading.load_mut()?;
        reading.price = price;
        reading.timestamp = timestamp;

        emit!(PriceReadingUpdated {
            price_reading: self.price_reading.key(),
            mint: reading.mint,
            price,
            timestamp,
        });
        Ok(())
    }
}
