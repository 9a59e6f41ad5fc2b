use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;
use crate::state::PriceReading;
use crate::errors::ProtocolError;
use crate::events::PriceReadingUpdated;

#[derive(Accounts)]
pub struct CreatePriceReading<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        init,
        payer = authority,
        space = PriceReading::DISCRIMINATOR.len() + PriceReading::LEN,
        seeds = [PriceReading::SEED_PREFIX, authority.key().as_ref(), mint.key().as_ref()],
        bump
    )]
    pub price_reading: AccountLoader<'info, PriceReading>,

    pub system_program: Program<'info, System>,
}

impl<'info> CreatePriceReading<'info> {
    pub fn create_price_reading(&mut self, bumps: &CreatePriceReadingBumps, price: u64) -> Result<()> {
        require!(price > 0, ProtocolError::InvalidPrice);

        let timestamp = Clock::get()?.unix_timestamp;
        let mut reading = self.price_reading.load_init()?;
        reading.authority = self.authority.key();
        reading.mint = self.mint.key();
        reading.price = price;
        reading.timestamp = timestamp;
        reading.bump = bumps.price_reading;

        emit!(PriceReadingUpdated {
            price_reading: self.price_reading.key(),
            mint: reading.mint,
            price,
            timestamp,
        });
        Ok(())
    }
}
