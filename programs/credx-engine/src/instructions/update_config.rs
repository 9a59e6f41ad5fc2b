use anchor_lang::prelude::*;
use crate::state::ProtocolState;
use crate::errors::ProtocolError;
use crate::events::ProtocolConfigUpdated;

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [ProtocolState::SEED_PREFIX, protocol.admin.as_ref()],
        bump = protocol.bump,
        constraint = protocol.admin == admin.key() @ ProtocolError::Unauthorized,
    )]
    pub protocol: Account<'info, ProtocolState>,
}

impl<'info> UpdateConfig<'info> {
    pub fn set_lock(&mut self, locked: bool) -> Result<()> {
        self.protocol.is_locked = locked;
        msg!("Protocol lock set to: {}", locked);
        self.emit_updated();
        Ok(())
    }

    pub fn update_max_price_age(&mut self, max_price_age: u64) -> Result<()> {
        ProtocolState::validate_max_price_age(max_price_age)?;
        self.protocol.max_price_age = max_price_age;
        self.emit_updated();
        Ok(())
    }

    pub fn update_price_reading_ref(&mut self, price_reading: Pubkey) -> Result<()> {
        ProtocolState::validate_price_reading(&price_reading)?;
        self.protocol.price_reading = price_reading;
        self.emit_updated();
        Ok(())
    }

    fn emit_updated(&self) {
        emit!(ProtocolConfigUpdated {
            protocol: self.protocol.key(),
            is_locked: self.protocol.is_locked,
            max_price_age: self.protocol.max_price_age,
            price_reading: self.protocol.price_reading,
        });
    }
}
