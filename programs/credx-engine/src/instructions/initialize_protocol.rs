use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenInterface};
use crate::constants::{
    CREDIT_DECIMALS, CREDIT_MINT_SEED, DEFAULT_LTV_RATIO_BPS, DEFAULT_MAX_PRICE_AGE,
    PROGRAM_AUTHORITY_SEED,
};
use crate::errors::ProtocolError;
use crate::events::ProtocolInitialized;
use crate::state::ProtocolState;

#[derive(Accounts)]
pub struct InitializeProtocol<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    /// CHECK: PDA used only as mint and burn authority
    #[account(seeds = [PROGRAM_AUTHORITY_SEED], bump)]
    pub program_authority: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = admin,
        mint::decimals = CREDIT_DECIMALS,
        mint::authority = program_authority,
        mint::token_program = token_program,
        seeds = [CREDIT_MINT_SEED, admin.key().as_ref()],
        bump
    )]
    pub credit_mint: InterfaceAccount<'info, Mint>,

    #[account(
        init_if_needed,
        payer = admin,
        space = ProtocolState::DISCRIMINATOR.len() + ProtocolState::INIT_SPACE,
        seeds = [ProtocolState::SEED_PREFIX, admin.key().as_ref()],
        bump
    )]
    pub protocol: Account<'info, ProtocolState>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

impl<'info> InitializeProtocol<'info> {
    pub fn initialize_protocol(
        &mut self,
        bumps: &InitializeProtocolBumps,
        price_reading: Pubkey,
        ltv_ratio_bps: Option<u16>,
        max_price_age: Option<u64>,
    ) -> Result<()> {
        require!(
            !self.protocol.is_initialized(),
            ProtocolError::AlreadyInitialized
        );

        let ltv_ratio_bps = ltv_ratio_bps.unwrap_or(DEFAULT_LTV_RATIO_BPS);
        let max_price_age = max_price_age.unwrap_or(DEFAULT_MAX_PRICE_AGE);
        ProtocolState::validate_price_reading(&price_reading)?;
        ProtocolState::validate_ltv(ltv_ratio_bps)?;
        ProtocolState::validate_max_price_age(max_price_age)?;

        self.protocol.set_inner(ProtocolState {
            admin: self.admin.key(),
            credit_mint: self.credit_mint.key(),
            price_reading,
            ltv_ratio_bps,
            max_price_age,
            is_locked: false,
            bump: bumps.protocol,
        });

        msg!("Protocol initialized by admin: {}", self.admin.key());
        msg!("LTV ratio set to: {} bps", ltv_ratio_bps);

        emit!(ProtocolInitialized {
            protocol: self.protocol.key(),
            admin: self.admin.key(),
            credit_mint: self.credit_mint.key(),
            price_reading,
            ltv_ratio_bps,
            max_price_age,
        });

        Ok(())
    }
}
