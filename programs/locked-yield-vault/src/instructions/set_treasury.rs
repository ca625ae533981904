use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

/// Point harvests at a new treasury
#[derive(Accounts)]
pub struct SetTreasury<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault_state.yield_mint.as_ref(), vault_state.pool.as_ref()],
        bump = vault_state.bump,
        has_one = authority @ VaultError::Unauthorized,
    )]
    pub vault_state: Account<'info, VaultState>,
}

pub fn handler(ctx: Context<SetTreasury>, new_treasury: Pubkey) -> Result<()> {
    require!(
        new_treasury != Pubkey::default(),
        VaultError::InvalidTreasury
    );

    let vault_state = &mut ctx.accounts.vault_state;
    let old_treasury = vault_state.treasury;
    vault_state.treasury = new_treasury;

    emit!(TreasuryUpdated {
        vault: vault_state.key(),
        old_treasury,
        new_treasury,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
