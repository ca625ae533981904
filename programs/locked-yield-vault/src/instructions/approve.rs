use anchor_lang::prelude::*;

use crate::{constants::*, controller, events::*, state::*};

/// Allow a delegate to withdraw up to `amount` of the owner's shares
#[derive(Accounts)]
pub struct Approve<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    /// CHECK: any address may be a delegate
    pub delegate: UncheckedAccount<'info>,

    #[account(
        seeds = [VAULT_SEED, vault_state.yield_mint.as_ref(), vault_state.pool.as_ref()],
        bump = vault_state.bump,
    )]
    pub vault_state: Box<Account<'info, VaultState>>,

    #[account(
        init_if_needed,
        payer = owner,
        space = ShareAllowance::SPACE,
        seeds = [ALLOWANCE_SEED, vault_state.key().as_ref(), owner.key().as_ref(), delegate.key().as_ref()],
        bump
    )]
    pub allowance: Account<'info, ShareAllowance>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Approve>, amount: u64) -> Result<()> {
    let allowance = &mut ctx.accounts.allowance;

    if allowance.owner == Pubkey::default() {
        allowance.vault = ctx.accounts.vault_state.key();
        allowance.owner = ctx.accounts.owner.key();
        allowance.delegate = ctx.accounts.delegate.key();
        allowance.bump = ctx.bumps.allowance;
    }

    controller::approve(allowance, amount);

    emit!(DelegateApproved {
        vault: allowance.vault,
        owner: allowance.owner,
        delegate: allowance.delegate,
        amount,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
