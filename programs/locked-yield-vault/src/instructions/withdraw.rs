use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::{
    adapters::RewardPoolAdapter,
    constants::*,
    controller::VaultController,
    errors::*,
    events::*,
    state::*,
};

/// Burn unlocked shares and unstake the underlying straight to a recipient
#[derive(Accounts)]
pub struct Withdraw<'info> {
    /// Share owner, or a delegate holding an allowance
    pub caller: Signer<'info>,

    /// CHECK: owner of the position; identity is enforced by the position seeds
    pub owner: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault_state.yield_mint.as_ref(), vault_state.pool.as_ref()],
        bump = vault_state.bump,
    )]
    pub vault_state: Box<Account<'info, VaultState>>,

    #[account(
        mut,
        seeds = [POSITION_SEED, vault_state.key().as_ref(), owner.key().as_ref()],
        bump = position.bump,
    )]
    pub position: Box<Account<'info, DepositorPosition>>,

    /// Required only when `caller` is not the owner
    #[account(
        mut,
        seeds = [ALLOWANCE_SEED, vault_state.key().as_ref(), owner.key().as_ref(), caller.key().as_ref()],
        bump = allowance.bump,
    )]
    pub allowance: Option<Account<'info, ShareAllowance>>,

    /// CHECK: PDA used as authority, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault_state.key().as_ref()],
        bump = vault_state.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Receives the unstaked yield token
    #[account(
        mut,
        constraint = recipient_account.mint == vault_state.yield_mint @ VaultError::InvalidMint,
    )]
    pub recipient_account: Box<Account<'info, TokenAccount>>,

    /// CHECK: pinned in vault state
    #[account(executable, address = vault_state.reward_pool_program @ VaultError::InvalidPool)]
    pub reward_pool_program: UncheckedAccount<'info>,

    /// CHECK: pinned in vault state
    #[account(mut, address = vault_state.pool @ VaultError::InvalidPool)]
    pub pool: UncheckedAccount<'info>,

    /// CHECK: pool custody account, validated by the pool program
    #[account(mut)]
    pub pool_custody: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;

    let vault_key = accounts.vault_state.key();
    let caller = accounts.caller.key();
    let recipient = accounts.recipient_account.key();

    let authority_bump = accounts.vault_state.authority_bump;
    let authority_seeds: &[&[u8]] = &[
        VAULT_AUTHORITY_SEED,
        vault_key.as_ref(),
        &[authority_bump],
    ];
    let signer_seeds = &[authority_seeds];

    let mut adapter = RewardPoolAdapter::new(
        accounts.reward_pool_program.to_account_info(),
        accounts.pool.to_account_info(),
        accounts.vault_authority.to_account_info(),
        accounts.token_program.to_account_info(),
        accounts.vault_state.pool_id,
        signer_seeds,
    )
    .with_custody(accounts.pool_custody.to_account_info())
    .with_recipient(accounts.recipient_account.to_account_info());

    let receipt = VaultController::new(&mut accounts.vault_state).withdraw(
        &caller,
        &mut accounts.position,
        accounts.allowance.as_mut().map(|allowance| &mut **allowance),
        amount,
        &recipient,
        now,
        &mut adapter,
    )?;

    emit!(Withdrawn {
        vault: vault_key,
        caller,
        owner: accounts.owner.key(),
        recipient: accounts.recipient_account.owner,
        shares_burned: receipt.shares_burned,
        underlying_returned: receipt.underlying_returned,
        total_shares: accounts.vault_state.total_shares,
        total_underlying_staked: accounts.vault_state.total_underlying_staked,
        timestamp: now,
    });

    Ok(())
}
