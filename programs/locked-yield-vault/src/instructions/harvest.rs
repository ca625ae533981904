use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::{
    adapters::{RewardAccounts, RewardPoolAdapter, TreasurySink},
    constants::*,
    errors::*,
    events::*,
    harvest::HarvestEngine,
    state::*,
};

/// Claim pool rewards and forward them to the treasury
///
/// Any account may sign; keepers run this without special access.
#[derive(Accounts)]
pub struct Harvest<'info> {
    pub caller: Signer<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault_state.yield_mint.as_ref(), vault_state.pool.as_ref()],
        bump = vault_state.bump,
    )]
    pub vault_state: Box<Account<'info, VaultState>>,

    /// CHECK: PDA used as authority, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault_state.key().as_ref()],
        bump = vault_state.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = vault_reward_account.mint == vault_state.reward_mint @ VaultError::InvalidMint,
        constraint = vault_reward_account.owner == vault_authority.key() @ VaultError::InvalidOwner,
    )]
    pub vault_reward_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = treasury_reward_account.mint == vault_state.reward_mint @ VaultError::InvalidMint,
        constraint = treasury_reward_account.owner == vault_state.treasury @ VaultError::InvalidTreasury,
    )]
    pub treasury_reward_account: Box<Account<'info, TokenAccount>>,

    /// CHECK: pinned in vault state
    #[account(executable, address = vault_state.reward_pool_program @ VaultError::InvalidPool)]
    pub reward_pool_program: UncheckedAccount<'info>,

    /// CHECK: pinned in vault state
    #[account(mut, address = vault_state.pool @ VaultError::InvalidPool)]
    pub pool: UncheckedAccount<'info>,

    /// CHECK: pool reward account, validated by the pool program
    #[account(mut)]
    pub reward_vault: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Harvest>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;

    let vault_key = accounts.vault_state.key();
    let authority_bump = accounts.vault_state.authority_bump;
    let authority_seeds: &[&[u8]] = &[
        VAULT_AUTHORITY_SEED,
        vault_key.as_ref(),
        &[authority_bump],
    ];
    let signer_seeds = &[authority_seeds];

    let token_program = accounts.token_program.to_account_info();
    let vault_authority = accounts.vault_authority.to_account_info();
    let treasury = accounts.treasury_reward_account.owner;
    let vault_reward = accounts.vault_reward_account.to_account_info();

    let mut sink = TreasurySink {
        token_program: token_program.clone(),
        vault_reward_account: vault_reward.clone(),
        vault_authority: vault_authority.clone(),
        treasury_account: accounts.treasury_reward_account.to_account_info(),
        treasury,
        signer_seeds,
    };

    let mut adapter = RewardPoolAdapter::new(
        accounts.reward_pool_program.to_account_info(),
        accounts.pool.to_account_info(),
        vault_authority,
        token_program,
        accounts.vault_state.pool_id,
        signer_seeds,
    )
    .with_rewards(RewardAccounts {
        reward_vault: accounts.reward_vault.to_account_info(),
        vault_reward_account: vault_reward,
    });

    let reward = HarvestEngine::new(&mut accounts.vault_state).harvest(&mut adapter, &mut sink, now)?;

    emit!(Harvested {
        vault: vault_key,
        caller: accounts.caller.key(),
        treasury,
        reward_mint: accounts.vault_state.reward_mint,
        reward,
        total_rewards_harvested: accounts.vault_state.total_rewards_harvested,
        timestamp: now,
    });

    Ok(())
}
