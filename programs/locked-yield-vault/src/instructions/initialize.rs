use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{constants::*, errors::*, events::*, external::deserialize_reward_pool, state::*};

/// Initialize a new vault over one reward pool
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Deployer, stored as the vault authority
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Vault state PDA
    #[account(
        init,
        payer = authority,
        space = VAULT_STATE_SIZE,
        seeds = [VAULT_SEED, yield_mint.key().as_ref(), pool.key().as_ref()],
        bump
    )]
    pub vault_state: Box<Account<'info, VaultState>>,

    /// Raw liquidity-pool token
    pub pool_token_mint: Box<Account<'info, Mint>>,

    /// Yield-bearing token produced by the conversion service
    pub yield_mint: Box<Account<'info, Mint>>,

    /// Token the reward pool pays out
    pub reward_mint: Box<Account<'info, Mint>>,

    /// CHECK: conversion service program, pinned in vault state
    #[account(executable)]
    pub conversion_service: UncheckedAccount<'info>,

    /// CHECK: reward pool program, pinned in vault state
    #[account(executable)]
    pub reward_pool_program: UncheckedAccount<'info>,

    /// CHECK: external pool state, decoded manually in the handler
    #[account(owner = reward_pool_program.key() @ VaultError::InvalidPool)]
    pub pool: UncheckedAccount<'info>,

    /// CHECK: PDA that owns the vault token accounts, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault_state.key().as_ref()],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        init,
        payer = authority,
        associated_token::mint = pool_token_mint,
        associated_token::authority = vault_authority,
    )]
    pub vault_pool_token_account: Box<Account<'info, TokenAccount>>,

    #[account(
        init,
        payer = authority,
        associated_token::mint = yield_mint,
        associated_token::authority = vault_authority,
    )]
    pub vault_yield_account: Box<Account<'info, TokenAccount>>,

    #[account(
        init,
        payer = authority,
        associated_token::mint = reward_mint,
        associated_token::authority = vault_authority,
    )]
    pub vault_reward_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Initialize>, config: VaultConfig) -> Result<()> {
    // CHECKS: deploy parameters and pool wiring
    config.validate()?;

    let pool_state = deserialize_reward_pool(&ctx.accounts.pool.to_account_info())?;
    require_keys_eq!(
        pool_state.staking_mint,
        ctx.accounts.yield_mint.key(),
        VaultError::InvalidPool
    );
    require_keys_eq!(
        pool_state.reward_mint,
        ctx.accounts.reward_mint.key(),
        VaultError::InvalidPool
    );

    // EFFECTS: Initialize vault state
    let vault_state = &mut ctx.accounts.vault_state;
    vault_state.authority = ctx.accounts.authority.key();
    vault_state.pool_token_mint = ctx.accounts.pool_token_mint.key();
    vault_state.yield_mint = ctx.accounts.yield_mint.key();
    vault_state.reward_mint = ctx.accounts.reward_mint.key();
    vault_state.conversion_service = ctx.accounts.conversion_service.key();
    vault_state.reward_pool_program = ctx.accounts.reward_pool_program.key();
    vault_state.pool = ctx.accounts.pool.key();
    vault_state.treasury = config.treasury;
    vault_state.pool_id = config.pool_id;
    vault_state.lock_duration = config.lock_duration;
    vault_state.total_shares = 0;
    vault_state.total_underlying_staked = 0;
    vault_state.total_rewards_harvested = 0;
    vault_state.last_harvest_at = 0;
    vault_state.bump = ctx.bumps.vault_state;
    vault_state.authority_bump = ctx.bumps.vault_authority;
    vault_state._reserved = [0; 128];

    emit!(VaultInitialized {
        vault: vault_state.key(),
        authority: vault_state.authority,
        pool_token_mint: vault_state.pool_token_mint,
        yield_mint: vault_state.yield_mint,
        reward_mint: vault_state.reward_mint,
        pool: vault_state.pool,
        pool_id: vault_state.pool_id,
        treasury: vault_state.treasury,
        lock_duration: vault_state.lock_duration,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
