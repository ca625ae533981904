use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    adapters::{DepositorGateway, RewardPoolAdapter, TokenIntake},
    constants::*,
    controller::VaultController,
    errors::*,
    events::*,
    state::*,
};

/// Deposit the raw pool token, convert it, stake it and mint shares 1:1
#[derive(Accounts)]
pub struct DepositBpt<'info> {
    /// Depositor paying the pool token and the position rent
    #[account(mut)]
    pub caller: Signer<'info>,

    /// CHECK: any address may receive shares
    pub receiver: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vault_state.yield_mint.as_ref(), vault_state.pool.as_ref()],
        bump = vault_state.bump,
    )]
    pub vault_state: Box<Account<'info, VaultState>>,

    /// Receiver's position, opened on first deposit
    #[account(
        init_if_needed,
        payer = caller,
        space = DepositorPosition::SPACE,
        seeds = [POSITION_SEED, vault_state.key().as_ref(), receiver.key().as_ref()],
        bump
    )]
    pub position: Box<Account<'info, DepositorPosition>>,

    /// CHECK: PDA used as authority, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault_state.key().as_ref()],
        bump = vault_state.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = caller_pool_token_account.mint == vault_state.pool_token_mint @ VaultError::InvalidMint,
        constraint = caller_pool_token_account.owner == caller.key() @ VaultError::InvalidOwner,
    )]
    pub caller_pool_token_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = vault_pool_token_account.mint == vault_state.pool_token_mint @ VaultError::InvalidMint,
        constraint = vault_pool_token_account.owner == vault_authority.key() @ VaultError::InvalidOwner,
    )]
    pub vault_pool_token_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = vault_yield_account.mint == vault_state.yield_mint @ VaultError::InvalidMint,
        constraint = vault_yield_account.owner == vault_authority.key() @ VaultError::InvalidOwner,
    )]
    pub vault_yield_account: Box<Account<'info, TokenAccount>>,

    /// Minted by the conversion service
    #[account(mut, address = vault_state.yield_mint @ VaultError::InvalidMint)]
    pub yield_mint: Box<Account<'info, Mint>>,

    /// CHECK: pinned in vault state
    #[account(executable, address = vault_state.conversion_service @ VaultError::InvalidConversionService)]
    pub conversion_service: UncheckedAccount<'info>,

    /// CHECK: conversion service state, validated by that program
    #[account(mut, owner = conversion_service.key() @ VaultError::InvalidConversionService)]
    pub depositor_state: UncheckedAccount<'info>,

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
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<DepositBpt>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;

    let vault_key = accounts.vault_state.key();
    let receiver = accounts.receiver.key();
    accounts.position.open(vault_key, receiver, ctx.bumps.position);

    let authority_bump = accounts.vault_state.authority_bump;
    let authority_seeds: &[&[u8]] = &[
        VAULT_AUTHORITY_SEED,
        vault_key.as_ref(),
        &[authority_bump],
    ];
    let signer_seeds = &[authority_seeds];

    let token_program = accounts.token_program.to_account_info();
    let vault_authority = accounts.vault_authority.to_account_info();
    let pool_source = accounts.vault_pool_token_account.to_account_info();
    let vault_yield = accounts.vault_yield_account.to_account_info();

    let mut adapter = RewardPoolAdapter::new(
        accounts.reward_pool_program.to_account_info(),
        accounts.pool.to_account_info(),
        vault_authority.clone(),
        token_program.clone(),
        accounts.vault_state.pool_id,
        signer_seeds,
    )
    .with_custody(accounts.pool_custody.to_account_info())
    .with_stake_source(vault_yield.clone());

    let mut gateway = DepositorGateway {
        program: accounts.conversion_service.to_account_info(),
        depositor_state: accounts.depositor_state.to_account_info(),
        vault_authority,
        source: pool_source,
        yield_mint: accounts.yield_mint.to_account_info(),
        token_program: token_program.clone(),
        destination: vault_yield,
        signer_seeds,
    };

    let mut intake = TokenIntake {
        token_program,
        from: accounts.caller_pool_token_account.to_account_info(),
        authority: accounts.caller.to_account_info(),
        vault_account: accounts.vault_pool_token_account.to_account_info(),
    };

    let receipt = VaultController::new(&mut accounts.vault_state).deposit_bpt(
        &mut accounts.position,
        amount,
        now,
        &mut intake,
        &mut gateway,
        &mut adapter,
    )?;

    emit!(Deposited {
        vault: vault_key,
        caller: accounts.caller.key(),
        receiver,
        converted: true,
        amount,
        staked_amount: receipt.staked_amount,
        shares_minted: receipt.shares_minted,
        unlock_at: receipt.unlock_at,
        total_shares: accounts.vault_state.total_shares,
        total_underlying_staked: accounts.vault_state.total_underlying_staked,
        timestamp: now,
    });

    Ok(())
}
