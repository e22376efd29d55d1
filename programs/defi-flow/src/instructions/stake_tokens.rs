//! Stake LP shares into the pool's staking vault
//!
//! A position whose every share is staked is closed; `unstake_tokens`
//! re-creates it.

use crate::{
    constants::{POSITION_SEED, STAKE_SEED},
    error::FlowError,
    events::TokensStaked,
    logic,
    state::{LpPosition, Pool, StakeRecord, StakingVault},
    utils::{require_role, AccountRole},
};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct StakeTokens<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(has_one = staking_vault @ FlowError::InvalidParameters)]
    pub pool: Box<Account<'info, Pool>>,

    #[account(mut)]
    pub staking_vault: Box<Account<'info, StakingVault>>,

    #[account(
        mut,
        seeds = [POSITION_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump = position.bump,
        has_one = pool @ FlowError::Unauthorized,
    )]
    pub position: Box<Account<'info, LpPosition>>,

    #[account(
        init_if_needed,
        payer = user,
        space = StakeRecord::LEN,
        seeds = [STAKE_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump,
    )]
    pub stake_record: Box<Account<'info, StakeRecord>>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<StakeTokens>, amount: u64) -> Result<()> {
    let pool_key = ctx.accounts.pool.key();
    let user_key = ctx.accounts.user.key();
    require_role(AccountRole::ShareOwner, &user_key, &ctx.accounts.position.owner)?;

    let record: &mut StakeRecord = &mut ctx.accounts.stake_record;
    if record.owner == Pubkey::default() {
        record.owner = user_key;
        record.pool = pool_key;
        record.staked_shares = 0;
        record.reward_debt = ctx.accounts.staking_vault.reward_per_share;
        record.unclaimed_rewards = 0;
        record.bump = ctx.bumps.stake_record;
    }

    let vault: &mut StakingVault = &mut ctx.accounts.staking_vault;
    let position: &mut LpPosition = &mut ctx.accounts.position;
    logic::stake(vault, record, position, amount)?;

    if ctx.accounts.position.is_empty() {
        ctx.accounts
            .position
            .close(ctx.accounts.user.to_account_info())?;
    }

    msg!("Staked {} shares for {}", amount, user_key);
    emit!(TokensStaked {
        pool: pool_key,
        user: user_key,
        staked_amount: amount,
        total_staked: ctx.accounts.staking_vault.total_staked,
    });

    Ok(())
}
