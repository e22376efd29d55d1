//! Unstake LP shares back into the owner's position
//!
//! The position is re-created if it was closed while every share was staked.

use crate::{
    constants::{POSITION_SEED, STAKE_SEED},
    error::FlowError,
    events::TokensUnstaked,
    logic,
    state::{LpPosition, Pool, StakeRecord, StakingVault},
    utils::{require_role, AccountRole},
};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct UnstakeTokens<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(has_one = staking_vault @ FlowError::InvalidParameters)]
    pub pool: Box<Account<'info, Pool>>,

    #[account(mut)]
    pub staking_vault: Box<Account<'info, StakingVault>>,

    #[account(
        init_if_needed,
        payer = user,
        space = LpPosition::LEN,
        seeds = [POSITION_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump,
    )]
    pub position: Box<Account<'info, LpPosition>>,

    #[account(
        mut,
        seeds = [STAKE_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump = stake_record.bump,
        has_one = pool @ FlowError::Unauthorized,
    )]
    pub stake_record: Box<Account<'info, StakeRecord>>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<UnstakeTokens>, amount: u64) -> Result<()> {
    let pool_key = ctx.accounts.pool.key();
    let user_key = ctx.accounts.user.key();
    require_role(AccountRole::ShareOwner, &user_key, &ctx.accounts.stake_record.owner)?;

    let position: &mut LpPosition = &mut ctx.accounts.position;
    if position.owner == Pubkey::default() {
        position.owner = user_key;
        position.pool = pool_key;
        position.shares = 0;
        position.bump = ctx.bumps.position;
    }

    let vault: &mut StakingVault = &mut ctx.accounts.staking_vault;
    let record: &mut StakeRecord = &mut ctx.accounts.stake_record;
    logic::unstake(vault, record, position, amount)?;

    msg!("Unstaked {} shares for {}", amount, user_key);
    emit!(TokensUnstaked {
        pool: pool_key,
        user: user_key,
        unstaked_amount: amount,
        total_staked: ctx.accounts.staking_vault.total_staked,
    });

    Ok(())
}
