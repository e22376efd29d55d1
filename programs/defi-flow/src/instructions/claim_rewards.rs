//! Claim staking rewards
//!
//! Settles the caller's record and mints everything owed from the pool's
//! reward mint.

use crate::{
    constants::{POOL_AUTHORITY_SEED, STAKE_SEED},
    error::FlowError,
    events::RewardsClaimed,
    logic::{self, TokenAccountRole},
    state::{Pool, StakeRecord, StakingVault},
    utils::{require_role, AccountRole, SplTokenLedger},
};
use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

#[derive(Accounts)]
pub struct ClaimRewards<'info> {
    pub user: Signer<'info>,

    #[account(
        has_one = staking_vault @ FlowError::InvalidParameters,
        has_one = reward_mint @ FlowError::InvalidMint,
    )]
    pub pool: Box<Account<'info, Pool>>,

    pub staking_vault: Box<Account<'info, StakingVault>>,

    #[account(
        mut,
        seeds = [STAKE_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump = stake_record.bump,
        has_one = pool @ FlowError::Unauthorized,
    )]
    pub stake_record: Box<Account<'info, StakeRecord>>,

    #[account(mut)]
    pub reward_mint: Box<Account<'info, Mint>>,

    #[account(
        mut,
        constraint = user_reward_account.owner == user.key() @ FlowError::Unauthorized,
        constraint = user_reward_account.mint == reward_mint.key() @ FlowError::InvalidMint,
    )]
    pub user_reward_account: Box<Account<'info, TokenAccount>>,

    /// CHECK: PDA signer for the reward mint
    #[account(
        seeds = [POOL_AUTHORITY_SEED, pool.key().as_ref()],
        bump = pool.authority_bump,
    )]
    pub pool_authority: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<ClaimRewards>) -> Result<()> {
    let pool_key = ctx.accounts.pool.key();
    let user_key = ctx.accounts.user.key();
    require_role(AccountRole::ShareOwner, &user_key, &ctx.accounts.stake_record.owner)?;

    let bump = [ctx.accounts.pool.authority_bump];
    let seeds = Pool::authority_seeds(&pool_key, &bump);
    let mut ledger = SplTokenLedger::new(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.user.to_account_info(),
        ctx.accounts.pool_authority.to_account_info(),
        &seeds,
    )
    .with_account(
        TokenAccountRole::UserReward,
        ctx.accounts.user_reward_account.to_account_info(),
    )
    .with_reward_mint(ctx.accounts.reward_mint.to_account_info());

    let record: &mut StakeRecord = &mut ctx.accounts.stake_record;
    let amount = logic::claim(&ctx.accounts.staking_vault, record, &mut ledger)?;

    msg!("Claimed {} reward tokens for {}", amount, user_key);
    emit!(RewardsClaimed {
        pool: pool_key,
        user: user_key,
        amount,
    });

    Ok(())
}
