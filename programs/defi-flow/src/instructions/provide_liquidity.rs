//! Provide liquidity
//!
//! Pulls both assets from the depositor at the pool ratio, mints LP shares
//! into the depositor's position and pays the deposit incentive in the
//! reward mint.

use crate::{
    constants::{POOL_AUTHORITY_SEED, POSITION_SEED},
    error::FlowError,
    events::LiquidityAdded,
    logic::{self, TokenAccountRole},
    state::{Asset, LpPosition, Pool},
    utils::{require_role, AccountRole, SplTokenLedger},
};
use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

#[derive(Accounts)]
pub struct ProvideLiquidity<'info> {
    /// Depositor
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        has_one = vault_a @ FlowError::InvalidVault,
        has_one = vault_b @ FlowError::InvalidVault,
        has_one = reward_mint @ FlowError::InvalidMint,
    )]
    pub pool: Box<Account<'info, Pool>>,

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
        constraint = user_token_a.mint == pool.mint_a @ FlowError::InvalidMint,
    )]
    pub user_token_a: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = user_token_b.mint == pool.mint_b @ FlowError::InvalidMint,
    )]
    pub user_token_b: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub vault_a: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub vault_b: Box<Account<'info, TokenAccount>>,

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
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<ProvideLiquidity>, amount_a: u64, amount_b: u64) -> Result<()> {
    let user_key = ctx.accounts.user.key();
    require_role(AccountRole::Depositor, &user_key, &ctx.accounts.user_token_a.owner)?;
    require_role(AccountRole::Depositor, &user_key, &ctx.accounts.user_token_b.owner)?;

    let pool_key = ctx.accounts.pool.key();
    let bump = [ctx.accounts.pool.authority_bump];
    let seeds = Pool::authority_seeds(&pool_key, &bump);

    let mut ledger = SplTokenLedger::new(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.user.to_account_info(),
        ctx.accounts.pool_authority.to_account_info(),
        &seeds,
    )
    .with_account(
        TokenAccountRole::User(Asset::A),
        ctx.accounts.user_token_a.to_account_info(),
    )
    .with_account(
        TokenAccountRole::User(Asset::B),
        ctx.accounts.user_token_b.to_account_info(),
    )
    .with_account(
        TokenAccountRole::Vault(Asset::A),
        ctx.accounts.vault_a.to_account_info(),
    )
    .with_account(
        TokenAccountRole::Vault(Asset::B),
        ctx.accounts.vault_b.to_account_info(),
    )
    .with_account(
        TokenAccountRole::UserReward,
        ctx.accounts.user_reward_account.to_account_info(),
    )
    .with_reward_mint(ctx.accounts.reward_mint.to_account_info());

    let position: &mut LpPosition = &mut ctx.accounts.position;
    if position.owner == Pubkey::default() {
        // Fresh position
        position.owner = user_key;
        position.pool = pool_key;
        position.shares = 0;
        position.bump = ctx.bumps.position;
    }

    let pool: &mut Pool = &mut ctx.accounts.pool;
    let outcome = logic::provide_liquidity(pool, position, &mut ledger, amount_a, amount_b)?;

    emit!(LiquidityAdded {
        pool: pool_key,
        user: user_key,
        token_a_amount: outcome.amount_a,
        token_b_amount: outcome.amount_b,
        shares_minted: outcome.shares,
        reward_issued: outcome.reward,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
