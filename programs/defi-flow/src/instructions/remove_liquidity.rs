//! Remove liquidity
//!
//! Burns LP shares from the owner's position and pays out the proportional
//! share of both reserves. The position is closed once it holds no shares.

use crate::{
    constants::{POOL_AUTHORITY_SEED, POSITION_SEED},
    error::FlowError,
    events::LiquidityRemoved,
    logic::{self, TokenAccountRole},
    state::{Asset, LpPosition, Pool},
    utils::{require_role, AccountRole, SplTokenLedger},
};
use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

#[derive(Accounts)]
pub struct RemoveLiquidity<'info> {
    /// LP-share owner
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        has_one = vault_a @ FlowError::InvalidVault,
        has_one = vault_b @ FlowError::InvalidVault,
    )]
    pub pool: Box<Account<'info, Pool>>,

    #[account(
        mut,
        seeds = [POSITION_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump = position.bump,
        has_one = pool @ FlowError::Unauthorized,
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

    /// CHECK: PDA signer for vault withdrawals
    #[account(
        seeds = [POOL_AUTHORITY_SEED, pool.key().as_ref()],
        bump = pool.authority_bump,
    )]
    pub pool_authority: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<RemoveLiquidity>, shares: u64) -> Result<()> {
    let pool_key = ctx.accounts.pool.key();
    let user_key = ctx.accounts.user.key();
    require_role(AccountRole::ShareOwner, &user_key, &ctx.accounts.position.owner)?;
    require_role(AccountRole::ShareOwner, &user_key, &ctx.accounts.user_token_a.owner)?;
    require_role(AccountRole::ShareOwner, &user_key, &ctx.accounts.user_token_b.owner)?;

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
    );

    let position: &mut LpPosition = &mut ctx.accounts.position;
    let pool: &mut Pool = &mut ctx.accounts.pool;
    let outcome = logic::remove_liquidity(pool, position, &mut ledger, shares)?;

    if ctx.accounts.position.is_empty() {
        ctx.accounts
            .position
            .close(ctx.accounts.user.to_account_info())?;
    }

    emit!(LiquidityRemoved {
        pool: pool_key,
        user: user_key,
        shares_burned: outcome.shares,
        token_a_amount: outcome.amount_a,
        token_b_amount: outcome.amount_b,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
