//! Swap tokens
//!
//! Constant-product swap against the pool reserves at the current dynamic
//! fee (plus any impermanent-loss surcharge).

use crate::{
    constants::POOL_AUTHORITY_SEED,
    error::FlowError,
    events::SwapExecuted,
    logic::{self, TokenAccountRole},
    state::{Asset, Pool, SwapDirection},
    utils::{require_role, AccountRole, SplTokenLedger},
};
use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

#[derive(Accounts)]
pub struct SwapTokens<'info> {
    /// Swapper
    pub user: Signer<'info>,

    #[account(
        mut,
        has_one = vault_a @ FlowError::InvalidVault,
        has_one = vault_b @ FlowError::InvalidVault,
    )]
    pub pool: Box<Account<'info, Pool>>,

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

    /// CHECK: PDA signer for the output vault
    #[account(
        seeds = [POOL_AUTHORITY_SEED, pool.key().as_ref()],
        bump = pool.authority_bump,
    )]
    pub pool_authority: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(
    ctx: Context<SwapTokens>,
    amount_in: u64,
    min_amount_out: u64,
    direction: SwapDirection,
) -> Result<()> {
    let user_key = ctx.accounts.user.key();
    require_role(AccountRole::Swapper, &user_key, &ctx.accounts.user_token_a.owner)?;
    require_role(AccountRole::Swapper, &user_key, &ctx.accounts.user_token_b.owner)?;

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
    );

    let pool: &mut Pool = &mut ctx.accounts.pool;
    let quote = logic::swap_tokens(pool, &mut ledger, amount_in, min_amount_out, direction)?;

    emit!(SwapExecuted {
        pool: pool_key,
        user: user_key,
        a_to_b: direction == SwapDirection::AToB,
        amount_in: quote.amount_in,
        amount_out: quote.amount_out,
        fee_bps: quote.fee_bps,
        reserve_a_after: ctx.accounts.pool.reserve_a,
        reserve_b_after: ctx.accounts.pool.reserve_b,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
