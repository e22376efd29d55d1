//! Initialize a pool
//!
//! One-time setup of the pool, its vaults, the reward mint and the fee,
//! price-feed and staking accounts. Reserves start empty; the first deposit
//! sets the price.

use crate::{
    constants::{
        FEE_CONFIG_SEED, MAX_FEE_BPS, POOL_AUTHORITY_SEED, POOL_SEED, PRICE_FEED_SEED,
        REWARD_DECIMALS, REWARD_MINT_SEED, STAKING_VAULT_SEED, VAULT_SEED,
    },
    error::FlowError,
    events::PoolInitialized,
    state::{FeeConfig, FeeCurve, GuardConfig, GuardState, Pool, PriceFeed, StakingVault},
    utils::{validate_bps, validate_fee_curve, validate_guard_config, validate_window_size},
};
use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

/// Initialize pool parameters
#[derive(Clone, AnchorSerialize, AnchorDeserialize)]
pub struct InitializePoolParams {
    /// Starting swap fee (basis points)
    pub fee_bps: u16,
    /// Accepted deposit ratio divergence (basis points)
    pub ratio_tolerance_bps: u16,
    /// Reward-mint incentive on deposits (basis points of the deposit)
    pub deposit_reward_bps: u16,
    /// Volatility to fee mapping
    pub fee_curve: FeeCurve,
    /// Number of samples averaged by the fee controller
    pub volatility_window_size: u8,
    /// Impermanent-loss guard settings
    pub guard: GuardConfig,
    /// Signer for `adjust_fee`
    pub fee_authority: Pubkey,
    /// Signer for `update_price_feed`
    pub oracle_authority: Pubkey,
}

impl InitializePoolParams {
    pub fn validate(&self) -> Result<()> {
        require!(self.fee_bps <= MAX_FEE_BPS, FlowError::InvalidParameters);
        validate_bps(self.ratio_tolerance_bps)?;
        validate_bps(self.deposit_reward_bps)?;
        validate_fee_curve(&self.fee_curve)?;
        validate_window_size(self.volatility_window_size)?;
        validate_guard_config(&self.guard)?;
        Ok(())
    }
}

#[derive(Accounts)]
#[instruction(params: InitializePoolParams)]
pub struct InitializePool<'info> {
    /// Pool admin (payer)
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = Pool::LEN,
        seeds = [POOL_SEED, mint_a.key().as_ref(), mint_b.key().as_ref()],
        bump,
    )]
    pub pool: Box<Account<'info, Pool>>,

    #[account(constraint = mint_a.key() != mint_b.key() @ FlowError::InvalidMint)]
    pub mint_a: Box<Account<'info, Mint>>,

    pub mint_b: Box<Account<'info, Mint>>,

    /// CHECK: PDA signer for vaults and the reward mint
    #[account(
        seeds = [POOL_AUTHORITY_SEED, pool.key().as_ref()],
        bump,
    )]
    pub pool_authority: UncheckedAccount<'info>,

    #[account(
        init,
        payer = admin,
        seeds = [VAULT_SEED, pool.key().as_ref(), mint_a.key().as_ref()],
        bump,
        token::mint = mint_a,
        token::authority = pool_authority,
    )]
    pub vault_a: Box<Account<'info, TokenAccount>>,

    #[account(
        init,
        payer = admin,
        seeds = [VAULT_SEED, pool.key().as_ref(), mint_b.key().as_ref()],
        bump,
        token::mint = mint_b,
        token::authority = pool_authority,
    )]
    pub vault_b: Box<Account<'info, TokenAccount>>,

    #[account(
        init,
        payer = admin,
        seeds = [REWARD_MINT_SEED, pool.key().as_ref()],
        bump,
        mint::decimals = REWARD_DECIMALS,
        mint::authority = pool_authority,
    )]
    pub reward_mint: Box<Account<'info, Mint>>,

    #[account(
        init,
        payer = admin,
        space = FeeConfig::LEN,
        seeds = [FEE_CONFIG_SEED, pool.key().as_ref()],
        bump,
    )]
    pub fee_config: Box<Account<'info, FeeConfig>>,

    #[account(
        init,
        payer = admin,
        space = PriceFeed::LEN,
        seeds = [PRICE_FEED_SEED, pool.key().as_ref()],
        bump,
    )]
    pub price_feed: Box<Account<'info, PriceFeed>>,

    #[account(
        init,
        payer = admin,
        space = StakingVault::LEN,
        seeds = [STAKING_VAULT_SEED, pool.key().as_ref()],
        bump,
    )]
    pub staking_vault: Box<Account<'info, StakingVault>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn handler(ctx: Context<InitializePool>, params: InitializePoolParams) -> Result<()> {
    params.validate()?;

    let pool_key = ctx.accounts.pool.key();
    let clock = Clock::get()?;

    let pool = &mut ctx.accounts.pool;
    pool.admin = ctx.accounts.admin.key();
    pool.mint_a = ctx.accounts.mint_a.key();
    pool.mint_b = ctx.accounts.mint_b.key();
    pool.vault_a = ctx.accounts.vault_a.key();
    pool.vault_b = ctx.accounts.vault_b.key();
    pool.reward_mint = ctx.accounts.reward_mint.key();
    pool.fee_config = ctx.accounts.fee_config.key();
    pool.price_feed = ctx.accounts.price_feed.key();
    pool.staking_vault = ctx.accounts.staking_vault.key();
    pool.reserve_a = 0;
    pool.reserve_b = 0;
    pool.lp_supply = 0;
    pool.fee_bps = params.fee_bps;
    pool.ratio_tolerance_bps = params.ratio_tolerance_bps;
    pool.deposit_reward_bps = params.deposit_reward_bps;
    pool.authority_bump = ctx.bumps.pool_authority;
    pool.guard_config = params.guard;
    pool.guard = GuardState::default();
    pool._reserved = [0; 32];

    let fee_config = &mut ctx.accounts.fee_config;
    fee_config.pool = pool_key;
    fee_config.authority = params.fee_authority;
    fee_config.current_fee_bps = params.fee_bps;
    fee_config.curve = params.fee_curve;
    fee_config.window_size = params.volatility_window_size;
    fee_config.window_len = 0;
    fee_config.window_head = 0;
    fee_config.volatility_window = Default::default();
    fee_config.bump = ctx.bumps.fee_config;

    let price_feed = &mut ctx.accounts.price_feed;
    price_feed.pool = pool_key;
    price_feed.authority = params.oracle_authority;
    price_feed.price_q64 = 0;
    price_feed.last_update_ts = 0;
    price_feed.bump = ctx.bumps.price_feed;

    let staking_vault = &mut ctx.accounts.staking_vault;
    staking_vault.pool = pool_key;
    staking_vault.total_staked = 0;
    staking_vault.reward_per_share = 0;
    staking_vault.undistributed_rewards = 0;
    staking_vault.total_distributed = 0;
    staking_vault.bump = ctx.bumps.staking_vault;

    msg!("Pool initialized: {}", pool_key);
    msg!("Token A Mint: {}", ctx.accounts.mint_a.key());
    msg!("Token B Mint: {}", ctx.accounts.mint_b.key());
    msg!("Reward Mint: {}", ctx.accounts.reward_mint.key());

    emit!(PoolInitialized {
        pool: pool_key,
        mint_a: ctx.accounts.mint_a.key(),
        mint_b: ctx.accounts.mint_b.key(),
        reward_mint: ctx.accounts.reward_mint.key(),
        fee_bps: params.fee_bps,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
