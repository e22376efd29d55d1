use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod logic;
pub mod state;
pub mod utils;

pub use instructions::*;
pub use state::*;

declare_id!("F1owDeFiPoo111111111111111111111111111111111");

#[program]
pub mod defi_flow {
    use super::*;

    pub fn initialize_pool(ctx: Context<InitializePool>, params: InitializePoolParams) -> Result<()> {
        instructions::initialize_pool::handler(ctx, params)
    }

    // Liquidity
    pub fn provide_liquidity(
        ctx: Context<ProvideLiquidity>,
        amount_a: u64,
        amount_b: u64,
    ) -> Result<()> {
        instructions::provide_liquidity::handler(ctx, amount_a, amount_b)
    }

    pub fn remove_liquidity(ctx: Context<RemoveLiquidity>, shares: u64) -> Result<()> {
        instructions::remove_liquidity::handler(ctx, shares)
    }

    // Trading
    pub fn swap_tokens(
        ctx: Context<SwapTokens>,
        amount_in: u64,
        min_amount_out: u64,
        direction: SwapDirection,
    ) -> Result<()> {
        instructions::swap_tokens::handler(ctx, amount_in, min_amount_out, direction)
    }

    // Staking
    pub fn stake_tokens(ctx: Context<StakeTokens>, amount: u64) -> Result<()> {
        instructions::stake_tokens::handler(ctx, amount)
    }

    pub fn unstake_tokens(ctx: Context<UnstakeTokens>, amount: u64) -> Result<()> {
        instructions::unstake_tokens::handler(ctx, amount)
    }

    pub fn claim_rewards(ctx: Context<ClaimRewards>) -> Result<()> {
        instructions::claim_rewards::handler(ctx)
    }

    pub fn distribute_rewards(ctx: Context<DistributeRewards>, amount: u64) -> Result<()> {
        instructions::distribute_rewards::handler(ctx, amount)
    }

    // Fee controller
    pub fn adjust_fee(ctx: Context<AdjustFee>, market_volatility: u64) -> Result<()> {
        instructions::adjust_fee::handler(ctx, market_volatility)
    }

    // Impermanent-loss guard
    pub fn update_price_feed(ctx: Context<UpdatePriceFeed>, price_q64: u128) -> Result<()> {
        instructions::update_price_feed::handler(ctx, price_q64)
    }

    pub fn mitigate_impermanent_loss(
        ctx: Context<MitigateImpermanentLoss>,
        price_threshold: u64,
    ) -> Result<()> {
        instructions::mitigate_impermanent_loss::handler(ctx, price_threshold)
    }
}
