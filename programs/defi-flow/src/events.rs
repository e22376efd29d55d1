//! Event definitions

use anchor_lang::prelude::*;

/// Event emitted when a pool is created
#[event]
pub struct PoolInitialized {
    pub pool: Pubkey,
    pub mint_a: Pubkey,
    pub mint_b: Pubkey,
    pub reward_mint: Pubkey,
    pub fee_bps: u16,
    pub timestamp: i64,
}

/// Event emitted when liquidity is deposited
#[event]
pub struct LiquidityAdded {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub token_a_amount: u64,
    pub token_b_amount: u64,
    pub shares_minted: u64,
    pub reward_issued: u64,
    pub timestamp: i64,
}

#[event]
pub struct LiquidityRemoved {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub shares_burned: u64,
    pub token_a_amount: u64,
    pub token_b_amount: u64,
    pub timestamp: i64,
}

/// Event emitted when a swap is executed
#[event]
pub struct SwapExecuted {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub a_to_b: bool,
    pub amount_in: u64,
    pub amount_out: u64,
    pub fee_bps: u16,
    pub reserve_a_after: u64,
    pub reserve_b_after: u64,
    pub timestamp: i64,
}

#[event]
pub struct TokensStaked {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub staked_amount: u64,
    pub total_staked: u64,
}

#[event]
pub struct TokensUnstaked {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub unstaked_amount: u64,
    pub total_staked: u64,
}

#[event]
pub struct RewardsClaimed {
    pub pool: Pubkey,
    pub user: Pubkey,
    pub amount: u64,
}

#[event]
pub struct RewardsDistributed {
    pub pool: Pubkey,
    pub amount: u64,
    pub reward_per_share: u128,
    pub undistributed: u64,
}

/// Event emitted when the fee controller moves the swap fee
#[event]
pub struct FeeAdjusted {
    pub pool: Pubkey,
    pub market_volatility: u64,
    pub average_volatility: u64,
    pub old_fee_bps: u16,
    pub new_fee_bps: u16,
}

#[event]
pub struct PriceFeedUpdated {
    pub pool: Pubkey,
    pub price_q64: u128,
    pub timestamp: i64,
}

/// Event emitted on every impermanent-loss check
#[event]
pub struct ImpermanentLossChecked {
    pub pool: Pubkey,
    pub pool_implied_price_q64: u128,
    pub external_price_q64: u128,
    pub deviation_bps: u32,
    pub threshold_bps: u64,
    pub mitigating: bool,
    pub surcharge_bps: u16,
    pub restricted: bool,
    pub timestamp: i64,
}
