//! Global constants for the pool program
//!
//! Centralized constants for PDA seeds and protocol parameters

// PDA seed constants
pub const POOL_SEED: &[u8] = b"pool";
pub const POOL_AUTHORITY_SEED: &[u8] = b"pool_authority"; // Signs for vaults and the reward mint
pub const VAULT_SEED: &[u8] = b"vault";
pub const REWARD_MINT_SEED: &[u8] = b"reward_mint";
pub const POSITION_SEED: &[u8] = b"position";
pub const STAKE_SEED: &[u8] = b"stake";
pub const STAKING_VAULT_SEED: &[u8] = b"staking_vault";
pub const FEE_CONFIG_SEED: &[u8] = b"fee_config";
pub const PRICE_FEED_SEED: &[u8] = b"price_feed";

// Basis points
pub const BPS_DENOMINATOR: u64 = 10_000;

// Fee constants
pub const DEFAULT_FEE_BPS: u16 = 25; // 0.25%
pub const MAX_FEE_BPS: u16 = 1000; // 10%

// Volatility constants
/// Upper sanity bound for a single volatility sample
pub const MAX_MARKET_VOLATILITY: u64 = 10_000;
/// Capacity of the volatility ring buffer stored in `FeeConfig`
pub const MAX_VOLATILITY_WINDOW: usize = 16;

// Reward constants
/// Fixed-point scale of the reward-per-share accumulator
pub const REWARD_PRECISION: u128 = 1_000_000_000_000;
/// Default deposit incentive, 1% of the accepted deposit
pub const DEFAULT_DEPOSIT_REWARD_BPS: u16 = 100;

// Reward mint
pub const REWARD_DECIMALS: u8 = 6;

// Math constants
pub const Q64: u128 = 1u128 << 64;
