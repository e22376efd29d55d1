//! Staking vault state
//!
//! Rewards accrue through a global reward-per-share accumulator. Each record
//! remembers the accumulator value at its last settlement, so settling a
//! staker never touches any other staker.

use anchor_lang::prelude::*;

/// Pool-wide staking bookkeeping
#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct StakingVault {
    pub pool: Pubkey,
    /// LP shares currently escrowed across all records
    pub total_staked: u64,
    /// Accumulated rewards per staked share, scaled by `REWARD_PRECISION`
    pub reward_per_share: u128,
    /// Rewards distributed while nothing was staked, rolled into the next distribution
    pub undistributed_rewards: u64,
    pub total_distributed: u64,
    pub bump: u8,
}

impl StakingVault {
    pub const LEN: usize = 8 + // discriminator
        32 + // pool
        8 + // total_staked
        16 + // reward_per_share
        8 + // undistributed_rewards
        8 + // total_distributed
        1; // bump
}

/// A single staker's record. Zero-balance records are kept.
#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct StakeRecord {
    pub owner: Pubkey,
    pub pool: Pubkey,
    pub staked_shares: u64,
    /// Accumulator snapshot at the last settlement
    pub reward_debt: u128,
    /// Settled but not yet minted rewards
    pub unclaimed_rewards: u64,
    pub bump: u8,
}

impl StakeRecord {
    pub const LEN: usize = 8 + // discriminator
        32 + // owner
        32 + // pool
        8 + // staked_shares
        16 + // reward_debt
        8 + // unclaimed_rewards
        1; // bump
}
