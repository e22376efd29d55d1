//! External price feed account
//!
//! Written by the oracle authority, read by the impermanent-loss guard.

use anchor_lang::prelude::*;

#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PriceFeed {
    pub pool: Pubkey,
    /// Only signer allowed to publish prices
    pub authority: Pubkey,
    /// Price of asset A in units of asset B (Q64.64)
    pub price_q64: u128,
    pub last_update_ts: i64,
    pub bump: u8,
}

impl PriceFeed {
    pub const LEN: usize = 8 + // discriminator
        32 + // pool
        32 + // authority
        16 + // price_q64
        8 + // last_update_ts
        1; // bump

    /// Check if the feed is older than `max_age_secs`
    pub fn is_stale(&self, current_ts: i64, max_age_secs: u32) -> bool {
        if self.last_update_ts == 0 {
            // Never updated, consider stale
            return true;
        }
        current_ts.saturating_sub(self.last_update_ts) > max_age_secs as i64
    }
}

/// Read-only view combining the pool price with the external price
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceFeedSnapshot {
    pub pool_implied_price_q64: u128,
    pub external_price_q64: u128,
    pub deviation_bps: u32,
    pub published_ts: i64,
}
