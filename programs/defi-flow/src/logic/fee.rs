//! Fee controller
//!
//! The swap fee follows the average of a sliding window of volatility
//! samples through a clamped linear curve:
//!
//! ```text
//! fee
//!  max |            ______
//!      |          /
//!      |        /
//!  min |______/
//!      +------+------+------> average volatility
//!            low    high
//! ```

use crate::{
    constants::MAX_MARKET_VOLATILITY,
    error::FlowError,
    state::{FeeConfig, FeeCurve, Pool},
    utils::{require_role, AccountRole},
};
use anchor_lang::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeAdjustment {
    pub old_fee_bps: u16,
    pub new_fee_bps: u16,
    pub average_volatility: u64,
}

impl FeeCurve {
    /// Fee for a given average volatility. Monotonic non-decreasing.
    pub fn fee_for(&self, average_volatility: u64) -> u16 {
        if average_volatility <= self.low_volatility {
            return self.min_fee_bps;
        }
        if average_volatility >= self.high_volatility {
            return self.max_fee_bps;
        }
        let span = (self.max_fee_bps - self.min_fee_bps) as u128;
        let progress = (average_volatility - self.low_volatility) as u128;
        let range = (self.high_volatility - self.low_volatility) as u128;
        // span * progress / range < span, which fits in u16
        self.min_fee_bps + (span * progress / range) as u16
    }
}

/// Record a volatility sample and reprice the pool fee
pub fn adjust_fee(
    config: &mut FeeConfig,
    pool: &mut Pool,
    caller: &Pubkey,
    market_volatility: u64,
) -> Result<FeeAdjustment> {
    require_role(AccountRole::FeeAuthority, caller, &config.authority)?;
    if market_volatility > MAX_MARKET_VOLATILITY {
        msg!(
            "Volatility sample {} above ceiling {}",
            market_volatility,
            MAX_MARKET_VOLATILITY
        );
        return Err(FlowError::InvalidVolatility.into());
    }

    let mut next = config.clone();
    next.push_sample(market_volatility);
    let average_volatility = next.average_volatility();
    let new_fee_bps = next.curve.fee_for(average_volatility);
    next.current_fee_bps = new_fee_bps;

    let adjustment = FeeAdjustment {
        old_fee_bps: config.current_fee_bps,
        new_fee_bps,
        average_volatility,
    };

    *config = next;
    pool.fee_bps = new_fee_bps;

    msg!(
        "Fee adjusted: {} -> {} bps (avg volatility {})",
        adjustment.old_fee_bps,
        adjustment.new_fee_bps,
        average_volatility
    );
    Ok(adjustment)
}
