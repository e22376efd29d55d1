//! Impermanent-loss guard
//!
//! Compares the reserve-implied price with the external feed. While the
//! deviation exceeds the caller's threshold the pool is in mitigation:
//! either a fee surcharge is applied or large swaps are rejected. Once the
//! deviation falls back under the threshold the mitigation is lifted.
//!
//! The guard assigns state rather than accumulating it, so repeating a check
//! against unchanged prices only refreshes `last_checked_ts`.

use crate::{
    error::FlowError,
    state::{MitigationMode, Pool, PriceFeed, PriceFeedSnapshot},
    utils::{deviation_bps, require_role, AccountRole},
};
use anchor_lang::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuardOutcome {
    pub snapshot: PriceFeedSnapshot,
    pub mitigating: bool,
}

/// Build a snapshot of pool price vs. external price
pub fn price_snapshot(pool: &Pool, feed: &PriceFeed, current_ts: i64) -> Result<PriceFeedSnapshot> {
    if feed.is_stale(current_ts, pool.guard_config.max_price_age_secs) {
        msg!(
            "Price feed stale: last update {}, now {}, max age {}",
            feed.last_update_ts,
            current_ts,
            pool.guard_config.max_price_age_secs
        );
        return Err(FlowError::StalePriceFeed.into());
    }
    require!(feed.price_q64 > 0, FlowError::InvalidPrice);

    let pool_implied_price_q64 = pool.implied_price_q64().ok_or(FlowError::EmptyPool)?;
    require!(pool.reserve_b > 0, FlowError::EmptyPool);

    let deviation = deviation_bps(pool_implied_price_q64, feed.price_q64, feed.price_q64)?;

    Ok(PriceFeedSnapshot {
        pool_implied_price_q64,
        external_price_q64: feed.price_q64,
        deviation_bps: deviation,
        published_ts: feed.last_update_ts,
    })
}

/// Check deviation and set or lift the configured mitigation
pub fn mitigate_impermanent_loss(
    pool: &mut Pool,
    feed: &PriceFeed,
    price_threshold: u64,
    current_ts: i64,
) -> Result<GuardOutcome> {
    let snapshot = price_snapshot(pool, feed, current_ts)?;
    let mitigating = snapshot.deviation_bps as u64 > price_threshold;

    let mut guard = pool.guard;
    match (mitigating, pool.guard_config.mode) {
        (true, MitigationMode::WidenFee) => {
            guard.surcharge_bps = pool.guard_config.il_surcharge_bps;
            guard.restricted = false;
        }
        (true, MitigationMode::RestrictSwaps) => {
            guard.surcharge_bps = 0;
            guard.restricted = true;
        }
        (false, _) => {
            guard.surcharge_bps = 0;
            guard.restricted = false;
        }
    }
    guard.last_deviation_bps = snapshot.deviation_bps;
    guard.last_checked_ts = current_ts;

    if guard.restricted != pool.guard.restricted || guard.surcharge_bps != pool.guard.surcharge_bps {
        msg!(
            "Guard changed: deviation {} bps, threshold {}, surcharge {} bps, restricted {}",
            snapshot.deviation_bps,
            price_threshold,
            guard.surcharge_bps,
            guard.restricted
        );
    }
    pool.guard = guard;

    Ok(GuardOutcome {
        snapshot,
        mitigating,
    })
}

/// Publish a new external price
pub fn update_price_feed(
    feed: &mut PriceFeed,
    caller: &Pubkey,
    price_q64: u128,
    current_ts: i64,
) -> Result<()> {
    require_role(AccountRole::OracleAuthority, caller, &feed.authority)?;
    require!(price_q64 > 0, FlowError::InvalidPrice);
    require!(current_ts > 0, FlowError::InvalidParameters);

    feed.price_q64 = price_q64;
    feed.last_update_ts = current_ts;
    Ok(())
}
