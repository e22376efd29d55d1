//! Impermanent-loss check
//!
//! Permissionless: anyone may ask the pool to compare its implied price with
//! the external feed and apply or lift the configured mitigation.

use crate::{
    error::FlowError,
    events::ImpermanentLossChecked,
    logic,
    state::{Pool, PriceFeed},
};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct MitigateImpermanentLoss<'info> {
    pub caller: Signer<'info>,

    #[account(mut, has_one = price_feed @ FlowError::InvalidParameters)]
    pub pool: Box<Account<'info, Pool>>,

    pub price_feed: Box<Account<'info, PriceFeed>>,
}

pub fn handler(ctx: Context<MitigateImpermanentLoss>, price_threshold: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let pool_key = ctx.accounts.pool.key();

    let pool: &mut Pool = &mut ctx.accounts.pool;
    let outcome = logic::mitigate_impermanent_loss(pool, &ctx.accounts.price_feed, price_threshold, now)?;

    let guard = ctx.accounts.pool.guard;
    emit!(ImpermanentLossChecked {
        pool: pool_key,
        pool_implied_price_q64: outcome.snapshot.pool_implied_price_q64,
        external_price_q64: outcome.snapshot.external_price_q64,
        deviation_bps: outcome.snapshot.deviation_bps,
        threshold_bps: price_threshold,
        mitigating: outcome.mitigating,
        surcharge_bps: guard.surcharge_bps,
        restricted: guard.restricted,
        timestamp: now,
    });

    Ok(())
}
