//! Adjust the swap fee from a market volatility sample

use crate::{
    error::FlowError,
    events::FeeAdjusted,
    logic,
    state::{FeeConfig, Pool},
};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct AdjustFee<'info> {
    /// Fee authority
    pub authority: Signer<'info>,

    #[account(mut, has_one = fee_config @ FlowError::InvalidParameters)]
    pub pool: Box<Account<'info, Pool>>,

    #[account(mut)]
    pub fee_config: Box<Account<'info, FeeConfig>>,
}

pub fn handler(ctx: Context<AdjustFee>, market_volatility: u64) -> Result<()> {
    let pool_key = ctx.accounts.pool.key();
    let caller = ctx.accounts.authority.key();

    let config: &mut FeeConfig = &mut ctx.accounts.fee_config;
    let pool: &mut Pool = &mut ctx.accounts.pool;
    let adjustment = logic::adjust_fee(config, pool, &caller, market_volatility)?;

    emit!(FeeAdjusted {
        pool: pool_key,
        market_volatility,
        average_volatility: adjustment.average_volatility,
        old_fee_bps: adjustment.old_fee_bps,
        new_fee_bps: adjustment.new_fee_bps,
    });

    Ok(())
}
