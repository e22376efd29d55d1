//! Publish an external price for the impermanent-loss guard

use crate::{
    error::FlowError,
    events::PriceFeedUpdated,
    logic,
    state::{Pool, PriceFeed},
};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct UpdatePriceFeed<'info> {
    /// Oracle authority
    pub authority: Signer<'info>,

    #[account(has_one = price_feed @ FlowError::InvalidParameters)]
    pub pool: Box<Account<'info, Pool>>,

    #[account(mut)]
    pub price_feed: Box<Account<'info, PriceFeed>>,
}

pub fn handler(ctx: Context<UpdatePriceFeed>, price_q64: u128) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let feed: &mut PriceFeed = &mut ctx.accounts.price_feed;
    logic::update_price_feed(feed, &ctx.accounts.authority.key(), price_q64, now)?;

    emit!(PriceFeedUpdated {
        pool: ctx.accounts.pool.key(),
        price_q64,
        timestamp: now,
    });

    Ok(())
}
