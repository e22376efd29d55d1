//! Distribute rewards to stakers
//!
//! Raises the vault's reward-per-share accumulator. Tokens are minted lazily
//! when stakers claim.

use crate::{
    error::FlowError,
    events::RewardsDistributed,
    logic,
    state::{Pool, StakingVault},
};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct DistributeRewards<'info> {
    /// Pool admin
    pub admin: Signer<'info>,

    #[account(has_one = staking_vault @ FlowError::InvalidParameters)]
    pub pool: Box<Account<'info, Pool>>,

    #[account(mut)]
    pub staking_vault: Box<Account<'info, StakingVault>>,
}

pub fn handler(ctx: Context<DistributeRewards>, amount: u64) -> Result<()> {
    let vault: &mut StakingVault = &mut ctx.accounts.staking_vault;
    logic::distribute(vault, &ctx.accounts.pool, &ctx.accounts.admin.key(), amount)?;

    let vault = &ctx.accounts.staking_vault;
    msg!(
        "Distributed {} rewards across {} staked shares",
        amount,
        vault.total_staked
    );
    emit!(RewardsDistributed {
        pool: ctx.accounts.pool.key(),
        amount,
        reward_per_share: vault.reward_per_share,
        undistributed: vault.undistributed_rewards,
    });

    Ok(())
}
