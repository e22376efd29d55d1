//! Staking vault
//!
//! LP shares move between a user's `LpPosition` and their `StakeRecord`;
//! they stay part of `Pool.lp_supply` while staked. Rewards use the
//! accumulator pattern:
//!
//! - `distribute` raises `reward_per_share` by `amount * PRECISION / total_staked`
//! - settling a record credits `(reward_per_share - reward_debt) * staked / PRECISION`
//!   and snapshots `reward_debt = reward_per_share`
//!
//! Stake, unstake and claim settle first, so a new stake never earns rewards
//! distributed before it arrived.

use crate::{
    constants::REWARD_PRECISION,
    error::FlowError,
    logic::{TokenAccountRole, TokenLedger},
    state::{LpPosition, Pool, StakeRecord, StakingVault},
    utils::{require_role, validate_amount, AccountRole, SafeMath},
};
use anchor_lang::prelude::*;
use ethnum::U256;

/// Rewards owed to `record` since its last settlement
pub fn pending_rewards(vault: &StakingVault, record: &StakeRecord) -> Result<u64> {
    let delta = vault.reward_per_share.safe_sub(record.reward_debt)?;
    let pending = U256::from(delta) * U256::from(record.staked_shares as u128)
        / U256::from(REWARD_PRECISION);
    if pending > U256::from(u64::MAX as u128) {
        return Err(FlowError::MathOverflow.into());
    }
    Ok(pending.as_u64())
}

/// Credit pending rewards to `record` and snapshot the accumulator
pub fn settle(vault: &StakingVault, record: &mut StakeRecord) -> Result<u64> {
    let pending = pending_rewards(vault, record)?;
    record.unclaimed_rewards = record.unclaimed_rewards.safe_add(pending)?;
    record.reward_debt = vault.reward_per_share;
    Ok(pending)
}

/// Escrow `amount` LP shares from `position` into `record`
pub fn stake(
    vault: &mut StakingVault,
    record: &mut StakeRecord,
    position: &mut LpPosition,
    amount: u64,
) -> Result<()> {
    validate_amount(amount)?;
    if amount > position.shares {
        msg!("Stake of {} exceeds spendable shares {}", amount, position.shares);
        return Err(FlowError::InsufficientBalance.into());
    }

    let mut next_record = record.clone();
    settle(vault, &mut next_record)?;
    next_record.staked_shares = next_record.staked_shares.safe_add(amount)?;
    let total_staked = vault.total_staked.safe_add(amount)?;
    let position_shares = position.shares.safe_sub(amount)?;

    *record = next_record;
    vault.total_staked = total_staked;
    position.shares = position_shares;
    Ok(())
}

/// Return `amount` staked shares from `record` to `position`
pub fn unstake(
    vault: &mut StakingVault,
    record: &mut StakeRecord,
    position: &mut LpPosition,
    amount: u64,
) -> Result<()> {
    validate_amount(amount)?;
    if amount > record.staked_shares {
        msg!("Unstake of {} exceeds staked shares {}", amount, record.staked_shares);
        return Err(FlowError::InsufficientBalance.into());
    }

    let mut next_record = record.clone();
    settle(vault, &mut next_record)?;
    next_record.staked_shares = next_record.staked_shares.safe_sub(amount)?;
    let total_staked = vault.total_staked.safe_sub(amount)?;
    let position_shares = position.shares.safe_add(amount)?;

    *record = next_record;
    vault.total_staked = total_staked;
    position.shares = position_shares;
    Ok(())
}

/// Settle and mint everything owed to the record's owner
pub fn claim<L: TokenLedger>(
    vault: &StakingVault,
    record: &mut StakeRecord,
    ledger: &mut L,
) -> Result<u64> {
    let mut next_record = record.clone();
    settle(vault, &mut next_record)?;
    let amount = next_record.unclaimed_rewards;
    if amount > 0 {
        ledger.mint_reward(TokenAccountRole::UserReward, amount)?;
    }
    next_record.unclaimed_rewards = 0;

    *record = next_record;
    Ok(amount)
}

/// Credit `amount` reward tokens across all stakers
pub fn distribute(
    vault: &mut StakingVault,
    pool: &Pool,
    caller: &Pubkey,
    amount: u64,
) -> Result<()> {
    require_role(AccountRole::PoolAdmin, caller, &pool.admin)?;
    validate_amount(amount)?;

    let mut next = vault.clone();
    next.total_distributed = next.total_distributed.safe_add(amount)?;
    if next.total_staked == 0 {
        // Nobody to pay yet; hold until someone stakes
        next.undistributed_rewards = next.undistributed_rewards.safe_add(amount)?;
        *vault = next;
        return Ok(());
    }

    let payable = (amount as u128).safe_add(next.undistributed_rewards as u128)?;
    let increment = payable
        .safe_mul(REWARD_PRECISION)?
        .safe_div(next.total_staked as u128)?;
    next.reward_per_share = next.reward_per_share.safe_add(increment)?;
    next.undistributed_rewards = 0;

    *vault = next;
    Ok(())
}
