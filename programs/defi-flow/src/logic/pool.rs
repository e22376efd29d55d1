//! Pool accounting engine
//!
//! Every operation follows the same shape: quote against the current state,
//! build the next state on a copy, run the ledger calls, then commit. An
//! error at any step leaves `Pool` and `LpPosition` untouched.
//!
//! Rounding always favors the pool: shares minted and amounts withdrawn are
//! floored, amounts pulled from a depositor are ceiled.

use crate::{
    constants::BPS_DENOMINATOR,
    error::FlowError,
    logic::{TokenAccountRole, TokenLedger},
    state::{Asset, LpPosition, Pool, SwapDirection},
    utils::{
        deviation_bps, geometric_mean, invariant, mul_div_ceil, mul_div_floor, validate_amount,
        SafeMath,
    },
};
use anchor_lang::prelude::*;

// =============================================================================
// DATA STRUCTURES & TYPES
// =============================================================================

/// Result of a deposit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProvideOutcome {
    /// Amount of A actually pulled from the depositor
    pub amount_a: u64,
    /// Amount of B actually pulled from the depositor
    pub amount_b: u64,
    pub shares: u64,
    /// Reward-mint incentive issued to the depositor
    pub reward: u64,
}

/// Result of a withdrawal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RemoveOutcome {
    pub shares: u64,
    pub amount_a: u64,
    pub amount_b: u64,
}

/// Priced swap
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapQuote {
    pub direction: SwapDirection,
    pub amount_in: u64,
    /// Input left after the fee is taken; the fee itself stays in the pool
    pub amount_in_after_fee: u64,
    pub amount_out: u64,
    pub fee_bps: u16,
}

// =============================================================================
// QUOTES
// =============================================================================

/// Price a deposit without touching state
pub fn quote_provide_liquidity(pool: &Pool, amount_a: u64, amount_b: u64) -> Result<ProvideOutcome> {
    validate_amount(amount_a)?;
    validate_amount(amount_b)?;

    let (accepted_a, accepted_b, shares) = if pool.is_empty() {
        // First deposit sets the price
        (amount_a, amount_b, geometric_mean(amount_a, amount_b))
    } else {
        require!(
            pool.reserve_a > 0 && pool.reserve_b > 0,
            FlowError::InternalInvariantViolation
        );

        // Compare a/b against reserve_a/reserve_b by cross-multiplying
        let offered = (amount_a as u128).safe_mul(pool.reserve_b as u128)?;
        let required = (amount_b as u128).safe_mul(pool.reserve_a as u128)?;
        let divergence = deviation_bps(offered, required, offered.max(required))?;
        if divergence > pool.ratio_tolerance_bps as u32 {
            msg!(
                "Deposit ratio diverges by {} bps (tolerance {})",
                divergence,
                pool.ratio_tolerance_bps
            );
            return Err(FlowError::RatioMismatch.into());
        }

        let shares_from_a = mul_div_floor(amount_a, pool.lp_supply, pool.reserve_a)?;
        let shares_from_b = mul_div_floor(amount_b, pool.lp_supply, pool.reserve_b)?;
        let shares = shares_from_a.min(shares_from_b);
        require!(shares > 0, FlowError::InsufficientAmount);

        // Pull exactly what the minted shares are worth, rounded up
        let accepted_a = mul_div_ceil(shares, pool.reserve_a, pool.lp_supply)?;
        let accepted_b = mul_div_ceil(shares, pool.reserve_b, pool.lp_supply)?;
        (accepted_a, accepted_b, shares)
    };

    let reward = deposit_reward(accepted_a, accepted_b, pool.deposit_reward_bps)?;

    Ok(ProvideOutcome {
        amount_a: accepted_a,
        amount_b: accepted_b,
        shares,
        reward,
    })
}

/// Reward-mint incentive for a deposit, in reward-mint base units
pub fn deposit_reward(amount_a: u64, amount_b: u64, reward_bps: u16) -> Result<u64> {
    let total = (amount_a as u128).safe_add(amount_b as u128)?;
    let reward = total
        .safe_mul(reward_bps as u128)?
        .safe_div(BPS_DENOMINATOR as u128)?;
    u64::try_from(reward).map_err(|_| FlowError::MathOverflow.into())
}

/// Price a withdrawal of `shares` from a position holding `position_shares`
pub fn quote_remove_liquidity(pool: &Pool, position_shares: u64, shares: u64) -> Result<RemoveOutcome> {
    validate_amount(shares)?;
    require!(shares <= position_shares, FlowError::InsufficientShares);
    require!(shares <= pool.lp_supply, FlowError::InternalInvariantViolation);

    let amount_a = mul_div_floor(shares, pool.reserve_a, pool.lp_supply)?;
    let amount_b = mul_div_floor(shares, pool.reserve_b, pool.lp_supply)?;
    // Burning shares for nothing is never what the caller wants
    require!(amount_a > 0 || amount_b > 0, FlowError::InsufficientAmount);

    Ok(RemoveOutcome {
        shares,
        amount_a,
        amount_b,
    })
}

/// Price a swap at the pool's effective fee
pub fn quote_swap(pool: &Pool, amount_in: u64, direction: SwapDirection) -> Result<SwapQuote> {
    validate_amount(amount_in)?;
    require!(!pool.is_empty(), FlowError::EmptyPool);

    let reserve_in = pool.reserve(direction.input());
    let reserve_out = pool.reserve(direction.output());
    require!(reserve_in > 0 && reserve_out > 0, FlowError::EmptyPool);

    let fee_bps = pool.effective_fee_bps();
    let amount_in_after_fee = mul_div_floor(
        amount_in,
        BPS_DENOMINATOR - fee_bps as u64,
        BPS_DENOMINATOR,
    )?;

    // amount_out = reserve_out * in_eff / (reserve_in + in_eff)
    let denominator = (reserve_in as u128).safe_add(amount_in_after_fee as u128)?;
    let amount_out = (reserve_out as u128)
        .safe_mul(amount_in_after_fee as u128)?
        .safe_div(denominator)? as u64;

    Ok(SwapQuote {
        direction,
        amount_in,
        amount_in_after_fee,
        amount_out,
        fee_bps,
    })
}

// =============================================================================
// STATE TRANSITIONS
// =============================================================================

/// Deposit both assets and mint LP shares to `position`
pub fn provide_liquidity<L: TokenLedger>(
    pool: &mut Pool,
    position: &mut LpPosition,
    ledger: &mut L,
    amount_a: u64,
    amount_b: u64,
) -> Result<ProvideOutcome> {
    let outcome = quote_provide_liquidity(pool, amount_a, amount_b)?;

    let mut next = pool.clone();
    next.reserve_a = next.reserve_a.safe_add(outcome.amount_a)?;
    next.reserve_b = next.reserve_b.safe_add(outcome.amount_b)?;
    next.lp_supply = next.lp_supply.safe_add(outcome.shares)?;
    let position_shares = position.shares.safe_add(outcome.shares)?;

    require!(
        invariant(next.reserve_a, next.reserve_b) >= invariant(pool.reserve_a, pool.reserve_b),
        FlowError::InternalInvariantViolation
    );

    ledger.transfer(
        TokenAccountRole::User(Asset::A),
        TokenAccountRole::Vault(Asset::A),
        outcome.amount_a,
    )?;
    ledger.transfer(
        TokenAccountRole::User(Asset::B),
        TokenAccountRole::Vault(Asset::B),
        outcome.amount_b,
    )?;
    if outcome.reward > 0 {
        ledger.mint_reward(TokenAccountRole::UserReward, outcome.reward)?;
    }

    *pool = next;
    position.shares = position_shares;

    msg!(
        "Liquidity added: {} A, {} B, {} shares minted",
        outcome.amount_a,
        outcome.amount_b,
        outcome.shares
    );
    Ok(outcome)
}

/// Burn `shares` from `position` and pay out the proportional reserves
pub fn remove_liquidity<L: TokenLedger>(
    pool: &mut Pool,
    position: &mut LpPosition,
    ledger: &mut L,
    shares: u64,
) -> Result<RemoveOutcome> {
    let outcome = quote_remove_liquidity(pool, position.shares, shares)?;

    let mut next = pool.clone();
    next.reserve_a = next.reserve_a.safe_sub(outcome.amount_a)?;
    next.reserve_b = next.reserve_b.safe_sub(outcome.amount_b)?;
    next.lp_supply = next.lp_supply.safe_sub(outcome.shares)?;
    let position_shares = position.shares.safe_sub(outcome.shares)?;

    // Either the pool drains completely or both reserves stay positive
    let drained = next.lp_supply == 0 && next.reserve_a == 0 && next.reserve_b == 0;
    let healthy = next.lp_supply > 0 && next.reserve_a > 0 && next.reserve_b > 0;
    require!(drained || healthy, FlowError::InternalInvariantViolation);

    if outcome.amount_a > 0 {
        ledger.transfer(
            TokenAccountRole::Vault(Asset::A),
            TokenAccountRole::User(Asset::A),
            outcome.amount_a,
        )?;
    }
    if outcome.amount_b > 0 {
        ledger.transfer(
            TokenAccountRole::Vault(Asset::B),
            TokenAccountRole::User(Asset::B),
            outcome.amount_b,
        )?;
    }

    *pool = next;
    position.shares = position_shares;

    msg!(
        "Liquidity removed: {} shares burned for {} A, {} B",
        outcome.shares,
        outcome.amount_a,
        outcome.amount_b
    );
    Ok(outcome)
}

/// Swap `amount_in` of the direction's input asset for the other asset
pub fn swap_tokens<L: TokenLedger>(
    pool: &mut Pool,
    ledger: &mut L,
    amount_in: u64,
    min_amount_out: u64,
    direction: SwapDirection,
) -> Result<SwapQuote> {
    validate_amount(amount_in)?;

    if pool.guard.restricted {
        let reserve_in = pool.reserve(direction.input());
        let max_in = mul_div_floor(
            reserve_in,
            pool.guard_config.restricted_max_swap_bps as u64,
            BPS_DENOMINATOR,
        )?;
        if amount_in > max_in {
            msg!("Restricted mode: swap of {} exceeds limit {}", amount_in, max_in);
            return Err(FlowError::PoolRestricted.into());
        }
    }

    let quote = quote_swap(pool, amount_in, direction)?;
    if quote.amount_out < min_amount_out {
        msg!(
            "Slippage exceeded: out {} < minimum {}",
            quote.amount_out,
            min_amount_out
        );
        return Err(FlowError::SlippageExceeded.into());
    }
    require!(quote.amount_out > 0, FlowError::InsufficientAmount);

    let input = direction.input();
    let output = direction.output();
    let mut next = pool.clone();
    // The full input is retained, fee included
    *next.reserve_mut(input) = next.reserve(input).safe_add(amount_in)?;
    *next.reserve_mut(output) = next.reserve(output).safe_sub(quote.amount_out)?;

    let k_before = invariant(pool.reserve_a, pool.reserve_b);
    let k_after = invariant(next.reserve_a, next.reserve_b);
    if k_after < k_before {
        msg!("Constant product decreased: {} -> {}", k_before, k_after);
        return Err(FlowError::InternalInvariantViolation.into());
    }

    ledger.transfer(
        TokenAccountRole::User(input),
        TokenAccountRole::Vault(input),
        amount_in,
    )?;
    ledger.transfer(
        TokenAccountRole::Vault(output),
        TokenAccountRole::User(output),
        quote.amount_out,
    )?;

    *pool = next;
    Ok(quote)
}
