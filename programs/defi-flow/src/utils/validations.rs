//! Validation helpers shared by instruction handlers

use crate::{
    constants::{BPS_DENOMINATOR, MAX_FEE_BPS, MAX_MARKET_VOLATILITY, MAX_VOLATILITY_WINDOW},
    error::FlowError,
    state::{FeeCurve, GuardConfig},
};
use anchor_lang::prelude::*;

/// Signer roles an instruction can require
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountRole {
    /// Owner of the token accounts funding a deposit
    Depositor,
    /// Owner of an LP position or stake record
    ShareOwner,
    /// Owner of the swap input/output accounts
    Swapper,
    /// `FeeConfig.authority`
    FeeAuthority,
    /// `PriceFeed.authority`
    OracleAuthority,
    /// `Pool.admin`
    PoolAdmin,
}

impl AccountRole {
    pub fn name(self) -> &'static str {
        match self {
            AccountRole::Depositor => "depositor",
            AccountRole::ShareOwner => "share owner",
            AccountRole::Swapper => "swapper",
            AccountRole::FeeAuthority => "fee authority",
            AccountRole::OracleAuthority => "oracle authority",
            AccountRole::PoolAdmin => "pool admin",
        }
    }
}

/// Require that `actual` is the key registered for `role`
pub fn require_role(role: AccountRole, actual: &Pubkey, expected: &Pubkey) -> Result<()> {
    if actual != expected {
        msg!("Unauthorized {}: expected {}, got {}", role.name(), expected, actual);
        return Err(FlowError::Unauthorized.into());
    }
    Ok(())
}

/// Validate a user-supplied token amount
pub fn validate_amount(amount: u64) -> Result<()> {
    require!(amount > 0, FlowError::InsufficientAmount);
    Ok(())
}

/// Validate a basis-point parameter
pub fn validate_bps(bps: u16) -> Result<()> {
    require!(bps as u64 <= BPS_DENOMINATOR, FlowError::InvalidParameters);
    Ok(())
}

/// Validate fee curve bounds and breakpoints
pub fn validate_fee_curve(curve: &FeeCurve) -> Result<()> {
    require!(
        curve.min_fee_bps <= curve.max_fee_bps && curve.max_fee_bps <= MAX_FEE_BPS,
        FlowError::InvalidParameters
    );
    require!(
        curve.low_volatility < curve.high_volatility
            && curve.high_volatility <= MAX_MARKET_VOLATILITY,
        FlowError::InvalidParameters
    );
    Ok(())
}

pub fn validate_window_size(window_size: u8) -> Result<()> {
    require!(
        window_size >= 1 && window_size as usize <= MAX_VOLATILITY_WINDOW,
        FlowError::InvalidParameters
    );
    Ok(())
}

pub fn validate_guard_config(config: &GuardConfig) -> Result<()> {
    require!(config.il_surcharge_bps <= MAX_FEE_BPS, FlowError::InvalidParameters);
    require!(
        config.restricted_max_swap_bps > 0
            && config.restricted_max_swap_bps as u64 <= BPS_DENOMINATOR,
        FlowError::InvalidParameters
    );
    require!(config.max_price_age_secs > 0, FlowError::InvalidParameters);
    Ok(())
}
