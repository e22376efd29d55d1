//! Pool math helpers
//!
//! u64 operands are widened to u128 for products; invariant products of two
//! reserves are compared in U256 so they never overflow.

use crate::{error::FlowError, utils::SafeMath};
use anchor_lang::prelude::*;
use ethnum::U256;
use integer_sqrt::IntegerSquareRoot;

/// floor(a * b / denominator)
pub fn mul_div_floor(a: u64, b: u64, denominator: u64) -> Result<u64> {
    let value = (a as u128)
        .safe_mul(b as u128)?
        .safe_div(denominator as u128)?;
    u64::try_from(value).map_err(|_| FlowError::MathOverflow.into())
}

/// ceil(a * b / denominator)
pub fn mul_div_ceil(a: u64, b: u64, denominator: u64) -> Result<u64> {
    let numerator = (a as u128).safe_mul(b as u128)?;
    let denominator = denominator as u128;
    let quotient = numerator.safe_div(denominator)?;
    let value = if numerator % denominator == 0 {
        quotient
    } else {
        quotient + 1
    };
    u64::try_from(value).map_err(|_| FlowError::MathOverflow.into())
}

/// floor(sqrt(a * b)), the geometric mean used to seed an empty pool
pub fn geometric_mean(a: u64, b: u64) -> u64 {
    // sqrt of a u128 product of two u64 values always fits in u64
    ((a as u128) * (b as u128)).integer_sqrt() as u64
}

/// Constant-product invariant k = a * b
pub fn invariant(reserve_a: u64, reserve_b: u64) -> U256 {
    U256::from(reserve_a as u128) * U256::from(reserve_b as u128)
}

/// |x - y| * 10_000 / reference, saturating at u32::MAX
pub fn deviation_bps(x: u128, y: u128, reference: u128) -> Result<u32> {
    if reference == 0 {
        return Err(FlowError::DivisionByZero.into());
    }
    let diff = U256::from(x.abs_diff(y));
    let bps = diff * U256::from(10_000u128) / U256::from(reference);
    Ok(if bps > U256::from(u32::MAX as u128) {
        u32::MAX
    } else {
        bps.as_u32()
    })
}
