//! Checked integer arithmetic
//!
//! Reserve, share and accumulator updates go through `SafeMath` so that an
//! out-of-range intermediate aborts the instruction with `MathOverflow` or
//! `DivisionByZero` instead of wrapping.

use crate::error::FlowError;
use anchor_lang::prelude::*;
use core::fmt::Display;

pub trait SafeMath: Sized {
    fn safe_add(self, rhs: Self) -> Result<Self>;
    fn safe_sub(self, rhs: Self) -> Result<Self>;
    fn safe_mul(self, rhs: Self) -> Result<Self>;
    fn safe_div(self, rhs: Self) -> Result<Self>;
}

fn out_of_range(op: char, lhs: impl Display, rhs: impl Display) -> anchor_lang::error::Error {
    msg!("Arithmetic out of range: {} {} {}", lhs, op, rhs);
    FlowError::MathOverflow.into()
}

macro_rules! impl_safe_math {
    ($($type:ty),+ $(,)?) => {$(
        impl SafeMath for $type {
            fn safe_add(self, rhs: Self) -> Result<Self> {
                self.checked_add(rhs).ok_or_else(|| out_of_range('+', self, rhs))
            }

            fn safe_sub(self, rhs: Self) -> Result<Self> {
                self.checked_sub(rhs).ok_or_else(|| out_of_range('-', self, rhs))
            }

            fn safe_mul(self, rhs: Self) -> Result<Self> {
                self.checked_mul(rhs).ok_or_else(|| out_of_range('*', self, rhs))
            }

            fn safe_div(self, rhs: Self) -> Result<Self> {
                if rhs == 0 {
                    msg!("Division by zero: {} / 0", self);
                    return Err(FlowError::DivisionByZero.into());
                }
                // Unsigned division cannot overflow once rhs != 0
                Ok(self / rhs)
            }
        }
    )+};
}

impl_safe_math!(u16, u64, u128);
