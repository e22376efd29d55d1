//! Fee controller configuration
//!
//! The volatility window is a fixed-capacity ring buffer. `window_size` is
//! chosen at pool creation and never exceeds `MAX_VOLATILITY_WINDOW`.

use crate::constants::MAX_VOLATILITY_WINDOW;
use anchor_lang::prelude::*;

/// Piecewise-linear mapping from average volatility to a fee rate
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeCurve {
    pub min_fee_bps: u16,
    pub max_fee_bps: u16,
    /// At or below this average the fee is `min_fee_bps`
    pub low_volatility: u64,
    /// At or above this average the fee is `max_fee_bps`
    pub high_volatility: u64,
}

impl FeeCurve {
    pub const LEN: usize = 2 + 2 + 8 + 8;
}

#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FeeConfig {
    pub pool: Pubkey,
    /// Only signer allowed to call `adjust_fee`
    pub authority: Pubkey,
    pub current_fee_bps: u16,
    pub curve: FeeCurve,
    pub window_size: u8,
    pub window_len: u8,
    /// Slot the next sample is written to
    pub window_head: u8,
    pub volatility_window: [u64; MAX_VOLATILITY_WINDOW],
    pub bump: u8,
}

impl FeeConfig {
    pub const LEN: usize = 8 + // discriminator
        32 + // pool
        32 + // authority
        2 + // current_fee_bps
        FeeCurve::LEN +
        1 + // window_size
        1 + // window_len
        1 + // window_head
        8 * MAX_VOLATILITY_WINDOW + // volatility_window
        1; // bump

    /// Record a sample, evicting the oldest once the window is full
    pub fn push_sample(&mut self, sample: u64) {
        let size = self.window_size.max(1);
        self.volatility_window[self.window_head as usize] = sample;
        self.window_head = (self.window_head + 1) % size;
        if self.window_len < size {
            self.window_len += 1;
        }
    }

    /// Samples currently held, oldest first
    pub fn samples(&self) -> Vec<u64> {
        let size = self.window_size.max(1) as usize;
        let len = self.window_len as usize;
        let start = (self.window_head as usize + size - len) % size;
        (0..len)
            .map(|i| self.volatility_window[(start + i) % size])
            .collect()
    }

    /// Floor average of the current window, zero when empty
    pub fn average_volatility(&self) -> u64 {
        if self.window_len == 0 {
            return 0;
        }
        // Filled slots are always the first `window_len`
        let sum: u128 = self.volatility_window[..self.window_len as usize]
            .iter()
            .map(|&s| s as u128)
            .sum();
        (sum / self.window_len as u128) as u64
    }
}
