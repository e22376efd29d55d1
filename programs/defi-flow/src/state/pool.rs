//! Pool state account
//!
//! Holds the two reserves, the LP-share supply and the per-pool policy knobs.
//! Reserves are tracked in the account rather than read back from the vaults
//! so that donations to a vault never move the price.

use crate::constants::{MAX_FEE_BPS, POOL_AUTHORITY_SEED, Q64};
use anchor_lang::prelude::*;

/// One side of the pool
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Asset {
    A,
    B,
}

impl Asset {
    pub fn other(self) -> Self {
        match self {
            Asset::A => Asset::B,
            Asset::B => Asset::A,
        }
    }
}

/// Swap direction, named by the asset the swapper pays in
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapDirection {
    AToB,
    BToA,
}

impl SwapDirection {
    pub fn input(self) -> Asset {
        match self {
            SwapDirection::AToB => Asset::A,
            SwapDirection::BToA => Asset::B,
        }
    }

    pub fn output(self) -> Asset {
        self.input().other()
    }
}

/// What the impermanent-loss guard does when the deviation breaches the threshold
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MitigationMode {
    /// Add a temporary surcharge on top of the dynamic fee
    #[default]
    WidenFee,
    /// Reject single swaps larger than `restricted_max_swap_bps` of the input reserve
    RestrictSwaps,
}

/// Static guard configuration, fixed at pool creation
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GuardConfig {
    pub mode: MitigationMode,
    /// Surcharge applied in `WidenFee` mode
    pub il_surcharge_bps: u16,
    /// Largest swap accepted in restricted mode, as bps of the input reserve
    pub restricted_max_swap_bps: u16,
    /// Price feed freshness bound
    pub max_price_age_secs: u32,
}

impl GuardConfig {
    pub const LEN: usize = 1 + 2 + 2 + 4;
}

/// Mutable guard state, written only by `mitigate_impermanent_loss`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GuardState {
    pub restricted: bool,
    pub surcharge_bps: u16,
    pub last_deviation_bps: u32,
    pub last_checked_ts: i64,
}

impl GuardState {
    pub const LEN: usize = 1 + 2 + 4 + 8;
}

#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Pool {
    /// May distribute staking rewards
    pub admin: Pubkey,
    pub mint_a: Pubkey,
    pub mint_b: Pubkey,
    pub vault_a: Pubkey,
    pub vault_b: Pubkey,
    pub reward_mint: Pubkey,
    pub fee_config: Pubkey,
    pub price_feed: Pubkey,
    pub staking_vault: Pubkey,
    pub reserve_a: u64,
    pub reserve_b: u64,
    pub lp_supply: u64,
    /// Dynamic fee, mirrored from `FeeConfig.current_fee_bps`
    pub fee_bps: u16,
    /// Accepted divergence between deposit ratio and pool ratio
    pub ratio_tolerance_bps: u16,
    /// Reward-mint incentive paid on deposits
    pub deposit_reward_bps: u16,
    pub authority_bump: u8,
    pub guard_config: GuardConfig,
    pub guard: GuardState,
    /// Reserved for future use
    pub _reserved: [u8; 32],
}

impl Pool {
    pub const LEN: usize = 8 + // discriminator
        32 * 9 + // keys
        8 + // reserve_a
        8 + // reserve_b
        8 + // lp_supply
        2 + // fee_bps
        2 + // ratio_tolerance_bps
        2 + // deposit_reward_bps
        1 + // authority_bump
        GuardConfig::LEN +
        GuardState::LEN +
        32; // _reserved

    pub fn is_empty(&self) -> bool {
        self.lp_supply == 0
    }

    pub fn reserve(&self, asset: Asset) -> u64 {
        match asset {
            Asset::A => self.reserve_a,
            Asset::B => self.reserve_b,
        }
    }

    pub fn reserve_mut(&mut self, asset: Asset) -> &mut u64 {
        match asset {
            Asset::A => &mut self.reserve_a,
            Asset::B => &mut self.reserve_b,
        }
    }

    /// Fee charged on the next swap: dynamic fee plus any guard surcharge
    pub fn effective_fee_bps(&self) -> u16 {
        self.fee_bps
            .saturating_add(self.guard.surcharge_bps)
            .min(MAX_FEE_BPS)
    }

    /// Price of A in units of B implied by the reserves (Q64.64)
    pub fn implied_price_q64(&self) -> Option<u128> {
        if self.reserve_a == 0 {
            return None;
        }
        // reserve_b < 2^64, so the shift cannot overflow
        Some(((self.reserve_b as u128) * Q64) / self.reserve_a as u128)
    }

    pub fn authority_seeds<'a>(pool_key: &'a Pubkey, bump: &'a [u8; 1]) -> [&'a [u8]; 3] {
        [POOL_AUTHORITY_SEED, pool_key.as_ref(), bump]
    }
}
