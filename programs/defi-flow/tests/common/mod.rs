//! Shared test infrastructure
//!
//! `MemoryLedger` stands in for the SPL Token program so pool logic can be
//! driven without a validator. Fixtures build pools and positions with
//! sensible defaults. `suite` drives the deployed program end to end.

#![allow(dead_code)]

pub mod suite;

use anchor_lang::prelude::*;
use defi_flow::constants::{DEFAULT_DEPOSIT_REWARD_BPS, DEFAULT_FEE_BPS};
use defi_flow::logic::{LedgerError, TokenAccountRole, TokenLedger};
use defi_flow::state::{
    Asset, FeeConfig, FeeCurve, GuardConfig, LpPosition, MitigationMode, Pool, PriceFeed,
    StakeRecord, StakingVault,
};
use std::collections::HashMap;

// Type alias for test results
pub type TestResult<T = ()> = anyhow::Result<T>;

/// In-memory token balances keyed by account role
#[derive(Debug, Default, Clone)]
pub struct MemoryLedger {
    pub balances: HashMap<TokenAccountRole, u64>,
    pub minted_rewards: u64,
    /// Fail the nth ledger call (0-based) with a CPI error
    pub fail_on_call: Option<usize>,
    pub calls: usize,
}

impl MemoryLedger {
    /// Ledger with a funded user and empty vaults
    pub fn funded(a: u64, b: u64) -> Self {
        let mut ledger = Self::default();
        ledger.balances.insert(TokenAccountRole::User(Asset::A), a);
        ledger.balances.insert(TokenAccountRole::User(Asset::B), b);
        ledger.balances.insert(TokenAccountRole::Vault(Asset::A), 0);
        ledger.balances.insert(TokenAccountRole::Vault(Asset::B), 0);
        ledger.balances.insert(TokenAccountRole::UserReward, 0);
        ledger
    }

    /// Ledger whose vaults already hold `pool`'s reserves
    pub fn for_pool(pool: &Pool, user_a: u64, user_b: u64) -> Self {
        let mut ledger = Self::funded(user_a, user_b);
        ledger.balances.insert(TokenAccountRole::Vault(Asset::A), pool.reserve_a);
        ledger.balances.insert(TokenAccountRole::Vault(Asset::B), pool.reserve_b);
        ledger
    }

    pub fn failing_on(mut self, call: usize) -> Self {
        self.fail_on_call = Some(call);
        self
    }

    pub fn balance(&self, role: TokenAccountRole) -> u64 {
        self.balances.get(&role).copied().unwrap_or(0)
    }

    fn tick(&mut self) -> std::result::Result<(), LedgerError> {
        let call = self.calls;
        self.calls += 1;
        if self.fail_on_call == Some(call) {
            return Err(LedgerError::Cpi(format!("injected failure on call {}", call)));
        }
        Ok(())
    }
}

impl TokenLedger for MemoryLedger {
    fn transfer(
        &mut self,
        from: TokenAccountRole,
        to: TokenAccountRole,
        amount: u64,
    ) -> std::result::Result<(), LedgerError> {
        self.tick()?;
        let source = *self
            .balances
            .get(&from)
            .ok_or(LedgerError::UnknownAccount(from))?;
        if !self.balances.contains_key(&to) {
            return Err(LedgerError::UnknownAccount(to));
        }
        if source < amount {
            return Err(LedgerError::InsufficientFunds(from));
        }
        self.balances.insert(from, source - amount);
        *self.balances.entry(to).or_insert(0) += amount;
        Ok(())
    }

    fn mint_reward(
        &mut self,
        to: TokenAccountRole,
        amount: u64,
    ) -> std::result::Result<(), LedgerError> {
        self.tick()?;
        let balance = self
            .balances
            .get_mut(&to)
            .ok_or(LedgerError::UnknownAccount(to))?;
        *balance += amount;
        self.minted_rewards += amount;
        Ok(())
    }
}

// ============================================================================
// Assertions
// ============================================================================

/// Vault balances must always equal the recorded reserves
pub fn check_vaults_match_reserves(pool: &Pool, ledger: &MemoryLedger) -> TestResult {
    let vault_a = ledger.balance(TokenAccountRole::Vault(Asset::A));
    let vault_b = ledger.balance(TokenAccountRole::Vault(Asset::B));
    anyhow::ensure!(
        vault_a == pool.reserve_a && vault_b == pool.reserve_b,
        "vaults ({}, {}) diverge from reserves ({}, {})",
        vault_a,
        vault_b,
        pool.reserve_a,
        pool.reserve_b
    );
    Ok(())
}

/// Lift a program error into the test result type
pub fn program_err(err: anchor_lang::error::Error) -> anyhow::Error {
    anyhow::anyhow!("program error: {:?}", err)
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn default_curve() -> FeeCurve {
    FeeCurve {
        min_fee_bps: 10,
        max_fee_bps: 100,
        low_volatility: 10,
        high_volatility: 100,
    }
}

pub fn default_guard() -> GuardConfig {
    GuardConfig {
        mode: MitigationMode::WidenFee,
        il_surcharge_bps: 50,
        restricted_max_swap_bps: 100,
        max_price_age_secs: 300,
    }
}

/// Empty pool with default parameters
pub fn empty_pool(admin: Pubkey) -> Pool {
    Pool {
        admin,
        mint_a: Pubkey::new_unique(),
        mint_b: Pubkey::new_unique(),
        vault_a: Pubkey::new_unique(),
        vault_b: Pubkey::new_unique(),
        reward_mint: Pubkey::new_unique(),
        fee_bps: DEFAULT_FEE_BPS,
        ratio_tolerance_bps: 100,
        deposit_reward_bps: DEFAULT_DEPOSIT_REWARD_BPS,
        guard_config: default_guard(),
        ..Default::default()
    }
}

/// Pool holding the given reserves, all shares owned by one position
pub fn seeded_pool(reserve_a: u64, reserve_b: u64, fee_bps: u16) -> (Pool, LpPosition) {
    let mut pool = empty_pool(Pubkey::new_unique());
    let shares = defi_flow::utils::geometric_mean(reserve_a, reserve_b);
    pool.reserve_a = reserve_a;
    pool.reserve_b = reserve_b;
    pool.lp_supply = shares;
    pool.fee_bps = fee_bps;
    let position = LpPosition {
        owner: Pubkey::new_unique(),
        shares,
        ..Default::default()
    };
    (pool, position)
}

pub fn position_for(owner: Pubkey) -> LpPosition {
    LpPosition {
        owner,
        ..Default::default()
    }
}

pub fn fee_config(authority: Pubkey, window_size: u8) -> FeeConfig {
    FeeConfig {
        authority,
        current_fee_bps: DEFAULT_FEE_BPS,
        curve: default_curve(),
        window_size,
        ..Default::default()
    }
}

pub fn price_feed(authority: Pubkey, price_q64: u128, last_update_ts: i64) -> PriceFeed {
    PriceFeed {
        authority,
        price_q64,
        last_update_ts,
        ..Default::default()
    }
}

pub fn stake_record(owner: Pubkey) -> StakeRecord {
    StakeRecord {
        owner,
        ..Default::default()
    }
}

pub fn staking_vault() -> StakingVault {
    StakingVault::default()
}
