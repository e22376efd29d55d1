//! Token ledger seam
//!
//! Pool logic never touches token accounts directly. It asks a `TokenLedger`
//! to move or mint balances, addressing accounts by role. On-chain the ledger
//! is the SPL Token program reached through CPI (`utils::SplTokenLedger`);
//! tests plug in an in-memory ledger.

use crate::{error::FlowError, state::Asset};
use anchor_lang::prelude::*;

/// Token accounts an instruction can name
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenAccountRole {
    /// Signer's token account for one pooled asset
    User(Asset),
    /// Pool reserve vault for one pooled asset
    Vault(Asset),
    /// Signer's reward-mint token account
    UserReward,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("insufficient funds in {0:?}")]
    InsufficientFunds(TokenAccountRole),
    #[error("account {0:?} was not supplied to this instruction")]
    UnknownAccount(TokenAccountRole),
    #[error("token program call failed: {0}")]
    Cpi(String),
}

impl From<LedgerError> for anchor_lang::error::Error {
    fn from(err: LedgerError) -> Self {
        msg!("Ledger failure: {}", err);
        FlowError::LedgerTransferFailed.into()
    }
}

pub trait TokenLedger {
    /// Move `amount` from one account to another
    fn transfer(
        &mut self,
        from: TokenAccountRole,
        to: TokenAccountRole,
        amount: u64,
    ) -> core::result::Result<(), LedgerError>;

    /// Mint `amount` of the pool's reward token into `to`
    fn mint_reward(
        &mut self,
        to: TokenAccountRole,
        amount: u64,
    ) -> core::result::Result<(), LedgerError>;
}
