//! Error definitions

use anchor_lang::prelude::*;

#[error_code]
pub enum FlowError {
    // Liquidity errors
    #[msg("Amount must be greater than zero")]
    InsufficientAmount,

    #[msg("Not enough LP shares in position")]
    InsufficientShares,

    #[msg("Insufficient balance")]
    InsufficientBalance,

    #[msg("Deposit ratio diverges from the pool ratio beyond tolerance")]
    RatioMismatch,

    #[msg("Pool has no liquidity")]
    EmptyPool,

    // Swap errors
    #[msg("Slippage exceeded")]
    SlippageExceeded,

    #[msg("Pool is in restricted mode and rejects swaps of this size")]
    PoolRestricted,

    // Authority errors
    #[msg("Signer is not authorized for this instruction")]
    Unauthorized,

    // Fee controller errors
    #[msg("Market volatility sample is out of range")]
    InvalidVolatility,

    // Oracle errors
    #[msg("Price feed is stale")]
    StalePriceFeed,

    #[msg("Invalid price")]
    InvalidPrice,

    // Ledger errors
    #[msg("Token ledger transfer failed")]
    LedgerTransferFailed,

    // Fatal
    #[msg("Internal invariant violated: constant product decreased")]
    InternalInvariantViolation,

    // Math errors
    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Division by zero")]
    DivisionByZero,

    // Account errors
    #[msg("Invalid parameters")]
    InvalidParameters,

    #[msg("Invalid token mint")]
    InvalidMint,

    #[msg("Invalid vault")]
    InvalidVault,
}
