/// Core state transitions, independent of account loading.
/// Instruction handlers validate accounts, then call into these modules with
/// plain state structs and a `TokenLedger`, which keeps every rule here
/// testable without a validator.
pub mod ledger;      // Token ledger seam
pub mod pool;        // Reserves, LP shares, swap pricing
pub mod fee;         // Volatility-driven fee controller
pub mod staking;     // LP staking and reward accrual
pub mod impermanent_loss; // Price deviation guard

pub use ledger::*;
pub use pool::*;
pub use fee::*;
pub use staking::*;
pub use impermanent_loss::*;
