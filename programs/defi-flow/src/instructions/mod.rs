/// Instruction module. Each file holds the accounts context for one
/// instruction and a thin `handler` that loads accounts, calls into `logic`
/// and emits the matching event.

// Pool setup
pub mod initialize_pool;

// Liquidity and trading
pub mod provide_liquidity;
pub mod remove_liquidity;
pub mod swap_tokens;

// Staking
pub mod stake_tokens;
pub mod unstake_tokens;
pub mod claim_rewards;
pub mod distribute_rewards;

// Fee controller and impermanent-loss guard
pub mod adjust_fee;
pub mod update_price_feed;
pub mod mitigate_impermanent_loss;

// Glob re-exports keep Anchor's generated client account modules reachable
pub use initialize_pool::*;
pub use provide_liquidity::*;
pub use remove_liquidity::*;
pub use swap_tokens::*;
pub use stake_tokens::*;
pub use unstake_tokens::*;
pub use claim_rewards::*;
pub use distribute_rewards::*;
pub use adjust_fee::*;
pub use update_price_feed::*;
pub use mitigate_impermanent_loss::*;
