use anchor_lang::prelude::*;

/// A user's claim on the pool reserves, proportional to `shares / lp_supply`
#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LpPosition {
    pub owner: Pubkey,
    pub pool: Pubkey,
    /// Spendable LP shares (staked shares live in the `StakeRecord`)
    pub shares: u64,
    pub bump: u8,
}

impl LpPosition {
    pub const LEN: usize = 8 + // discriminator
        32 + // owner
        32 + // pool
        8 + // shares
        1; // bump

    pub fn is_empty(&self) -> bool {
        self.shares == 0
    }
}
