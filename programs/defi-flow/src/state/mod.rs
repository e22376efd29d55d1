//! Account state for the pool program

pub mod pool;
pub mod position;
pub mod stake;
pub mod fee_config;
pub mod price_feed;

pub use pool::*;
pub use position::*;
pub use stake::*;
pub use fee_config::*;
pub use price_feed::*;

// Serialized account sizes. Each LEN is 8 (discriminator) plus the Borsh
// encoding of its fields.
#[cfg(test)]
mod size_assertions {
    use super::*;
    use anchor_lang::prelude::*;
    use static_assertions::const_assert_eq;

    const_assert_eq!(Pool::LEN, 383);
    const_assert_eq!(LpPosition::LEN, 81);
    const_assert_eq!(StakingVault::LEN, 81);
    const_assert_eq!(StakeRecord::LEN, 105);
    const_assert_eq!(FeeConfig::LEN, 226);
    const_assert_eq!(PriceFeed::LEN, 97);

    fn encoded_len<T: AnchorSerialize>(value: &T) -> usize {
        let mut buf = Vec::new();
        value.serialize(&mut buf).unwrap();
        buf.len()
    }

    #[test]
    fn test_len_matches_borsh_encoding() {
        assert_eq!(encoded_len(&Pool::default()) + 8, Pool::LEN);
        assert_eq!(encoded_len(&LpPosition::default()) + 8, LpPosition::LEN);
        assert_eq!(encoded_len(&StakingVault::default()) + 8, StakingVault::LEN);
        assert_eq!(encoded_len(&StakeRecord::default()) + 8, StakeRecord::LEN);
        assert_eq!(encoded_len(&FeeConfig::default()) + 8, FeeConfig::LEN);
        assert_eq!(encoded_len(&PriceFeed::default()) + 8, PriceFeed::LEN);
    }
}
