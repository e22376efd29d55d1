/// Utility module providing arithmetic primitives, validation helpers and
/// the SPL Token implementation of the ledger seam.
pub mod math_safe;            // Overflow-safe arithmetic traits
pub mod math_general;         // Pool math helpers
pub mod validations;          // Parameter and signer-role checks
pub mod transfers;            // SPL Token ledger

pub use math_safe::*;
pub use math_general::*;
pub use validations::*;
pub use transfers::*;
